//! Event Loop
//!
//! Owns the terminal, feeds key events into `AppState` and runs the
//! commands it returns. Relay calls and file reads run on spawned tasks and
//! report back over a channel, so the UI keeps redrawing while they work.

use std::io::{self, Stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::{info, warn};

use codereview_config::ClientConfig;

use crate::app::{AppState, Command};
use crate::client::RelayClient;
use crate::clipboard::{copy_to, ClipboardSink, SystemClipboard};
use crate::input::handle_key_event;
use crate::render::draw_ui;
use crate::theme::palette_for;
use crate::upload::{read_upload, UploadError, UploadedFile};

const TICK: Duration = Duration::from_millis(250);

type Tui = Terminal<CrosstermBackend<Stdout>>;

enum Outcome {
    Review(Result<String, String>),
    Upload(Result<UploadedFile, UploadError>),
}

/// Run the chat screen until the user quits.
pub async fn run_chat(config: &ClientConfig) -> Result<()> {
    let client = RelayClient::new(config.relay_url.clone());
    let mut state = AppState::new(config);
    let mut clipboard = SystemClipboard::new();

    info!(relay = %client.base_url(), "Starting chat");
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut state, &client, &mut clipboard).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn event_loop(
    terminal: &mut Tui,
    state: &mut AppState,
    client: &RelayClient,
    clipboard: &mut dyn ClipboardSink,
) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<Outcome>(8);
    let mut events = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);

    loop {
        let now = Instant::now();
        state.tick(now);
        let palette = palette_for(state.theme);
        terminal.draw(|f| draw_ui(f, state, &palette, now))?;
        if state.should_quit {
            return Ok(());
        }

        let command = tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    handle_key_event(key, state)
                }
                Some(Ok(Event::Paste(text))) => {
                    state.input.push_str(&text.replace('\r', ""));
                    None
                }
                Some(Ok(_)) => None,
                Some(Err(e)) => return Err(e).context("Terminal event stream failed"),
                None => return Ok(()),
            },
            Some(outcome) = rx.recv() => match outcome {
                Outcome::Review(result) => {
                    state.finish_review(result);
                    None
                }
                Outcome::Upload(result) => state.apply_upload(result),
            },
            _ = ticker.tick() => None,
        };

        if let Some(command) = command {
            run_command(command, state, client, clipboard, &tx);
        }
    }
}

fn run_command(
    command: Command,
    state: &mut AppState,
    client: &RelayClient,
    clipboard: &mut dyn ClipboardSink,
    tx: &mpsc::Sender<Outcome>,
) {
    match command {
        Command::Review(code) => {
            let client = client.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = client.review(&code).await.map_err(|e| {
                    warn!(error = %e, "Review request failed");
                    e.to_string()
                });
                let _ = tx.send(Outcome::Review(result)).await;
            });
        }
        Command::LoadFile(path) => {
            let max = state.max_upload_bytes;
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = read_upload(&expand_home(path), max).await;
                if let Err(e) = &result {
                    warn!(error = %e, "Upload rejected");
                }
                let _ = tx.send(Outcome::Upload(result)).await;
            });
        }
        Command::Copy(target) => {
            let copied = copy_to(clipboard, &target.content);
            state.copy_finished(&target, copied, Instant::now());
        }
    }
}

/// `~/x` -> `$HOME/x`; other paths unchanged.
fn expand_home(path: PathBuf) -> PathBuf {
    match (path.strip_prefix("~"), std::env::var_os("HOME")) {
        (Ok(rest), Some(home)) => PathBuf::from(home).join(rest),
        _ => path,
    }
}
