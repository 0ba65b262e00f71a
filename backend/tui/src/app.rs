//! TUI App State
//!
//! Everything the chat screen shows lives in [`AppState`]. Methods here never
//! perform I/O: work that leaves the process (relay call, file read,
//! clipboard write) is returned as a [`Command`] for the event loop.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use uuid::Uuid;

use codereview_config::{ClientConfig, ThemeMode};
use codereview_core::{Conversation, FileInfo, Message};
use markdown::{extract_code_blocks, COPIED_INDICATOR_MS};

use crate::upload::{format_megabytes, UploadError, UploadedFile};

/// Bot reply appended when the relay call fails.
pub const FALLBACK_REPLY: &str = "Sorry, I could not complete the review.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Typing a chat message.
    Message,
    /// Typing the path of a file to upload.
    UploadPath,
}

/// One copyable code block: which reply it belongs to and its position there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTarget {
    pub message_id: Uuid,
    pub index: usize,
    pub content: String,
}

/// Side effects requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Send this text to the relay for review.
    Review(String),
    /// Read this file and hand the result back via [`AppState::apply_upload`].
    LoadFile(PathBuf),
    /// Write a code block to the clipboard.
    Copy(CodeTarget),
}

#[derive(Debug, Clone)]
struct CopiedIndicator {
    message_id: Uuid,
    index: usize,
    until: Instant,
}

pub struct AppState {
    pub conversation: Conversation,
    pub input: String,
    pub input_mode: InputMode,
    pub loading: bool,
    pub error: Option<String>,
    pub theme: ThemeMode,
    pub max_upload_bytes: u64,
    /// Position in [`AppState::code_targets`]; `None` follows the newest block.
    pub selected_code: Option<usize>,
    /// Lines scrolled up from the bottom of the chat history.
    pub scroll_back: u16,
    pub should_quit: bool,
    copied: Option<CopiedIndicator>,
}

impl AppState {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            conversation: Conversation::new(),
            input: String::new(),
            input_mode: InputMode::Message,
            loading: false,
            error: None,
            theme: config.theme,
            max_upload_bytes: config.max_upload_bytes,
            selected_code: None,
            scroll_back: 0,
            should_quit: false,
            copied: None,
        }
    }

    /// Enter pressed: send the message, or load the typed upload path.
    pub fn submit_input(&mut self) -> Option<Command> {
        match self.input_mode {
            InputMode::Message => self.send_message(),
            InputMode::UploadPath => {
                let path = self.input.trim().to_string();
                self.input.clear();
                self.input_mode = InputMode::Message;
                if path.is_empty() {
                    return None;
                }
                Some(Command::LoadFile(PathBuf::from(path)))
            }
        }
    }

    fn send_message(&mut self) -> Option<Command> {
        let text = self.input.trim().to_string();
        if text.is_empty() || self.loading {
            return None;
        }
        self.input.clear();
        self.conversation.push(Message::user(text.clone()));
        Some(self.begin_review(text))
    }

    fn begin_review(&mut self, code: String) -> Command {
        self.loading = true;
        self.error = None;
        self.scroll_back = 0;
        Command::Review(code)
    }

    pub fn start_upload(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::UploadPath;
    }

    pub fn cancel_upload(&mut self) {
        self.input.clear();
        self.input_mode = InputMode::Message;
    }

    /// Outcome of a [`Command::LoadFile`].
    pub fn apply_upload(&mut self, result: Result<UploadedFile, UploadError>) -> Option<Command> {
        match result {
            Ok(file) => {
                if self.loading {
                    return None;
                }
                self.conversation.push(Message::user_file(
                    file.text.clone(),
                    FileInfo::new(file.name, file.size),
                ));
                Some(self.begin_review(file.text))
            }
            Err(UploadError::TooLarge { name, max, .. }) => {
                let limit = format_megabytes(max);
                self.error = Some(format!("File too large — max {limit}"));
                self.conversation.push(Message::bot(format!(
                    "File {name} is too large. Please upload files smaller than {limit}."
                )));
                None
            }
            Err(UploadError::Read(_)) => {
                self.error = Some("Failed to read file".to_string());
                None
            }
        }
    }

    /// Outcome of a [`Command::Review`]; `Err` carries a printable reason.
    pub fn finish_review(&mut self, result: Result<String, String>) {
        self.loading = false;
        match result {
            Ok(review) => self.conversation.push(Message::bot(review)),
            Err(reason) => {
                self.error = Some(format!("Failed to get review: {reason}"));
                self.conversation.push(Message::bot(FALLBACK_REPLY));
            }
        }
        self.scroll_back = 0;
    }

    /// "New": drop every message. An in-flight review still lands afterwards.
    pub fn new_conversation(&mut self) {
        self.conversation.clear();
        self.error = None;
        self.selected_code = None;
        self.copied = None;
        self.scroll_back = 0;
    }

    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
    }

    /// Copyable code blocks of all bot replies, oldest first.
    pub fn code_targets(&self) -> Vec<CodeTarget> {
        self.conversation
            .iter()
            .filter(|m| m.is_bot())
            .flat_map(|m| {
                extract_code_blocks(&m.text)
                    .into_iter()
                    .enumerate()
                    .map(|(index, content)| CodeTarget {
                        message_id: m.id,
                        index,
                        content,
                    })
            })
            .collect()
    }

    pub fn selected_target(&self) -> Option<CodeTarget> {
        let mut targets = self.code_targets();
        let position = match self.selected_code {
            Some(i) if i < targets.len() => i,
            _ => targets.len().checked_sub(1)?,
        };
        Some(targets.swap_remove(position))
    }

    pub fn select_previous_code(&mut self) {
        let count = self.code_targets().len();
        if count == 0 {
            return;
        }
        let current = self.selected_code.filter(|&i| i < count).unwrap_or(count - 1);
        self.selected_code = Some(current.saturating_sub(1));
    }

    pub fn select_next_code(&mut self) {
        let count = self.code_targets().len();
        if count == 0 {
            return;
        }
        let current = self.selected_code.filter(|&i| i < count).unwrap_or(count - 1);
        self.selected_code = Some((current + 1).min(count - 1));
    }

    pub fn copy_selected(&self) -> Option<Command> {
        self.selected_target().map(Command::Copy)
    }

    /// Record the clipboard outcome. Only a successful copy shows "Copied!".
    pub fn copy_finished(&mut self, target: &CodeTarget, success: bool, now: Instant) {
        if !success {
            return;
        }
        self.copied = Some(CopiedIndicator {
            message_id: target.message_id,
            index: target.index,
            until: now + Duration::from_millis(COPIED_INDICATOR_MS),
        });
    }

    pub fn is_copied(&self, message_id: Uuid, index: usize, now: Instant) -> bool {
        self.copied.as_ref().is_some_and(|c| {
            c.message_id == message_id && c.index == index && now < c.until
        })
    }

    /// Expire the copied indicator.
    pub fn tick(&mut self, now: Instant) {
        if self.copied.as_ref().is_some_and(|c| now >= c.until) {
            self.copied = None;
        }
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_add(lines);
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_back = self.scroll_back.saturating_sub(lines);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}
