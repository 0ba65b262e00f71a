//! TUI Rendering
//!
//! Translates `AppState` into ratatui widgets and draws them to the frame.

use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use codereview_core::Message;

use crate::app::{AppState, InputMode};
use crate::markdown_view::{markdown_lines, CodeMarks};
use crate::theme::Palette;

const TITLE: &str = "CodeReview AI";
const SUBTITLE: &str = "Powered by Gemini";
const KEY_HINTS: &str =
    "Enter send · Alt+Enter newline · ^O upload · ^L new · ^T theme · Alt+↑/↓ pick code · ^Y copy · Esc quit";

/// Main draw function.
pub fn draw_ui(f: &mut Frame, state: &AppState, palette: &Palette, now: Instant) {
    let error_height = if state.error.is_some() { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Header
            Constraint::Min(3),               // Chat history
            Constraint::Length(error_height), // Error line
            Constraint::Length(5),            // Input box
        ])
        .split(f.area());

    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.text)),
        f.area(),
    );
    draw_header(f, chunks[0], state, palette);
    draw_history(f, chunks[1], state, palette, now);
    if let Some(error) = &state.error {
        f.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(palette.error)),
            chunks[2],
        );
    }
    draw_input(f, chunks[3], state, palette);
}

fn draw_header(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let header = vec![
        Line::from(vec![
            Span::styled(TITLE, Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(format!("  {SUBTITLE}"), Style::default().fg(palette.muted)),
            Span::styled(
                format!("  [theme: {}]", state.theme.label()),
                Style::default().fg(palette.muted),
            ),
        ]),
        Line::from(Span::styled(KEY_HINTS, Style::default().fg(palette.muted))),
    ];
    f.render_widget(Paragraph::new(header), area);
}

/// Lines for the whole conversation, including the typing indicator.
pub fn history_lines(state: &AppState, palette: &Palette, now: Instant) -> Vec<Line<'static>> {
    if state.conversation.is_empty() && !state.loading {
        return vec![
            Line::from(Span::styled(
                "Paste code and press Enter, or press Ctrl+O to upload a file.",
                Style::default().fg(palette.muted),
            )),
            Line::from(Span::styled(
                "The review comes back as markdown with copyable code blocks.",
                Style::default().fg(palette.muted),
            )),
        ];
    }

    let selected = state
        .selected_target()
        .map(|target| (target.message_id, target.index));
    let mut lines = Vec::new();
    for message in state.conversation.iter() {
        lines.extend(message_lines(message, state, palette, selected, now));
        lines.push(Line::default());
    }
    if state.loading {
        lines.push(Line::from(vec![
            Span::styled("🤖 ", Style::default().fg(palette.bot)),
            Span::styled("● ● ●", Style::default().fg(palette.muted)),
        ]));
    }
    lines
}

fn message_lines(
    message: &Message,
    state: &AppState,
    palette: &Palette,
    selected: Option<(uuid::Uuid, usize)>,
    now: Instant,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if message.is_bot() {
        lines.push(Line::from(Span::styled(
            "🤖 Reviewer",
            Style::default().fg(palette.bot).add_modifier(Modifier::BOLD),
        )));
        let count = markdown::extract_code_blocks(&message.text).len();
        let marks = CodeMarks {
            selected: selected
                .filter(|(id, _)| *id == message.id)
                .map(|(_, index)| index),
            copied: (0..count).find(|&i| state.is_copied(message.id, i, now)),
        };
        lines.extend(markdown_lines(&message.text, palette, marks));
        return lines;
    }

    lines.push(Line::from(Span::styled(
        "🧑 You",
        Style::default().fg(palette.user).add_modifier(Modifier::BOLD),
    )));
    match &message.file {
        Some(file) => lines.push(Line::from(Span::styled(
            format!("📄 {} ({})", file.name, file.size_label()),
            Style::default().fg(palette.text),
        ))),
        None => {
            let style = Style::default().fg(palette.text);
            lines.extend(
                message
                    .text
                    .lines()
                    .map(|line| Line::from(Span::styled(line.to_string(), style))),
            );
        }
    }
    lines
}

fn draw_history(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette, now: Instant) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .style(Style::default().bg(palette.bg_elev));
    let inner = block.inner(area);
    let paragraph = Paragraph::new(history_lines(state, palette, now)).wrap(Wrap { trim: false });

    let total_rows = paragraph.line_count(inner.width);
    let offset = scroll_offset(total_rows, inner.height, state.scroll_back);
    f.render_widget(paragraph.block(block).scroll((offset, 0)), area);
}

/// Top row to show so the view sticks to the bottom unless the user scrolled
/// back. Histories taller than `u16::MAX` rows pin to the largest offset.
fn scroll_offset(total_rows: usize, height: u16, scroll_back: u16) -> u16 {
    let bottom = total_rows.saturating_sub(usize::from(height));
    let offset = bottom.saturating_sub(usize::from(scroll_back));
    u16::try_from(offset).unwrap_or(u16::MAX)
}

fn draw_input(f: &mut Frame, area: Rect, state: &AppState, palette: &Palette) {
    let title = match (state.input_mode, state.loading) {
        (InputMode::UploadPath, _) => "File path (Enter to upload, Esc to cancel)",
        (InputMode::Message, true) => "Reviewing…",
        (InputMode::Message, false) => "Paste code or type a message",
    };
    let input = Paragraph::new(state.input.as_str())
        .style(Style::default().fg(palette.text))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.accent)),
        );
    f.render_widget(input, area);
}
