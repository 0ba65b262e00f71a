//! Markdown View
//!
//! Draws the render nodes of one bot reply as ratatui lines.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span as TextSpan},
};

use markdown::{RenderNode, Renderer, Span};

use crate::theme::Palette;

/// Code-block decorations for one reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeMarks {
    /// Block the copy key acts on.
    pub selected: Option<usize>,
    /// Block whose "Copied!" indicator is live.
    pub copied: Option<usize>,
}

pub fn markdown_lines(raw: &str, palette: &Palette, marks: CodeMarks) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for node in Renderer::render_markdown(raw) {
        match node {
            RenderNode::Heading {
                tag_level,
                level,
                spans,
            } => {
                let mut style = Style::default().fg(palette.text).add_modifier(Modifier::BOLD);
                if tag_level == 1 {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                if level > tag_level {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                lines.push(Line::from(inline_spans(&spans, style, palette)));
            }
            RenderNode::Paragraph { spans } => {
                let style = Style::default().fg(palette.text);
                lines.push(Line::from(inline_spans(&spans, style, palette)));
            }
            RenderNode::Spacer { rows } => {
                lines.extend((0..rows).map(|_| Line::default()));
            }
            RenderNode::CodeBlock { index, content } => {
                code_block_lines(&mut lines, index, &content, palette, marks);
            }
            RenderNode::List { ordered, items } => {
                let style = Style::default().fg(palette.text);
                for (i, item) in items.iter().enumerate() {
                    let marker = if ordered {
                        format!("  {}. ", i + 1)
                    } else {
                        "  • ".to_string()
                    };
                    let marker_style = Style::default().fg(palette.muted);
                    let mut spans = vec![TextSpan::styled(marker, marker_style)];
                    spans.extend(inline_spans(item, style, palette));
                    lines.push(Line::from(spans));
                }
            }
        }
    }
    lines
}

fn inline_spans(spans: &[Span], base: Style, palette: &Palette) -> Vec<TextSpan<'static>> {
    spans
        .iter()
        .map(|span| match span {
            Span::Text(text) => TextSpan::styled(text.clone(), base),
            Span::Bold(text) => TextSpan::styled(text.clone(), base.add_modifier(Modifier::BOLD)),
            Span::Code(text) => TextSpan::styled(
                text.clone(),
                base.fg(palette.accent).bg(palette.code_bg),
            ),
        })
        .collect()
}

fn code_block_lines(
    lines: &mut Vec<Line<'static>>,
    index: usize,
    content: &str,
    palette: &Palette,
    marks: CodeMarks,
) {
    let border = if marks.selected == Some(index) {
        Style::default().fg(palette.accent).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.border)
    };
    let action = if marks.copied == Some(index) {
        "Copied!"
    } else {
        "Copy"
    };

    lines.push(Line::from(vec![
        TextSpan::styled(format!("┌─ code {} ", index + 1), border),
        TextSpan::styled(format!("[{action}]"), Style::default().fg(palette.muted)),
    ]));
    let body = Style::default().fg(palette.text).bg(palette.code_bg);
    for line in content.split('\n') {
        lines.push(Line::from(vec![
            TextSpan::styled("│ ", border),
            TextSpan::styled(line.to_string(), body),
        ]));
    }
    lines.push(Line::from(TextSpan::styled("└─", border)));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn render(raw: &str, marks: CodeMarks) -> Vec<String> {
        markdown_lines(raw, &Palette::DARK, marks)
            .iter()
            .map(plain)
            .collect()
    }

    #[test]
    fn test_structure_of_a_review() {
        let raw = "## Summary\nUse `x`\n\n1. one\n2. **two**";
        assert_eq!(
            render(raw, CodeMarks::default()),
            vec!["Summary", "Use x", "", "  1. one", "  2. two"]
        );
    }

    #[test]
    fn test_heading_styles() {
        let lines = markdown_lines("# Top\n#### Deep", &Palette::DARK, CodeMarks::default());
        let top = lines[0].spans[0].style;
        let deep = lines[1].spans[0].style;
        assert!(top.add_modifier.contains(Modifier::UNDERLINED));
        assert!(deep.add_modifier.contains(Modifier::ITALIC));
        assert!(deep.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_code_block_frame_and_copied_indicator() {
        let raw = "```\na\nb\n```\n```\nc\n```";
        let marks = CodeMarks {
            selected: Some(1),
            copied: Some(1),
        };
        assert_eq!(
            render(raw, marks),
            vec![
                "┌─ code 1 [Copy]",
                "│ a",
                "│ b",
                "└─",
                "┌─ code 2 [Copied!]",
                "│ c",
                "└─",
            ]
        );
    }

    #[test]
    fn test_inline_code_uses_accent() {
        let lines = markdown_lines("a `b`", &Palette::LIGHT, CodeMarks::default());
        assert_eq!(lines[0].spans[1].style.fg, Some(Palette::LIGHT.accent));
        assert_eq!(lines[0].spans[1].style.bg, Some(Palette::LIGHT.code_bg));
    }
}
