//! Block-to-UI mapping
//!
//! Converts scanned blocks into UI-neutral render nodes. Frontends (the
//! terminal chat view, the plain-text `review` command) draw these nodes;
//! none of them re-parse markdown.

use serde::Serialize;

use crate::inline::tokenize;
use crate::ir::{Block, Span};
use crate::scanner::parse_blocks;

/// Deepest heading tag used for display; levels 4-6 look like level 3.
pub const MAX_HEADING_TAG: u8 = 3;

/// Vertical spacing emitted for a blank line.
pub const BLANK_ROWS: u16 = 1;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    /// `tag_level` drives the visual size, `level` keeps the original depth for styling.
    Heading {
        tag_level: u8,
        level: u8,
        spans: Vec<Span>,
    },
    Paragraph {
        spans: Vec<Span>,
    },
    Spacer {
        rows: u16,
    },
    /// `index` counts code blocks within one reply, starting at 0.
    CodeBlock {
        index: usize,
        content: String,
    },
    List {
        ordered: bool,
        items: Vec<Vec<Span>>,
    },
}

/// Map blocks onto render nodes, numbering code blocks in order.
pub fn render(blocks: &[Block]) -> Vec<RenderNode> {
    let mut code_index = 0;
    blocks
        .iter()
        .map(|block| match block {
            Block::Heading { level, text } => RenderNode::Heading {
                tag_level: (*level).min(MAX_HEADING_TAG),
                level: *level,
                spans: tokenize(text),
            },
            Block::Paragraph { text } => RenderNode::Paragraph {
                spans: tokenize(text),
            },
            Block::Blank => RenderNode::Spacer { rows: BLANK_ROWS },
            Block::Code { content } => {
                let node = RenderNode::CodeBlock {
                    index: code_index,
                    content: content.clone(),
                };
                code_index += 1;
                node
            }
            Block::List { ordered, items } => RenderNode::List {
                ordered: *ordered,
                items: items.iter().map(|item| tokenize(item)).collect(),
            },
        })
        .collect()
}

pub struct Renderer;

impl Renderer {
    /// Scan and map a raw reply in one call.
    pub fn render_markdown(raw: &str) -> Vec<RenderNode> {
        render(&parse_blocks(raw))
    }

    /// Renders nodes to plain text, dropping inline styling but keeping list
    /// markers and code fences readable.
    pub fn to_plain_text(nodes: &[RenderNode]) -> String {
        let mut output = String::new();
        for node in nodes {
            match node {
                RenderNode::Heading { spans, .. } | RenderNode::Paragraph { spans } => {
                    output.push_str(&Self::spans_to_plain(spans));
                    output.push('\n');
                }
                RenderNode::Spacer { rows } => {
                    for _ in 0..*rows {
                        output.push('\n');
                    }
                }
                RenderNode::CodeBlock { content, .. } => {
                    output.push_str("```\n");
                    output.push_str(content);
                    if !content.is_empty() {
                        output.push('\n');
                    }
                    output.push_str("```\n");
                }
                RenderNode::List { ordered, items } => {
                    for (n, item) in items.iter().enumerate() {
                        if *ordered {
                            output.push_str(&format!("{}. ", n + 1));
                        } else {
                            output.push_str("- ");
                        }
                        output.push_str(&Self::spans_to_plain(item));
                        output.push('\n');
                    }
                }
            }
        }
        output
    }

    pub fn spans_to_plain(spans: &[Span]) -> String {
        spans.iter().map(Span::as_str).collect()
    }
}
