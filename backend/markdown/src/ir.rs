//! Markdown Intermediate Representation
//!
//! Blocks are produced by a single top-to-bottom scan and consumed
//! immediately by the renderer; spans live inside a single line.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// `level` is the number of leading `#` (1..=6).
    Heading { level: u8, text: String },
    Paragraph { text: String },
    Blank,
    /// Fenced code body, lines joined by `\n`. The fence language tag is dropped.
    Code { content: String },
    /// Never mixes ordered and unordered items.
    List { ordered: bool, items: Vec<String> },
}

impl Block {
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Block::Heading {
            level,
            text: text.into(),
        }
    }

    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn code(content: impl Into<String>) -> Self {
        Block::Code {
            content: content.into(),
        }
    }

    pub fn list<I, S>(ordered: bool, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Block::List {
            ordered,
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// An inline segment of a single line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "text", rename_all = "snake_case")]
pub enum Span {
    Text(String),
    Code(String),
    Bold(String),
}

impl Span {
    pub fn as_str(&self) -> &str {
        match self {
            Span::Text(s) | Span::Code(s) | Span::Bold(s) => s,
        }
    }
}
