//! Lightweight markdown renderer for LLM review replies.
//!
//! Turns model output into flat blocks (headings, paragraphs, lists, fenced
//! code) and inline spans, then maps them onto UI-neutral render nodes that
//! the chat client draws. This is deliberately not CommonMark: every line is
//! classified on its own and nothing nests.

pub mod code_block;
pub mod inline;
pub mod ir;
pub mod renderer;
pub mod scanner;

pub use code_block::{extract_code_blocks, COPIED_INDICATOR_MS};
pub use inline::tokenize;
pub use ir::{Block, Span};
pub use renderer::{render, RenderNode, Renderer};
pub use scanner::parse_blocks;
