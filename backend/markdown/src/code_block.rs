//! Code Block Utilities
//!
//! Helpers for the copy-to-clipboard action on fenced code in a reply.

use crate::ir::Block;
use crate::scanner::parse_blocks;

/// How long the "copied" indicator stays visible after a successful copy.
pub const COPIED_INDICATOR_MS: u64 = 1200;

/// Extracts the verbatim content of every fenced code block, in order.
pub fn extract_code_blocks(raw: &str) -> Vec<String> {
    parse_blocks(raw)
        .into_iter()
        .filter_map(|block| match block {
            Block::Code { content } => Some(content),
            _ => None,
        })
        .collect()
}
