//! Line Scanner
//!
//! Single-pass, line-oriented block recognition. Each line is classified on
//! its own; the only state carried between lines is the open fence buffer
//! and the open list.

use once_cell::sync::Lazy;

use regex::Regex;

use crate::ir::Block;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").unwrap());
static UNORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-*]\s+(.*)$").unwrap());
static ORDERED_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[0-9]+\.\s+(.*)$").unwrap());

const FENCE: &str = "```";

/// Parse raw model output into an ordered sequence of blocks.
///
/// Carriage returns are stripped first. An unterminated fence is recovered
/// as a final code block rather than discarded.
pub fn parse_blocks(raw: &str) -> Vec<Block> {
    let normalized = raw.replace('\r', "");
    let mut scanner = Scanner::default();
    for line in normalized.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

#[derive(Default)]
struct Scanner {
    blocks: Vec<Block>,
    /// `(ordered, items)` of the list being accumulated.
    list: Option<(bool, Vec<String>)>,
    /// Buffered lines while inside a fence.
    code: Option<Vec<String>>,
}

impl Scanner {
    fn feed(&mut self, line: &str) {
        if line.starts_with(FENCE) {
            match self.code.take() {
                Some(buf) => self.blocks.push(Block::code(buf.join("\n"))),
                None => {
                    self.flush_list();
                    self.code = Some(Vec::new());
                }
            }
            return;
        }

        if let Some(buf) = self.code.as_mut() {
            buf.push(line.to_string());
            return;
        }

        if let Some(caps) = HEADING_RE.captures(line) {
            self.flush_list();
            self.blocks.push(Block::heading(caps[1].len() as u8, &caps[2]));
        } else if let Some(caps) = UNORDERED_ITEM_RE.captures(line) {
            self.push_item(false, &caps[1]);
        } else if let Some(caps) = ORDERED_ITEM_RE.captures(line) {
            self.push_item(true, &caps[1]);
        } else if line.trim().is_empty() {
            self.flush_list();
            self.blocks.push(Block::Blank);
        } else {
            self.flush_list();
            self.blocks.push(Block::paragraph(line));
        }
    }

    fn push_item(&mut self, ordered: bool, item: &str) {
        match self.list.as_mut() {
            Some((kind, items)) if *kind == ordered => items.push(item.to_string()),
            _ => {
                self.flush_list();
                self.list = Some((ordered, vec![item.to_string()]));
            }
        }
    }

    fn flush_list(&mut self) {
        if let Some((ordered, items)) = self.list.take() {
            self.blocks.push(Block::List { ordered, items });
        }
    }

    fn finish(mut self) -> Vec<Block> {
        self.flush_list();
        if let Some(buf) = self.code.take() {
            self.blocks.push(Block::code(buf.join("\n")));
        }
        self.blocks
    }
}
