//! Inline Span Tokenizer
//!
//! One left-to-right pass over the characters of a single line, recognizing
//! `` `code` `` and `**bold**`. Inline code wins over bold: a bold candidate
//! is abandoned if a code span would open before its closing `**`. Anything
//! that does not form a complete span stays literal.

use crate::ir::Span;

const TICK: char = '`';
const STAR: char = '*';

/// Split one line of text into plain, code and bold spans.
pub fn tokenize(text: &str) -> Vec<Span> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        if let Some(close) = code_span_end(&chars, i) {
            flush_plain(&mut plain, &mut spans);
            spans.push(Span::Code(chars[i + 1..close].iter().collect()));
            i = close + 1;
        } else if let Some(close) = bold_span_end(&chars, i) {
            flush_plain(&mut plain, &mut spans);
            spans.push(Span::Bold(chars[i + 2..close].iter().collect()));
            i = close + 2;
        } else {
            plain.push(chars[i]);
            i += 1;
        }
    }
    flush_plain(&mut plain, &mut spans);
    spans
}

fn flush_plain(plain: &mut String, spans: &mut Vec<Span>) {
    if !plain.is_empty() {
        spans.push(Span::Text(std::mem::take(plain)));
    }
}

/// Index of the closing backtick when a non-empty code span opens at `start`.
fn code_span_end(chars: &[char], start: usize) -> Option<usize> {
    if chars.get(start) != Some(&TICK) {
        return None;
    }
    let close = start + 1 + chars[start + 1..].iter().position(|&c| c == TICK)?;
    (close > start + 1).then_some(close)
}

/// Index of the closing `**` when a non-empty bold span opens at `start`.
fn bold_span_end(chars: &[char], start: usize) -> Option<usize> {
    if chars.get(start) != Some(&STAR) || chars.get(start + 1) != Some(&STAR) {
        return None;
    }
    let mut i = start + 2;
    while i < chars.len() && chars[i] != STAR {
        if code_span_end(chars, i).is_some() {
            return None;
        }
        i += 1;
    }
    (i > start + 2 && chars.get(i + 1) == Some(&STAR)).then_some(i)
}
