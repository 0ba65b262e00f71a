//! Clipboard access for the copy action.

use anyhow::{anyhow, Context, Result};
use tracing::debug;

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// System clipboard through `arboard`. Opening it may fail on headless
/// machines; every copy then fails and the UI shows no indicator.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                debug!(error = %e, "System clipboard unavailable");
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| anyhow!("clipboard unavailable"))?;
        clipboard
            .set_text(text.to_owned())
            .context("Failed to write clipboard")
    }
}

/// Copy `text`, reporting only whether it worked.
pub fn copy_to(sink: &mut dyn ClipboardSink, text: &str) -> bool {
    match sink.set_text(text) {
        Ok(()) => true,
        Err(e) => {
            debug!(error = %e, "Copy failed");
            false
        }
    }
}
