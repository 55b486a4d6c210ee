use std::sync::Mutex;

use arboard::Clipboard;

use crate::error::{Result, TolkError};

/// Somewhere copied text can be written.
pub trait ClipboardSink: Send + Sync {
    fn set_text(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard. The handle is kept open for the life of the process
/// so the copied text stays available on X11.
pub struct SystemClipboard {
    inner: Mutex<Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new()
            .map_err(|e| TolkError::Clipboard(format!("Failed to open clipboard: {}", e)))?;
        Ok(Self {
            inner: Mutex::new(clipboard),
        })
    }
}

impl ClipboardSink for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<()> {
        let mut clipboard = self
            .inner
            .lock()
            .map_err(|_| TolkError::Clipboard("Clipboard lock poisoned".to_string()))?;
        clipboard
            .set_text(text.to_owned())
            .map_err(|e| TolkError::Clipboard(format!("Failed to write clipboard: {}", e)))
    }
}
