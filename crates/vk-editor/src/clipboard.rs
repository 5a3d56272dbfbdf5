//! Clipboard port.
//!
//! The `*` and `+` registers read and write through a [`Clipboard`]. The
//! editor owns one boxed implementation: [`SystemClipboard`] talks to the OS
//! through `arboard`, [`MemoryClipboard`] keeps text in process for tests and
//! headless runs.
//!
//! Failures are reported, never fatal: the register store turns them into
//! empty content plus a warning.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
}

/// Read and write plain text on a clipboard.
pub trait Clipboard {
    /// # Errors
    ///
    /// [`ClipboardError::Unavailable`] when the clipboard cannot be reached.
    fn read(&mut self) -> Result<String, ClipboardError>;

    /// # Errors
    ///
    /// [`ClipboardError::Unavailable`] when the clipboard cannot be reached.
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

// ---------------------------------------------------------------------------
// System clipboard
// ---------------------------------------------------------------------------

/// The OS clipboard. A fresh `arboard` handle is opened per call so that a
/// clipboard server appearing or vanishing mid-session is picked up.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        arboard::Clipboard::new()
            .and_then(|mut c| c.get_text())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        arboard::Clipboard::new()
            .and_then(|mut c| c.set_text(text))
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// In-memory clipboard
// ---------------------------------------------------------------------------

/// A clipboard held in memory. Clones share the same contents, so a test can
/// keep a handle and inspect what the editor wrote. [`MemoryClipboard::broken`]
/// builds one that fails every call.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    text: Rc<RefCell<String>>,
    broken: bool,
}

impl MemoryClipboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// Current contents, as another application would see them.
    #[must_use]
    pub fn contents(&self) -> String {
        self.text.borrow().clone()
    }

    /// Replace the contents, as another application copying would.
    pub fn set_contents(&self, text: &str) {
        text.clone_into(&mut self.text.borrow_mut());
    }
}

impl Clipboard for MemoryClipboard {
    fn read(&mut self) -> Result<String, ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("no display".into()));
        }
        Ok(self.contents())
    }

    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.broken {
            return Err(ClipboardError::Unavailable("no display".into()));
        }
        self.set_contents(text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_shares_contents() {
        let handle = MemoryClipboard::new();
        let mut port = handle.clone();
        port.write("hello").unwrap();
        assert_eq!(handle.contents(), "hello");
        handle.set_contents("outside");
        assert_eq!(port.read().unwrap(), "outside");
    }

    #[test]
    fn broken_clipboard_fails() {
        let mut c = MemoryClipboard::broken();
        assert!(matches!(c.read(), Err(ClipboardError::Unavailable(_))));
        assert!(c.write("x").is_err());
    }
}
