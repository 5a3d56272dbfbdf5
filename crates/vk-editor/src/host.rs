//! Host port — what `:w` and `:q` ask of the program embedding the editor.
//!
//! The interpreter never touches the file system or owns a window; it hands
//! the buffer text to a [`Host`] and lets it decide what "save" and "close"
//! mean. [`NullHost`] accepts everything and does nothing, [`FileHost`]
//! writes a single file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("E32: No file name")]
    NoFileName,
    #[error("\"{path}\": {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Save and close requests from `:` commands.
pub trait Host {
    /// Persist the current buffer.
    ///
    /// # Errors
    ///
    /// Whatever the host fails with; it is shown in the status line.
    fn save(&mut self, text: &str) -> Result<(), HostError>;

    /// Persist every buffer the host manages.
    ///
    /// # Errors
    ///
    /// As for [`save`](Self::save).
    fn save_all(&mut self, text: &str) -> Result<(), HostError> {
        self.save(text)
    }

    /// Close the current view, or all of them.
    fn close(&mut self, all: bool);
}

// ---------------------------------------------------------------------------
// NullHost
// ---------------------------------------------------------------------------

/// A host with nowhere to save. Records what it was asked, for tests.
#[derive(Debug, Default, Clone)]
pub struct NullHost {
    pub saves: usize,
    pub closed: Option<bool>,
}

impl Host for NullHost {
    fn save(&mut self, _text: &str) -> Result<(), HostError> {
        self.saves += 1;
        Ok(())
    }

    fn close(&mut self, all: bool) {
        self.closed = Some(all);
    }
}

// ---------------------------------------------------------------------------
// FileHost
// ---------------------------------------------------------------------------

/// Saves the buffer to one file. Without a path every save fails with E32.
#[derive(Debug, Default, Clone)]
pub struct FileHost {
    path: Option<PathBuf>,
    closed: bool,
}

impl FileHost {
    #[must_use]
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path, closed: false }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Host for FileHost {
    fn save(&mut self, text: &str) -> Result<(), HostError> {
        let path = self.path.as_ref().ok_or(HostError::NoFileName)?;
        fs::write(path, text).map_err(|source| HostError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "buffer written");
        Ok(())
    }

    fn close(&mut self, _all: bool) {
        self.closed = true;
    }
}
