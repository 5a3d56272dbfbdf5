//! Error types surfaced by the editor.
//!
//! Grammar rejections are not errors: the resolver returns them as
//! [`Outcome::Invalid`](crate::grammar::Outcome::Invalid) values and the
//! pipeline resets. Everything here is a failure the user should see in the
//! status line. None of them is fatal.

use thiserror::Error;
use vk_input::NotationError;

use crate::clipboard::ClipboardError;
use crate::host::HostError;
use crate::register::RegisterError;

#[derive(Debug, Error)]
pub enum EditorError {
    /// The keys fed in strict mode did not form a command.
    #[error("invalid key sequence: {0}")]
    InvalidKeySequence(String),

    /// Unknown, read-only or unusable register.
    #[error(transparent)]
    Register(#[from] RegisterError),

    /// `:q` on a modified buffer without `!`.
    #[error("E37: No write since last change (add ! to override)")]
    UnsavedChanges,

    /// The system clipboard could not be reached.
    #[error(transparent)]
    Clipboard(#[from] ClipboardError),

    /// Saving or closing failed on the host side.
    #[error(transparent)]
    Host(#[from] HostError),

    /// A key script could not be parsed.
    #[error(transparent)]
    Notation(#[from] NotationError),

    /// Macro playback nested deeper than `max_macro_depth`.
    #[error("E169: Command too recursive")]
    MacroTooDeep,

    /// `@@` before any `@{reg}`.
    #[error("E748: No previously used register")]
    NoPreviousMacro,

    /// `q` pressed while a macro is being played back.
    #[error("cannot start or stop recording during macro playback")]
    RecordDuringPlayback,

    #[error("E492: Not an editor command: {0}")]
    UnknownCommand(String),

    #[error("E486: Pattern not found: {0}")]
    PatternNotFound(String),

    /// `n` or `N` before any search.
    #[error("E35: No previous regular expression")]
    NoPreviousPattern,

    #[error("E518: Unknown option: {0}")]
    UnknownOption(String),

    #[error("E521: Number required after =: {0}")]
    NumberRequired(String),
}
