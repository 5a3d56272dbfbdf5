//! Vim-style modal editing.
//!
//! The editor is always in exactly one [`Mode`]. A mode only says how keys
//! are read; it holds no buffer data. Modes change only through a
//! [`Transition`] produced by a resolved command, looked up in one table,
//! [`Mode::next`]:
//!
//! | From            | Transition          | To                         |
//! |-----------------|---------------------|----------------------------|
//! | Normal, Visual  | `EnterInsert`       | Insert                     |
//! | Normal          | `EnterReplace`      | Replace                    |
//! | Normal          | `ToggleVisual(k)`   | Visual(k)                  |
//! | Visual(k)       | `ToggleVisual(k)`   | Normal                     |
//! | Visual(k)       | `ToggleVisual(j)`   | Visual(j)                  |
//! | Normal, Visual  | `OpenCommandLine`   | CommandLine                |
//! | Normal, Visual  | `OpenSearch(dir)`   | Search(dir)                |
//! | any             | `Leave`             | Normal                     |
//!
//! Any other pair leaves the mode unchanged.
//!
//! | Mode        | Cursor shape | Cursor limit          |
//! |-------------|--------------|-----------------------|
//! | Normal      | Block        | `0..content_len-1`    |
//! | Insert      | Bar          | `0..content_len`      |
//! | Visual      | Block        | `0..content_len-1`    |
//! | Replace     | Underline    | `0..content_len`      |
//! | CommandLine | Bar          | (in the prompt)       |
//! | Search      | Bar          | (in the prompt)       |

use std::fmt;

use crate::search::SearchDirection;

// ---------------------------------------------------------------------------
// VisualKind
// ---------------------------------------------------------------------------

/// The sub-mode of visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualKind {
    /// `v` — character-wise selection.
    Char,
    /// `V` — whole lines.
    Line,
    /// `Ctrl-V` — a rectangle of columns.
    Block,
}

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    Visual(VisualKind),
    /// `R` — continuous overwrite until Esc.
    Replace,
    /// Typing a `:` command.
    CommandLine,
    /// Typing a `/` or `?` pattern.
    Search(SearchDirection),
}

impl Mode {
    /// Human-readable name for the status line.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "INSERT",
            Self::Visual(VisualKind::Char) => "VISUAL",
            Self::Visual(VisualKind::Line) => "VISUAL LINE",
            Self::Visual(VisualKind::Block) => "VISUAL BLOCK",
            Self::Replace => "REPLACE",
            Self::CommandLine => "COMMAND",
            Self::Search(_) => "SEARCH",
        }
    }

    #[must_use]
    pub const fn cursor_shape(self) -> CursorShape {
        match self {
            Self::Normal | Self::Visual(_) => CursorShape::Block,
            Self::Insert | Self::CommandLine | Self::Search(_) => CursorShape::Bar,
            Self::Replace => CursorShape::Underline,
        }
    }

    /// True if the cursor may sit one past the last char of a line.
    #[inline]
    #[must_use]
    pub const fn cursor_past_end(self) -> bool {
        matches!(self, Self::Insert | Self::Replace)
    }

    /// Modes whose keys go through the grammar resolver.
    #[inline]
    #[must_use]
    pub const fn is_command_mode(self) -> bool {
        matches!(self, Self::Normal | Self::Visual(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_visual(self) -> bool {
        matches!(self, Self::Visual(_))
    }

    /// Modes that collect a line of text at the bottom of the screen.
    #[inline]
    #[must_use]
    pub const fn is_prompt(self) -> bool {
        matches!(self, Self::CommandLine | Self::Search(_))
    }

    /// Leaving this mode moves the cursor one column left (Vim's `<Esc>`
    /// from Insert or Replace).
    #[inline]
    #[must_use]
    pub const fn snaps_left_on_exit(self) -> bool {
        matches!(self, Self::Insert | Self::Replace)
    }

    /// The transition table.
    #[must_use]
    pub fn next(self, transition: Transition) -> Self {
        use Transition as T;
        match (self, transition) {
            (_, T::Leave) => Self::Normal,
            (Self::Normal | Self::Visual(_), T::EnterInsert) => Self::Insert,
            (Self::Normal, T::EnterReplace) => Self::Replace,
            (Self::Normal, T::ToggleVisual(kind)) => Self::Visual(kind),
            (Self::Visual(current), T::ToggleVisual(kind)) => {
                if current == kind {
                    Self::Normal
                } else {
                    Self::Visual(kind)
                }
            }
            (Self::Normal | Self::Visual(_), T::OpenCommandLine) => Self::CommandLine,
            (Self::Normal | Self::Visual(_), T::OpenSearch(dir)) => Self::Search(dir),
            (mode, _) => mode,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ---------------------------------------------------------------------------
// Transition
// ---------------------------------------------------------------------------

/// A mode change requested by a resolved command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    EnterInsert,
    EnterReplace,
    ToggleVisual(VisualKind),
    OpenCommandLine,
    OpenSearch(SearchDirection),
    /// Back to Normal: `<Esc>`, a finished visual operator, an executed prompt.
    Leave,
}

// ---------------------------------------------------------------------------
// CursorShape
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    Block,
    Bar,
    Underline,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
