//! Actions — the fully resolved unit of work the grammar hands the editor.
//!
//! An [`Action`] is produced only by [`grammar::consume`](crate::grammar::consume)
//! and never changes afterwards. It names what to do (move, operate on a
//! target, run a command) and the count to do it with; computing the buffer
//! range is left to the editor, which knows the cursor.

use crate::mode::VisualKind;
use crate::motion::Motion;
use crate::search::SearchDirection;
use crate::text_object::TextObject;

// ---------------------------------------------------------------------------
// Operator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `d`
    Delete,
    /// `c`
    Change,
    /// `y`
    Yank,
    /// `>`
    Indent,
    /// `<`
    Outdent,
    /// `g~`, and `~` in Visual mode
    ToggleCase,
    /// `gu`, and `u` in Visual mode
    Lowercase,
    /// `gU`, and `U` in Visual mode
    Uppercase,
}

impl Operator {
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        !matches!(self, Self::Yank)
    }

    /// The key that, repeated after the operator, makes it line-wise
    /// (`dd`, `>>`, `g~~`, `guu`).
    #[must_use]
    pub const fn doubling_key(self) -> char {
        match self {
            Self::Delete => 'd',
            Self::Change => 'c',
            Self::Yank => 'y',
            Self::Indent => '>',
            Self::Outdent => '<',
            Self::ToggleCase => '~',
            Self::Lowercase => 'u',
            Self::Uppercase => 'U',
        }
    }
}

/// What an operator applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Motion(Motion),
    Object(TextObject),
    /// The doubled form: `count` whole lines from the cursor line.
    Line,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Where `i a I A o O` start inserting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertEntry {
    Before,
    After,
    LineStart,
    LineEnd,
    OpenBelow,
    OpenAbove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Insert(InsertEntry),
    /// `p` / `P`
    Put { before: bool },
    /// `J`
    Join,
    /// `~` in Normal mode
    ToggleCaseChar,
    /// `r{char}`
    ReplaceChar(char),
    Undo,
    Redo,
    /// `.`
    Repeat,
    EnterVisual(VisualKind),
    /// `R`
    EnterReplace,
    /// `:`
    CommandLine,
    /// `/` or `?`
    Search(SearchDirection),
    /// `q{reg}`
    RecordMacro(char),
    /// `q` while recording
    StopRecording,
    /// `@{reg}`; `None` is `@@`
    PlayMacro(Option<char>),
}

impl Command {
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        matches!(
            self,
            Self::Insert(_)
                | Self::Put { .. }
                | Self::Join
                | Self::ToggleCaseChar
                | Self::ReplaceChar(_)
                | Self::EnterReplace
        )
    }
}

/// Operations on the Visual selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualOp {
    /// An operator over the selection; `linewise` forces whole lines
    /// (`X D C S R Y`).
    Operate { op: Operator, linewise: bool },
    Join,
    /// `p` / `P` replace the selection.
    Put,
    /// `r{char}` fills the selection.
    ReplaceChar(char),
    /// `o` / `O`
    SwapAnchor,
}

impl VisualOp {
    #[must_use]
    pub const fn is_mutating(self) -> bool {
        match self {
            Self::Operate { op, .. } => op.is_mutating(),
            Self::Join | Self::Put | Self::ReplaceChar(_) => true,
            Self::SwapAnchor => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Action
// ---------------------------------------------------------------------------

/// A resolved command. `count` is `None` when no count was typed; operator
/// and motion counts are already multiplied together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Move { motion: Motion, count: Option<usize> },
    Operate { op: Operator, target: Target, count: Option<usize> },
    /// `iw`, `a(` ... in Visual mode: grow the selection.
    SelectObject { object: TextObject, count: Option<usize> },
    Visual { op: VisualOp, count: Option<usize> },
    Command { command: Command, count: Option<usize> },
}

impl Action {
    /// Only mutating actions become dot-repeat targets.
    #[must_use]
    pub const fn is_mutating(&self) -> bool {
        match self {
            Self::Move { .. } | Self::SelectObject { .. } => false,
            Self::Operate { op, .. } => op.is_mutating(),
            Self::Visual { op, .. } => op.is_mutating(),
            Self::Command { command, .. } => command.is_mutating(),
        }
    }

    #[must_use]
    pub const fn count(&self) -> Option<usize> {
        match self {
            Self::Move { count, .. }
            | Self::Operate { count, .. }
            | Self::SelectObject { count, .. }
            | Self::Visual { count, .. }
            | Self::Command { count, .. } => *count,
        }
    }
}
