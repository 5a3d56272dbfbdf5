//! Recorded state — the command under construction.
//!
//! Vim's grammar is `["x] [count] operator [count] (motion | text-object)`.
//! A [`RecordedState`] holds what has been typed of that so far. It is
//! created fresh after every resolved or rejected command and never spans
//! two of them.
//!
//! Two key logs are kept:
//!
//! - `keys`: every key consumed, verbatim;
//! - `replay_keys`: the same keys without count digits and without the
//!   `"x` register prefix. Dot-repeat rebuilds the command from these plus
//!   its own count and register, so a new count replaces the old one.
//!
//! Examples:
//!
//! ```text
//! "a2d3w   count=2 motion_count=3 register=a   replay_keys=[d, w]
//! x        count=None                          replay_keys=[x]
//! g~iw     operator=ToggleCase                 replay_keys=[g, ~, i, w]
//! ```

use vk_input::Key;

use crate::action::Operator;
use crate::motion::FindKind;

/// Largest count a command can carry. Longer digit runs stop growing, and
/// so does the product of operator and motion counts.
pub const MAX_COUNT: usize = 99_999;

/// A key that must be followed by exactly one more key.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    #[default]
    None,
    /// After `"`.
    RegisterName,
    /// After `i` or `a` with an operator (or in Visual mode).
    Object { inner: bool },
    /// After `f t F T`.
    FindChar(FindKind),
    /// After `r`.
    ReplaceChar,
    /// After `g`.
    G,
    /// After `q` when not recording.
    MacroRegister,
    /// After `@`.
    PlayRegister,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordedState {
    /// Count typed before the operator (or before a bare motion).
    pub count: Option<usize>,
    /// Count typed between operator and motion.
    pub motion_count: Option<usize>,
    pub register: Option<char>,
    pub operator: Option<Operator>,
    pub pending: Pending,
    /// Set once an operator or command that edits the buffer is chosen.
    pub mutating: bool,
    pub keys: Vec<Key>,
    pub replay_keys: Vec<Key>,
}

impl RecordedState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Nothing typed yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// The count being typed right now: the motion count once an operator
    /// is chosen, otherwise the leading count.
    #[must_use]
    pub const fn active_count(&self) -> Option<usize> {
        if self.operator.is_some() {
            self.motion_count
        } else {
            self.count
        }
    }

    /// Append a decimal digit to the active count, up to [`MAX_COUNT`].
    pub fn push_digit(&mut self, digit: u32) {
        let slot = if self.operator.is_some() {
            &mut self.motion_count
        } else {
            &mut self.count
        };
        let value = slot
            .unwrap_or(0)
            .checked_mul(10)
            .and_then(|v| v.checked_add(digit as usize))
            .map_or(MAX_COUNT, |v| v.min(MAX_COUNT));
        *slot = Some(value);
    }

    /// Operator and motion counts multiplied; `None` if neither was typed.
    #[must_use]
    pub fn total_count(&self) -> Option<usize> {
        match (self.count, self.motion_count) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or(1).saturating_mul(b.unwrap_or(1)).min(MAX_COUNT)),
        }
    }
}
