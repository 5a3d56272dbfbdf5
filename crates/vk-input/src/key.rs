// SPDX-License-Identifier: MIT
//
// Key identity.
//
// A `Key` is what the interpreter consumes: a key code plus modifier
// flags. There is no press/release distinction and no mouse, paste or
// focus event here; a host that reads a terminal or GUI toolkit maps its
// own events onto `Key` before feeding the editor.
//
// Shifted printable characters are stored as the shifted character
// itself (`Key::char('A')`, never `Char('a') + SHIFT`). `SHIFT` is only
// meaningful on named keys such as `<S-Tab>`.

use std::fmt;

use bitflags::bitflags;

use crate::notation;

// ─── Key codes ──────────────────────────────────────────────────────────────

/// Identity of a key.
///
/// Named keys have dedicated variants; printable characters use
/// [`Char`](KeyCode::Char). Function keys F1–F35 use [`F`](KeyCode::F).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A Unicode character (printable).
    Char(char),
    // ── Named keys ──────────────────────────────────────────────
    Enter,
    Tab,
    Backspace,
    Escape,
    Delete,
    Insert,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    // ── Function keys ───────────────────────────────────────────
    /// F1 through F35.
    F(u8),
}

bitflags! {
    /// Keyboard modifier flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const ALT   = 0b0000_0010;
        const CTRL  = 0b0000_0100;
        const SUPER = 0b0000_1000;
    }
}

// ─── Key ────────────────────────────────────────────────────────────────────

/// A single key press with its modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    /// Which key was pressed.
    pub code: KeyCode,
    /// Active modifier keys.
    pub modifiers: Modifiers,
}

impl Key {
    /// The Escape key.
    pub const ESC: Self = Self::plain(KeyCode::Escape);
    /// The Enter / carriage-return key.
    pub const ENTER: Self = Self::plain(KeyCode::Enter);

    #[must_use]
    pub const fn new(code: KeyCode, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A named or character key with no modifiers.
    #[must_use]
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, Modifiers::empty())
    }

    /// An unmodified character key.
    #[must_use]
    pub const fn char(ch: char) -> Self {
        Self::plain(KeyCode::Char(ch))
    }

    /// `Ctrl` + a character. The character is folded to lowercase so that
    /// `<C-W>` and `<C-w>` are the same key.
    #[must_use]
    pub const fn ctrl(ch: char) -> Self {
        Self::new(KeyCode::Char(ch.to_ascii_lowercase()), Modifiers::CTRL)
    }

    /// The character this key types, if it types one.
    ///
    /// Keys carrying `Ctrl`, `Alt` or `Super` never type text.
    #[must_use]
    pub const fn as_char(self) -> Option<char> {
        match self.code {
            KeyCode::Char(ch)
                if !self
                    .modifiers
                    .intersects(Modifiers::CTRL.union(Modifiers::ALT).union(Modifiers::SUPER)) =>
            {
                Some(ch)
            }
            _ => None,
        }
    }

    /// `true` if this is `Ctrl` + `ch` (case-insensitive).
    #[must_use]
    pub const fn is_ctrl(self, ch: char) -> bool {
        match self.code {
            KeyCode::Char(c) => {
                self.modifiers.contains(Modifiers::CTRL)
                    && c.to_ascii_lowercase() == ch.to_ascii_lowercase()
            }
            _ => false,
        }
    }

    /// Escape, `<C-c>` and `<C-[>` all abort whatever is being typed.
    #[must_use]
    pub const fn is_cancel(self) -> bool {
        matches!(self.code, KeyCode::Escape) || self.is_ctrl('c') || self.is_ctrl('[')
    }

    /// The decimal value of a plain digit key.
    #[must_use]
    pub const fn digit(self) -> Option<u32> {
        match self.as_char() {
            Some(ch) => ch.to_digit(10),
            None => None,
        }
    }
}

impl From<char> for Key {
    fn from(ch: char) -> Self {
        Self::char(ch)
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

impl fmt::Display for Key {
    /// Renders the key in angle-bracket notation: `x`, `<lt>`, `<Esc>`,
    /// `<C-w>`, `<S-Tab>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        notation::write_key(f, *self)
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ctrl_folds_case() {
        assert_eq!(Key::ctrl('W'), Key::ctrl('w'));
        assert!(Key::ctrl('R').is_ctrl('r'));
    }

    #[test]
    fn ctrl_keys_do_not_type() {
        assert_eq!(Key::ctrl('a').as_char(), None);
        assert_eq!(Key::char('a').as_char(), Some('a'));
        assert_eq!(Key::new(KeyCode::Char('a'), Modifiers::ALT).as_char(), None);
    }

    #[test]
    fn cancel_keys() {
        assert!(Key::ESC.is_cancel());
        assert!(Key::ctrl('c').is_cancel());
        assert!(Key::ctrl('[').is_cancel());
        assert!(!Key::char('c').is_cancel());
        assert!(!Key::ENTER.is_cancel());
    }

    #[test]
    fn digits() {
        assert_eq!(Key::char('7').digit(), Some(7));
        assert_eq!(Key::char('0').digit(), Some(0));
        assert_eq!(Key::char('x').digit(), None);
        assert_eq!(Key::ctrl('1').digit(), None);
    }

    #[test]
    fn display_uses_notation() {
        assert_eq!(Key::char('x').to_string(), "x");
        assert_eq!(Key::char('<').to_string(), "<lt>");
        assert_eq!(Key::ESC.to_string(), "<Esc>");
        assert_eq!(Key::ctrl('w').to_string(), "<C-w>");
        assert_eq!(Key::new(KeyCode::Tab, Modifiers::SHIFT).to_string(), "<S-Tab>");
        assert_eq!(Key::plain(KeyCode::F(5)).to_string(), "<F5>");
    }
}
