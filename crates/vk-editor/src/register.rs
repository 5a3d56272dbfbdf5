//! Register store — named slots for yanked, deleted and inserted text and
//! for recorded macros.
//!
//! | Name        | Role                                                  |
//! |-------------|-------------------------------------------------------|
//! | `"`         | unnamed; every yank and delete lands here             |
//! | `0`         | last yank made without a register prefix              |
//! | `1`–`9`     | ring of linewise or multi-line deletes, newest in `1` |
//! | `-`         | last small (within one line) delete                   |
//! | `a`–`z`     | named; `A`–`Z` append to the lowercase register       |
//! | `*`, `+`    | system clipboard, read through on every `get`         |
//! | `.`         | last inserted text, read-only                         |
//! | `_`         | black hole; writes vanish, reads are empty            |
//!
//! Every value carries a [`ContentKind`] that paste dispatches on. A register
//! holding [`RegisterContent::Keys`] is a macro: it can be played but never
//! pasted.
//!
//! Clipboard failures never abort a command: a failed read yields an empty
//! character-wise value, a failed write still updates the in-process cache,
//! and the failure is kept for the editor to report.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use vk_input::Key;
use vk_input::notation::{format_keys, keys_to_text, text_to_keys};

use crate::clipboard::{Clipboard, ClipboardError};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("E354: Invalid register name: '{0}'")]
    Invalid(char),
    #[error("E353: Nothing in register {0}")]
    Empty(char),
    #[error("register {0} is read-only")]
    ReadOnly(char),
    #[error("register {0} holds a macro, not text")]
    NotText(char),
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// How register content was captured. Paste dispatches on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentKind {
    /// Inline text; `p` inserts after the cursor.
    #[default]
    CharWise,
    /// Whole lines, each ending in `\n`; `p` opens below the cursor line.
    LineWise,
    /// A rectangle; `p` pastes one row per line starting at the cursor column.
    BlockWise,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterContent {
    /// Character- or line-wise text. Line-wise text ends with `\n`.
    Text(String),
    /// Block-wise rows, one per line.
    Block(Vec<String>),
    /// A recorded macro.
    Keys(Vec<Key>),
}

impl Default for RegisterContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Register {
    pub content: RegisterContent,
    pub kind: ContentKind,
    /// The value came from (or went to) the system clipboard.
    pub clipboard: bool,
}

impl Register {
    #[must_use]
    pub const fn text(text: String, kind: ContentKind) -> Self {
        Self {
            content: RegisterContent::Text(text),
            kind,
            clipboard: false,
        }
    }

    #[must_use]
    pub const fn block(rows: Vec<String>) -> Self {
        Self {
            content: RegisterContent::Block(rows),
            kind: ContentKind::BlockWise,
            clipboard: false,
        }
    }

    #[must_use]
    pub const fn keys(keys: Vec<Key>) -> Self {
        Self {
            content: RegisterContent::Keys(keys),
            kind: ContentKind::CharWise,
            clipboard: false,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        match &self.content {
            RegisterContent::Text(t) => t.is_empty(),
            RegisterContent::Block(rows) => rows.is_empty(),
            RegisterContent::Keys(k) => k.is_empty(),
        }
    }

    #[must_use]
    pub const fn is_macro(&self) -> bool {
        matches!(self.content, RegisterContent::Keys(_))
    }

    /// The content as flat text (block rows joined by `\n`), `None` for
    /// macros.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match &self.content {
            RegisterContent::Text(t) => Some(t.clone()),
            RegisterContent::Block(rows) => Some(rows.join("\n")),
            RegisterContent::Keys(_) => None,
        }
    }

    /// The content as keys to play. Text is typed key by key.
    #[must_use]
    pub fn as_keys(&self) -> Vec<Key> {
        match &self.content {
            RegisterContent::Keys(k) => k.clone(),
            RegisterContent::Text(t) => text_to_keys(t),
            RegisterContent::Block(rows) => text_to_keys(&rows.join("\n")),
        }
    }

    /// Append `other`, upgrading to line-wise when either side is line-wise.
    fn append(&mut self, other: Self) {
        let content = std::mem::take(&mut self.content);
        self.content = match (content, other.content) {
            (RegisterContent::Keys(mut a), RegisterContent::Keys(b)) => {
                a.extend(b);
                RegisterContent::Keys(a)
            }
            (RegisterContent::Keys(mut a), other_content) => {
                let tail = Self { content: other_content, ..Self::default() };
                a.extend(tail.as_keys());
                RegisterContent::Keys(a)
            }
            (RegisterContent::Block(mut a), RegisterContent::Block(b)) => {
                a.extend(b);
                RegisterContent::Block(a)
            }
            (mine, theirs) => {
                let mine = Self { content: mine, kind: self.kind, clipboard: false };
                let theirs = Self { content: theirs, kind: other.kind, clipboard: false };
                let mut text = mine.as_text().unwrap_or_default();
                let tail = theirs.as_text().unwrap_or_else(|| keys_to_text(&theirs.as_keys()));
                let linewise = self.kind == ContentKind::LineWise || other.kind == ContentKind::LineWise;
                if linewise && !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(&tail);
                if linewise && !text.ends_with('\n') {
                    text.push('\n');
                }
                if linewise {
                    self.kind = ContentKind::LineWise;
                }
                RegisterContent::Text(text)
            }
        };
    }
}

impl fmt::Display for Register {
    /// One-line rendering for `:registers`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = match &self.content {
            RegisterContent::Keys(k) => format_keys(k),
            _ => self.as_text().unwrap_or_default(),
        };
        f.write_str(&shown.replace('\n', "^J"))
    }
}

// ---------------------------------------------------------------------------
// Names
// ---------------------------------------------------------------------------

const CLIPBOARD_NAMES: [char; 2] = ['*', '+'];
const UNNAMED: char = '"';
const BLACK_HOLE: char = '_';
const LAST_INSERTED: char = '.';

/// Names accepted after a `"` prefix.
#[must_use]
pub const fn is_valid_name(name: char) -> bool {
    name.is_ascii_alphanumeric() || matches!(name, '"' | '*' | '+' | '.' | '-' | '_')
}

/// Names accepted after `q` (record) and `@` (play).
#[must_use]
pub const fn is_valid_macro_name(name: char) -> bool {
    name.is_ascii_alphanumeric() || name == '"'
}

#[must_use]
pub const fn is_clipboard_name(name: char) -> bool {
    matches!(name, '*' | '+')
}

// ---------------------------------------------------------------------------
// RegisterStore
// ---------------------------------------------------------------------------

/// All registers of one editor session.
pub struct RegisterStore {
    slots: HashMap<char, Register>,
    clipboard: Box<dyn Clipboard>,
    clipboard_fault: Option<ClipboardError>,
}

impl RegisterStore {
    #[must_use]
    pub fn new(clipboard: Box<dyn Clipboard>) -> Self {
        Self {
            slots: HashMap::new(),
            clipboard,
            clipboard_fault: None,
        }
    }

    fn check(name: char) -> Result<char, RegisterError> {
        if is_valid_name(name) {
            Ok(if name.is_ascii_uppercase() { name.to_ascii_lowercase() } else { name })
        } else {
            Err(RegisterError::Invalid(name))
        }
    }

    // -- Primitive operations -----------------------------------------------

    /// Store a value. Uppercase names append to their lowercase register.
    ///
    /// # Errors
    ///
    /// [`RegisterError::Invalid`] for unknown names, [`RegisterError::ReadOnly`]
    /// for `.`.
    pub fn put(&mut self, name: char, value: Register) -> Result<(), RegisterError> {
        let slot = Self::check(name)?;
        if name.is_ascii_uppercase() {
            return self.append(slot, value);
        }
        match slot {
            LAST_INSERTED => Err(RegisterError::ReadOnly(name)),
            BLACK_HOLE => Ok(()),
            _ => {
                self.store(slot, value);
                Ok(())
            }
        }
    }

    /// Append to a register, creating it if empty.
    ///
    /// # Errors
    ///
    /// As for [`put`](Self::put).
    pub fn append(&mut self, name: char, value: Register) -> Result<(), RegisterError> {
        let slot = Self::check(name)?;
        match slot {
            LAST_INSERTED => Err(RegisterError::ReadOnly(name)),
            BLACK_HOLE => Ok(()),
            _ => {
                let mut current = self.slots.get(&slot).cloned().unwrap_or_default();
                if current.is_empty() {
                    current = value;
                } else {
                    current.append(value);
                }
                self.store(slot, current);
                Ok(())
            }
        }
    }

    fn store(&mut self, slot: char, mut value: Register) {
        value.clipboard = is_clipboard_name(slot);
        if value.clipboard {
            let text = value
                .as_text()
                .unwrap_or_else(|| keys_to_text(&value.as_keys()));
            if let Err(e) = self.clipboard.write(&text) {
                tracing::warn!(register = %slot, error = %e, "clipboard write failed");
                self.clipboard_fault = Some(e);
            }
        }
        self.slots.insert(slot, value);
    }

    /// Read a register. Never-written registers read as empty char-wise text.
    ///
    /// # Errors
    ///
    /// [`RegisterError::Invalid`] for unknown names.
    pub fn get(&mut self, name: char) -> Result<Register, RegisterError> {
        let slot = Self::check(name)?;
        if slot == BLACK_HOLE {
            return Ok(Register::default());
        }
        if is_clipboard_name(slot) {
            return Ok(self.read_clipboard(slot));
        }
        Ok(self.slots.get(&slot).cloned().unwrap_or_default())
    }

    fn read_clipboard(&mut self, slot: char) -> Register {
        match self.clipboard.read() {
            Ok(text) => {
                // Keep our own kind when the clipboard still holds what we wrote.
                let cached = self.slots.get(&slot).filter(|r| r.as_text().as_deref() == Some(&text));
                if let Some(reg) = cached {
                    return reg.clone();
                }
                let kind = if text.ends_with('\n') {
                    ContentKind::LineWise
                } else {
                    ContentKind::CharWise
                };
                let reg = Register {
                    content: RegisterContent::Text(text),
                    kind,
                    clipboard: true,
                };
                self.slots.insert(slot, reg.clone());
                reg
            }
            Err(e) => {
                tracing::warn!(register = %slot, error = %e, "clipboard read failed");
                self.clipboard_fault = Some(e);
                Register {
                    clipboard: true,
                    ..Register::default()
                }
            }
        }
    }

    /// The clipboard failure from the last operation, if any.
    pub const fn take_clipboard_fault(&mut self) -> Option<ClipboardError> {
        self.clipboard_fault.take()
    }

    // -- Vim write rules ----------------------------------------------------

    /// Record a yank. Without a prefix it fills `"` and `0`; with one it
    /// fills that register and `"`.
    ///
    /// # Errors
    ///
    /// As for [`put`](Self::put).
    pub fn record_yank(&mut self, name: Option<char>, value: Register) -> Result<(), RegisterError> {
        match name.filter(|&n| n != UNNAMED) {
            Some(BLACK_HOLE) => Ok(()),
            Some(n) => {
                self.put(n, value)?;
                self.mirror_unnamed(n)
            }
            None => {
                self.store('0', value.clone());
                self.store(UNNAMED, value);
                Ok(())
            }
        }
    }

    /// Record a delete or change. Without a prefix, line-wise and multi-line
    /// deletes shift the `1`–`9` ring and small deletes go to `-`.
    ///
    /// # Errors
    ///
    /// As for [`put`](Self::put).
    pub fn record_delete(&mut self, name: Option<char>, value: Register) -> Result<(), RegisterError> {
        match name.filter(|&n| n != UNNAMED) {
            Some(BLACK_HOLE) => Ok(()),
            Some(n) => {
                self.put(n, value)?;
                self.mirror_unnamed(n)
            }
            None => {
                let big = value.kind != ContentKind::CharWise
                    || value.as_text().is_some_and(|t| t.contains('\n'));
                if big {
                    for n in (1..9u8).rev() {
                        let from = char::from(b'0' + n);
                        if let Some(reg) = self.slots.remove(&from) {
                            self.slots.insert(char::from(b'0' + n + 1), reg);
                        }
                    }
                    self.store('1', value.clone());
                } else {
                    self.store('-', value.clone());
                }
                self.store(UNNAMED, value);
                Ok(())
            }
        }
    }

    /// Point `"` at the full content of `name` after a prefixed write.
    fn mirror_unnamed(&mut self, name: char) -> Result<(), RegisterError> {
        let slot = Self::check(name)?;
        if is_clipboard_name(slot) {
            let reg = self.slots.get(&slot).cloned().unwrap_or_default();
            self.slots.insert(UNNAMED, Register { clipboard: false, ..reg });
            return Ok(());
        }
        if let Some(reg) = self.slots.get(&slot).cloned() {
            self.slots.insert(UNNAMED, reg);
        }
        Ok(())
    }

    /// Set the read-only `.` register at the end of an insert session.
    pub fn set_last_inserted(&mut self, text: String) {
        self.slots
            .insert(LAST_INSERTED, Register::text(text, ContentKind::CharWise));
    }

    // -- Macros -------------------------------------------------------------

    /// Commit a recorded macro. Uppercase names append.
    ///
    /// # Errors
    ///
    /// As for [`put`](Self::put).
    pub fn store_macro(&mut self, name: char, keys: Vec<Key>) -> Result<(), RegisterError> {
        self.put(name, Register::keys(keys))
    }

    /// The keys to play for `@name`.
    ///
    /// # Errors
    ///
    /// [`RegisterError::Invalid`] for unknown names, [`RegisterError::Empty`]
    /// when there is nothing to play.
    pub fn macro_keys(&mut self, name: char) -> Result<Vec<Key>, RegisterError> {
        if !is_valid_macro_name(name) && !is_clipboard_name(name) {
            return Err(RegisterError::Invalid(name));
        }
        let reg = self.get(name)?;
        if reg.is_empty() {
            return Err(RegisterError::Empty(name));
        }
        Ok(reg.as_keys())
    }

    // -- Listing ------------------------------------------------------------

    /// Non-empty registers in display order, for `:registers`.
    #[must_use]
    pub fn list(&self) -> Vec<(char, String)> {
        let order = std::iter::once(UNNAMED)
            .chain('0'..='9')
            .chain('a'..='z')
            .chain(['-', LAST_INSERTED])
            .chain(CLIPBOARD_NAMES);
        order
            .filter_map(|n| {
                self.slots
                    .get(&n)
                    .filter(|r| !r.is_empty())
                    .map(|r| (n, r.to_string()))
            })
            .collect()
    }
}

impl fmt::Debug for RegisterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterStore")
            .field("slots", &self.slots.len())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
