//! Text buffer — the host-side text storage the interpreter edits.
//!
//! A `Buffer` wraps a [`ropey::Rope`] and exposes the small surface the key
//! interpreter needs from its host: read lines, replace a range, count lines,
//! and report whether anything changed since the last save. Lines are
//! separated by `\n`; the text never carries a trailing line terminator for
//! the last line unless the host put one there.
//!
//! Out-of-range positions are clamped rather than rejected: a motion that
//! computes a column one past a short line must not bring the editor down.

use std::fmt;

use ropey::Rope;

use crate::position::{Position, Range};

/// A rope-backed text buffer with a modified flag.
#[derive(Clone)]
pub struct Buffer {
    rope: Rope,
    modified: bool,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    #[must_use]
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            modified: false,
        }
    }

    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            modified: false,
        }
    }

    // -- Text access --------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Number of lines. An empty buffer has one (empty) line, and a buffer
    /// ending in `\n` has a trailing empty line.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    #[inline]
    #[must_use]
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Chars in `line` excluding its `\n`. Zero for lines past the end.
    #[must_use]
    pub fn line_len(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return 0;
        }
        let slice = self.rope.line(line);
        let total = slice.len_chars();
        if total > 0 && slice.char(total - 1) == '\n' {
            total - 1
        } else {
            total
        }
    }

    /// `true` when `line` has at least one character.
    #[must_use]
    pub fn line_has_text(&self, line: usize) -> bool {
        self.line_len(line) > 0
    }

    /// The text of `line` without its terminator.
    #[must_use]
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.rope.len_lines() {
            return String::new();
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        text
    }

    /// All lines, without terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|l| self.line_text(l)).collect()
    }

    #[must_use]
    pub fn char_at(&self, pos: Position) -> Option<char> {
        if pos.line >= self.rope.len_lines() || pos.col >= self.line_len(pos.line) {
            return None;
        }
        Some(self.rope.char(self.rope.line_to_char(pos.line) + pos.col))
    }

    /// Text covered by `range` (clamped).
    #[must_use]
    pub fn text_in(&self, range: Range) -> String {
        let start = self.char_idx(range.start);
        let end = self.char_idx(range.end).max(start);
        self.rope.slice(start..end).to_string()
    }

    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    // -- Coordinate conversion ----------------------------------------------

    /// Absolute char index for `pos`, clamped into the buffer. A column past
    /// the line's content lands on the line's terminator (or buffer end).
    #[must_use]
    pub fn char_idx(&self, pos: Position) -> usize {
        let last = self.rope.len_lines() - 1;
        if pos.line > last {
            return self.rope.len_chars();
        }
        let start = self.rope.line_to_char(pos.line);
        let max = self.rope.line(pos.line).len_chars();
        start + pos.col.min(max)
    }

    /// Position of an absolute char index, clamped to the buffer end.
    #[must_use]
    pub fn idx_to_pos(&self, idx: usize) -> Position {
        let idx = idx.min(self.rope.len_chars());
        let line = self.rope.char_to_line(idx);
        Position::new(line, idx - self.rope.line_to_char(line))
    }

    /// Clamp to a cursor position on existing text. With `past_end` the
    /// column may sit one past the last char (insert mode).
    #[must_use]
    pub fn clamp(&self, pos: Position, past_end: bool) -> Position {
        let line = pos.line.min(self.line_count() - 1);
        let len = self.line_len(line);
        let max = if past_end { len } else { len.saturating_sub(1) };
        Position::new(line, pos.col.min(max))
    }

    /// Start of the line after `line`, or the buffer end on the last line.
    #[must_use]
    pub fn line_end_pos(&self, line: usize) -> Position {
        if line + 1 < self.line_count() {
            Position::new(line + 1, 0)
        } else {
            Position::new(line, self.line_len(line))
        }
    }

    // -- Editing ------------------------------------------------------------

    /// Insert text at `pos`.
    pub fn insert(&mut self, pos: Position, text: &str) {
        if text.is_empty() {
            return;
        }
        let idx = self.char_idx(pos);
        self.rope.insert(idx, text);
        self.modified = true;
    }

    /// Delete `range`, returning the removed text.
    pub fn delete(&mut self, range: Range) -> String {
        self.set_range(range, "")
    }

    /// Replace `range` with `text`, returning what was there.
    pub fn set_range(&mut self, range: Range, text: &str) -> String {
        let start = self.char_idx(range.start);
        let end = self.char_idx(range.end).max(start);
        let removed = self.rope.slice(start..end).to_string();
        if removed.is_empty() && text.is_empty() {
            return removed;
        }
        self.rope.remove(start..end);
        self.rope.insert(start, text);
        self.modified = true;
        removed
    }

    // -- Metadata -----------------------------------------------------------

    /// `true` once any edit lands after construction or the last save.
    #[inline]
    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    #[inline]
    pub const fn mark_saved(&mut self) {
        self.modified = false;
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("lines", &self.line_count())
            .field("chars", &self.len_chars())
            .field("modified", &self.modified)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
