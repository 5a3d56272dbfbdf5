//! Cursor — a position, a sticky column, and an optional visual anchor.
//!
//! The cursor does not know which mode the editor is in. Every method that
//! can land on a column takes `past_end`: `false` keeps the cursor ON a char
//! (Normal, Visual), `true` lets it sit after the last char (Insert, Replace).
//!
//! # Sticky column
//!
//! `j` and `k` aim for the column the cursor had before the last vertical
//! run, so passing through a short line does not lose the column. `$` sets
//! the sticky column to [`Cursor::END`], which means "end of every line".
//!
//! # Anchor
//!
//! In Visual mode the anchor is the fixed end of the selection and the
//! cursor is the moving end. `o` swaps them.

use crate::buffer::Buffer;
use crate::position::{Position, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pos: Position,
    sticky_col: usize,
    anchor: Option<Position>,
}

impl Cursor {
    /// Sticky column meaning "stay at the end of the line".
    pub const END: usize = usize::MAX;

    #[must_use]
    pub const fn at(pos: Position) -> Self {
        Self {
            pos,
            sticky_col: pos.col,
            anchor: None,
        }
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn position(&self) -> Position {
        self.pos
    }

    #[inline]
    #[must_use]
    pub const fn line(&self) -> usize {
        self.pos.line
    }

    #[inline]
    #[must_use]
    pub const fn col(&self) -> usize {
        self.pos.col
    }

    #[inline]
    #[must_use]
    pub const fn sticky_col(&self) -> usize {
        self.sticky_col
    }

    #[inline]
    #[must_use]
    pub const fn anchor(&self) -> Option<Position> {
        self.anchor
    }

    /// The cursor as a host-facing selection; collapsed without an anchor.
    #[must_use]
    pub fn selection(&self) -> Selection {
        self.anchor
            .map_or_else(|| Selection::cursor(self.pos), |a| Selection::new(a, self.pos))
    }

    // -- Positioning --------------------------------------------------------

    /// Move to `pos`, clamped, and reset the sticky column.
    pub fn set_position(&mut self, pos: Position, buf: &Buffer, past_end: bool) {
        self.pos = buf.clamp(pos, past_end);
        self.sticky_col = self.pos.col;
    }

    /// Move to `pos`, clamped, keeping the sticky column.
    pub fn set_vertical(&mut self, pos: Position, buf: &Buffer, past_end: bool) {
        self.pos = buf.clamp(pos, past_end);
    }

    /// Set the sticky column directly (`$` uses [`Cursor::END`]).
    pub const fn set_sticky(&mut self, col: usize) {
        self.sticky_col = col;
    }

    /// The column a vertical move onto `line` lands on.
    #[must_use]
    pub fn column_on(&self, line: usize, buf: &Buffer, past_end: bool) -> usize {
        let len = buf.line_len(line);
        let max = if past_end { len } else { len.saturating_sub(1) };
        self.sticky_col.min(max)
    }

    /// Re-clamp after the buffer changed underneath the cursor.
    pub fn clamp(&mut self, buf: &Buffer, past_end: bool) {
        self.pos = buf.clamp(self.pos, past_end);
        if let Some(a) = self.anchor {
            self.anchor = Some(buf.clamp(a, past_end));
        }
    }

    // -- Anchor -------------------------------------------------------------

    pub const fn set_anchor(&mut self, pos: Position) {
        self.anchor = Some(pos);
    }

    pub const fn clear_anchor(&mut self) {
        self.anchor = None;
    }

    /// Visual `o`: jump to the other end of the selection.
    pub fn swap_anchor(&mut self) {
        if let Some(a) = self.anchor.replace(self.pos) {
            self.pos = a;
            self.sticky_col = a.col;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sticky_column_survives_short_lines() {
        let buf = Buffer::from_text("abcdef\nab\nabcdef");
        let mut c = Cursor::at(Position::new(0, 4));
        let col = c.column_on(1, &buf, false);
        c.set_vertical(Position::new(1, col), &buf, false);
        assert_eq!(c.position(), Position::new(1, 1));
        let col = c.column_on(2, &buf, false);
        assert_eq!(col, 4);
    }

    #[test]
    fn end_sticky_tracks_line_end() {
        let buf = Buffer::from_text("abc\nabcdef");
        let mut c = Cursor::at(Position::new(0, 2));
        c.set_sticky(Cursor::END);
        assert_eq!(c.column_on(1, &buf, false), 5);
        assert_eq!(c.column_on(1, &buf, true), 6);
    }

    #[test]
    fn set_position_clamps() {
        let buf = Buffer::from_text("ab");
        let mut c = Cursor::default();
        c.set_position(Position::new(3, 9), &buf, false);
        assert_eq!(c.position(), Position::new(0, 1));
        c.set_position(Position::new(0, 9), &buf, true);
        assert_eq!(c.position(), Position::new(0, 2));
    }

    #[test]
    fn anchor_swap() {
        let mut c = Cursor::at(Position::new(0, 5));
        c.set_anchor(Position::new(0, 1));
        assert_eq!(c.selection(), Selection::new(Position::new(0, 1), Position::new(0, 5)));
        c.swap_anchor();
        assert_eq!(c.position(), Position::new(0, 1));
        assert_eq!(c.anchor(), Some(Position::new(0, 5)));
        c.clear_anchor();
        assert!(c.selection().is_collapsed());
    }
}
