//! Positions, ranges and selections.
//!
//! All coordinates are **0-indexed** and columns count chars, which is how
//! `ropey` addresses text. A [`Range`] is half-open; a [`Selection`] is the
//! host-facing `(anchor, head)` pair that the selections port exchanges.

use std::fmt;

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A (line, column) position, both 0-indexed.
///
/// Ordered lexicographically: line first, then column.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const ZERO: Self = Self { line: 0, col: 0 };

    #[inline]
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Same line, different column.
    #[inline]
    #[must_use]
    pub const fn with_col(self, col: usize) -> Self {
        Self { line: self.line, col }
    }
}

impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.line.cmp(&other.line).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.line, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open range `[start, end)` with `start <= end`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Build a range from two positions in either order.
    #[inline]
    #[must_use]
    pub fn ordered(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    #[inline]
    #[must_use]
    pub const fn point(pos: Position) -> Self {
        Self { start: pos, end: pos }
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.line == self.end.line && self.start.col == self.end.col
    }

    #[inline]
    #[must_use]
    pub const fn is_single_line(self) -> bool {
        self.start.line == self.end.line
    }

    #[inline]
    #[must_use]
    pub fn contains(self, pos: Position) -> bool {
        pos >= self.start && pos < self.end
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Range({}:{} .. {}:{})",
            self.start.line, self.start.col, self.end.line, self.end.col
        )
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// A selection as the host sees it: where it was started and where the
/// cursor is now. A collapsed selection (`anchor == head`) is a plain cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Selection {
    pub anchor: Position,
    pub head: Position,
}

impl Selection {
    #[must_use]
    pub const fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    #[must_use]
    pub const fn cursor(pos: Position) -> Self {
        Self { anchor: pos, head: pos }
    }

    /// The earlier of anchor and head.
    #[must_use]
    pub fn start(self) -> Position {
        self.anchor.min(self.head)
    }

    /// The later of anchor and head.
    #[must_use]
    pub fn end(self) -> Position {
        self.anchor.max(self.head)
    }

    /// `true` when the head sits before the anchor.
    #[must_use]
    pub fn is_reversed(self) -> bool {
        self.head < self.anchor
    }

    #[must_use]
    pub fn is_collapsed(self) -> bool {
        self.anchor == self.head
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_ordering_is_line_major() {
        assert!(Position::new(0, 99) < Position::new(1, 0));
        assert!(Position::new(2, 3) < Position::new(2, 4));
    }

    #[test]
    fn display_is_one_indexed() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(format!("{:?}", Position::new(3, 4)), "Pos(3:4)");
    }

    #[test]
    fn ordered_range_swaps() {
        let r = Range::ordered(Position::new(4, 0), Position::new(1, 2));
        assert_eq!(r.start, Position::new(1, 2));
        assert_eq!(r.end, Position::new(4, 0));
        assert!(!r.is_single_line());
    }

    #[test]
    fn range_contains_is_half_open() {
        let r = Range::ordered(Position::new(0, 2), Position::new(0, 5));
        assert!(r.contains(Position::new(0, 2)));
        assert!(r.contains(Position::new(0, 4)));
        assert!(!r.contains(Position::new(0, 5)));
        assert!(Range::point(Position::ZERO).is_empty());
    }

    #[test]
    fn selection_bounds() {
        let s = Selection::new(Position::new(2, 5), Position::new(1, 0));
        assert!(s.is_reversed());
        assert_eq!(s.start(), Position::new(1, 0));
        assert_eq!(s.end(), Position::new(2, 5));
        assert!(Selection::cursor(Position::ZERO).is_collapsed());
    }
}
