//! Search — literal pattern search for `/`, `?`, `n` and `N`.
//!
//! Patterns are matched literally over the whole buffer text, so a pattern
//! may span lines. The search starts one char after (or before) the cursor
//! and wraps around the buffer when `wrapscan` is set.

use crate::buffer::Buffer;
use crate::position::Position;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }

    /// The prompt character: `/` or `?`.
    #[must_use]
    pub const fn prefix(self) -> char {
        match self {
            Self::Forward => '/',
            Self::Backward => '?',
        }
    }
}

// ---------------------------------------------------------------------------
// Last search
// ---------------------------------------------------------------------------

/// The pattern `n` and `N` repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastSearch {
    pub pattern: String,
    pub direction: SearchDirection,
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Start of the next match of `pattern` from `from` in `direction`.
///
/// A match starting exactly at `from` is skipped so that repeated `n`
/// advances. Returns `None` when nothing matches (or nothing matches before
/// the buffer edge when `wrap` is off).
#[must_use]
pub fn find(
    buf: &Buffer,
    pattern: &str,
    from: Position,
    direction: SearchDirection,
    wrap: bool,
) -> Option<Position> {
    if pattern.is_empty() || buf.is_empty() {
        return None;
    }
    let text = buf.contents();
    let rope = buf.rope();
    let from_byte = rope.char_to_byte(buf.char_idx(from));

    let starts: Vec<usize> = text.match_indices(pattern).map(|(b, _)| b).collect();

    let hit = match direction {
        SearchDirection::Forward => starts
            .iter()
            .copied()
            .find(|&b| b > from_byte)
            .or_else(|| if wrap { starts.first().copied() } else { None }),
        SearchDirection::Backward => starts
            .iter()
            .rev()
            .copied()
            .find(|&b| b < from_byte)
            .or_else(|| if wrap { starts.last().copied() } else { None }),
    }?;

    Some(buf.idx_to_pos(rope.byte_to_char(hit)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    #[test]
    fn forward_skips_match_under_cursor() {
        let buf = Buffer::from_text("foo bar foo");
        assert_eq!(
            find(&buf, "foo", p(0, 0), SearchDirection::Forward, true),
            Some(p(0, 8))
        );
    }

    #[test]
    fn forward_wraps() {
        let buf = Buffer::from_text("foo bar foo");
        assert_eq!(
            find(&buf, "foo", p(0, 8), SearchDirection::Forward, true),
            Some(p(0, 0))
        );
        assert_eq!(find(&buf, "foo", p(0, 8), SearchDirection::Forward, false), None);
    }

    #[test]
    fn backward_across_lines() {
        let buf = Buffer::from_text("alpha\nbeta\ngamma");
        assert_eq!(
            find(&buf, "a", p(2, 1), SearchDirection::Backward, true),
            Some(p(1, 3))
        );
    }

    #[test]
    fn multibyte_text_maps_to_chars() {
        let buf = Buffer::from_text("café x café");
        assert_eq!(
            find(&buf, "café", p(0, 0), SearchDirection::Forward, true),
            Some(p(0, 7))
        );
    }

    #[test]
    fn missing_pattern() {
        let buf = Buffer::from_text("abc");
        assert_eq!(find(&buf, "zz", p(0, 0), SearchDirection::Forward, true), None);
        assert_eq!(find(&buf, "", p(0, 0), SearchDirection::Forward, true), None);
    }

    #[test]
    fn opposite_and_prefix() {
        assert_eq!(SearchDirection::Forward.opposite(), SearchDirection::Backward);
        assert_eq!(SearchDirection::Backward.prefix(), '?');
    }
}
