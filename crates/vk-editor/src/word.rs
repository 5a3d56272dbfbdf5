//! Word scanning — the character classes and index walks behind `w b e`.
//!
//! | Walk           | Keys    | Lands on                               |
//! |----------------|---------|----------------------------------------|
//! | [`next_start`] | `w` `W` | first char of the next word            |
//! | [`prev_start`] | `b` `B` | first char of the current/previous word|
//! | [`next_end`]   | `e` `E` | last char of the current/next word     |
//! | [`prev_end`]   | `ge`    | last char of the previous word         |
//!
//! A **word** is a run of word characters (letters, digits, `_`) or a run of
//! other non-blank characters. A **WORD** is any run of non-blanks. Empty
//! lines count as words for `w` and `b`.
//!
//! All walks take and return absolute char indices. [`next_start`] returns
//! `len_chars()` when there is no next word, which is what an operator wants
//! (`dw` on the last word deletes to the end); cursor motions clamp.

use crate::buffer::Buffer;

// ---------------------------------------------------------------------------
// Character classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CharClass {
    /// Letters, digits, underscore.
    Word,
    /// Non-blank, non-word characters.
    Punctuation,
    /// Space, tab.
    Blank,
    Newline,
}

impl CharClass {
    pub(crate) const fn is_text(self) -> bool {
        matches!(self, Self::Word | Self::Punctuation)
    }
}

/// `w`-style words or `W`-style WORDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordKind {
    Small,
    Big,
}

impl WordKind {
    pub(crate) fn classify(self, ch: char) -> CharClass {
        if ch == '\n' {
            CharClass::Newline
        } else if ch.is_whitespace() {
            CharClass::Blank
        } else if self == Self::Big || ch.is_alphanumeric() || ch == '_' {
            CharClass::Word
        } else {
            CharClass::Punctuation
        }
    }
}

// ---------------------------------------------------------------------------
// Walks
// ---------------------------------------------------------------------------

/// Start of the next word after `idx`, or `len_chars()` if none.
#[must_use]
pub fn next_start(buf: &Buffer, idx: usize, kind: WordKind) -> usize {
    let rope = buf.rope();
    let total = rope.len_chars();
    if idx >= total {
        return total;
    }

    let mut i = idx;
    let start = kind.classify(rope.char(i));
    if start.is_text() {
        while i < total && kind.classify(rope.char(i)) == start {
            i += 1;
        }
    }

    while i < total {
        match kind.classify(rope.char(i)) {
            CharClass::Word | CharClass::Punctuation => break,
            CharClass::Blank => i += 1,
            CharClass::Newline => {
                i += 1;
                // An empty line is a word of its own.
                if i < total && rope.char(i) == '\n' {
                    break;
                }
            }
        }
    }
    i
}

/// Start of the word before `idx` (or of the word `idx` is inside).
#[must_use]
pub fn prev_start(buf: &Buffer, idx: usize, kind: WordKind) -> usize {
    let rope = buf.rope();
    let idx = idx.min(rope.len_chars());
    if idx == 0 {
        return 0;
    }

    let mut i = idx - 1;
    loop {
        match kind.classify(rope.char(i)) {
            CharClass::Word | CharClass::Punctuation => break,
            CharClass::Newline => {
                let line = rope.char_to_line(i);
                if buf.line_len(line) == 0 {
                    return rope.line_to_char(line);
                }
                if i == 0 {
                    return 0;
                }
                i -= 1;
            }
            CharClass::Blank => {
                if i == 0 {
                    return 0;
                }
                i -= 1;
            }
        }
    }

    let class = kind.classify(rope.char(i));
    while i > 0 && kind.classify(rope.char(i - 1)) == class {
        i -= 1;
    }
    i
}

/// Last char of the current or next word; `idx` itself if there is none.
#[must_use]
pub fn next_end(buf: &Buffer, idx: usize, kind: WordKind) -> usize {
    let rope = buf.rope();
    let total = rope.len_chars();
    if total == 0 || idx + 1 >= total {
        return idx;
    }

    let mut i = idx + 1;
    while i < total && !kind.classify(rope.char(i)).is_text() {
        i += 1;
    }
    if i >= total {
        return idx;
    }

    let class = kind.classify(rope.char(i));
    while i + 1 < total && kind.classify(rope.char(i + 1)) == class {
        i += 1;
    }
    i
}

/// Last char of the previous word (`ge`). Empty lines count as words.
#[must_use]
pub fn prev_end(buf: &Buffer, idx: usize, kind: WordKind) -> usize {
    let rope = buf.rope();
    let total = rope.len_chars();
    if idx == 0 || total == 0 {
        return 0;
    }
    let mut i = idx.min(total - 1);
    let class = kind.classify(rope.char(i));
    if class.is_text() {
        while i > 0 && kind.classify(rope.char(i - 1)) == class {
            i -= 1;
        }
    }
    while i > 0 {
        i -= 1;
        let ch = rope.char(i);
        if kind.classify(ch).is_text() {
            return i;
        }
        if ch == '\n' && (i == 0 || rope.char(i - 1) == '\n') {
            return i;
        }
    }
    0
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const S: WordKind = WordKind::Small;
    const B: WordKind = WordKind::Big;

    // -- Classification -----------------------------------------------------

    #[test]
    fn classes() {
        assert_eq!(S.classify('a'), CharClass::Word);
        assert_eq!(S.classify('_'), CharClass::Word);
        assert_eq!(S.classify('é'), CharClass::Word);
        assert_eq!(S.classify('.'), CharClass::Punctuation);
        assert_eq!(B.classify('.'), CharClass::Word);
        assert_eq!(S.classify('\t'), CharClass::Blank);
        assert_eq!(S.classify('\n'), CharClass::Newline);
    }

    // -- next_start ---------------------------------------------------------

    #[test]
    fn next_start_skips_word_and_blanks() {
        let buf = Buffer::from_text("one two three");
        assert_eq!(next_start(&buf, 0, S), 4);
        assert_eq!(next_start(&buf, 4, S), 8);
    }

    #[test]
    fn next_start_punctuation_boundary() {
        let buf = Buffer::from_text("foo.bar baz");
        assert_eq!(next_start(&buf, 0, S), 3);
        assert_eq!(next_start(&buf, 0, B), 8);
    }

    #[test]
    fn next_start_past_last_word_is_end() {
        let buf = Buffer::from_text("one two");
        assert_eq!(next_start(&buf, 4, S), 7);
    }

    #[test]
    fn next_start_crosses_lines_and_stops_on_empty() {
        let buf = Buffer::from_text("a\nb");
        assert_eq!(next_start(&buf, 0, S), 2);
        let buf = Buffer::from_text("a\n\nb");
        assert_eq!(next_start(&buf, 0, S), 2);
        assert_eq!(next_start(&buf, 2, S), 3);
    }

    // -- prev_start ---------------------------------------------------------

    #[test]
    fn prev_start_basic() {
        let buf = Buffer::from_text("one two three");
        assert_eq!(prev_start(&buf, 8, S), 4);
        assert_eq!(prev_start(&buf, 6, S), 4);
        assert_eq!(prev_start(&buf, 0, S), 0);
    }

    #[test]
    fn prev_start_stops_on_empty_line() {
        let buf = Buffer::from_text("a\n\nb");
        assert_eq!(prev_start(&buf, 3, S), 2);
    }

    // -- next_end -----------------------------------------------------------

    #[test]
    fn next_end_basic() {
        let buf = Buffer::from_text("one two");
        assert_eq!(next_end(&buf, 0, S), 2);
        assert_eq!(next_end(&buf, 2, S), 6);
    }

    #[test]
    fn next_end_big_word() {
        let buf = Buffer::from_text("a.b c");
        assert_eq!(next_end(&buf, 0, S), 1);
        assert_eq!(next_end(&buf, 0, B), 2);
    }

    #[test]
    fn prev_end_basic() {
        let buf = Buffer::from_text("one two three");
        assert_eq!(prev_end(&buf, 9, S), 6);
        assert_eq!(prev_end(&buf, 5, S), 2);
        assert_eq!(prev_end(&buf, 1, S), 0);
    }

    #[test]
    fn prev_end_stops_on_empty_line() {
        let buf = Buffer::from_text("a\n\nb");
        assert_eq!(prev_end(&buf, 3, S), 2);
    }

    #[test]
    fn next_end_at_buffer_end_stays() {
        let buf = Buffer::from_text("ab");
        assert_eq!(next_end(&buf, 1, S), 1);
    }
}
