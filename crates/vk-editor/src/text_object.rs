//! Text objects — regions selected by structure rather than by motion.
//!
//! ```text
//! operator + text-object = action
//! d        + iw          = delete inner word
//! c        + i"          = change inside quotes
//! y        + 2a(         = yank around the second enclosing parens
//! ```
//!
//! | Inner    | Around   | Selects                                    |
//! |----------|----------|--------------------------------------------|
//! | `iw`     | `aw`     | word, with surrounding blanks for `a`      |
//! | `iW`     | `aW`     | WORD                                       |
//! | `is`     | `as`     | sentence                                   |
//! | `ip`     | `ap`     | paragraph (always line-wise)               |
//! | `i"`     | `a"`     | double-quoted string on the cursor line    |
//! | `i'`     | `a'`     | single-quoted string                       |
//! | `` i` `` | `` a` `` | backtick string                            |
//! | `ib`     | `ab`     | `( )` block, also `i(` `i)`                |
//! | `i[`     | `a[`     | `[ ]` block, also `i]`                     |
//! | `iB`     | `aB`     | `{ }` block, also `i{` `i}`                |
//! | `i<`     | `a<`     | `< >` block, also `i>`                     |
//! | `it`     | `at`     | XML/HTML tag block                         |
//!
//! A count repeats the object outward (brackets, tags) or onward (words,
//! sentences, paragraphs). [`select`] returns `None` when the object does
//! not exist around the cursor, which cancels the operator.

use std::sync::LazyLock;

use regex::Regex;
use ropey::Rope;

use crate::buffer::Buffer;
use crate::position::{Position, Range};
use crate::word::{CharClass, WordKind};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Word(WordKind),
    Sentence,
    Paragraph,
    Quote(char),
    Bracket { open: char, close: char },
    Tag,
}

/// An object key plus its `i`/`a` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextObject {
    pub kind: ObjectKind,
    pub inner: bool,
}

impl TextObject {
    /// The object named by the key after `i` or `a`.
    #[must_use]
    pub const fn from_key(ch: char, inner: bool) -> Option<Self> {
        let kind = match ch {
            'w' => ObjectKind::Word(WordKind::Small),
            'W' => ObjectKind::Word(WordKind::Big),
            's' => ObjectKind::Sentence,
            'p' => ObjectKind::Paragraph,
            '"' | '\'' | '`' => ObjectKind::Quote(ch),
            '(' | ')' | 'b' => ObjectKind::Bracket { open: '(', close: ')' },
            '[' | ']' => ObjectKind::Bracket { open: '[', close: ']' },
            '{' | '}' | 'B' => ObjectKind::Bracket { open: '{', close: '}' },
            '<' | '>' => ObjectKind::Bracket { open: '<', close: '>' },
            't' => ObjectKind::Tag,
            _ => return None,
        };
        Some(Self { kind, inner })
    }
}

/// A selected region. Line-wise selections cover whole lines from
/// `range.start.line` through `range.end.line`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selected {
    pub range: Range,
    pub linewise: bool,
}

impl Selected {
    const fn chars(range: Range) -> Self {
        Self { range, linewise: false }
    }

    fn from_idx(buf: &Buffer, start: usize, end: usize) -> Self {
        Self::chars(Range::ordered(buf.idx_to_pos(start), buf.idx_to_pos(end)))
    }

    fn lines(buf: &Buffer, first: usize, last: usize) -> Self {
        Self {
            range: Range::ordered(Position::new(first, 0), Position::new(last, buf.line_len(last))),
            linewise: true,
        }
    }
}

/// Select `object` around `pos`, `count` times.
#[must_use]
pub fn select(buf: &Buffer, pos: Position, object: TextObject, count: usize) -> Option<Selected> {
    let n = count.max(1);
    let pos = buf.clamp(pos, false);
    match object.kind {
        ObjectKind::Word(kind) => word(buf, pos, kind, object.inner, n),
        ObjectKind::Sentence => sentence(buf, pos, object.inner, n),
        ObjectKind::Paragraph => paragraph(buf, pos.line, object.inner, n),
        ObjectKind::Quote(q) => quote(buf, pos, q, object.inner, n),
        ObjectKind::Bracket { open, close } => bracket(buf, pos, open, close, object.inner, n),
        ObjectKind::Tag => tag(buf, pos, object.inner, n),
    }
}

// ---------------------------------------------------------------------------
// Words
// ---------------------------------------------------------------------------

fn run_start(rope: &Rope, kind: WordKind, mut i: usize) -> usize {
    let class = kind.classify(rope.char(i));
    while i > 0 && kind.classify(rope.char(i - 1)) == class {
        i -= 1;
    }
    i
}

fn run_end(rope: &Rope, kind: WordKind, mut i: usize) -> usize {
    let class = kind.classify(rope.char(i));
    while i + 1 < rope.len_chars() && kind.classify(rope.char(i + 1)) == class {
        i += 1;
    }
    i
}

fn word(buf: &Buffer, pos: Position, kind: WordKind, inner: bool, n: usize) -> Option<Selected> {
    if buf.line_len(pos.line) == 0 {
        return inner.then(|| Selected::chars(Range::point(pos)));
    }
    let rope = buf.rope();
    let total = rope.len_chars();
    let idx = buf.char_idx(pos);
    let class = |i: usize| kind.classify(rope.char(i));

    let mut start = run_start(rope, kind, idx);
    let mut end = run_end(rope, kind, idx);

    if !inner {
        if class(idx) == CharClass::Blank {
            if end + 1 < total && class(end + 1).is_text() {
                end = run_end(rope, kind, end + 1);
            }
        } else if end + 1 < total && class(end + 1) == CharClass::Blank {
            end = run_end(rope, kind, end + 1);
        } else {
            while start > 0 && class(start - 1) == CharClass::Blank {
                start -= 1;
            }
        }
    }

    let end = extend_word(buf, end, kind, inner, n - 1)?;
    Some(Selected::from_idx(buf, start, end + 1))
}

/// Grow a word selection ending (inclusively) at `end` by `n` more steps.
///
/// Each step first steps over a line break. `iw` then takes the next run
/// of one class; `aw` takes blanks plus a word, or a word plus the blanks
/// up to the next word on its line. Also used by Visual mode to extend an
/// existing selection.
#[must_use]
pub fn extend_word(buf: &Buffer, mut end: usize, kind: WordKind, inner: bool, n: usize) -> Option<usize> {
    let rope = buf.rope();
    let total = rope.len_chars();
    let class = |i: usize| kind.classify(rope.char(i));
    for _ in 0..n {
        let mut i = end + 1;
        if i < total && rope.char(i) == '\n' {
            i += 1;
        }
        if i >= total {
            return None;
        }
        end = if inner {
            run_end(rope, kind, i)
        } else if class(i).is_text() {
            let mut j = run_end(rope, kind, i);
            while j + 1 < total && class(j + 1) == CharClass::Blank {
                j += 1;
            }
            j
        } else {
            let j = (i..total).find(|&j| class(j).is_text())?;
            run_end(rope, kind, j)
        };
    }
    Some(end)
}

// ---------------------------------------------------------------------------
// Sentences
// ---------------------------------------------------------------------------

/// A run of sentence text or of the white space between sentences, as
/// `[start, end)` char indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Piece {
    start: usize,
    end: usize,
    text: bool,
}

fn paragraph_lines(buf: &Buffer, line: usize) -> (usize, usize) {
    let blank = |l: usize| buf.line_len(l) == 0;
    let mut first = line;
    while first > 0 && !blank(first - 1) {
        first -= 1;
    }
    let mut last = line;
    while last + 1 < buf.line_count() && !blank(last + 1) {
        last += 1;
    }
    (first, last)
}

/// Split one paragraph into sentence and gap pieces. A sentence ends after
/// `.`, `!` or `?`, optionally followed by closing `)]"'`, when white space
/// or the paragraph end follows.
fn sentence_pieces(rope: &Rope, from: usize, to: usize) -> Vec<Piece> {
    let ws = |i: usize| rope.char(i).is_whitespace();
    let mut pieces = Vec::new();
    let mut i = from;
    while i < to {
        let start = i;
        if ws(i) {
            while i < to && ws(i) {
                i += 1;
            }
            pieces.push(Piece { start, end: i, text: false });
            continue;
        }
        while i < to {
            let ch = rope.char(i);
            i += 1;
            if matches!(ch, '.' | '!' | '?') {
                while i < to && matches!(rope.char(i), ')' | ']' | '"' | '\'') {
                    i += 1;
                }
                if i >= to || ws(i) {
                    break;
                }
            }
        }
        pieces.push(Piece { start, end: i, text: true });
    }
    pieces
}

fn sentence(buf: &Buffer, pos: Position, inner: bool, n: usize) -> Option<Selected> {
    if buf.line_len(pos.line) == 0 {
        return None;
    }
    let rope = buf.rope();
    let (first, last) = paragraph_lines(buf, pos.line);
    let from = rope.line_to_char(first);
    let to = buf.char_idx(Position::new(last, buf.line_len(last)));
    let pieces = sentence_pieces(rope, from, to);
    let idx = buf.char_idx(pos);
    let k = pieces.iter().position(|p| idx >= p.start && idx < p.end)?;

    if inner {
        let lastp = pieces.get(k.checked_add(n - 1)?)?;
        return Some(Selected::from_idx(buf, pieces[k].start, lastp.end));
    }

    if pieces[k].text {
        // n sentences, then the white space after them (or before, if none).
        let texts: Vec<usize> = (k..pieces.len()).filter(|&j| pieces[j].text).take(n).collect();
        let &last_text = texts.get(n - 1)?;
        match pieces.get(last_text + 1) {
            Some(gap) => Some(Selected::from_idx(buf, pieces[k].start, gap.end)),
            None => {
                let start = k.checked_sub(1).map_or(pieces[k].start, |g| pieces[g].start);
                Some(Selected::from_idx(buf, start, pieces[last_text].end))
            }
        }
    } else {
        let texts: Vec<usize> = (k..pieces.len()).filter(|&j| pieces[j].text).take(n).collect();
        let &last_text = texts.get(n - 1)?;
        Some(Selected::from_idx(buf, pieces[k].start, pieces[last_text].end))
    }
}

// ---------------------------------------------------------------------------
// Paragraphs
// ---------------------------------------------------------------------------

/// `ip` takes `n` alternating runs of text and blank lines. `ap` takes `n`
/// paragraphs with the blank lines after each, or the blank lines before
/// when the last paragraph ends the buffer.
fn paragraph(buf: &Buffer, line: usize, inner: bool, n: usize) -> Option<Selected> {
    let last_line = buf.line_count() - 1;
    let blank = |l: usize| buf.line_len(l) == 0;
    let run_end = |l: usize| {
        let b = blank(l);
        let mut e = l;
        while e < last_line && blank(e + 1) == b {
            e += 1;
        }
        e
    };

    let mut first = line;
    while first > 0 && blank(first - 1) == blank(line) {
        first -= 1;
    }

    if inner {
        let mut end = run_end(first);
        for _ in 1..n {
            if end == last_line {
                return None;
            }
            end = run_end(end + 1);
        }
        return Some(Selected::lines(buf, first, end));
    }

    let mut end = run_end(first);
    let started_blank = blank(first);
    // From a blank run: the blanks plus the paragraph after them.
    if started_blank {
        if end == last_line {
            return None;
        }
        end = run_end(end + 1);
    }
    let mut took_trailing = started_blank;
    for step in 0..n {
        if step > 0 {
            if end == last_line {
                return None;
            }
            end = run_end(end + 1);
        }
        if !started_blank || step > 0 {
            if end < last_line && blank(end + 1) {
                end = run_end(end + 1);
                took_trailing = true;
            } else {
                took_trailing = false;
            }
        }
    }
    if !took_trailing && !started_blank {
        while first > 0 && blank(first - 1) {
            first -= 1;
        }
    }
    Some(Selected::lines(buf, first, end))
}

// ---------------------------------------------------------------------------
// Quotes
// ---------------------------------------------------------------------------

/// Columns of the quote pair around (or after) the cursor. Quotes pair up
/// left to right; a quote escaped with `\` does not count.
fn quote_pair(chars: &[char], col: usize, quote: char) -> Option<(usize, usize)> {
    let quotes: Vec<usize> = (0..chars.len())
        .filter(|&i| chars[i] == quote && (i == 0 || chars[i - 1] != '\\'))
        .collect();
    let pairs: Vec<(usize, usize)> = quotes
        .chunks_exact(2)
        .map(|p| (p[0], p[1]))
        .collect();
    pairs
        .iter()
        .copied()
        .find(|&(o, c)| col >= o && col <= c)
        .or_else(|| pairs.iter().copied().find(|&(o, _)| o > col))
}

fn quote(buf: &Buffer, pos: Position, q: char, inner: bool, n: usize) -> Option<Selected> {
    let chars: Vec<char> = buf.line_text(pos.line).chars().collect();
    let (open, close) = quote_pair(&chars, pos.col, q)?;
    let at = |col: usize| pos.with_col(col);

    // `2i"` selects the quotes too, but no white space.
    if inner && n == 1 {
        return Some(Selected::chars(Range::ordered(at(open + 1), at(close))));
    }
    if inner {
        return Some(Selected::chars(Range::ordered(at(open), at(close + 1))));
    }

    let mut start = open;
    let mut end = close + 1;
    while end < chars.len() && chars[end].is_whitespace() {
        end += 1;
    }
    if end == close + 1 {
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
    }
    Some(Selected::chars(Range::ordered(at(start), at(end))))
}

// ---------------------------------------------------------------------------
// Brackets
// ---------------------------------------------------------------------------

fn find_opening(rope: &Rope, before: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for i in (0..before).rev() {
        let ch = rope.char(i);
        if ch == close {
            depth += 1;
        } else if ch == open {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

fn find_closing(rope: &Rope, after: usize, open: char, close: char) -> Option<usize> {
    let mut depth = 0usize;
    for i in after + 1..rope.len_chars() {
        let ch = rope.char(i);
        if ch == open {
            depth += 1;
        } else if ch == close {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
        }
    }
    None
}

/// Char indices of the `n`th bracket pair enclosing `idx`. Sitting on a
/// bracket counts as being inside its pair.
fn bracket_pair(rope: &Rope, idx: usize, open: char, close: char, n: usize) -> Option<(usize, usize)> {
    if idx >= rope.len_chars() {
        return None;
    }
    let mut pair = match rope.char(idx) {
        ch if ch == open => (idx, find_closing(rope, idx, open, close)?),
        ch if ch == close => (find_opening(rope, idx, open, close)?, idx),
        _ => {
            let o = find_opening(rope, idx, open, close)?;
            (o, find_closing(rope, o, open, close)?)
        }
    };
    for _ in 1..n {
        let o = find_opening(rope, pair.0, open, close)?;
        pair = (o, find_closing(rope, o, open, close)?);
    }
    Some(pair)
}

fn bracket(buf: &Buffer, pos: Position, open: char, close: char, inner: bool, n: usize) -> Option<Selected> {
    let rope = buf.rope();
    let (o, c) = bracket_pair(rope, buf.char_idx(pos), open, close, n)?;
    if !inner {
        return Some(Selected::from_idx(buf, o, c + 1));
    }

    let open_pos = buf.idx_to_pos(o);
    let close_pos = buf.idx_to_pos(c);
    // `{` ending its line and `}` preceded only by indent: whole lines between.
    let open_ends_line = open_pos.col + 1 == buf.line_len(open_pos.line);
    let close_after_indent = buf
        .line_text(close_pos.line)
        .chars()
        .take(close_pos.col)
        .all(char::is_whitespace);
    if open_ends_line && close_after_indent && close_pos.line > open_pos.line + 1 {
        return Some(Selected::lines(buf, open_pos.line + 1, close_pos.line - 1));
    }
    Some(Selected::from_idx(buf, o + 1, c))
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

static TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<(/?)([A-Za-z][\w:.-]*)[^<>]*?(/?)>")
        .unwrap_or_else(|e| unreachable!("tag pattern is valid: {e}"))
});

/// A matched `<name ...>` / `</name>` pair as char indices:
/// `[outer_start, inner_start)` is the open tag, `[inner_end, outer_end)`
/// the close tag.
#[derive(Debug, Clone, Copy)]
struct TagPair {
    outer_start: usize,
    inner_start: usize,
    inner_end: usize,
    outer_end: usize,
}

fn tag_pairs(buf: &Buffer) -> Vec<TagPair> {
    let text = buf.contents();
    let rope = buf.rope();
    let mut stack: Vec<(String, usize, usize)> = Vec::new();
    let mut pairs = Vec::new();
    for caps in TAG.captures_iter(&text) {
        let Some(whole) = caps.get(0) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());
        let name = caps.get(2).map_or("", |m| m.as_str()).to_string();
        let start = rope.byte_to_char(whole.start());
        let end = rope.byte_to_char(whole.end());
        if self_closing {
            continue;
        }
        if !closing {
            stack.push((name, start, end));
        } else if let Some(k) = stack.iter().rposition(|(open, _, _)| *open == name) {
            let (_, outer_start, inner_start) = stack[k].clone();
            stack.truncate(k);
            pairs.push(TagPair {
                outer_start,
                inner_start,
                inner_end: start,
                outer_end: end,
            });
        }
    }
    pairs
}

fn tag(buf: &Buffer, pos: Position, inner: bool, n: usize) -> Option<Selected> {
    let idx = buf.char_idx(pos);
    let mut enclosing: Vec<TagPair> = tag_pairs(buf)
        .into_iter()
        .filter(|p| idx >= p.outer_start && idx < p.outer_end)
        .collect();
    // Innermost first.
    enclosing.sort_by(|a, b| b.outer_start.cmp(&a.outer_start));
    let pair = enclosing.get(n - 1)?;
    Some(if inner {
        Selected::from_idx(buf, pair.inner_start, pair.inner_end)
    } else {
        Selected::from_idx(buf, pair.outer_start, pair.outer_end)
    })
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

    fn r(sl: usize, sc: usize, el: usize, ec: usize) -> Range {
        Range::ordered(p(sl, sc), p(el, ec))
    }

    fn sel(text: &str, at: Position, key: char, inner: bool, count: usize) -> Option<Selected> {
        let buf = Buffer::from_text(text);
        let obj = TextObject::from_key(key, inner).unwrap();
        select(&buf, at, obj, count)
    }

    fn chars(text: &str, at: Position, key: char, inner: bool, count: usize) -> Option<Range> {
        sel(text, at, key, inner, count).map(|s| {
            assert!(!s.linewise);
            s.range
        })
    }

    // -- Keys ---------------------------------------------------------------

    #[test]
    fn key_aliases() {
        assert_eq!(TextObject::from_key('b', true), TextObject::from_key(')', true));
        assert_eq!(TextObject::from_key('B', false), TextObject::from_key('{', false));
        assert_eq!(TextObject::from_key('x', true), None);
    }

    // -- Words --------------------------------------------------------------

    #[test]
    fn iw_basic() {
        assert_eq!(chars("hello world", p(0, 2), 'w', true, 1), Some(r(0, 0, 0, 5)));
        assert_eq!(chars("hello.world", p(0, 5), 'w', true, 1), Some(r(0, 5, 0, 6)));
        assert_eq!(chars("hello   world", p(0, 6), 'w', true, 1), Some(r(0, 5, 0, 8)));
    }

    #[test]
    fn iw_count_alternates_runs() {
        assert_eq!(chars("one two three", p(0, 0), 'w', true, 3), Some(r(0, 0, 0, 7)));
    }

    #[test]
    fn aw_on_blank_takes_following_word() {
        let text = "one   two   three,   four  ";
        assert_eq!(chars(text, p(0, 10), 'w', false, 1), Some(r(0, 9, 0, 17)));
    }

    #[test]
    fn aw_takes_trailing_then_leading_blanks() {
        let text = "one   two   three,   four  ";
        assert_eq!(chars(text, p(0, 8), 'w', false, 1), Some(r(0, 6, 0, 12)));
        assert_eq!(chars(text, p(0, 14), 'w', false, 1), Some(r(0, 9, 0, 17)));
    }

    #[test]
    fn aw_count() {
        let text = "one   two   three,   four  ";
        assert_eq!(chars(text, p(0, 2), 'w', false, 3), Some(r(0, 0, 0, 17)));
        assert_eq!(chars(text, p(0, 2), 'W', false, 3), Some(r(0, 0, 0, 21)));
    }

    #[test]
    fn aw_count_crosses_lines() {
        let text = "one   two   three,   four  \nfive  six";
        assert_eq!(chars(text, p(0, 23), 'w', false, 2), Some(r(0, 21, 1, 6)));
        let text = "one   two   three,   four  \nfive.  six";
        assert_eq!(chars(text, p(0, 23), 'w', false, 2), Some(r(0, 21, 1, 4)));
        assert_eq!(chars(text, p(0, 23), 'W', false, 2), Some(r(0, 21, 1, 7)));
    }

    #[test]
    fn word_on_empty_line() {
        assert_eq!(chars("a\n\nb", p(1, 0), 'w', true, 1), Some(r(1, 0, 1, 0)));
        assert_eq!(sel("a\n\nb", p(1, 0), 'w', false, 1), None);
    }

    // -- Sentences ----------------------------------------------------------

    #[test]
    fn sentences() {
        let text = "One two. Three four! Five.";
        assert_eq!(chars(text, p(0, 10), 's', true, 1), Some(r(0, 9, 0, 20)));
        assert_eq!(chars(text, p(0, 10), 's', false, 1), Some(r(0, 9, 0, 21)));
        assert_eq!(chars(text, p(0, 22), 's', false, 1), Some(r(0, 20, 0, 26)));
        assert_eq!(chars(text, p(0, 0), 's', false, 2), Some(r(0, 0, 0, 21)));
    }

    #[test]
    fn sentence_spans_lines_within_paragraph() {
        let text = "First line\ncontinues. Next.\n\nOther.";
        assert_eq!(chars(text, p(0, 2), 's', true, 1), Some(r(0, 0, 1, 10)));
    }

    // -- Paragraphs -----------------------------------------------------------

    #[test]
    fn paragraphs_are_linewise() {
        let text = "a\nb\n\nc\n\n\nd";
        let s = sel(text, p(0, 0), 'p', true, 1).unwrap();
        assert!(s.linewise);
        assert_eq!((s.range.start.line, s.range.end.line), (0, 1));
        let s = sel(text, p(0, 0), 'p', false, 1).unwrap();
        assert_eq!((s.range.start.line, s.range.end.line), (0, 2));
        let s = sel(text, p(3, 0), 'p', false, 1).unwrap();
        assert_eq!((s.range.start.line, s.range.end.line), (3, 5));
        let s = sel(text, p(6, 0), 'p', false, 1).unwrap();
        assert_eq!((s.range.start.line, s.range.end.line), (4, 6));
        let s = sel(text, p(0, 0), 'p', true, 3).unwrap();
        assert_eq!((s.range.start.line, s.range.end.line), (0, 3));
    }

    // -- Quotes -------------------------------------------------------------

    #[test]
    fn quotes() {
        let text = r#"say "hi there" now"#;
        assert_eq!(chars(text, p(0, 6), '"', true, 1), Some(r(0, 5, 0, 13)));
        assert_eq!(chars(text, p(0, 6), '"', false, 1), Some(r(0, 4, 0, 15)));
        assert_eq!(chars(text, p(0, 6), '"', true, 2), Some(r(0, 4, 0, 14)));
        // Before the pair: the next pair on the line.
        assert_eq!(chars(text, p(0, 0), '"', true, 1), Some(r(0, 5, 0, 13)));
    }

    #[test]
    fn quotes_skip_escapes() {
        let text = r#"x = "a\"b" y"#;
        assert_eq!(chars(text, p(0, 5), '"', true, 1), Some(r(0, 5, 0, 9)));
        assert_eq!(sel("no quotes", p(0, 0), '\'', true, 1), None);
    }

    // -- Brackets -----------------------------------------------------------

    #[test]
    fn brackets_nested_with_count() {
        let text = "f(a, (b, c))";
        assert_eq!(chars(text, p(0, 7), '(', true, 1), Some(r(0, 6, 0, 10)));
        assert_eq!(chars(text, p(0, 7), 'b', false, 1), Some(r(0, 5, 0, 11)));
        assert_eq!(chars(text, p(0, 7), ')', true, 2), Some(r(0, 2, 0, 11)));
        assert_eq!(sel(text, p(0, 7), '(', true, 3), None);
    }

    #[test]
    fn bracket_on_the_bracket_itself() {
        assert_eq!(chars("[x]", p(0, 0), '[', true, 1), Some(r(0, 1, 0, 2)));
        assert_eq!(chars("[x]", p(0, 2), ']', false, 1), Some(r(0, 0, 0, 3)));
    }

    #[test]
    fn inner_block_on_own_lines_is_linewise() {
        let text = "fn main() {\n    body\n    more\n}";
        let s = sel(text, p(1, 4), 'B', true, 1).unwrap();
        assert!(s.linewise);
        assert_eq!((s.range.start.line, s.range.end.line), (1, 2));
        assert_eq!(chars("{ a }", p(0, 2), '{', true, 1), Some(r(0, 1, 0, 4)));
    }

    // -- Tags ---------------------------------------------------------------

    #[test]
    fn tags() {
        let text = "<div><b>bold</b> x</div>";
        assert_eq!(chars(text, p(0, 9), 't', true, 1), Some(r(0, 8, 0, 12)));
        assert_eq!(chars(text, p(0, 9), 't', false, 1), Some(r(0, 5, 0, 16)));
        assert_eq!(chars(text, p(0, 9), 't', true, 2), Some(r(0, 5, 0, 18)));
        assert_eq!(sel("<br/> text", p(0, 7), 't', true, 1), None);
    }
}
