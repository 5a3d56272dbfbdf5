//! Motions — where a motion key takes the cursor, and how an operator treats
//! the text it passes over.
//!
//! [`resolve`] turns a [`Motion`] plus a count into a [`Landing`]. The same
//! landing serves a bare cursor move and an operator target; the operator
//! reads [`MotionClass`] to decide whether the end char is included or whole
//! lines are taken.
//!
//! | Class       | Motions                                                 |
//! |-------------|---------------------------------------------------------|
//! | exclusive   | `h l 0 ^ \| w W b B F T n N`                            |
//! | inclusive   | `e E ge gE $ f t %`                                     |
//! | linewise    | `j k gg G + - <CR> { }`, `N%`                           |
//!
//! A motion that cannot move (`h` in column 0, `j` on the last line, `fx`
//! with no `x`) resolves to `None`, which cancels a pending operator.
//!
//! Word motions carry the two Vim special cases that only apply under an
//! operator: `cw` on a non-blank behaves like `ce` (and changes a single
//! blank when on one), and `dw` whose last word ends a line stops at that
//! line's end.

use crate::action::Operator;
use crate::buffer::Buffer;
use crate::cursor::Cursor;
use crate::error::EditorError;
use crate::position::Position;
use crate::search::{self, LastSearch};
use crate::word::{self, CharClass, WordKind};

// ---------------------------------------------------------------------------
// Motion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Motion {
    Left,
    Right,
    Up,
    Down,
    /// `0`, `<Home>`
    LineStart,
    /// `^`
    FirstNonBlank,
    /// `$`, `<End>`
    LineEnd,
    /// `|`
    Column,
    /// `+`, `<CR>`
    NextLine,
    /// `-`
    PrevLine,
    WordForward(WordKind),
    WordBackward(WordKind),
    WordEnd(WordKind),
    WordEndBackward(WordKind),
    /// `gg`
    FileStart,
    /// `G`
    FileEnd,
    ParagraphForward,
    ParagraphBackward,
    /// `%`
    MatchingBracket,
    Find(Find),
    /// `;`
    RepeatFind,
    /// `,`
    RepeatFindReverse,
    /// `n`
    SearchNext,
    /// `N`
    SearchPrev,
}

/// How an operator treats the span a motion covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionClass {
    /// The landing char is not included.
    Exclusive,
    /// The landing char is included.
    Inclusive,
    /// Every line touched is taken whole.
    Linewise,
}

/// What happens to the sticky column after the move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sticky {
    Reset,
    Keep,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Landing {
    pub pos: Position,
    pub class: MotionClass,
    pub sticky: Sticky,
}

impl Landing {
    const fn new(pos: Position, class: MotionClass) -> Self {
        Self {
            pos,
            class,
            sticky: Sticky::Reset,
        }
    }
}

// ---------------------------------------------------------------------------
// Find
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindKind {
    /// `f`
    To,
    /// `t`
    Till,
    /// `F`
    ToBack,
    /// `T`
    TillBack,
}

impl FindKind {
    #[must_use]
    pub const fn from_key(ch: char) -> Option<Self> {
        match ch {
            'f' => Some(Self::To),
            't' => Some(Self::Till),
            'F' => Some(Self::ToBack),
            'T' => Some(Self::TillBack),
            _ => None,
        }
    }

    /// The same search in the other direction, for `,`.
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::To => Self::ToBack,
            Self::Till => Self::TillBack,
            Self::ToBack => Self::To,
            Self::TillBack => Self::Till,
        }
    }

    const fn is_forward(self) -> bool {
        matches!(self, Self::To | Self::Till)
    }

    const fn is_till(self) -> bool {
        matches!(self, Self::Till | Self::TillBack)
    }
}

/// A single-line character search: `fx`, `tx`, `Fx`, `Tx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Find {
    pub kind: FindKind,
    pub ch: char,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

impl Motion {
    /// The default class; `N%` overrides it.
    #[must_use]
    pub const fn class(self) -> MotionClass {
        use Motion as M;
        match self {
            M::Up
            | M::Down
            | M::NextLine
            | M::PrevLine
            | M::FileStart
            | M::FileEnd
            | M::ParagraphForward
            | M::ParagraphBackward => MotionClass::Linewise,
            M::WordEnd(_) | M::WordEndBackward(_) | M::LineEnd | M::MatchingBracket => {
                MotionClass::Inclusive
            }
            M::Find(f) => find_class(f.kind),
            _ => MotionClass::Exclusive,
        }
    }
}

const fn find_class(kind: FindKind) -> MotionClass {
    if kind.is_forward() {
        MotionClass::Inclusive
    } else {
        MotionClass::Exclusive
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Everything a motion may consult besides its own key.
#[derive(Debug, Clone, Copy)]
pub struct MotionContext<'a> {
    pub buf: &'a Buffer,
    pub cursor: &'a Cursor,
    /// `None` when no count was typed; `G`, `gg`, `%` and `|` care.
    pub count: Option<usize>,
    /// The operator waiting for this motion, if any.
    pub operator: Option<Operator>,
    pub last_find: Option<Find>,
    pub last_search: Option<&'a LastSearch>,
    pub wrapscan: bool,
}

/// Resolve a motion to its landing.
///
/// # Errors
///
/// `n` and `N` fail with E35 before any search and E486 when the pattern is
/// gone. Other motions fail silently with `Ok(None)`.
pub fn resolve(motion: Motion, cx: &MotionContext<'_>) -> Result<Option<Landing>, EditorError> {
    let buf = cx.buf;
    let start = cx.cursor.position();
    let n = cx.count.unwrap_or(1).max(1);
    let class = motion.class();
    let at = |pos: Position| Some(Landing::new(pos, class));

    let landing = match motion {
        Motion::Left => (start.col > 0).then(|| Landing::new(start.with_col(start.col.saturating_sub(n)), class)),
        Motion::Right => {
            let len = buf.line_len(start.line);
            let max = if cx.operator.is_some() { len } else { len.saturating_sub(1) };
            let col = start.col.saturating_add(n).min(max);
            // Under an operator `l` on an empty line is an empty span, not a failure.
            (col != start.col || cx.operator.is_some()).then(|| Landing::new(start.with_col(col), class))
        }
        Motion::Up | Motion::Down => vertical(cx, motion == Motion::Down, n),
        Motion::LineStart => at(start.with_col(0)),
        Motion::FirstNonBlank => at(start.with_col(first_non_blank(buf, start.line))),
        Motion::LineEnd => {
            let line = start.line.saturating_add(n - 1);
            (line < buf.line_count()).then(|| Landing {
                pos: Position::new(line, buf.line_len(line).saturating_sub(1)),
                class,
                sticky: Sticky::End,
            })
        }
        Motion::Column => {
            let max = buf.line_len(start.line).saturating_sub(1);
            at(start.with_col((n - 1).min(max)))
        }
        Motion::NextLine | Motion::PrevLine => {
            let line = if motion == Motion::NextLine {
                start.line.saturating_add(n)
            } else {
                start.line.checked_sub(n).unwrap_or(usize::MAX)
            };
            (line < buf.line_count()).then(|| Landing::new(Position::new(line, first_non_blank(buf, line)), class))
        }
        Motion::WordForward(kind) => word_forward(cx, kind, n),
        Motion::WordBackward(kind) => repeat_walk(buf, start, n, |i| word::prev_start(buf, i, kind))
            .map(|pos| Landing::new(pos, class)),
        Motion::WordEnd(kind) => repeat_walk(buf, start, n, |i| word::next_end(buf, i, kind))
            .map(|pos| Landing::new(pos, class)),
        Motion::WordEndBackward(kind) => repeat_walk(buf, start, n, |i| word::prev_end(buf, i, kind))
            .map(|pos| Landing::new(pos, class)),
        Motion::FileStart | Motion::FileEnd => {
            let last = buf.line_count() - 1;
            let line = match (motion, cx.count) {
                (_, Some(c)) => c.saturating_sub(1).min(last),
                (Motion::FileStart, None) => 0,
                _ => last,
            };
            at(Position::new(line, first_non_blank(buf, line)))
        }
        Motion::ParagraphForward => paragraph_forward(buf, start, n),
        Motion::ParagraphBackward => paragraph_backward(buf, start, n),
        Motion::MatchingBracket => match cx.count {
            Some(pct) if pct <= 100 => {
                let line = (pct * buf.line_count()).div_ceil(100).saturating_sub(1);
                Some(Landing::new(
                    Position::new(line, first_non_blank(buf, line)),
                    MotionClass::Linewise,
                ))
            }
            Some(_) => None,
            None => matching_bracket(buf, start).and_then(at),
        },
        Motion::Find(find) => find_in_line(buf, start, find, n, false).map(|pos| Landing::new(pos, class)),
        Motion::RepeatFind | Motion::RepeatFindReverse => cx.last_find.and_then(|f| {
            let kind = if motion == Motion::RepeatFind { f.kind } else { f.kind.reversed() };
            find_in_line(buf, start, Find { kind, ch: f.ch }, n, true)
                .map(|pos| Landing::new(pos, find_class(kind)))
        }),
        Motion::SearchNext | Motion::SearchPrev => {
            return search_repeat(cx, motion == Motion::SearchPrev, n).map(Some);
        }
    };

    Ok(landing.filter(|l| l.pos != start || cx.operator.is_some()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Column of the first non-blank char of `line`; the last char when the
/// line is all blanks.
#[must_use]
pub fn first_non_blank(buf: &Buffer, line: usize) -> usize {
    let text = buf.line_text(line);
    let blanks = text.chars().take_while(|c| *c == ' ' || *c == '\t').count();
    blanks.min(buf.line_len(line).saturating_sub(1))
}

fn vertical(cx: &MotionContext<'_>, down: bool, n: usize) -> Option<Landing> {
    let line = cx.cursor.line();
    let last = cx.buf.line_count() - 1;
    let target = if down { line.saturating_add(n).min(last) } else { line.saturating_sub(n) };
    if target == line {
        return None;
    }
    Some(Landing {
        pos: Position::new(target, cx.cursor.column_on(target, cx.buf, false)),
        class: MotionClass::Linewise,
        sticky: Sticky::Keep,
    })
}

/// Apply an index walk `n` times; `None` when it never moves.
fn repeat_walk(buf: &Buffer, start: Position, n: usize, step: impl Fn(usize) -> usize) -> Option<Position> {
    let origin = buf.char_idx(start);
    let mut idx = origin;
    for _ in 0..n {
        let next = step(idx);
        if next == idx {
            break;
        }
        idx = next;
    }
    (idx != origin).then(|| buf.clamp(buf.idx_to_pos(idx), false))
}

fn word_forward(cx: &MotionContext<'_>, kind: WordKind, n: usize) -> Option<Landing> {
    let buf = cx.buf;
    let start = cx.cursor.position();
    let origin = buf.char_idx(start);

    if cx.operator == Some(Operator::Change) {
        match buf.char_at(start).map(|ch| kind.classify(ch)) {
            Some(CharClass::Blank) if n == 1 => {
                return Some(Landing::new(start, MotionClass::Inclusive));
            }
            Some(class) if class.is_text() => {
                let mut idx = origin;
                for i in 0..n {
                    if i == 0 && at_word_end(buf, idx, kind) {
                        continue;
                    }
                    idx = word::next_end(buf, idx, kind);
                }
                return Some(Landing::new(buf.idx_to_pos(idx), MotionClass::Inclusive));
            }
            _ => {}
        }
    }

    let mut idx = origin;
    let mut prev = origin;
    for _ in 0..n {
        let next = word::next_start(buf, idx, kind);
        if next == idx {
            break;
        }
        prev = idx;
        idx = next;
    }
    if idx == origin {
        return None;
    }

    let mut pos = buf.idx_to_pos(idx);
    if cx.operator.is_some() {
        let prev_line = buf.idx_to_pos(prev).line;
        if pos.line > prev_line {
            pos = Position::new(prev_line, buf.line_len(prev_line));
        }
    } else {
        pos = buf.clamp(pos, false);
    }
    Some(Landing::new(pos, MotionClass::Exclusive))
}

fn at_word_end(buf: &Buffer, idx: usize, kind: WordKind) -> bool {
    let rope = buf.rope();
    idx + 1 >= rope.len_chars() || kind.classify(rope.char(idx + 1)) != kind.classify(rope.char(idx))
}

fn paragraph_forward(buf: &Buffer, start: Position, n: usize) -> Option<Landing> {
    let last = buf.line_count() - 1;
    let blank = |l: usize| buf.line_len(l) == 0;
    let mut line = start.line;
    for _ in 0..n {
        while line < last && blank(line) {
            line += 1;
        }
        while line < last && !blank(line) {
            line += 1;
        }
    }
    if line == last && !blank(last) {
        // No blank line ahead: `}` stops on the last char.
        let pos = Position::new(last, buf.line_len(last).saturating_sub(1));
        return Some(Landing::new(pos, MotionClass::Linewise));
    }
    Some(Landing::new(Position::new(line, 0), MotionClass::Linewise))
}

fn paragraph_backward(buf: &Buffer, start: Position, n: usize) -> Option<Landing> {
    let blank = |l: usize| buf.line_len(l) == 0;
    let mut line = start.line;
    for _ in 0..n {
        while line > 0 && blank(line) {
            line -= 1;
        }
        while line > 0 && !blank(line) {
            line -= 1;
        }
    }
    Some(Landing::new(Position::new(line, 0), MotionClass::Linewise))
}

/// `%`: the partner of the first bracket at or after the cursor on its line.
fn matching_bracket(buf: &Buffer, pos: Position) -> Option<Position> {
    let text: Vec<char> = buf.line_text(pos.line).chars().collect();
    let col = (pos.col..text.len()).find(|&c| "()[]{}".contains(text[c]))?;
    let (open, close, forward) = match text[col] {
        '(' => ('(', ')', true),
        '[' => ('[', ']', true),
        '{' => ('{', '}', true),
        ')' => ('(', ')', false),
        ']' => ('[', ']', false),
        _ => ('{', '}', false),
    };

    let rope = buf.rope();
    let origin = buf.char_idx(pos.with_col(col));
    let mut depth = 0usize;
    let mut visit = |i: usize| {
        let c = rope.char(i);
        if c == open {
            if forward { depth += 1 } else { depth = depth.saturating_sub(1) }
        } else if c == close {
            if forward { depth = depth.saturating_sub(1) } else { depth += 1 }
        }
        depth == 0
    };
    let hit = if forward {
        (origin..rope.len_chars()).find(|&i| visit(i))
    } else {
        (0..=origin).rev().find(|&i| visit(i))
    }?;
    Some(buf.idx_to_pos(hit))
}

/// `f t F T` on the cursor line. `repeat` makes `;` step over an adjacent
/// target for `t` and `T` instead of sticking in place.
fn find_in_line(buf: &Buffer, start: Position, find: Find, n: usize, repeat: bool) -> Option<Position> {
    let chars: Vec<char> = buf.line_text(start.line).chars().collect();
    let till = find.kind.is_till();
    let mut at = start.col;
    for i in 0..n {
        let skip = usize::from(i == 0 && repeat && till);
        at = if find.kind.is_forward() {
            (at + 1 + skip..chars.len()).find(|&c| chars[c] == find.ch)?
        } else {
            (0..at.checked_sub(skip)?).rev().find(|&c| chars[c] == find.ch)?
        };
    }
    let col = match find.kind {
        FindKind::Till => at - 1,
        FindKind::TillBack => at + 1,
        FindKind::To | FindKind::ToBack => at,
    };
    Some(start.with_col(col))
}

fn search_repeat(cx: &MotionContext<'_>, reverse: bool, n: usize) -> Result<Landing, EditorError> {
    let last = cx.last_search.ok_or(EditorError::NoPreviousPattern)?;
    let direction = if reverse { last.direction.opposite() } else { last.direction };
    let mut pos = cx.cursor.position();
    for _ in 0..n {
        pos = search::find(cx.buf, &last.pattern, pos, direction, cx.wrapscan)
            .ok_or_else(|| EditorError::PatternNotFound(last.pattern.clone()))?;
    }
    Ok(Landing::new(pos, MotionClass::Exclusive))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::SearchDirection;
    use pretty_assertions::assert_eq;

    fn p(line: usize, col: usize) -> Position {
        Position::new(line, col)
    }

    fn land(text: &str, at: Position, motion: Motion, count: Option<usize>, op: Option<Operator>) -> Option<Landing> {
        let buf = Buffer::from_text(text);
        let cursor = Cursor::at(at);
        let cx = MotionContext {
            buf: &buf,
            cursor: &cursor,
            count,
            operator: op,
            last_find: None,
            last_search: None,
            wrapscan: true,
        };
        resolve(motion, &cx).unwrap()
    }

    fn pos(text: &str, at: Position, motion: Motion, count: Option<usize>) -> Option<Position> {
        land(text, at, motion, count, None).map(|l| l.pos)
    }

    const W: Motion = Motion::WordForward(WordKind::Small);

    // -- Horizontal ---------------------------------------------------------

    #[test]
    fn left_fails_in_column_zero() {
        assert_eq!(pos("abc", p(0, 0), Motion::Left, None), None);
        assert_eq!(pos("abc", p(0, 2), Motion::Left, Some(5)), Some(p(0, 0)));
    }

    #[test]
    fn right_stops_on_last_char_without_operator() {
        assert_eq!(pos("abc", p(0, 1), Motion::Right, Some(9)), Some(p(0, 2)));
        let l = land("abc", p(0, 2), Motion::Right, None, Some(Operator::Delete)).unwrap();
        assert_eq!(l.pos, p(0, 3));
    }

    #[test]
    fn right_on_empty_line_under_operator_is_empty_span() {
        let l = land("", p(0, 0), Motion::Right, None, Some(Operator::Change)).unwrap();
        assert_eq!(l.pos, p(0, 0));
        assert_eq!(pos("", p(0, 0), Motion::Right, None), None);
    }

    #[test]
    fn line_end_with_count_goes_down() {
        let l = land("ab\ncdef", p(0, 0), Motion::LineEnd, Some(2), None).unwrap();
        assert_eq!(l.pos, p(1, 3));
        assert_eq!(l.sticky, Sticky::End);
        assert_eq!(l.class, MotionClass::Inclusive);
    }

    #[test]
    fn first_non_blank_and_column() {
        assert_eq!(pos("   x", p(0, 0), Motion::FirstNonBlank, None), Some(p(0, 3)));
        assert_eq!(pos("abcdef", p(0, 0), Motion::Column, Some(4)), Some(p(0, 3)));
    }

    // -- Vertical -----------------------------------------------------------

    #[test]
    fn down_clamps_count_and_fails_at_bottom() {
        assert_eq!(pos("a\nb\nc", p(0, 0), Motion::Down, Some(9)), Some(p(2, 0)));
        assert_eq!(pos("a\nb", p(1, 0), Motion::Down, None), None);
        assert_eq!(pos("a\nb", p(0, 0), Motion::Up, None), None);
    }

    #[test]
    fn goto_line_counts() {
        let text = "a\n  b\nc";
        assert_eq!(pos(text, p(2, 0), Motion::FileStart, None), Some(p(0, 0)));
        assert_eq!(pos(text, p(0, 0), Motion::FileStart, Some(2)), Some(p(1, 2)));
        assert_eq!(pos(text, p(0, 0), Motion::FileEnd, None), Some(p(2, 0)));
        assert_eq!(pos(text, p(0, 0), Motion::FileEnd, Some(99)), Some(p(2, 0)));
    }

    #[test]
    fn next_and_prev_line() {
        assert_eq!(pos("a\n  b", p(0, 0), Motion::NextLine, None), Some(p(1, 2)));
        assert_eq!(pos("  a\nb", p(1, 0), Motion::PrevLine, None), Some(p(0, 2)));
        assert_eq!(pos("a", p(0, 0), Motion::PrevLine, None), None);
    }

    // -- Words --------------------------------------------------------------

    #[test]
    fn word_forward_counts() {
        assert_eq!(pos("one two three four", p(0, 0), W, Some(3)), Some(p(0, 14)));
    }

    #[test]
    fn dw_at_line_end_stops_at_eol() {
        let l = land("one\ntwo", p(0, 0), W, None, Some(Operator::Delete)).unwrap();
        assert_eq!(l.pos, p(0, 3));
        assert_eq!(l.class, MotionClass::Exclusive);
    }

    #[test]
    fn dw_on_last_word_reaches_buffer_end() {
        let l = land("one two", p(0, 4), W, None, Some(Operator::Delete)).unwrap();
        assert_eq!(l.pos, p(0, 7));
    }

    #[test]
    fn cw_acts_like_ce() {
        let l = land("one two", p(0, 0), W, None, Some(Operator::Change)).unwrap();
        assert_eq!(l.pos, p(0, 2));
        assert_eq!(l.class, MotionClass::Inclusive);
        // Already on the last char of a word: only that char.
        let l = land("one two", p(0, 2), W, None, Some(Operator::Change)).unwrap();
        assert_eq!(l.pos, p(0, 2));
        let l = land("one two", p(0, 2), W, Some(2), Some(Operator::Change)).unwrap();
        assert_eq!(l.pos, p(0, 6));
    }

    #[test]
    fn cw_on_blank_changes_one_char() {
        let l = land("a   b", p(0, 1), W, None, Some(Operator::Change)).unwrap();
        assert_eq!(l.pos, p(0, 1));
        assert_eq!(l.class, MotionClass::Inclusive);
    }

    #[test]
    fn word_backward_and_end() {
        let b = Motion::WordBackward(WordKind::Small);
        let e = Motion::WordEnd(WordKind::Small);
        assert_eq!(pos("one two", p(0, 5), b, None), Some(p(0, 4)));
        assert_eq!(pos("one two", p(0, 0), b, None), None);
        assert_eq!(pos("one two", p(0, 0), e, Some(2)), Some(p(0, 6)));
        assert_eq!(pos("one two", p(0, 5), Motion::WordEndBackward(WordKind::Small), None), Some(p(0, 2)));
    }

    // -- Paragraphs -----------------------------------------------------------

    #[test]
    fn paragraph_forward_lands_on_blank_line() {
        let text = "a\nb\n\nc\n\nd";
        assert_eq!(pos(text, p(0, 0), Motion::ParagraphForward, None), Some(p(2, 0)));
        assert_eq!(pos(text, p(0, 0), Motion::ParagraphForward, Some(2)), Some(p(4, 0)));
        let l = land(text, p(5, 0), Motion::ParagraphForward, None, Some(Operator::Delete)).unwrap();
        assert_eq!(l.class, MotionClass::Linewise);
        assert_eq!(Motion::ParagraphBackward.class(), MotionClass::Linewise);
    }

    #[test]
    fn paragraph_backward() {
        let text = "a\n\nb\nc";
        assert_eq!(pos(text, p(3, 0), Motion::ParagraphBackward, None), Some(p(1, 0)));
        assert_eq!(pos(text, p(3, 0), Motion::ParagraphBackward, Some(2)), Some(p(0, 0)));
    }

    // -- Brackets -----------------------------------------------------------

    #[test]
    fn matching_bracket_nested_and_forward_scan() {
        let text = "x (a [b] (c)) y";
        assert_eq!(pos(text, p(0, 2), Motion::MatchingBracket, None), Some(p(0, 12)));
        assert_eq!(pos(text, p(0, 12), Motion::MatchingBracket, None), Some(p(0, 2)));
        assert_eq!(pos(text, p(0, 0), Motion::MatchingBracket, None), Some(p(0, 12)));
        assert_eq!(pos("none", p(0, 0), Motion::MatchingBracket, None), None);
    }

    #[test]
    fn matching_bracket_across_lines() {
        assert_eq!(pos("{\n  x\n}", p(0, 0), Motion::MatchingBracket, None), Some(p(2, 0)));
    }

    #[test]
    fn percent_with_count_is_linewise() {
        let l = land("a\nb\nc\nd", p(0, 0), Motion::MatchingBracket, Some(50), None).unwrap();
        assert_eq!(l.pos, p(1, 0));
        assert_eq!(l.class, MotionClass::Linewise);
    }

    // -- Find ---------------------------------------------------------------

    #[test]
    fn find_variants() {
        let text = "a,b,c,d";
        let f = |kind, ch| Motion::Find(Find { kind, ch });
        assert_eq!(pos(text, p(0, 0), f(FindKind::To, ','), Some(2)), Some(p(0, 3)));
        assert_eq!(pos(text, p(0, 0), f(FindKind::Till, 'c'), None), Some(p(0, 3)));
        assert_eq!(pos(text, p(0, 6), f(FindKind::ToBack, 'b'), None), Some(p(0, 2)));
        assert_eq!(pos(text, p(0, 6), f(FindKind::TillBack, 'b'), None), Some(p(0, 3)));
        assert_eq!(pos(text, p(0, 0), f(FindKind::To, 'z'), None), None);
    }

    #[test]
    fn repeat_till_steps_over_adjacent_target() {
        let buf = Buffer::from_text("a,b,c");
        let cursor = Cursor::at(p(0, 0));
        let cx = MotionContext {
            buf: &buf,
            cursor: &cursor,
            count: None,
            operator: None,
            last_find: Some(Find { kind: FindKind::Till, ch: ',' }),
            last_search: None,
            wrapscan: true,
        };
        assert_eq!(resolve(Motion::RepeatFind, &cx).unwrap().map(|l| l.pos), Some(p(0, 2)));
        let cursor = Cursor::at(p(0, 4));
        let cx = MotionContext { cursor: &cursor, ..cx };
        let back = resolve(Motion::RepeatFindReverse, &cx).unwrap().unwrap();
        assert_eq!(back.pos, p(0, 2));
        assert_eq!(back.class, MotionClass::Exclusive);
    }

    // -- Search -------------------------------------------------------------

    #[test]
    fn search_repeat_and_errors() {
        let buf = Buffer::from_text("foo bar foo");
        let cursor = Cursor::at(p(0, 0));
        let last = LastSearch {
            pattern: "foo".into(),
            direction: SearchDirection::Forward,
        };
        let mut cx = MotionContext {
            buf: &buf,
            cursor: &cursor,
            count: None,
            operator: None,
            last_find: None,
            last_search: None,
            wrapscan: true,
        };
        assert!(matches!(resolve(Motion::SearchNext, &cx), Err(EditorError::NoPreviousPattern)));
        cx.last_search = Some(&last);
        assert_eq!(resolve(Motion::SearchNext, &cx).unwrap().map(|l| l.pos), Some(p(0, 8)));
        assert_eq!(resolve(Motion::SearchPrev, &cx).unwrap().map(|l| l.pos), Some(p(0, 8)));
        let missing = LastSearch {
            pattern: "zzz".into(),
            direction: SearchDirection::Forward,
        };
        cx.last_search = Some(&missing);
        assert!(matches!(resolve(Motion::SearchNext, &cx), Err(EditorError::PatternNotFound(_))));
    }
}
