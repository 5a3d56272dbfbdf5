//! Operators and the Normal-mode edit commands.
//!
//! An operator acts on a [`Region`]. The region comes from a motion (shaped
//! by its class), a text object, a doubled operator, or a Visual selection:
//!
//! | Source                  | Region                                      |
//! |-------------------------|---------------------------------------------|
//! | line-wise motion        | every line from cursor to landing           |
//! | inclusive motion        | cursor through the landing char             |
//! | exclusive motion        | cursor up to the landing char, adjusted (1) |
//! | text object             | the object; `ip`/`ap` line-wise             |
//! | `dd`, `3yy`, `S`        | `count` lines from the cursor               |
//!
//! (1) An exclusive motion that lands in column 0 of a later line stops at
//! the end of the line before instead. If it also started at or before the
//! first non-blank, the region becomes line-wise.
//!
//! Registers are written before the buffer changes, so a bad register name
//! fails without touching the text.

use crate::action::{Operator, Target};
use crate::buffer::Buffer;
use crate::error::EditorError;
use crate::motion::{Motion, MotionClass, first_non_blank};
use crate::position::{Position, Range};
use crate::register::{ContentKind, Register, RegisterContent, RegisterError};
use crate::text_object::{self, TextObject};

use super::Editor;

// ---------------------------------------------------------------------------
// Region
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Region {
    /// Half-open char range.
    Chars(Range),
    /// Whole lines, inclusive.
    Lines { first: usize, last: usize },
    /// A rectangle; `right` is inclusive.
    Block {
        first: usize,
        last: usize,
        left: usize,
        right: usize,
    },
}

impl Region {
    pub(super) const fn lines(self) -> (usize, usize) {
        match self {
            Self::Chars(r) => (r.start.line, r.end.line),
            Self::Lines { first, last } | Self::Block { first, last, .. } => (first, last),
        }
    }
}

/// Vim's exclusive-motion adjustments.
fn exclusive_region(buf: &Buffer, r: Range) -> Region {
    if r.end.col == 0 && r.end.line > r.start.line {
        if r.start.col <= first_non_blank(buf, r.start.line) {
            return Region::Lines {
                first: r.start.line,
                last: r.end.line - 1,
            };
        }
        let line = r.end.line - 1;
        return Region::Chars(Range::ordered(r.start, Position::new(line, buf.line_len(line))));
    }
    Region::Chars(r)
}

fn toggle_case(text: &str) -> String {
    text.chars()
        .flat_map(|c| {
            let flipped: Vec<char> = if c.is_uppercase() {
                c.to_lowercase().collect()
            } else {
                c.to_uppercase().collect()
            };
            flipped
        })
        .collect()
}

fn change_case(op: Operator, text: &str) -> String {
    match op {
        Operator::Lowercase => text.to_lowercase(),
        Operator::Uppercase => text.to_uppercase(),
        _ => toggle_case(text),
    }
}

fn leading_blanks(text: &str) -> String {
    text.chars().take_while(|c| *c == ' ' || *c == '\t').collect()
}

/// `text` repeated `n` times; `None` when that would not fit in memory.
fn repeat_text(text: &str, n: usize) -> Option<String> {
    text.len().checked_mul(n).map(|_| text.repeat(n))
}

impl Editor {
    // -- Regions ------------------------------------------------------------

    pub(super) fn operate(
        &mut self,
        op: Operator,
        target: Target,
        count: Option<usize>,
        register: Option<char>,
    ) -> Result<bool, EditorError> {
        let n = count.unwrap_or(1).max(1);
        let region = match target {
            Target::Line => {
                let first = self.cursor.line();
                let last = first.saturating_add(n - 1).min(self.buffer.line_count() - 1);
                Some(Region::Lines { first, last })
            }
            Target::Motion(motion) => self.motion_region(op, motion, count)?,
            Target::Object(object) => self.object_region(object, n),
        };
        match region {
            Some(region) => self.apply_operator(op, region, register, 1),
            None => Ok(false),
        }
    }

    fn motion_region(
        &mut self,
        op: Operator,
        motion: Motion,
        count: Option<usize>,
    ) -> Result<Option<Region>, EditorError> {
        let Some(landing) = self.land(motion, count, Some(op))? else {
            return Ok(None);
        };
        let start = self.cursor.position();
        let span = Range::ordered(start, landing.pos);
        let buf = &self.buffer;
        Ok(Some(match landing.class {
            MotionClass::Linewise => Region::Lines {
                first: span.start.line,
                last: span.end.line,
            },
            MotionClass::Inclusive => {
                let end = span.end.with_col((span.end.col + 1).min(buf.line_len(span.end.line)));
                Region::Chars(Range::ordered(span.start, end))
            }
            MotionClass::Exclusive => exclusive_region(buf, span),
        }))
    }

    fn object_region(&self, object: TextObject, n: usize) -> Option<Region> {
        let sel = text_object::select(&self.buffer, self.cursor.position(), object, n)?;
        Some(if sel.linewise {
            Region::Lines {
                first: sel.range.start.line,
                last: sel.range.end.line,
            }
        } else {
            Region::Chars(sel.range)
        })
    }

    /// The whole-line span of `first..=last`, without the final `\n`.
    fn line_span(&self, first: usize, last: usize) -> Range {
        Range::ordered(Position::new(first, 0), Position::new(last, self.buffer.line_len(last)))
    }

    fn block_cols(&self, line: usize, left: usize, right: usize) -> Range {
        let len = self.buffer.line_len(line);
        Range::ordered(
            Position::new(line, left.min(len)),
            Position::new(line, right.saturating_add(1).min(len)),
        )
    }

    /// What a yank or delete of `region` stores.
    fn region_register(&self, region: Region) -> Register {
        match region {
            Region::Chars(r) => Register::text(self.buffer.text_in(r), ContentKind::CharWise),
            Region::Lines { first, last } => {
                let mut text = String::new();
                for line in first..=last {
                    text.push_str(&self.buffer.line_text(line));
                    text.push('\n');
                }
                Register::text(text, ContentKind::LineWise)
            }
            Region::Block {
                first,
                last,
                left,
                right,
            } => Register::block(
                (first..=last)
                    .map(|line| self.buffer.text_in(self.block_cols(line, left, right)))
                    .collect(),
            ),
        }
    }

    // -- Operators ----------------------------------------------------------

    /// Apply `op` to `region`. `levels` scales `>` and `<`.
    pub(super) fn apply_operator(
        &mut self,
        op: Operator,
        region: Region,
        register: Option<char>,
        levels: usize,
    ) -> Result<bool, EditorError> {
        match op {
            Operator::Yank => {
                self.registers.record_yank(register, self.region_register(region))?;
                self.cursor_to_start(region);
                Ok(true)
            }
            Operator::Delete => {
                if matches!(region, Region::Chars(r) if r.is_empty()) {
                    return Ok(false);
                }
                self.registers.record_delete(register, self.region_register(region))?;
                self.delete_region(region);
                Ok(true)
            }
            Operator::Change => {
                if !matches!(region, Region::Chars(r) if r.is_empty()) {
                    self.registers.record_delete(register, self.region_register(region))?;
                }
                self.change_region(region);
                Ok(true)
            }
            Operator::Indent | Operator::Outdent => {
                let (first, last) = region.lines();
                let step = self.options.shiftwidth.max(1).saturating_mul(levels.max(1));
                for line in first..=last {
                    if op == Operator::Indent && self.buffer.line_len(line) == 0 {
                        continue;
                    }
                    let width = self.indent_of(line);
                    let target = if op == Operator::Indent {
                        width.saturating_add(step)
                    } else {
                        width.saturating_sub(step)
                    };
                    self.set_indent(line, target);
                }
                let col = first_non_blank(&self.buffer, first);
                self.cursor.set_position(Position::new(first, col), &self.buffer, false);
                Ok(true)
            }
            Operator::ToggleCase | Operator::Lowercase | Operator::Uppercase => {
                let spans: Vec<Range> = match region {
                    Region::Chars(r) => vec![r],
                    Region::Lines { first, last } => vec![self.line_span(first, last)],
                    Region::Block {
                        first,
                        last,
                        left,
                        right,
                    } => (first..=last).map(|l| self.block_cols(l, left, right)).collect(),
                };
                for span in spans {
                    let text = self.buffer.text_in(span);
                    let changed = change_case(op, &text);
                    if changed != text {
                        self.edit(span, &changed);
                    }
                }
                self.cursor_to_start(region);
                Ok(true)
            }
        }
    }

    fn cursor_to_start(&mut self, region: Region) {
        let pos = match region {
            Region::Chars(r) => r.start,
            Region::Lines { first, .. } => {
                if first == self.cursor.line() {
                    self.cursor.position()
                } else {
                    Position::new(first, 0)
                }
            }
            Region::Block { first, left, .. } => Position::new(first, left),
        };
        self.cursor.set_position(pos, &self.buffer, false);
    }

    fn delete_region(&mut self, region: Region) {
        match region {
            Region::Chars(r) => {
                self.edit(r, "");
                self.cursor.set_position(r.start, &self.buffer, false);
            }
            Region::Lines { first, last } => self.delete_lines(first, last),
            Region::Block {
                first,
                last,
                left,
                right,
            } => {
                for line in first..=last {
                    let cols = self.block_cols(line, left, right);
                    if !cols.is_empty() {
                        self.edit(cols, "");
                    }
                }
                self.cursor.set_position(Position::new(first, left), &self.buffer, false);
            }
        }
    }

    /// Remove whole lines; the buffer always keeps at least one.
    fn delete_lines(&mut self, first: usize, last: usize) {
        let count = self.buffer.line_count();
        let range = if last + 1 < count {
            Range::ordered(Position::new(first, 0), Position::new(last + 1, 0))
        } else if first > 0 {
            let prev = first - 1;
            Range::ordered(
                Position::new(prev, self.buffer.line_len(prev)),
                Position::new(last, self.buffer.line_len(last)),
            )
        } else {
            self.line_span(first, last)
        };
        self.edit(range, "");
        let line = first.min(self.buffer.line_count() - 1);
        let col = first_non_blank(&self.buffer, line);
        self.cursor.set_position(Position::new(line, col), &self.buffer, false);
    }

    fn change_region(&mut self, region: Region) {
        let at = match region {
            Region::Chars(r) => {
                self.edit(r, "");
                r.start
            }
            Region::Lines { first, last } => {
                self.edit(self.line_span(first, last), "");
                Position::new(first, 0)
            }
            Region::Block {
                first,
                last,
                left,
                right,
            } => {
                for line in first..=last {
                    let cols = self.block_cols(line, left, right);
                    if !cols.is_empty() {
                        self.edit(cols, "");
                    }
                }
                Position::new(first, left)
            }
        };
        self.begin_change(at);
    }

    // -- Indentation --------------------------------------------------------

    /// Display width of the leading white space of `line`.
    pub(super) fn indent_of(&self, line: usize) -> usize {
        self.options.indent_width(&leading_blanks(&self.buffer.line_text(line)))
    }

    /// Rewrite the leading white space of `line` to `width` columns.
    /// Returns the change in chars, for cursor fix-ups.
    pub(super) fn set_indent(&mut self, line: usize, width: usize) -> isize {
        let old = leading_blanks(&self.buffer.line_text(line));
        let new = self.options.indent_string(width);
        if old == new {
            return 0;
        }
        let old_len = old.chars().count();
        let new_len = new.chars().count();
        self.edit(
            Range::ordered(Position::new(line, 0), Position::new(line, old_len)),
            &new,
        );
        isize::try_from(new_len).unwrap_or(isize::MAX) - isize::try_from(old_len).unwrap_or(isize::MAX)
    }

    // -- Put ----------------------------------------------------------------

    /// Read a register for pasting.
    pub(super) fn paste_source(&mut self, register: Option<char>) -> Result<Register, EditorError> {
        let name = register.unwrap_or('"');
        let reg = self.registers.get(name)?;
        if reg.is_macro() {
            return Err(RegisterError::NotText(name).into());
        }
        if reg.is_empty() {
            return Err(RegisterError::Empty(name).into());
        }
        Ok(reg)
    }

    /// `p`, `P`.
    pub(super) fn put(&mut self, register: Option<char>, before: bool, n: usize) -> Result<bool, EditorError> {
        let reg = self.paste_source(register)?;
        let pos = self.cursor.position();
        match reg.content {
            RegisterContent::Text(text) if reg.kind == ContentKind::LineWise => {
                let Some(body) = repeat_text(&text, n) else {
                    return Ok(false);
                };
                let target = if before { pos.line } else { pos.line + 1 };
                self.put_lines(target, &body);
            }
            RegisterContent::Text(text) => {
                let Some(body) = repeat_text(&text, n) else {
                    return Ok(false);
                };
                let at = if before || !self.buffer.line_has_text(pos.line) {
                    pos
                } else {
                    pos.with_col(pos.col + 1)
                };
                self.put_chars(at, &body);
            }
            RegisterContent::Block(rows) => {
                let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
                if width.checked_mul(n).is_none() {
                    return Ok(false);
                }
                let col = if before || !self.buffer.line_has_text(pos.line) {
                    pos.col
                } else {
                    pos.col + 1
                };
                self.put_block(Position::new(pos.line, col), &rows, n);
            }
            RegisterContent::Keys(_) => {}
        }
        Ok(true)
    }

    /// Insert inline text at `at`; the cursor ends on its last char, or its
    /// first when it spans lines.
    pub(super) fn put_chars(&mut self, at: Position, text: &str) {
        self.edit(Range::point(at), text);
        let end = if text.contains('\n') {
            at
        } else {
            at.with_col(at.col + text.chars().count().saturating_sub(1))
        };
        self.cursor.set_position(end, &self.buffer, false);
    }

    /// Insert `\n`-terminated lines so the first becomes line `target`.
    pub(super) fn put_lines(&mut self, target: usize, body: &str) {
        if target < self.buffer.line_count() {
            self.edit(Range::point(Position::new(target, 0)), body);
        } else {
            let last = self.buffer.line_count() - 1;
            let mut chunk = String::from("\n");
            chunk.push_str(body.strip_suffix('\n').unwrap_or(body));
            self.edit(Range::point(Position::new(last, self.buffer.line_len(last))), &chunk);
        }
        let line = target.min(self.buffer.line_count() - 1);
        let col = first_non_blank(&self.buffer, line);
        self.cursor.set_position(Position::new(line, col), &self.buffer, false);
    }

    /// Paste rows one per line from `at`, padding short lines with spaces.
    pub(super) fn put_block(&mut self, at: Position, rows: &[String], n: usize) {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            let line = at.line + i;
            if line >= self.buffer.line_count() {
                let last = self.buffer.line_count() - 1;
                let end = Position::new(last, self.buffer.line_len(last));
                self.edit(Range::point(end), "\n");
            }
            let len = self.buffer.line_len(line);
            let mut padded = row.clone();
            padded.push_str(&" ".repeat(width - row.chars().count()));

            let mut piece = " ".repeat(at.col.saturating_sub(len));
            piece.push_str(&padded.repeat(n.saturating_sub(1)));
            piece.push_str(if len > at.col { &padded } else { row });
            self.edit(Range::point(Position::new(line, at.col.min(len))), &piece);
        }
        self.cursor.set_position(at, &self.buffer, false);
    }

    // -- Edit commands ------------------------------------------------------

    /// `J`: join `joins` following lines onto `line`.
    pub(super) fn join(&mut self, line: usize, joins: usize) -> bool {
        if line + 1 >= self.buffer.line_count() {
            return false;
        }
        let mut col = 0;
        for _ in 0..joins {
            if line + 1 >= self.buffer.line_count() {
                break;
            }
            let current = self.buffer.line_text(line);
            let next = self.buffer.line_text(line + 1);
            let indent = leading_blanks(&next).chars().count();
            let rest_empty = indent == next.chars().count();
            let len = current.chars().count();

            let bare = current.is_empty()
                || rest_empty
                || current.ends_with(|c: char| c == ' ' || c == '\t')
                || next.chars().nth(indent) == Some(')');
            let sep = if bare { "" } else { " " };
            self.edit(
                Range::ordered(Position::new(line, len), Position::new(line + 1, indent)),
                sep,
            );
            col = if rest_empty { len.saturating_sub(1) } else { len };
        }
        self.cursor.set_position(Position::new(line, col), &self.buffer, false);
        true
    }

    /// `~`: flip the case of `n` chars and step past them.
    pub(super) fn toggle_case_chars(&mut self, n: usize) -> bool {
        let pos = self.cursor.position();
        let len = self.buffer.line_len(pos.line);
        if pos.col >= len {
            return false;
        }
        let end = pos.col.saturating_add(n).min(len);
        let span = Range::ordered(pos, pos.with_col(end));
        let text = self.buffer.text_in(span);
        self.edit(span, &toggle_case(&text));
        self.cursor.set_position(pos.with_col(end), &self.buffer, false);
        true
    }

    /// `r{char}`: overwrite `n` chars. Fails when the line is too short.
    /// `r<CR>` replaces them all with one line break.
    pub(super) fn replace_chars(&mut self, ch: char, n: usize) -> bool {
        let pos = self.cursor.position();
        let Some(end) = pos.col.checked_add(n) else {
            return false;
        };
        if end > self.buffer.line_len(pos.line) {
            return false;
        }
        let span = Range::ordered(pos, pos.with_col(end));
        if ch == '\n' {
            self.edit(span, "\n");
            self.cursor.set_position(Position::new(pos.line + 1, 0), &self.buffer, false);
        } else {
            self.edit(span, &ch.to_string().repeat(n));
            self.cursor.set_position(pos.with_col(end - 1), &self.buffer, false);
        }
        true
    }

    /// Visual `r{char}`: overwrite every selected char, keeping line breaks.
    pub(super) fn fill(&mut self, region: Region, ch: char) -> bool {
        let spans: Vec<Range> = match region {
            Region::Chars(r) => vec![r],
            Region::Lines { first, last } => vec![self.line_span(first, last)],
            Region::Block {
                first,
                last,
                left,
                right,
            } => (first..=last).map(|l| self.block_cols(l, left, right)).collect(),
        };
        for span in spans {
            let text = self.buffer.text_in(span);
            let filled: String = text.chars().map(|c| if c == '\n' { c } else { ch }).collect();
            if filled != text {
                self.edit(span, &filled);
            }
        }
        self.cursor_to_start(region);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -- Helpers ------------------------------------------------------------

    #[test]
    fn toggle_case_flips_each_char() {
        assert_eq!(toggle_case("teXt 1"), "TExT 1");
    }

    #[test]
    fn exclusive_rule_one() {
        // cursor after the first non-blank: stop at the end of the line before
        let buf = Buffer::from_text("  one two\nthree");
        let r = Range::ordered(Position::new(0, 6), Position::new(1, 0));
        assert_eq!(
            exclusive_region(&buf, r),
            Region::Chars(Range::ordered(Position::new(0, 6), Position::new(0, 9)))
        );
    }

    #[test]
    fn exclusive_rule_two() {
        let buf = Buffer::from_text("  one\ntwo\nthree");
        let r = Range::ordered(Position::new(0, 1), Position::new(2, 0));
        assert_eq!(exclusive_region(&buf, r), Region::Lines { first: 0, last: 1 });
    }

    #[test]
    fn same_line_exclusive_is_untouched() {
        let buf = Buffer::from_text("one two");
        let r = Range::ordered(Position::new(0, 0), Position::new(0, 4));
        assert_eq!(exclusive_region(&buf, r), Region::Chars(r));
    }

    // -- Commands -----------------------------------------------------------

    fn editor(text: &str, keys: &str) -> Editor {
        let mut ed = Editor::new(text);
        ed.feed(keys).unwrap();
        ed
    }

    #[test]
    fn delete_word_with_count() {
        let ed = editor("one two three four", "3dw");
        assert_eq!(ed.text(), "four");
        assert_eq!(ed.cursor(), Position::new(0, 0));
    }

    #[test]
    fn delete_last_line_moves_up() {
        let ed = editor("one\ntwo\nthree", "Gdd");
        assert_eq!(ed.lines(), vec!["one", "two"]);
        assert_eq!(ed.cursor(), Position::new(1, 0));
    }

    #[test]
    fn dj_takes_both_lines() {
        let ed = editor("one\ntwo\nthree", "ldj");
        assert_eq!(ed.lines(), vec!["three"]);
    }

    #[test]
    fn dd_on_the_only_line_leaves_it_empty() {
        let ed = editor("alone", "dd");
        assert_eq!(ed.text(), "");
    }

    #[test]
    fn x_on_empty_line_does_nothing() {
        let mut ed = editor("", "x");
        assert_eq!(ed.text(), "");
        assert_eq!(ed.registers_mut().get('"').unwrap().as_text(), Some(String::new()));
    }

    #[test]
    fn yank_and_put_lines() {
        let ed = editor("one\ntwo", "yyjp");
        assert_eq!(ed.lines(), vec!["one", "two", "one"]);
        assert_eq!(ed.cursor(), Position::new(2, 0));
    }

    #[test]
    fn put_chars_after_and_before() {
        let ed = editor("abc", "ylp");
        assert_eq!(ed.text(), "aabc");
        assert_eq!(ed.cursor(), Position::new(0, 1));
        let ed = editor("abc", "$yl0P");
        assert_eq!(ed.text(), "cabc");
    }

    #[test]
    fn put_with_count() {
        let ed = editor("ab", "yl3p");
        assert_eq!(ed.text(), "aaaab");
        assert_eq!(ed.cursor(), Position::new(0, 3));
    }

    #[test]
    fn put_from_empty_register_fails() {
        let ed = editor("abc", "\"ap");
        assert_eq!(ed.text(), "abc");
        let status = ed.status().unwrap();
        assert!(status.is_error);
        assert!(status.text.starts_with("E353"));
    }

    #[test]
    fn indent_and_outdent() {
        let ed = editor("one\n\ntwo", ">2j");
        assert_eq!(ed.lines(), vec!["    one", "", "    two"]);
        let ed = editor("        one", "<<");
        assert_eq!(ed.text(), "    one");
    }

    #[test]
    fn case_operators() {
        assert_eq!(editor("hello world", "gUiw").text(), "HELLO world");
        assert_eq!(editor("HELLO", "guu").text(), "hello");
        assert_eq!(editor("teXt", "g~$").text(), "TExT");
    }

    #[test]
    fn join_lines() {
        let ed = editor("one\n   two\nthree", "3J");
        assert_eq!(ed.text(), "one two three");
        assert_eq!(ed.cursor(), Position::new(0, 7));
        assert_eq!(editor("call(\n)", "J").text(), "call()");
    }

    #[test]
    fn toggle_case_char_moves_right() {
        let ed = editor("teXt", "~~~");
        assert_eq!(ed.text(), "TExt");
        assert_eq!(ed.cursor(), Position::new(0, 3));
        let ed = editor("teXt", "4~");
        assert_eq!(ed.text(), "TExT");
        assert_eq!(ed.cursor(), Position::new(0, 3));
    }

    #[test]
    fn replace_char() {
        let ed = editor("abcd", "3rx");
        assert_eq!(ed.text(), "xxxd");
        assert_eq!(ed.cursor(), Position::new(0, 2));
        assert_eq!(editor("ab", "5rx").text(), "ab");
        assert_eq!(editor("a b", "lr<CR>").lines(), vec!["a", "b"]);
    }

    #[test]
    fn change_word_stops_at_word_end() {
        let ed = editor("one two", "cwnew<Esc>");
        assert_eq!(ed.text(), "new two");
    }

    #[test]
    fn cc_keeps_one_empty_line() {
        let ed = editor("one\ntwo\nthree", "j2ccx<Esc>");
        assert_eq!(ed.lines(), vec!["one", "x"]);
    }

    // -- Paragraphs and large counts -----------------------------------------

    fn editor_at(text: &str, at: Position, keys: &str) -> Editor {
        let mut ed = Editor::new(text).with_cursor(at);
        ed.feed(keys).unwrap();
        ed
    }

    #[test]
    fn paragraph_forward_takes_whole_lines() {
        let mut ed = editor_at("one two\nthree\n\nfour", Position::new(0, 4), "d}");
        assert_eq!(ed.lines(), vec!["four"]);
        let reg = ed.registers.get('"').unwrap();
        assert_eq!(reg.kind, ContentKind::LineWise);
        assert_eq!(reg.as_text(), Some("one two\nthree\n\n".to_string()));
    }

    #[test]
    fn paragraph_backward_takes_whole_lines() {
        let ed = editor_at("one\n\ntwo three\nfour", Position::new(3, 2), "d{");
        assert_eq!(ed.lines(), vec!["one"]);
    }

    #[test]
    fn huge_put_count_is_capped() {
        let ed = editor("ab", "yl99999999999999999999p");
        assert_eq!(ed.text().len(), 2 + crate::recorded::MAX_COUNT);
        assert!(ed.text().starts_with("aaa"));
        assert!(ed.text().ends_with("ab"));
    }

    #[test]
    fn huge_counts_on_line_commands() {
        let ed = editor("one\ntwo", "99999999999999999999$");
        assert_eq!(ed.cursor(), Position::ZERO);
        let ed = editor("one\ntwo", "99999999999999999999dd");
        assert_eq!(ed.lines(), vec![""]);
        let ed = editor("one\ntwo", "99999999999999999999rx");
        assert_eq!(ed.text(), "one\ntwo");
    }
}
