//! Insert and Replace sessions.
//!
//! A session runs from the command that opened it (`i a I A o O R`, or a
//! `c` operator) to `<Esc>`. It keeps the keys typed so that on `<Esc>`:
//!
//! - a count repeats them (`3ihi<Esc>` types `hihihi`);
//! - dot-repeat gets them appended to the opening command;
//! - `<C-a>` in a later session can type them again.
//!
//! Moving with an arrow key ends the repeatable part: what follows is
//! recorded as if typed after a fresh `i`.

use tracing::trace;
use vk_input::{Key, KeyCode};

use crate::action::InsertEntry;
use crate::dot::DotToken;
use crate::mode::Transition;
use crate::position::{Position, Range};
use crate::word::WordKind;

use super::Editor;

#[derive(Debug)]
pub(super) struct Session {
    /// How many times the typed text is inserted.
    count: usize,
    entry: Option<InsertEntry>,
    /// Overwrite instead of insert.
    replace: bool,
    typed: Vec<Key>,
    /// Text entered, for the `.` register.
    inserted: String,
    /// Chars overwritten in Replace mode, `None` where a char was appended.
    overwritten: Vec<Option<char>>,
    /// The opening command, set by the dispatcher once it succeeded.
    pub(super) token: Option<DotToken>,
}

impl Session {
    const fn new(count: usize, entry: Option<InsertEntry>, replace: bool) -> Self {
        Self {
            count,
            entry,
            replace,
            typed: Vec::new(),
            inserted: String::new(),
            overwritten: Vec::new(),
            token: None,
        }
    }
}

const fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

impl Editor {
    // -- Entry --------------------------------------------------------------

    /// `i a I A o O` with a count.
    pub(super) fn begin_insert(&mut self, entry: InsertEntry, count: usize) {
        let pos = self.cursor.position();
        let target = match entry {
            InsertEntry::Before => pos,
            InsertEntry::After => pos.with_col((pos.col + 1).min(self.buffer.line_len(pos.line))),
            InsertEntry::LineStart => {
                let blanks = self.buffer.line_text(pos.line).chars().take_while(|c| is_blank(*c)).count();
                pos.with_col(blanks)
            }
            InsertEntry::LineEnd => pos.with_col(self.buffer.line_len(pos.line)),
            InsertEntry::OpenBelow => self.open_line(pos.line, false),
            InsertEntry::OpenAbove => self.open_line(pos.line, true),
        };
        self.transition(Transition::EnterInsert);
        self.cursor.set_position(target, &self.buffer, true);
        self.insert = Some(Session::new(count, Some(entry), false));
    }

    /// Insert after a `c` operator removed its region.
    pub(super) fn begin_change(&mut self, at: Position) {
        self.transition(Transition::EnterInsert);
        self.cursor.set_position(at, &self.buffer, true);
        self.insert = Some(Session::new(1, None, false));
    }

    /// `R` with a count.
    pub(super) fn begin_replace(&mut self, count: usize) {
        self.transition(Transition::EnterReplace);
        self.insert = Some(Session::new(count, None, true));
    }

    /// Open an empty line below or above `line`; returns its start.
    fn open_line(&mut self, line: usize, above: bool) -> Position {
        if above {
            self.edit(Range::point(Position::new(line, 0)), "\n");
            Position::new(line, 0)
        } else {
            let end = Position::new(line, self.buffer.line_len(line));
            self.edit(Range::point(end), "\n");
            Position::new(line + 1, 0)
        }
    }

    // -- Keys ---------------------------------------------------------------

    pub(super) fn insert_key(&mut self, key: Key) {
        if key.is_cancel() {
            self.finish_insert();
            return;
        }
        if key.is_ctrl('a') {
            for k in self.last_insert.clone() {
                self.insert_edit(k, true);
            }
            return;
        }
        if key.modifiers.is_empty()
            && matches!(
                key.code,
                KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Home | KeyCode::End
            )
        {
            self.insert_move(key.code);
            return;
        }
        if !self.insert_edit(key, true) {
            trace!(key = %key, "ignored in insert mode");
        }
    }

    /// Apply an editing key; `record` adds it to the session's typed keys.
    /// Returns `false` for keys with no meaning here.
    fn insert_edit(&mut self, key: Key, record: bool) -> bool {
        let handled = if let Some(ch) = key.as_char() {
            self.type_char(ch);
            true
        } else if key.is_ctrl('w') {
            self.delete_word_before();
            true
        } else if key.is_ctrl('t') || key.is_ctrl('d') {
            self.shift_current_line(key.is_ctrl('t'));
            true
        } else if key.modifiers.is_empty() {
            match key.code {
                KeyCode::Enter => {
                    self.type_text("\n");
                    true
                }
                KeyCode::Tab => {
                    self.type_tab();
                    true
                }
                KeyCode::Backspace => {
                    self.backspace();
                    true
                }
                KeyCode::Delete => {
                    self.delete_forward();
                    true
                }
                _ => false,
            }
        } else {
            false
        };
        if handled && record {
            if let Some(session) = &mut self.insert {
                session.typed.push(key);
            }
        }
        handled
    }

    fn replacing(&self) -> bool {
        self.insert.as_ref().is_some_and(|s| s.replace)
    }

    fn type_char(&mut self, ch: char) {
        let pos = self.cursor.position();
        let mut buf = [0u8; 4];
        let text: &str = ch.encode_utf8(&mut buf);
        let overwritten = if self.replacing() && pos.col < self.buffer.line_len(pos.line) {
            let removed = self.edit(Range::ordered(pos, pos.with_col(pos.col + 1)), text);
            removed.chars().next()
        } else {
            self.edit(Range::point(pos), text);
            None
        };
        self.cursor.set_position(pos.with_col(pos.col + 1), &self.buffer, true);
        if let Some(session) = &mut self.insert {
            session.inserted.push(ch);
            if session.replace {
                session.overwritten.push(overwritten);
            }
        }
    }

    /// Insert without overwriting, even in Replace mode.
    fn type_text(&mut self, text: &str) {
        let pos = self.cursor.position();
        self.edit(Range::point(pos), text);
        let breaks = text.matches('\n').count();
        let end = match text.rfind('\n') {
            Some(i) => Position::new(pos.line + breaks, text[i + 1..].chars().count()),
            None => pos.with_col(pos.col + text.chars().count()),
        };
        self.cursor.set_position(end, &self.buffer, true);
        if let Some(session) = &mut self.insert {
            session.inserted.push_str(text);
            if session.replace {
                session.overwritten.extend(text.chars().map(|_| None));
            }
        }
    }

    fn type_tab(&mut self) {
        if self.options.expandtab {
            let pos = self.cursor.position();
            let prefix: String = self.buffer.line_text(pos.line).chars().take(pos.col).collect();
            let width = self.options.indent_width(&prefix);
            let ts = self.options.tabstop.max(1);
            self.type_text(&" ".repeat(ts - width % ts));
        } else {
            self.type_text("\t");
        }
    }

    fn backspace(&mut self) {
        let pos = self.cursor.position();
        if self.replacing() {
            let popped = self.insert.as_mut().and_then(|s| s.overwritten.pop());
            match popped {
                Some(Some(original)) if pos.col > 0 => {
                    let left = pos.with_col(pos.col - 1);
                    self.edit(Range::ordered(left, pos), &original.to_string());
                    self.cursor.set_position(left, &self.buffer, true);
                    self.pop_inserted(1);
                    return;
                }
                Some(_) => {}
                None => {
                    // before the session start: only move
                    let left = pos.with_col(pos.col.saturating_sub(1));
                    self.cursor.set_position(left, &self.buffer, true);
                    return;
                }
            }
        }
        if pos.col > 0 {
            let left = pos.with_col(pos.col - 1);
            self.edit(Range::ordered(left, pos), "");
            self.cursor.set_position(left, &self.buffer, true);
        } else if pos.line > 0 {
            let end = Position::new(pos.line - 1, self.buffer.line_len(pos.line - 1));
            self.edit(Range::ordered(end, pos), "");
            self.cursor.set_position(end, &self.buffer, true);
        } else {
            return;
        }
        self.pop_inserted(1);
    }

    fn delete_forward(&mut self) {
        let pos = self.cursor.position();
        if pos.col < self.buffer.line_len(pos.line) {
            self.edit(Range::ordered(pos, pos.with_col(pos.col + 1)), "");
        } else if pos.line + 1 < self.buffer.line_count() {
            self.edit(Range::ordered(pos, Position::new(pos.line + 1, 0)), "");
        }
    }

    /// `<C-w>`: blanks before the cursor, then one run of a char class.
    fn delete_word_before(&mut self) {
        let pos = self.cursor.position();
        if pos.col == 0 {
            self.backspace();
            return;
        }
        let chars: Vec<char> = self.buffer.line_text(pos.line).chars().take(pos.col).collect();
        let mut start = chars.len();
        while start > 0 && is_blank(chars[start - 1]) {
            start -= 1;
        }
        if start > 0 {
            let class = WordKind::Small.classify(chars[start - 1]);
            while start > 0 && WordKind::Small.classify(chars[start - 1]) == class {
                start -= 1;
            }
        }
        let from = pos.with_col(start);
        self.edit(Range::ordered(from, pos), "");
        self.cursor.set_position(from, &self.buffer, true);
        self.pop_inserted(pos.col - start);
    }

    /// `<C-t>`, `<C-d>`: one shiftwidth more or less indent, rounded to a
    /// multiple of it. The cursor stays on the same text.
    fn shift_current_line(&mut self, indent: bool) {
        let pos = self.cursor.position();
        let sw = if self.options.shiftwidth == 0 { self.options.tabstop } else { self.options.shiftwidth }.max(1);
        let width = self.indent_of(pos.line);
        let target = if indent {
            (width / sw + 1) * sw
        } else if width % sw == 0 {
            width.saturating_sub(sw)
        } else {
            width - width % sw
        };
        let old_lead = self.buffer.line_text(pos.line).chars().take_while(|c| is_blank(*c)).count();
        let delta = self.set_indent(pos.line, target);
        let col = if pos.col >= old_lead {
            pos.col.saturating_add_signed(delta)
        } else {
            old_lead.saturating_add_signed(delta)
        };
        self.cursor.set_position(pos.with_col(col), &self.buffer, true);
    }

    fn pop_inserted(&mut self, n: usize) {
        if let Some(session) = &mut self.insert {
            for _ in 0..n {
                session.inserted.pop();
            }
        }
    }

    /// Arrow keys move without leaving Insert mode and restart the
    /// repeatable text.
    fn insert_move(&mut self, code: KeyCode) {
        let pos = self.cursor.position();
        let last = self.buffer.line_count() - 1;
        let target = match code {
            KeyCode::Left => pos.with_col(pos.col.saturating_sub(1)),
            KeyCode::Right => pos.with_col(pos.col + 1),
            KeyCode::Up => Position::new(pos.line.saturating_sub(1), pos.col),
            KeyCode::Down => Position::new((pos.line + 1).min(last), pos.col),
            KeyCode::Home => pos.with_col(0),
            _ => pos.with_col(self.buffer.line_len(pos.line)),
        };
        self.cursor.set_position(target, &self.buffer, true);
        if let Some(session) = &mut self.insert {
            let restart = if session.replace { 'R' } else { 'i' };
            session.typed.clear();
            session.inserted.clear();
            session.overwritten.clear();
            session.count = 1;
            session.entry = Some(InsertEntry::Before);
            session.token = Some(DotToken::new(None, None, vec![Key::char(restart)]));
        }
    }

    // -- Exit ---------------------------------------------------------------

    /// `<Esc>`: apply the count, remember the text, close the undo step.
    fn finish_insert(&mut self) {
        let Some(session) = self.insert.take() else {
            self.transition(Transition::Leave);
            return;
        };
        let opens_lines = matches!(session.entry, Some(InsertEntry::OpenBelow | InsertEntry::OpenAbove));
        let repeats = if session.typed.is_empty() && !opens_lines {
            0
        } else {
            session.count.saturating_sub(1)
        };
        for _ in 0..repeats {
            if opens_lines {
                let at = self.open_line(self.cursor.line(), false);
                self.cursor.set_position(at, &self.buffer, true);
            }
            for &key in &session.typed {
                self.insert_edit(key, false);
            }
        }

        let mut inserted = session.inserted.clone();
        if session.count > 1 && !opens_lines && inserted.len().checked_mul(session.count).is_some() {
            inserted = inserted.repeat(session.count);
        }
        self.registers.set_last_inserted(inserted);
        self.last_insert.clone_from(&session.typed);
        if let Some(token) = session.token {
            self.dot.record(token.with_insert(session.typed));
        }
        self.transition(Transition::Leave);
        self.history.commit(self.cursor.position());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;
    use crate::options::Options;
    use pretty_assertions::assert_eq;

    fn tabs() -> Options {
        Options {
            tabstop: 4,
            shiftwidth: 4,
            expandtab: false,
            ..Options::default()
        }
    }

    fn run(text: &str, cursor: Position, keys: &str) -> Editor {
        let mut ed = Editor::new(text).with_options(tabs()).with_cursor(cursor);
        ed.feed(keys).unwrap();
        ed
    }

    // -- Typing -------------------------------------------------------------

    #[test]
    fn insert_and_escape_snaps_left() {
        let ed = run("", Position::ZERO, "ihi<Esc>");
        assert_eq!(ed.text(), "hi");
        assert_eq!(ed.cursor(), Position::new(0, 1));
        assert_eq!(ed.mode(), Mode::Normal);
    }

    #[test]
    fn count_repeats_typed_text() {
        let ed = run("", Position::ZERO, "3ihi<Esc>");
        assert_eq!(ed.text(), "hihihi");
        assert_eq!(ed.cursor(), Position::new(0, 5));
    }

    #[test]
    fn count_with_open_line() {
        let ed = run("top", Position::ZERO, "2ox<Esc>");
        assert_eq!(ed.lines(), vec!["top", "x", "x"]);
    }

    #[test]
    fn entry_points() {
        assert_eq!(run("one", Position::ZERO, "A!<Esc>").text(), "one!");
        assert_eq!(run("  one", Position::new(0, 4), "I!<Esc>").text(), "  !one");
        assert_eq!(run("one", Position::ZERO, "a!<Esc>").text(), "o!ne");
        assert_eq!(run("one", Position::ZERO, "Ozero<Esc>").lines(), vec!["zero", "one"]);
    }

    #[test]
    fn enter_backspace_and_delete() {
        assert_eq!(run("ab", Position::new(0, 1), "i<CR><Esc>").lines(), vec!["a", "b"]);
        assert_eq!(run("a\nb", Position::new(1, 0), "i<BS><Esc>").text(), "ab");
        assert_eq!(run("abc", Position::ZERO, "i<Del><Esc>").text(), "bc");
    }

    #[test]
    fn ctrl_w_deletes_word_before_cursor() {
        assert_eq!(run("", Position::ZERO, "ifoo bar  <C-w><Esc>").text(), "foo ");
    }

    #[test]
    fn tab_inserts_tab_or_spaces() {
        assert_eq!(run("", Position::ZERO, "i<Tab>x<Esc>").text(), "\tx");
        let mut ed = Editor::new("");
        ed.feed("iab<Tab>x<Esc>").unwrap();
        assert_eq!(ed.text(), "ab  x");
    }

    #[test]
    fn ctrl_t_indents_and_keeps_cursor_on_text() {
        let ed = run("one", Position::new(0, 2), "a<C-t>b<Esc>");
        assert_eq!(ed.text(), "\toneb");
        let ed = run("\t\tone", Position::new(0, 2), "i<C-d><Esc>");
        assert_eq!(ed.text(), "\tone");
    }

    #[test]
    fn dot_register_holds_inserted_text() {
        let mut ed = run("", Position::ZERO, "ihello<BS><Esc>");
        assert_eq!(ed.registers_mut().get('.').unwrap().as_text(), Some("hell".to_string()));
    }

    // -- Replace ------------------------------------------------------------

    #[test]
    fn replace_overwrites_then_appends() {
        let ed = run("abc", Position::new(0, 1), "Rxyz<Esc>");
        assert_eq!(ed.text(), "axyz");
        assert_eq!(ed.cursor(), Position::new(0, 3));
    }

    #[test]
    fn replace_backspace_restores() {
        let ed = run("abcd", Position::ZERO, "Rxy<BS><BS><Esc>");
        assert_eq!(ed.text(), "abcd");
    }

    // -- Repeat -------------------------------------------------------------

    #[test]
    fn dot_after_append_and_insert() {
        let ed = run("one\ntwo\nthree", Position::ZERO, "A!<Esc>j.j.");
        assert_eq!(ed.lines(), vec!["one!", "two!", "three!"]);
        assert_eq!(ed.cursor(), Position::new(2, 5));
        let ed = run("one\ntwo\nthree", Position::ZERO, "I!<Esc>j.j.");
        assert_eq!(ed.lines(), vec!["!one", "!two", "!three"]);
        assert_eq!(ed.cursor(), Position::new(2, 0));
    }

    #[test]
    fn dot_after_ctrl_t() {
        let ed = run("one\ntwo", Position::new(0, 2), "a<C-t><Esc>j.");
        assert_eq!(ed.lines(), vec!["\tone", "\ttwo"]);
        assert_eq!(ed.cursor(), Position::new(1, 3));
        let ed = run("one\ntwo", Position::new(0, 2), "a<C-t>b<Esc>j.");
        assert_eq!(ed.lines(), vec!["\toneb", "\ttwob"]);
    }

    #[test]
    fn arrows_restart_the_repeat() {
        let ed = run("one\ntwo", Position::new(0, 2), "a<Left><Left>b<Esc>j$.");
        assert_eq!(ed.lines(), vec!["obne", "twbo"]);
        let ed = run("one\ntwo", Position::new(0, 2), "a<C-t>b<Left>c<Esc>j.");
        assert_eq!(ed.lines(), vec!["\tonecb", "twco"]);
    }

    #[test]
    fn ctrl_a_types_the_last_insert() {
        let ed = run("one\ntwo", Position::new(0, 2), "a<C-t>b<Esc>ja<C-a><Esc>");
        assert_eq!(ed.lines(), vec!["\toneb", "\ttwob"]);
    }
}
