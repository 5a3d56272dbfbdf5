//! Visual mode — operators on the selection and text-object selection.
//!
//! The selection runs from the cursor's anchor to its head, both ends
//! included. Every operator leaves Visual mode first and then acts on the
//! region the selection covered.
//!
//! A selection cannot be replayed from the keys that built it, so `.` after
//! a Visual change replays a selection of the same shape from the cursor:
//!
//! | Visual kind | Replayed as                  |
//! |-------------|------------------------------|
//! | line        | `V{lines-1}j` + operator     |
//! | char, 1 line| `v{width-1}l` + operator     |
//! | char, more  | `v{lines-1}j0{end col}l` + op|
//! | block       | `<C-v>{lines-1}j{cols-1}l` + op |

use vk_input::Key;

use crate::action::{Operator, VisualOp};
use crate::cursor::Cursor;
use crate::dot::DotToken;
use crate::error::EditorError;
use crate::mode::{Mode, Transition, VisualKind};
use crate::position::{Position, Range};
use crate::register::{ContentKind, RegisterContent};
use crate::text_object::{self, ObjectKind, TextObject};

use super::Editor;
use super::operator::Region;

fn push_count(keys: &mut Vec<Key>, n: usize, motion: char) {
    if n > 0 {
        keys.extend(n.to_string().chars().map(Key::char));
        keys.push(Key::char(motion));
    }
}

impl Editor {
    fn selection_ends(&self) -> (Position, Position) {
        let head = self.cursor.position();
        (self.cursor.anchor().unwrap_or(head), head)
    }

    /// The region under the selection; `lines` forces it line-wise.
    fn visual_region(&self, lines: bool) -> Option<Region> {
        let Mode::Visual(kind) = self.mode else {
            return None;
        };
        let (anchor, head) = self.selection_ends();
        let r = Range::ordered(anchor, head);
        if lines || kind == VisualKind::Line {
            return Some(Region::Lines {
                first: r.start.line,
                last: r.end.line,
            });
        }
        if kind == VisualKind::Block {
            let left = anchor.col.min(head.col);
            let right = if self.cursor.sticky_col() == Cursor::END {
                (r.start.line..=r.end.line)
                    .map(|l| self.buffer.line_len(l).saturating_sub(1))
                    .max()
                    .unwrap_or(0)
            } else {
                anchor.col.max(head.col)
            };
            return Some(Region::Block {
                first: r.start.line,
                last: r.end.line,
                left,
                right,
            });
        }
        // An empty last line contributes its line break.
        let end = if self.buffer.line_len(r.end.line) == 0 {
            self.buffer.line_end_pos(r.end.line)
        } else {
            r.end.with_col(r.end.col + 1)
        };
        Some(Region::Chars(Range::ordered(r.start, end)))
    }

    /// The dot token for a Visual command about to run.
    pub(super) fn visual_token(
        &self,
        count: Option<usize>,
        register: Option<char>,
        replay_keys: &[Key],
    ) -> DotToken {
        let kind = match self.mode {
            Mode::Visual(kind) => kind,
            _ => VisualKind::Char,
        };
        let (anchor, head) = self.selection_ends();
        let r = Range::ordered(anchor, head);
        let lines = r.end.line - r.start.line;

        let mut keys = Vec::new();
        match kind {
            VisualKind::Line => {
                keys.push(Key::char('V'));
                push_count(&mut keys, lines, 'j');
            }
            VisualKind::Char => {
                keys.push(Key::char('v'));
                if lines == 0 {
                    push_count(&mut keys, r.end.col - r.start.col, 'l');
                } else {
                    push_count(&mut keys, lines, 'j');
                    keys.push(Key::char('0'));
                    push_count(&mut keys, r.end.col, 'l');
                }
            }
            VisualKind::Block => {
                keys.push(Key::ctrl('v'));
                push_count(&mut keys, lines, 'j');
                push_count(&mut keys, anchor.col.abs_diff(head.col), 'l');
            }
        }
        if let Some(name) = register {
            keys.push(Key::char('"'));
            keys.push(Key::char(name));
        }
        if let Some(n) = count {
            keys.extend(n.to_string().chars().map(Key::char));
        }
        keys.extend_from_slice(replay_keys);
        DotToken::fixed(None, keys)
    }

    pub(super) fn visual_op(
        &mut self,
        op: VisualOp,
        count: Option<usize>,
        register: Option<char>,
    ) -> Result<bool, EditorError> {
        if op == VisualOp::SwapAnchor {
            self.cursor.swap_anchor();
            return Ok(false);
        }
        let lines = matches!(op, VisualOp::Operate { linewise: true, .. });
        let Some(region) = self.visual_region(lines) else {
            return Ok(false);
        };
        self.transition(Transition::Leave);

        match op {
            VisualOp::Operate { op, .. } => {
                let levels = match op {
                    Operator::Indent | Operator::Outdent => count.unwrap_or(1),
                    _ => 1,
                };
                self.apply_operator(op, region, register, levels)
            }
            VisualOp::Join => {
                let (first, last) = region.lines();
                Ok(self.join(first, (last - first).max(1)))
            }
            VisualOp::Put => self.put_over(region, register),
            VisualOp::ReplaceChar(ch) => Ok(self.fill(region, ch)),
            VisualOp::SwapAnchor => Ok(false),
        }
    }

    /// Visual `p`: the register replaces the selection, which goes to the
    /// unnamed register.
    fn put_over(&mut self, region: Region, register: Option<char>) -> Result<bool, EditorError> {
        let reg = self.paste_source(register)?;
        let line_count = self.buffer.line_count();
        self.apply_operator(Operator::Delete, region, None, 1)?;

        match (reg.content, region) {
            (RegisterContent::Text(text), Region::Lines { first, last }) => {
                let mut body = text;
                if reg.kind != ContentKind::LineWise {
                    body.push('\n');
                }
                if first == 0 && last + 1 >= line_count {
                    // the whole buffer went; drop the empty line left over
                    self.put_lines(0, &body);
                    let last = self.buffer.line_count() - 1;
                    let end = Position::new(last, 0);
                    let prev = Position::new(last - 1, self.buffer.line_len(last - 1));
                    self.edit(Range::ordered(prev, end), "");
                    self.cursor.set_position(Position::ZERO, &self.buffer, false);
                } else {
                    self.put_lines(first, &body);
                }
            }
            (RegisterContent::Text(text), Region::Chars(r)) if reg.kind == ContentKind::LineWise => {
                let mut body = String::from("\n");
                body.push_str(&text);
                self.edit(Range::point(r.start), &body);
                self.cursor.set_position(Position::new(r.start.line + 1, 0), &self.buffer, false);
            }
            (RegisterContent::Text(text), region) => {
                let at = match region {
                    Region::Chars(r) => r.start,
                    Region::Block { first, left, .. } => Position::new(first, left),
                    Region::Lines { first, .. } => Position::new(first, 0),
                };
                self.put_chars(at, &text);
            }
            (RegisterContent::Block(rows), region) => {
                let at = match region {
                    Region::Chars(r) => r.start,
                    Region::Block { first, left, .. } => Position::new(first, left),
                    Region::Lines { first, .. } => Position::new(first, 0),
                };
                self.put_block(at, &rows, 1);
            }
            (RegisterContent::Keys(_), _) => {}
        }
        Ok(true)
    }

    // -- Text objects -------------------------------------------------------

    /// `iw`, `a(`, ... in Visual mode. A collapsed selection becomes the
    /// object around the cursor; an extended one grows by the next object
    /// in the direction the head points.
    pub(super) fn select_object(&mut self, object: TextObject, count: Option<usize>) {
        let n = count.unwrap_or(1).max(1);
        let (anchor, head) = self.selection_ends();
        let buf = &self.buffer;

        if anchor == head {
            let Some(sel) = text_object::select(buf, head, object, n) else {
                return;
            };
            if sel.linewise {
                if self.mode == Mode::Visual(VisualKind::Char) {
                    self.transition(Transition::ToggleVisual(VisualKind::Line));
                }
                self.cursor.set_position(Position::new(sel.range.end.line, 0), &self.buffer, false);
                self.cursor.set_anchor(Position::new(sel.range.start.line, 0));
                return;
            }
            if sel.range.is_empty() {
                return;
            }
            let last = buf.idx_to_pos(buf.char_idx(sel.range.end) - 1);
            let start = sel.range.start;
            self.cursor.set_position(last, &self.buffer, false);
            self.cursor.set_anchor(start);
            return;
        }

        let forward = head > anchor;
        let idx = buf.char_idx(head);
        if let (ObjectKind::Word(kind), true) = (object.kind, forward) {
            if let Some(end) = text_object::extend_word(buf, idx, kind, object.inner, n) {
                let pos = buf.idx_to_pos(end);
                self.cursor.set_position(pos, &self.buffer, false);
            }
            return;
        }

        let probe = if forward { idx.checked_add(1) } else { idx.checked_sub(1) };
        let Some(mut probe) = probe.filter(|&i| i < buf.len_chars()) else {
            return;
        };
        if buf.rope().char(probe) == '\n' {
            probe = if forward { probe + 1 } else { probe.saturating_sub(1) };
        }
        let Some(sel) = text_object::select(buf, buf.idx_to_pos(probe), object, n) else {
            return;
        };
        if sel.range.is_empty() {
            return;
        }
        let target = if forward {
            buf.idx_to_pos(buf.char_idx(sel.range.end) - 1)
        } else {
            sel.range.start
        };
        self.cursor.set_position(target, &self.buffer, false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use pretty_assertions::assert_eq;

    fn run(text: &str, cursor: Position, keys: &str) -> Editor {
        let options = Options {
            expandtab: false,
            ..Options::default()
        };
        let mut ed = Editor::new(text).with_options(options).with_cursor(cursor);
        ed.feed(keys).unwrap();
        ed
    }

    // -- Operators ----------------------------------------------------------

    #[test]
    fn charwise_delete_includes_head() {
        let ed = run("one two three", Position::new(0, 4), "vwd");
        assert_eq!(ed.text(), "one hree");
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(ed.cursor(), Position::new(0, 4));
    }

    #[test]
    fn vertical_selection_and_x() {
        let ed = run("abc\ndef", Position::new(1, 1), "v<Up>x");
        assert_eq!(ed.text(), "af");
        let ed = run("abc\ndef", Position::new(0, 1), "v<Down>x");
        assert_eq!(ed.text(), "af");
    }

    #[test]
    fn linewise_yank_and_put() {
        let ed = run("one\ntwo", Position::new(1, 0), "vwYP");
        assert_eq!(ed.lines(), vec!["one", "two", "two"]);
        assert_eq!(ed.cursor(), Position::new(1, 0));
    }

    #[test]
    fn visual_indent_repeats() {
        let ed = run("one\ntwo", Position::ZERO, "Vj>.");
        assert_eq!(ed.lines(), vec!["\t\tone", "\t\ttwo"]);
    }

    #[test]
    fn visual_dot_replays_the_same_width() {
        let ed = run("abcdef", Position::ZERO, "vld.");
        assert_eq!(ed.text(), "ef");
    }

    #[test]
    fn visual_replace_and_case() {
        assert_eq!(run("abcd", Position::ZERO, "vlrx").text(), "xxcd");
        assert_eq!(run("abcd", Position::ZERO, "vlU").text(), "ABcd");
    }

    #[test]
    fn visual_join() {
        assert_eq!(run("a\nb\nc", Position::ZERO, "VjjJ").text(), "a b c");
    }

    #[test]
    fn block_delete_and_swap() {
        let ed = run("abcd\nefgh\nijkl", Position::new(0, 1), "<C-v>jld");
        assert_eq!(ed.lines(), vec!["ad", "eh", "ijkl"]);
        let ed = run("abcd", Position::new(0, 1), "vlohd");
        assert_eq!(ed.text(), "d");
    }

    #[test]
    fn put_replaces_selection() {
        let ed = run("one two", Position::ZERO, "yiwwviwp");
        assert_eq!(ed.text(), "one one");
        assert_eq!(ed.cursor(), Position::new(0, 6));
    }

    #[test]
    fn escape_leaves_visual() {
        let ed = run("abc", Position::ZERO, "vl<Esc>");
        assert_eq!(ed.mode(), Mode::Normal);
        assert_eq!(ed.selections()[0].anchor, ed.selections()[0].head);
    }

    // -- Text objects -------------------------------------------------------

    #[test]
    fn around_word_from_blank() {
        let text = "one   two   three,   four  ";
        let ed = run(text, Position::new(0, 10), "vawd");
        assert_eq!(ed.text(), "one   two,   four  ");
    }

    #[test]
    fn around_word_with_count() {
        let ed = run("one   two   three,   four  ", Position::ZERO, "v3awd");
        assert_eq!(ed.text(), ",   four  ");
    }

    #[test]
    fn tags() {
        let text = "one <blink><b>hello</b></blink> two";
        assert_eq!(run(text, Position::new(0, 16), "vitd").text(), "one <blink><b></b></blink> two");
        assert_eq!(run(text, Position::new(0, 5), "vatd").text(), "one  two");
    }

    #[test]
    fn inner_word_grows_forward() {
        let ed = run("one two three", Position::ZERO, "viwiwiwd");
        assert_eq!(ed.text(), " three");
    }

    #[test]
    fn paragraph_switches_to_line_mode() {
        let mut ed = run("a\nb\n\nc", Position::ZERO, "vap");
        assert_eq!(ed.mode(), Mode::Visual(VisualKind::Line));
        ed.feed("d").unwrap();
        assert_eq!(ed.lines(), vec!["c"]);
    }
}
