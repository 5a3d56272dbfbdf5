//! Undo/redo history — one transaction per completed change.
//!
//! Every buffer mutation made by the interpreter goes through
//! [`Buffer::set_range`], and the editor records it here as an [`Edit`]
//! holding both the removed and the inserted text, which is enough to run it
//! in either direction.
//!
//! Transaction boundaries follow the key grammar:
//!
//! - a resolved Normal-mode change (`dw`, `x`, `p`, `J`) is one transaction;
//! - a change that enters Insert (`cw`, `o`, `A`) stays open until `<Esc>`,
//!   so the deletion and everything typed undo together;
//! - a played macro or a dot-repeat is one transaction per command it
//!   replays, exactly as if typed.
//!
//! Empty transactions are dropped.

use crate::buffer::Buffer;
use crate::position::{Position, Range};

// ---------------------------------------------------------------------------
// Edit
// ---------------------------------------------------------------------------

/// `removed` was replaced by `inserted` at `at`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Edit {
    at: Position,
    removed: String,
    inserted: String,
}

#[derive(Debug, Clone)]
struct Transaction {
    edits: Vec<Edit>,
    cursor_before: Position,
    cursor_after: Position,
}

impl Transaction {
    fn undo(&self, buf: &mut Buffer) {
        for e in self.edits.iter().rev() {
            let end = end_after_insert(e.at, &e.inserted);
            buf.set_range(Range::ordered(e.at, end), &e.removed);
        }
    }

    fn redo(&self, buf: &mut Buffer) {
        for e in &self.edits {
            let end = end_after_insert(e.at, &e.removed);
            buf.set_range(Range::ordered(e.at, end), &e.inserted);
        }
    }
}

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

/// Linear undo/redo stacks. A new change after an undo drops the redo stack.
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    pending: Option<Transaction>,
}

impl History {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            pending: None,
        }
    }

    /// Open a transaction unless one is already open.
    pub fn begin(&mut self, cursor: Position) {
        if self.pending.is_none() {
            self.pending = Some(Transaction {
                edits: Vec::new(),
                cursor_before: cursor,
                cursor_after: cursor,
            });
        }
    }

    /// `true` while a transaction is open.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Record an edit already applied to the buffer. Ignored when no
    /// transaction is open (undo and redo themselves are not recorded).
    pub fn record(&mut self, at: Position, removed: &str, inserted: &str) {
        if removed.is_empty() && inserted.is_empty() {
            return;
        }
        if let Some(txn) = &mut self.pending {
            txn.edits.push(Edit {
                at,
                removed: removed.to_string(),
                inserted: inserted.to_string(),
            });
        }
    }

    /// Close the open transaction.
    pub fn commit(&mut self, cursor: Position) {
        if let Some(mut txn) = self.pending.take() {
            if txn.edits.is_empty() {
                return;
            }
            txn.cursor_after = cursor;
            self.redo_stack.clear();
            self.undo_stack.push(txn);
        }
    }

    /// Undo the last transaction, returning where the cursor goes.
    pub fn undo(&mut self, buf: &mut Buffer) -> Option<Position> {
        if let Some(open) = self.pending.as_ref().map(|t| t.cursor_after) {
            self.commit(open);
        }
        let txn = self.undo_stack.pop()?;
        txn.undo(buf);
        let cursor = txn.edits.first().map_or(txn.cursor_before, |e| e.at);
        self.redo_stack.push(txn);
        Some(cursor)
    }

    /// Redo the last undone transaction, returning where the cursor goes.
    pub fn redo(&mut self, buf: &mut Buffer) -> Option<Position> {
        let txn = self.redo_stack.pop()?;
        txn.redo(buf);
        let cursor = txn.edits.first().map_or(txn.cursor_after, |e| e.at);
        self.undo_stack.push(txn);
        Some(cursor)
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Where `text` ends if inserted at `start`.
fn end_after_insert(start: Position, text: &str) -> Position {
    let mut line = start.line;
    let mut col = start.col;
    for ch in text.chars() {
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    Position::new(line, col)
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

    /// Apply an edit to the buffer and record it, as the editor does.
    fn edit(buf: &mut Buffer, h: &mut History, range: Range, text: &str) {
        let removed = buf.set_range(range, text);
        h.record(range.start, &removed, text);
    }

    #[test]
    fn end_after_insert_tracks_lines() {
        assert_eq!(end_after_insert(p(0, 0), "hello"), p(0, 5));
        assert_eq!(end_after_insert(p(3, 5), "hi\nthere"), p(4, 5));
        assert_eq!(end_after_insert(p(0, 2), "x\n"), p(1, 0));
    }

    #[test]
    fn undo_and_redo_a_replacement() {
        let mut buf = Buffer::from_text("one two");
        let mut h = History::new();
        h.begin(p(0, 0));
        edit(&mut buf, &mut h, Range::ordered(p(0, 0), p(0, 3)), "ONE\nUNO");
        h.commit(p(0, 0));
        assert_eq!(buf.contents(), "ONE\nUNO two");

        assert_eq!(h.undo(&mut buf), Some(p(0, 0)));
        assert_eq!(buf.contents(), "one two");
        assert!(h.can_redo());

        assert_eq!(h.redo(&mut buf), Some(p(0, 0)));
        assert_eq!(buf.contents(), "ONE\nUNO two");
    }

    #[test]
    fn multiple_edits_undo_in_reverse() {
        let mut buf = Buffer::from_text("abc");
        let mut h = History::new();
        h.begin(p(0, 1));
        edit(&mut buf, &mut h, Range::ordered(p(0, 1), p(0, 2)), "");
        edit(&mut buf, &mut h, Range::point(p(0, 1)), "XY");
        h.commit(p(0, 2));
        assert_eq!(buf.contents(), "aXYc");
        h.undo(&mut buf);
        assert_eq!(buf.contents(), "abc");
    }

    #[test]
    fn empty_transaction_is_dropped() {
        let mut h = History::new();
        h.begin(p(0, 0));
        h.commit(p(0, 0));
        assert!(!h.can_undo());
    }

    #[test]
    fn begin_is_idempotent_while_open() {
        let mut buf = Buffer::from_text("ab");
        let mut h = History::new();
        h.begin(p(0, 0));
        edit(&mut buf, &mut h, Range::ordered(p(0, 0), p(0, 1)), "");
        h.begin(p(0, 0));
        edit(&mut buf, &mut h, Range::point(p(0, 0)), "z");
        h.commit(p(0, 0));
        h.undo(&mut buf);
        assert_eq!(buf.contents(), "ab");
        assert!(!h.can_undo());
    }

    #[test]
    fn new_change_clears_redo() {
        let mut buf = Buffer::from_text("a");
        let mut h = History::new();
        h.begin(p(0, 0));
        edit(&mut buf, &mut h, Range::point(p(0, 1)), "b");
        h.commit(p(0, 1));
        h.undo(&mut buf);
        h.begin(p(0, 0));
        edit(&mut buf, &mut h, Range::point(p(0, 1)), "c");
        h.commit(p(0, 1));
        assert!(!h.can_redo());
        assert_eq!(buf.contents(), "ac");
    }
}
