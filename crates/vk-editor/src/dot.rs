//! Dot-repeat — remembering the last change so `.` can do it again.
//!
//! A [`DotToken`] stores the last mutating command as keys, with the count
//! and register kept apart so that a count typed before `.` replaces the
//! stored one:
//!
//! ```text
//! 2d3w          count=Some(6)  keys=[d, w]
//! "ax           register=a     keys=[x]
//! 3ihi<Esc>     count=Some(3)  keys=[i]  insert=[h, i]
//! Vjd           countable=no   keys=[V, j, d]
//! ```
//!
//! Replaying feeds [`DotToken::replay_keys`] back through the same key
//! pipeline as live input. Nothing is recorded while a replay runs, so `.`
//! after `3.` still uses the original count.

use tracing::debug;
use vk_input::{Key, format_keys};

/// The last completed change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DotToken {
    /// Effective count, operator and motion counts already multiplied.
    pub count: Option<usize>,
    pub register: Option<char>,
    /// Command keys without counts or register prefix.
    pub keys: Vec<Key>,
    /// Keys typed in the Insert session the command opened, if it opened one.
    pub insert: Option<Vec<Key>>,
    /// Visual changes replay a selection of fixed shape, so a count before
    /// `.` cannot apply to them.
    pub countable: bool,
}

impl DotToken {
    #[must_use]
    pub const fn new(count: Option<usize>, register: Option<char>, keys: Vec<Key>) -> Self {
        Self { count, register, keys, insert: None, countable: true }
    }

    /// A token whose keys already encode their own extent.
    #[must_use]
    pub const fn fixed(register: Option<char>, keys: Vec<Key>) -> Self {
        Self { count: None, register, keys, insert: None, countable: false }
    }

    /// Attach the text typed in the Insert session.
    #[must_use]
    pub fn with_insert(mut self, typed: Vec<Key>) -> Self {
        self.insert = Some(typed);
        self
    }

    /// The key sequence that redoes this change. `count` replaces the
    /// stored count (last count wins).
    #[must_use]
    pub fn replay_keys(&self, count: Option<usize>) -> Vec<Key> {
        let mut out = Vec::with_capacity(self.keys.len() + 4);
        if let Some(name) = self.register {
            out.push(Key::char('"'));
            out.push(Key::char(name));
        }
        if self.countable {
            if let Some(n) = count.or(self.count) {
                out.extend(n.to_string().chars().map(Key::char));
            }
        }
        out.extend_from_slice(&self.keys);
        if let Some(typed) = &self.insert {
            out.extend_from_slice(typed);
            out.push(Key::ESC);
        }
        out
    }
}

/// Holds the token and knows when a replay is running.
#[derive(Debug, Default)]
pub struct DotRecorder {
    last: Option<DotToken>,
    replaying: bool,
}

impl DotRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored change. Ignored during a replay.
    pub fn record(&mut self, token: DotToken) {
        if self.replaying {
            return;
        }
        debug!(keys = %format_keys(&token.keys), count = ?token.count, "dot: recorded change");
        self.last = Some(token);
    }

    #[must_use]
    pub const fn last(&self) -> Option<&DotToken> {
        self.last.as_ref()
    }

    #[must_use]
    pub const fn is_replaying(&self) -> bool {
        self.replaying
    }

    /// Keys for `.` with an optional count, marking the replay as started.
    /// `None` when there is nothing to repeat.
    pub fn start_replay(&mut self, count: Option<usize>) -> Option<Vec<Key>> {
        let keys = self.last.as_ref()?.replay_keys(count);
        self.replaying = true;
        Some(keys)
    }

    pub const fn finish_replay(&mut self) {
        self.replaying = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vk_input::parse_keys;

    fn keys(s: &str) -> Vec<Key> {
        parse_keys(s).unwrap()
    }

    #[test]
    fn replay_uses_stored_count() {
        let token = DotToken::new(Some(6), None, keys("dw"));
        assert_eq!(token.replay_keys(None), keys("6dw"));
    }

    #[test]
    fn last_count_wins() {
        let token = DotToken::new(Some(6), None, keys("dw"));
        assert_eq!(token.replay_keys(Some(2)), keys("2dw"));
    }

    #[test]
    fn register_and_insert_text() {
        let token = DotToken::new(None, Some('a'), keys("c$")).with_insert(keys("new"));
        assert_eq!(token.replay_keys(None), keys("\"ac$new<Esc>"));
    }

    #[test]
    fn fixed_tokens_ignore_counts() {
        let token = DotToken::fixed(None, keys("Vjd"));
        assert_eq!(token.replay_keys(Some(5)), keys("Vjd"));
    }

    #[test]
    fn nothing_recorded_during_replay() {
        let mut dot = DotRecorder::new();
        assert_eq!(dot.start_replay(None), None);
        assert!(!dot.is_replaying());

        dot.record(DotToken::new(None, None, keys("x")));
        assert_eq!(dot.start_replay(Some(3)), Some(keys("3x")));
        assert!(dot.is_replaying());
        dot.record(DotToken::new(Some(3), None, keys("x")));
        dot.finish_replay();
        assert_eq!(dot.last().map(|t| t.count), Some(None));
    }
}
