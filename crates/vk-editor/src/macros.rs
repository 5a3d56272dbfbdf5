//! Macro recording and playback bookkeeping.
//!
//! `q{reg}` opens a recording session; every live key is buffered until the
//! `q` that closes it, and the buffer (minus that `q`) is stored in the
//! register as keys. `@{reg}` plays a register back through the editor's
//! key pipeline. The recorder only keeps the state; feeding keys is the
//! editor's job.
//!
//! Playback nests (a macro may call `@` itself), bounded by
//! `Options::max_macro_depth`. Starting or stopping a recording while a
//! macro plays is refused, so a register is never written while it is
//! being read for playback.

use tracing::debug;
use vk_input::{Key, format_keys};

use crate::error::EditorError;

#[derive(Debug)]
struct Session {
    target: char,
    keys: Vec<Key>,
}

#[derive(Debug, Default)]
pub struct MacroRecorder {
    session: Option<Session>,
    /// Registers currently being played, outermost first.
    playing: Vec<char>,
    last_played: Option<char>,
}

impl MacroRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Recording --------------------------------------------------------------

    #[must_use]
    pub const fn is_recording(&self) -> bool {
        self.session.is_some()
    }

    /// The register being recorded into.
    #[must_use]
    pub fn target(&self) -> Option<char> {
        self.session.as_ref().map(|s| s.target)
    }

    /// Begin recording into `target`.
    ///
    /// # Errors
    ///
    /// [`EditorError::RecordDuringPlayback`] while a macro is playing.
    pub fn start(&mut self, target: char) -> Result<(), EditorError> {
        if self.is_playing() {
            return Err(EditorError::RecordDuringPlayback);
        }
        debug!(register = %target, "macro: recording");
        self.session = Some(Session { target, keys: Vec::new() });
        Ok(())
    }

    /// Buffer one live key. No-op when not recording.
    pub fn observe(&mut self, key: Key) {
        if let Some(session) = &mut self.session {
            session.keys.push(key);
        }
    }

    /// End the session, dropping the last `stop_len` keys (the keys of the
    /// stop command itself). Returns the register and the recorded keys.
    ///
    /// # Errors
    ///
    /// [`EditorError::RecordDuringPlayback`] while a macro is playing.
    pub fn stop(&mut self, stop_len: usize) -> Result<Option<(char, Vec<Key>)>, EditorError> {
        if self.is_playing() {
            return Err(EditorError::RecordDuringPlayback);
        }
        Ok(self.session.take().map(|mut s| {
            let keep = s.keys.len().saturating_sub(stop_len);
            s.keys.truncate(keep);
            debug!(register = %s.target, keys = %format_keys(&s.keys), "macro: recorded");
            (s.target, s.keys)
        }))
    }

    // -- Playback -----------------------------------------------------------

    #[must_use]
    pub fn is_playing(&self) -> bool {
        !self.playing.is_empty()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.playing.len()
    }

    /// Resolve `@@` to the last played register.
    ///
    /// # Errors
    ///
    /// [`EditorError::NoPreviousMacro`] when nothing was played yet.
    pub fn resolve(&self, name: Option<char>) -> Result<char, EditorError> {
        name.or(self.last_played).ok_or(EditorError::NoPreviousMacro)
    }

    /// Enter one level of playback.
    ///
    /// # Errors
    ///
    /// [`EditorError::MacroTooDeep`] past `max_depth` levels.
    pub fn enter(&mut self, name: char, max_depth: usize) -> Result<(), EditorError> {
        if self.playing.len() >= max_depth {
            return Err(EditorError::MacroTooDeep);
        }
        debug!(register = %name, depth = self.playing.len() + 1, "macro: playing");
        self.playing.push(name);
        self.last_played = Some(name);
        Ok(())
    }

    pub fn leave(&mut self) {
        self.playing.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vk_input::parse_keys;

    #[test]
    fn stop_drops_the_stop_key() {
        let mut rec = MacroRecorder::new();
        rec.start('q').unwrap();
        for key in parse_keys("dwq").unwrap() {
            rec.observe(key);
        }
        let (name, keys) = rec.stop(1).unwrap().unwrap();
        assert_eq!(name, 'q');
        assert_eq!(keys, parse_keys("dw").unwrap());
        assert!(!rec.is_recording());
    }

    #[test]
    fn keys_outside_a_session_are_ignored() {
        let mut rec = MacroRecorder::new();
        rec.observe(Key::char('x'));
        assert_eq!(rec.stop(1).unwrap(), None);
    }

    #[test]
    fn depth_is_bounded() {
        let mut rec = MacroRecorder::new();
        rec.enter('a', 2).unwrap();
        rec.enter('a', 2).unwrap();
        assert!(matches!(rec.enter('a', 2), Err(EditorError::MacroTooDeep)));
        rec.leave();
        rec.leave();
        assert!(!rec.is_playing());
    }

    #[test]
    fn at_at_needs_a_previous_macro() {
        let mut rec = MacroRecorder::new();
        assert!(matches!(rec.resolve(None), Err(EditorError::NoPreviousMacro)));
        rec.enter('b', 8).unwrap();
        rec.leave();
        assert_eq!(rec.resolve(None).unwrap(), 'b');
        assert_eq!(rec.resolve(Some('c')).unwrap(), 'c');
    }

    #[test]
    fn no_recording_changes_during_playback() {
        let mut rec = MacroRecorder::new();
        rec.enter('a', 8).unwrap();
        assert!(matches!(rec.start('b'), Err(EditorError::RecordDuringPlayback)));
        assert!(matches!(rec.stop(1), Err(EditorError::RecordDuringPlayback)));
    }
}
