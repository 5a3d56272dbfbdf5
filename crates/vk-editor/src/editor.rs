//! The editor — one buffer driven by keys.
//!
//! [`Editor`] owns every piece of interpreter state and runs the key
//! pipeline:
//!
//! ```text
//! key ─► macro recorder (live keys only)
//!     ─► mode dispatch ─┬─ Normal/Visual ─► grammar::consume ─► execute
//!                       ├─ Insert/Replace ─► insert session
//!                       └─ CommandLine/Search ─► prompt
//! ```
//!
//! Dot-repeat and macro playback feed their keys back through the same
//! dispatch, so a replayed key behaves exactly like a typed one. Errors
//! never escape the lenient entry points ([`Editor::handle_key`],
//! [`Editor::feed`]); they reset the command under construction and land in
//! the status line. [`Editor::run_keys`] is the strict variant for scripts.
//!
//! Operators, Visual mode and the Insert session live in submodules; they
//! all extend `impl Editor`.

mod insert;
mod operator;
mod visual;

use tracing::{debug, trace, warn};
use vk_input::{Key, format_keys, parse_keys};

use crate::action::{Action, Command, Operator};
use crate::buffer::Buffer;
use crate::clipboard::{Clipboard, MemoryClipboard};
use crate::command::{ExCommand, Prompt, PromptEvent};
use crate::cursor::Cursor;
use crate::dot::{DotRecorder, DotToken};
use crate::error::EditorError;
use crate::grammar::{self, Outcome, Rejection, Resolved};
use crate::history::History;
use crate::host::{Host, NullHost};
use crate::macros::MacroRecorder;
use crate::mode::{Mode, Transition};
use crate::motion::{self, Find, Landing, Motion, MotionContext, Sticky};
use crate::options::Options;
use crate::position::{Position, Range, Selection};
use crate::recorded::RecordedState;
use crate::register::{RegisterError, RegisterStore};
use crate::search::{self, LastSearch, SearchDirection};

/// Whether the host should keep feeding keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// A `:q`-family command closed the editor.
    Quit,
}

/// The message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub text: String,
    pub is_error: bool,
}

pub struct Editor {
    buffer: Buffer,
    cursor: Cursor,
    mode: Mode,
    options: Options,

    /// The command being typed in Normal or Visual mode.
    recorded: RecordedState,
    registers: RegisterStore,
    history: History,
    dot: DotRecorder,
    macros: MacroRecorder,

    insert: Option<insert::Session>,
    /// Keys typed in the last Insert session, for `<C-a>`.
    last_insert: Vec<Key>,
    prompt: Prompt,

    last_find: Option<Find>,
    last_search: Option<LastSearch>,

    status: Option<Status>,
    host: Box<dyn Host>,
    /// Nesting of dot and macro replays; 0 for live input.
    replay_depth: usize,
    /// Last key the grammar refused, for strict mode.
    rejected: Option<Key>,
    quit: bool,
}

impl Editor {
    /// An editor over `text`, cursor at the start, Normal mode. Registers
    /// use an in-memory clipboard and `:w` goes nowhere until
    /// [`with_clipboard`](Self::with_clipboard) and
    /// [`with_host`](Self::with_host) say otherwise.
    #[must_use]
    pub fn new(text: &str) -> Self {
        Self {
            buffer: Buffer::from_text(text),
            cursor: Cursor::default(),
            mode: Mode::Normal,
            options: Options::default(),
            recorded: RecordedState::new(),
            registers: RegisterStore::new(Box::new(MemoryClipboard::new())),
            history: History::new(),
            dot: DotRecorder::new(),
            macros: MacroRecorder::new(),
            insert: None,
            last_insert: Vec::new(),
            prompt: Prompt::new(),
            last_find: None,
            last_search: None,
            status: None,
            host: Box::new(NullHost::default()),
            replay_depth: 0,
            rejected: None,
            quit: false,
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_clipboard(mut self, clipboard: Box<dyn Clipboard>) -> Self {
        self.registers = RegisterStore::new(clipboard);
        self
    }

    #[must_use]
    pub fn with_host(mut self, host: Box<dyn Host>) -> Self {
        self.host = host;
        self
    }

    /// Start with the cursor at `pos` (clamped).
    #[must_use]
    pub fn with_cursor(mut self, pos: Position) -> Self {
        self.cursor.set_position(pos, &self.buffer, false);
        self
    }

    // -- Accessors ----------------------------------------------------------

    #[inline]
    #[must_use]
    pub const fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.buffer.contents()
    }

    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines()
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Position {
        self.cursor.position()
    }

    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    #[inline]
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    #[must_use]
    pub const fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Keys of the command still being typed.
    #[must_use]
    pub fn pending_keys(&self) -> &[Key] {
        &self.recorded.keys
    }

    /// The register a macro is being recorded into.
    #[must_use]
    pub fn recording(&self) -> Option<char> {
        self.macros.target()
    }

    /// Direct register access for hosts and tests.
    pub fn registers_mut(&mut self) -> &mut RegisterStore {
        &mut self.registers
    }

    #[must_use]
    pub const fn is_modified(&self) -> bool {
        self.buffer.is_modified()
    }

    /// The `:` or `/` line being typed.
    #[must_use]
    pub fn prompt_text(&self) -> Option<&str> {
        self.mode.is_prompt().then(|| self.prompt.input())
    }

    /// Current selections as `(anchor, head)` pairs. Outside Visual mode
    /// the single selection is collapsed on the cursor.
    #[must_use]
    pub fn selections(&self) -> Vec<Selection> {
        vec![self.cursor.selection()]
    }

    /// Move the cursor (and, in Visual mode, the anchor) from the host.
    pub fn set_selection(&mut self, selection: Selection) {
        let past_end = self.mode.cursor_past_end();
        self.cursor.set_position(selection.head, &self.buffer, past_end);
        if self.mode.is_visual() {
            self.cursor.set_anchor(self.buffer.clamp(selection.anchor, false));
        }
    }

    // -- Key pipeline -------------------------------------------------------

    /// Process one live key. Errors are reported in the status line.
    pub fn handle_key(&mut self, key: Key) -> Flow {
        if let Err(e) = self.live_key(key) {
            self.report(&e);
        }
        self.flow()
    }

    /// Process several live keys, stopping at a quit.
    pub fn handle_keys(&mut self, keys: &[Key]) -> Flow {
        for &key in keys {
            if self.handle_key(key) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    /// Parse key notation and process it leniently.
    ///
    /// # Errors
    ///
    /// Only [`EditorError::Notation`]; command failures go to the status
    /// line.
    pub fn feed(&mut self, notation: &str) -> Result<Flow, EditorError> {
        let keys = parse_keys(notation)?;
        Ok(self.handle_keys(&keys))
    }

    /// Parse key notation and process it strictly: the first failing
    /// command, or key that continues no command, stops the run.
    ///
    /// # Errors
    ///
    /// [`EditorError::InvalidKeySequence`] for keys that form no command,
    /// otherwise whatever the failing command returned.
    pub fn run_keys(&mut self, notation: &str) -> Result<Flow, EditorError> {
        let keys = parse_keys(notation)?;
        for key in keys {
            self.rejected = None;
            self.live_key(key)?;
            if let Some(bad) = self.rejected.take() {
                return Err(EditorError::InvalidKeySequence(format_keys(&[bad])));
            }
            if self.quit {
                break;
            }
        }
        Ok(self.flow())
    }

    const fn flow(&self) -> Flow {
        if self.quit { Flow::Quit } else { Flow::Continue }
    }

    fn live_key(&mut self, key: Key) -> Result<(), EditorError> {
        self.macros.observe(key);
        let result = self.dispatch(key);
        if let Some(fault) = self.registers.take_clipboard_fault() {
            self.report(&EditorError::Clipboard(fault));
        }
        result
    }

    /// Route one key by mode. Live and replayed keys both come through here.
    fn dispatch(&mut self, key: Key) -> Result<(), EditorError> {
        trace!(key = %key, mode = %self.mode, depth = self.replay_depth, "key");
        let result = match self.mode {
            Mode::Insert | Mode::Replace => {
                self.insert_key(key);
                Ok(())
            }
            Mode::CommandLine | Mode::Search(_) => self.prompt_key(key),
            Mode::Normal | Mode::Visual(_) => self.command_key(key),
        };
        if result.is_err() {
            self.recorded = RecordedState::new();
        }
        result
    }

    fn command_key(&mut self, key: Key) -> Result<(), EditorError> {
        let fresh = self.recorded.is_empty();
        if fresh && self.replay_depth == 0 {
            self.status = None;
        }
        let cx = grammar::Context {
            mode: self.mode,
            recording: self.macros.is_recording(),
        };
        match grammar::consume(std::mem::take(&mut self.recorded), key, &cx) {
            Outcome::Incomplete(state) => {
                self.recorded = state;
                Ok(())
            }
            Outcome::Resolved(resolved) => self.execute(resolved),
            Outcome::Invalid(rejection) => self.reject(rejection, fresh),
        }
    }

    fn reject(&mut self, rejection: Rejection, fresh: bool) -> Result<(), EditorError> {
        match rejection {
            Rejection::Cancelled => {
                trace!("command cancelled");
                if fresh && self.mode.is_visual() {
                    self.transition(Transition::Leave);
                }
                Ok(())
            }
            Rejection::NoMatch(key) => {
                trace!(key = %key, "no command");
                self.rejected = Some(key);
                Ok(())
            }
            Rejection::InvalidRegister(name) => Err(RegisterError::Invalid(name).into()),
        }
    }

    // -- Execution ----------------------------------------------------------

    /// Run a resolved command. A mutating command is one undo step and,
    /// once it did something, the new dot-repeat token. Commands that open
    /// an Insert session hand both over to the session.
    fn execute(&mut self, resolved: Resolved) -> Result<(), EditorError> {
        let Resolved {
            action,
            register,
            keys,
            replay_keys,
            mutating,
        } = resolved;
        trace!(keys = %format_keys(&keys), action = ?action, "resolved");

        let token = match action {
            Action::Visual { count, .. } => self.visual_token(count, register, &replay_keys),
            _ => DotToken::new(action.count(), register, replay_keys),
        };
        if mutating {
            self.history.begin(self.cursor.position());
        }

        let applied = match action {
            Action::Move { motion, count } => self.move_cursor(motion, count).map(|()| false),
            Action::Operate { op, target, count } => self.operate(op, target, count, register),
            Action::SelectObject { object, count } => {
                self.select_object(object, count);
                Ok(false)
            }
            Action::Visual { op, count } => self.visual_op(op, count, register),
            Action::Command { command, count } => self.command(command, count, register, keys.len()),
        };

        let result = applied.map(|applied| {
            if mutating && applied {
                match &mut self.insert {
                    Some(session) => session.token = Some(token),
                    None => self.dot.record(token),
                }
            }
        });
        if self.insert.is_none() {
            self.history.commit(self.cursor.position());
        }
        result
    }

    fn command(
        &mut self,
        command: Command,
        count: Option<usize>,
        register: Option<char>,
        key_len: usize,
    ) -> Result<bool, EditorError> {
        let n = count.unwrap_or(1).max(1);
        match command {
            Command::Insert(entry) => {
                self.begin_insert(entry, n);
                Ok(true)
            }
            Command::EnterReplace => {
                self.begin_replace(n);
                Ok(true)
            }
            Command::Put { before } => self.put(register, before, n),
            Command::Join => Ok(self.join(self.cursor.line(), n.max(2) - 1)),
            Command::ToggleCaseChar => Ok(self.toggle_case_chars(n)),
            Command::ReplaceChar(ch) => Ok(self.replace_chars(ch, n)),
            Command::Undo => {
                self.undo(n);
                Ok(false)
            }
            Command::Redo => {
                self.redo(n);
                Ok(false)
            }
            Command::Repeat => self.repeat(count).map(|()| false),
            Command::EnterVisual(kind) => {
                self.transition(Transition::ToggleVisual(kind));
                Ok(false)
            }
            Command::CommandLine => {
                self.prompt.clear();
                self.transition(Transition::OpenCommandLine);
                Ok(false)
            }
            Command::Search(direction) => {
                self.prompt.clear();
                self.transition(Transition::OpenSearch(direction));
                Ok(false)
            }
            Command::RecordMacro(name) => {
                self.macros.start(name)?;
                self.set_message(format!("recording @{name}"));
                Ok(false)
            }
            Command::StopRecording => {
                if let Some((name, keys)) = self.macros.stop(key_len)? {
                    self.registers.store_macro(name, keys)?;
                }
                Ok(false)
            }
            Command::PlayMacro(name) => self.play_macro(name, n).map(|()| false),
        }
    }

    // -- Movement -----------------------------------------------------------

    /// Resolve a motion from the cursor. `f t F T` remember their target
    /// for `;` and `,`.
    fn land(
        &mut self,
        motion: Motion,
        count: Option<usize>,
        operator: Option<Operator>,
    ) -> Result<Option<Landing>, EditorError> {
        if let Motion::Find(find) = motion {
            self.last_find = Some(find);
        }
        let cx = MotionContext {
            buf: &self.buffer,
            cursor: &self.cursor,
            count,
            operator,
            last_find: self.last_find,
            last_search: self.last_search.as_ref(),
            wrapscan: self.options.wrapscan,
        };
        motion::resolve(motion, &cx)
    }

    fn move_cursor(&mut self, motion: Motion, count: Option<usize>) -> Result<(), EditorError> {
        if let Some(landing) = self.land(motion, count, None)? {
            match landing.sticky {
                Sticky::Keep => self.cursor.set_vertical(landing.pos, &self.buffer, false),
                Sticky::Reset => self.cursor.set_position(landing.pos, &self.buffer, false),
                Sticky::End => {
                    self.cursor.set_position(landing.pos, &self.buffer, false);
                    self.cursor.set_sticky(Cursor::END);
                }
            }
        }
        Ok(())
    }

    // -- Modes --------------------------------------------------------------

    /// Apply a mode transition and fix up the cursor for the new mode.
    fn transition(&mut self, transition: Transition) {
        let from = self.mode;
        let to = from.next(transition);
        if from == to {
            return;
        }
        if to.is_visual() && !from.is_visual() {
            self.cursor.set_anchor(self.cursor.position());
        } else if from.is_visual() && !to.is_visual() {
            self.cursor.clear_anchor();
        }
        self.mode = to;

        let pos = self.cursor.position();
        if from.snaps_left_on_exit() && to == Mode::Normal {
            self.cursor.set_position(pos.with_col(pos.col.saturating_sub(1)), &self.buffer, false);
        } else if !to.is_prompt() {
            self.cursor.clamp(&self.buffer, to.cursor_past_end());
        }
        debug!(%from, %to, "mode change");
    }

    // -- Undo ---------------------------------------------------------------

    fn undo(&mut self, n: usize) {
        for _ in 0..n {
            let Some(pos) = self.history.undo(&mut self.buffer) else {
                self.set_message("Already at oldest change");
                return;
            };
            self.cursor.set_position(pos, &self.buffer, false);
        }
    }

    fn redo(&mut self, n: usize) {
        for _ in 0..n {
            let Some(pos) = self.history.redo(&mut self.buffer) else {
                self.set_message("Already at newest change");
                return;
            };
            self.cursor.set_position(pos, &self.buffer, false);
        }
    }

    // -- Replay -------------------------------------------------------------

    /// `.`: replay the last change, with `count` replacing its own.
    fn repeat(&mut self, count: Option<usize>) -> Result<(), EditorError> {
        let Some(keys) = self.dot.start_replay(count) else {
            return Ok(());
        };
        debug!(keys = %format_keys(&keys), "dot: replaying");
        let result = self.replay(&keys);
        self.dot.finish_replay();
        result
    }

    /// `@x`, `@@`: play a register `n` times in a row. The first error
    /// stops the remaining rounds too.
    fn play_macro(&mut self, name: Option<char>, n: usize) -> Result<(), EditorError> {
        let name = self.macros.resolve(name)?;
        let keys = self.registers.macro_keys(name)?;
        self.macros.enter(name, self.options.max_macro_depth)?;
        let mut result = Ok(());
        for _ in 0..n {
            result = self.replay(&keys);
            if result.is_err() || self.quit {
                break;
            }
        }
        self.macros.leave();
        result
    }

    /// Feed keys through the dispatcher as if typed. The first error ends
    /// the replay.
    fn replay(&mut self, keys: &[Key]) -> Result<(), EditorError> {
        self.replay_depth += 1;
        let mut result = Ok(());
        for &key in keys {
            if let Err(e) = self.dispatch(key) {
                result = Err(e);
                break;
            }
            if self.quit {
                break;
            }
        }
        self.replay_depth -= 1;
        result
    }

    // -- Prompts ------------------------------------------------------------

    fn prompt_key(&mut self, key: Key) -> Result<(), EditorError> {
        match self.prompt.handle(key) {
            PromptEvent::Editing => Ok(()),
            PromptEvent::Cancel => {
                self.transition(Transition::Leave);
                Ok(())
            }
            PromptEvent::Submit(line) => {
                let mode = self.mode;
                self.transition(Transition::Leave);
                match mode {
                    Mode::Search(direction) => self.search(&line, direction),
                    _ => self.ex_command(&line),
                }
            }
        }
    }

    /// `/pattern<CR>`, `?pattern<CR>`. An empty pattern reuses the last.
    fn search(&mut self, pattern: &str, direction: SearchDirection) -> Result<(), EditorError> {
        let pattern = if pattern.is_empty() {
            self.last_search
                .as_ref()
                .map(|s| s.pattern.clone())
                .ok_or(EditorError::NoPreviousPattern)?
        } else {
            pattern.to_string()
        };
        self.last_search = Some(LastSearch {
            pattern: pattern.clone(),
            direction,
        });
        let from = self.cursor.position();
        let pos = search::find(&self.buffer, &pattern, from, direction, self.options.wrapscan)
            .ok_or(EditorError::PatternNotFound(pattern))?;
        self.cursor.set_position(pos, &self.buffer, false);
        Ok(())
    }

    fn ex_command(&mut self, line: &str) -> Result<(), EditorError> {
        debug!(command = line, "ex command");
        match ExCommand::parse(line) {
            ExCommand::Empty => {}
            ExCommand::Write => self.write()?,
            ExCommand::WriteAll => {
                self.host.save_all(&self.buffer.contents())?;
                self.buffer.mark_saved();
            }
            ExCommand::Quit { force, all } => {
                if self.buffer.is_modified() && !force {
                    return Err(EditorError::UnsavedChanges);
                }
                self.close(all);
            }
            ExCommand::WriteQuit => {
                self.write()?;
                self.close(false);
            }
            ExCommand::Exit => {
                if self.buffer.is_modified() {
                    self.write()?;
                }
                self.close(false);
            }
            ExCommand::GotoLine(n) => {
                let line = n.saturating_sub(1).min(self.buffer.line_count() - 1);
                let col = motion::first_non_blank(&self.buffer, line);
                self.cursor.set_position(Position::new(line, col), &self.buffer, false);
            }
            ExCommand::Registers => {
                let listing: Vec<String> = self
                    .registers
                    .list()
                    .into_iter()
                    .map(|(name, text)| format!("\"{name} {text}"))
                    .collect();
                self.set_message(listing.join("  "));
            }
            ExCommand::Set(args) => {
                if let Some(shown) = self.options.apply_set(&args)? {
                    self.set_message(shown);
                }
            }
            ExCommand::Unknown(input) => return Err(EditorError::UnknownCommand(input)),
        }
        Ok(())
    }

    fn write(&mut self) -> Result<(), EditorError> {
        self.host.save(&self.buffer.contents())?;
        self.buffer.mark_saved();
        self.set_message(format!("{}L written", self.buffer.line_count()));
        Ok(())
    }

    fn close(&mut self, all: bool) {
        self.host.close(all);
        self.quit = true;
    }

    // -- Editing primitives -------------------------------------------------

    /// Replace `range` with `text` as part of the open undo step.
    fn edit(&mut self, range: Range, text: &str) -> String {
        let at = self.buffer.idx_to_pos(self.buffer.char_idx(range.start));
        let removed = self.buffer.set_range(range, text);
        self.history.record(at, &removed, text);
        removed
    }

    // -- Status -------------------------------------------------------------

    fn report(&mut self, error: &EditorError) {
        warn!(error = %error, "command failed");
        self.status = Some(Status {
            text: error.to_string(),
            is_error: true,
        });
    }

    fn set_message(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            is_error: false,
        });
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("mode", &self.mode)
            .field("cursor", &self.cursor)
            .field("lines", &self.buffer.line_count())
            .field("recorded", &self.recorded)
            .finish_non_exhaustive()
    }
}
