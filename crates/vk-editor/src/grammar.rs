//! Grammar resolver — one key at a time, from recorded state to outcome.
//!
//! [`consume`] is a pure function: it takes the command typed so far and the
//! next key, and answers with exactly one of
//!
//! - [`Outcome::Incomplete`] — a valid prefix, keep the new state and wait;
//! - [`Outcome::Resolved`] — a whole command, dispatch its [`Action`];
//! - [`Outcome::Invalid`] — no command starts this way, start over.
//!
//! After `Resolved` or `Invalid` the caller starts from a fresh
//! [`RecordedState`]. Nothing here touches the buffer.
//!
//! Precedence at each key:
//!
//! 1. a cancel key (`<Esc>`, `<C-c>`) rejects whatever was typed;
//! 2. a key owed to a pending prefix (`"` `i`/`a` `f` `r` `g` `q` `@`) is
//!    taken by that prefix;
//! 3. digits build the count (a leading `0` is the `0` motion); a count
//!    before and after an operator multiply;
//! 4. `"` starts a register name;
//! 5. with an operator pending: the doubled operator, `i`/`a`, or a motion;
//! 6. otherwise a motion, an operator, a shorthand (`x D C s S Y`), or a
//!    command, looked up in the key tables below.

use vk_input::{Key, KeyCode};

use crate::action::{Action, Command, InsertEntry, Operator, Target, VisualOp};
use crate::mode::{Mode, VisualKind};
use crate::motion::{Find, FindKind, Motion};
use crate::recorded::{Pending, RecordedState};
use crate::register;
use crate::search::SearchDirection;
use crate::text_object::TextObject;
use crate::word::WordKind;

// ---------------------------------------------------------------------------
// Key tables
// ---------------------------------------------------------------------------

const MOTIONS: &[(char, Motion)] = &[
    ('h', Motion::Left),
    ('l', Motion::Right),
    (' ', Motion::Right),
    ('j', Motion::Down),
    ('k', Motion::Up),
    ('0', Motion::LineStart),
    ('^', Motion::FirstNonBlank),
    ('$', Motion::LineEnd),
    ('|', Motion::Column),
    ('+', Motion::NextLine),
    ('-', Motion::PrevLine),
    ('w', Motion::WordForward(WordKind::Small)),
    ('W', Motion::WordForward(WordKind::Big)),
    ('b', Motion::WordBackward(WordKind::Small)),
    ('B', Motion::WordBackward(WordKind::Big)),
    ('e', Motion::WordEnd(WordKind::Small)),
    ('E', Motion::WordEnd(WordKind::Big)),
    ('G', Motion::FileEnd),
    ('}', Motion::ParagraphForward),
    ('{', Motion::ParagraphBackward),
    ('%', Motion::MatchingBracket),
    (';', Motion::RepeatFind),
    (',', Motion::RepeatFindReverse),
    ('n', Motion::SearchNext),
    ('N', Motion::SearchPrev),
];

const NAMED_MOTIONS: &[(KeyCode, Motion)] = &[
    (KeyCode::Left, Motion::Left),
    (KeyCode::Backspace, Motion::Left),
    (KeyCode::Right, Motion::Right),
    (KeyCode::Up, Motion::Up),
    (KeyCode::Down, Motion::Down),
    (KeyCode::Home, Motion::LineStart),
    (KeyCode::End, Motion::LineEnd),
    (KeyCode::Enter, Motion::NextLine),
];

const G_MOTIONS: &[(char, Motion)] = &[
    ('g', Motion::FileStart),
    ('e', Motion::WordEndBackward(WordKind::Small)),
    ('E', Motion::WordEndBackward(WordKind::Big)),
];

const OPERATORS: &[(char, Operator)] = &[
    ('d', Operator::Delete),
    ('c', Operator::Change),
    ('y', Operator::Yank),
    ('>', Operator::Indent),
    ('<', Operator::Outdent),
];

const G_OPERATORS: &[(char, Operator)] = &[
    ('~', Operator::ToggleCase),
    ('u', Operator::Lowercase),
    ('U', Operator::Uppercase),
];

/// Normal-mode keys that stand for an operator plus a fixed target.
const SHORTHANDS: &[(char, Operator, Target)] = &[
    ('x', Operator::Delete, Target::Motion(Motion::Right)),
    ('X', Operator::Delete, Target::Motion(Motion::Left)),
    ('D', Operator::Delete, Target::Motion(Motion::LineEnd)),
    ('C', Operator::Change, Target::Motion(Motion::LineEnd)),
    ('s', Operator::Change, Target::Motion(Motion::Right)),
    ('S', Operator::Change, Target::Line),
    ('Y', Operator::Yank, Target::Line),
];

const COMMANDS: &[(char, Command)] = &[
    ('i', Command::Insert(InsertEntry::Before)),
    ('a', Command::Insert(InsertEntry::After)),
    ('I', Command::Insert(InsertEntry::LineStart)),
    ('A', Command::Insert(InsertEntry::LineEnd)),
    ('o', Command::Insert(InsertEntry::OpenBelow)),
    ('O', Command::Insert(InsertEntry::OpenAbove)),
    ('p', Command::Put { before: false }),
    ('P', Command::Put { before: true }),
    ('J', Command::Join),
    ('~', Command::ToggleCaseChar),
    ('u', Command::Undo),
    ('.', Command::Repeat),
    ('v', Command::EnterVisual(VisualKind::Char)),
    ('V', Command::EnterVisual(VisualKind::Line)),
    ('R', Command::EnterReplace),
    (':', Command::CommandLine),
    ('/', Command::Search(SearchDirection::Forward)),
    ('?', Command::Search(SearchDirection::Backward)),
];

const CTRL_COMMANDS: &[(char, Command)] = &[
    ('r', Command::Redo),
    ('v', Command::EnterVisual(VisualKind::Block)),
];

const VISUAL_OPS: &[(char, VisualOp)] = &[
    ('d', VisualOp::Operate { op: Operator::Delete, linewise: false }),
    ('x', VisualOp::Operate { op: Operator::Delete, linewise: false }),
    ('X', VisualOp::Operate { op: Operator::Delete, linewise: true }),
    ('D', VisualOp::Operate { op: Operator::Delete, linewise: true }),
    ('c', VisualOp::Operate { op: Operator::Change, linewise: false }),
    ('s', VisualOp::Operate { op: Operator::Change, linewise: false }),
    ('C', VisualOp::Operate { op: Operator::Change, linewise: true }),
    ('S', VisualOp::Operate { op: Operator::Change, linewise: true }),
    ('R', VisualOp::Operate { op: Operator::Change, linewise: true }),
    ('y', VisualOp::Operate { op: Operator::Yank, linewise: false }),
    ('Y', VisualOp::Operate { op: Operator::Yank, linewise: true }),
    ('>', VisualOp::Operate { op: Operator::Indent, linewise: true }),
    ('<', VisualOp::Operate { op: Operator::Outdent, linewise: true }),
    ('~', VisualOp::Operate { op: Operator::ToggleCase, linewise: false }),
    ('u', VisualOp::Operate { op: Operator::Lowercase, linewise: false }),
    ('U', VisualOp::Operate { op: Operator::Uppercase, linewise: false }),
    ('J', VisualOp::Join),
    ('p', VisualOp::Put),
    ('P', VisualOp::Put),
    ('o', VisualOp::SwapAnchor),
    ('O', VisualOp::SwapAnchor),
];

const VISUAL_COMMANDS: &[(char, Command)] = &[
    ('v', Command::EnterVisual(VisualKind::Char)),
    ('V', Command::EnterVisual(VisualKind::Line)),
    (':', Command::CommandLine),
];

fn lookup<T: Copy>(table: &[(char, T)], ch: char) -> Option<T> {
    table.iter().find(|(k, _)| *k == ch).map(|(_, v)| *v)
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// What the resolver needs to know about the editor besides the keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    pub mode: Mode,
    /// A macro is being recorded, so `q` stops instead of starting.
    pub recording: bool,
}

/// A complete command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub action: Action,
    /// The `"x` register, if one was given.
    pub register: Option<char>,
    /// Every key consumed.
    pub keys: Vec<Key>,
    /// Keys without counts or register prefix, for dot-repeat.
    pub replay_keys: Vec<Key>,
    pub mutating: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A cancel key; silent.
    Cancelled,
    /// The key continues no command; silent.
    NoMatch(Key),
    /// `"`, `q` or `@` followed by a name that is not a register; shown
    /// to the user.
    InvalidRegister(char),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Incomplete(RecordedState),
    Resolved(Resolved),
    Invalid(Rejection),
}

fn resolve(st: RecordedState, action: Action) -> Outcome {
    Outcome::Resolved(Resolved {
        mutating: action.is_mutating(),
        action,
        register: st.register,
        keys: st.keys,
        replay_keys: st.replay_keys,
    })
}

const fn no_match(key: Key) -> Outcome {
    Outcome::Invalid(Rejection::NoMatch(key))
}

// ---------------------------------------------------------------------------
// consume
// ---------------------------------------------------------------------------

/// Feed one key to the command under construction.
#[must_use]
pub fn consume(mut st: RecordedState, key: Key, cx: &Context) -> Outcome {
    st.keys.push(key);
    if key.is_cancel() {
        return Outcome::Invalid(Rejection::Cancelled);
    }

    match st.pending {
        Pending::None => {}
        Pending::RegisterName => return register_name(st, key),
        Pending::MacroRegister => return macro_register(st, key, false),
        Pending::PlayRegister => return macro_register(st, key, true),
        pending => {
            st.replay_keys.push(key);
            st.pending = Pending::None;
            return match pending {
                Pending::Object { inner } => object(st, key, inner),
                Pending::FindChar(kind) => find_char(st, key, kind),
                Pending::ReplaceChar => replace_char(st, key, cx),
                _ => g_prefix(st, key, cx),
            };
        }
    }

    if let Some(d) = key.digit() {
        if d != 0 || st.active_count().is_some() {
            st.push_digit(d);
            return Outcome::Incomplete(st);
        }
    }

    let Some(ch) = key.as_char() else {
        st.replay_keys.push(key);
        return named_key(st, key, cx);
    };

    if ch == '"' && st.operator.is_none() {
        st.pending = Pending::RegisterName;
        return Outcome::Incomplete(st);
    }

    st.replay_keys.push(key);
    match st.operator {
        Some(op) => after_operator(st, key, ch, op),
        None if cx.mode.is_visual() => visual_key(st, key, ch, cx),
        None => normal_key(st, key, ch, cx),
    }
}

fn finish_motion(st: RecordedState, motion: Motion) -> Outcome {
    match st.operator {
        Some(op) => {
            let count = st.total_count();
            resolve(st, Action::Operate { op, target: Target::Motion(motion), count })
        }
        None => {
            let count = st.count;
            resolve(st, Action::Move { motion, count })
        }
    }
}

fn command(st: RecordedState, command: Command) -> Outcome {
    let count = st.count;
    resolve(st, Action::Command { command, count })
}

fn choose_operator(mut st: RecordedState, op: Operator) -> Outcome {
    st.operator = Some(op);
    st.mutating = op.is_mutating();
    Outcome::Incomplete(st)
}

fn with_pending(mut st: RecordedState, pending: Pending) -> Outcome {
    st.pending = pending;
    Outcome::Incomplete(st)
}

// -- Main dispatch ------------------------------------------------------------

fn after_operator(st: RecordedState, key: Key, ch: char, op: Operator) -> Outcome {
    if ch == op.doubling_key() {
        let count = st.total_count();
        return resolve(st, Action::Operate { op, target: Target::Line, count });
    }
    match ch {
        'i' | 'a' => with_pending(st, Pending::Object { inner: ch == 'i' }),
        'g' => with_pending(st, Pending::G),
        _ => {
            if let Some(kind) = FindKind::from_key(ch) {
                return with_pending(st, Pending::FindChar(kind));
            }
            lookup(MOTIONS, ch).map_or_else(|| no_match(key), |m| finish_motion(st, m))
        }
    }
}

/// Keys shared by Normal and Visual mode: motions and the one-key prefixes.
fn common_key(st: RecordedState, ch: char, cx: &Context) -> Result<Outcome, RecordedState> {
    if let Some(m) = lookup(MOTIONS, ch) {
        return Ok(finish_motion(st, m));
    }
    if let Some(kind) = FindKind::from_key(ch) {
        return Ok(with_pending(st, Pending::FindChar(kind)));
    }
    match ch {
        'g' => Ok(with_pending(st, Pending::G)),
        'r' => {
            let mut st = st;
            st.mutating = true;
            Ok(with_pending(st, Pending::ReplaceChar))
        }
        'q' if cx.recording => Ok(command(st, Command::StopRecording)),
        'q' => Ok(with_pending(st, Pending::MacroRegister)),
        '@' => Ok(with_pending(st, Pending::PlayRegister)),
        _ => Err(st),
    }
}

fn normal_key(st: RecordedState, key: Key, ch: char, cx: &Context) -> Outcome {
    let st = match common_key(st, ch, cx) {
        Ok(outcome) => return outcome,
        Err(st) => st,
    };
    if let Some(op) = lookup(OPERATORS, ch) {
        return choose_operator(st, op);
    }
    if let Some((_, op, target)) = SHORTHANDS.iter().find(|(k, _, _)| *k == ch) {
        let count = st.count;
        return resolve(st, Action::Operate { op: *op, target: *target, count });
    }
    lookup(COMMANDS, ch).map_or_else(|| no_match(key), |c| command(st, c))
}

fn visual_key(st: RecordedState, key: Key, ch: char, cx: &Context) -> Outcome {
    let st = match common_key(st, ch, cx) {
        Ok(outcome) => return outcome,
        Err(st) => st,
    };
    if ch == 'i' || ch == 'a' {
        return with_pending(st, Pending::Object { inner: ch == 'i' });
    }
    if let Some(op) = lookup(VISUAL_OPS, ch) {
        let count = st.count;
        return resolve(st, Action::Visual { op, count });
    }
    lookup(VISUAL_COMMANDS, ch).map_or_else(|| no_match(key), |c| command(st, c))
}

fn named_key(st: RecordedState, key: Key, cx: &Context) -> Outcome {
    if let Some(m) = NAMED_MOTIONS
        .iter()
        .find(|(code, _)| *code == key.code && key.modifiers.is_empty())
        .map(|(_, m)| *m)
    {
        return finish_motion(st, m);
    }
    if st.operator.is_some() {
        return no_match(key);
    }
    if key.code == KeyCode::Delete && key.modifiers.is_empty() {
        return if cx.mode.is_visual() {
            let count = st.count;
            resolve(st, Action::Visual {
                op: VisualOp::Operate { op: Operator::Delete, linewise: false },
                count,
            })
        } else {
            let count = st.count;
            resolve(st, Action::Operate {
                op: Operator::Delete,
                target: Target::Motion(Motion::Right),
                count,
            })
        };
    }
    let ctrl = CTRL_COMMANDS.iter().find(|(c, _)| key.is_ctrl(*c)).map(|(_, cmd)| *cmd);
    ctrl.map_or_else(|| no_match(key), |cmd| command(st, cmd))
}

// -- Pending prefixes -----------------------------------------------------------

fn register_name(mut st: RecordedState, key: Key) -> Outcome {
    match key.as_char() {
        Some(c) if register::is_valid_name(c) => {
            st.register = Some(c);
            st.pending = Pending::None;
            Outcome::Incomplete(st)
        }
        Some(c) => Outcome::Invalid(Rejection::InvalidRegister(c)),
        None => no_match(key),
    }
}

fn macro_register(st: RecordedState, key: Key, play: bool) -> Outcome {
    let Some(c) = key.as_char() else {
        return no_match(key);
    };
    if play && c == '@' {
        return command(st, Command::PlayMacro(None));
    }
    let valid = register::is_valid_macro_name(c) || (play && register::is_clipboard_name(c));
    if !valid {
        return Outcome::Invalid(Rejection::InvalidRegister(c));
    }
    command(st, if play { Command::PlayMacro(Some(c)) } else { Command::RecordMacro(c) })
}

fn object(st: RecordedState, key: Key, inner: bool) -> Outcome {
    let Some(object) = key.as_char().and_then(|c| TextObject::from_key(c, inner)) else {
        return no_match(key);
    };
    match st.operator {
        Some(op) => {
            let count = st.total_count();
            resolve(st, Action::Operate { op, target: Target::Object(object), count })
        }
        None => {
            let count = st.count;
            resolve(st, Action::SelectObject { object, count })
        }
    }
}

/// The literal char a key stands for after `f` or `r`.
const fn literal(key: Key) -> Option<char> {
    match key.code {
        KeyCode::Tab if key.modifiers.is_empty() => Some('\t'),
        _ => key.as_char(),
    }
}

fn find_char(st: RecordedState, key: Key, kind: FindKind) -> Outcome {
    match literal(key) {
        Some(ch) => finish_motion(st, Motion::Find(Find { kind, ch })),
        None => no_match(key),
    }
}

fn replace_char(st: RecordedState, key: Key, cx: &Context) -> Outcome {
    let ch = match key.code {
        KeyCode::Enter if key.modifiers.is_empty() => Some('\n'),
        _ => literal(key),
    };
    let Some(ch) = ch else {
        return no_match(key);
    };
    if cx.mode.is_visual() {
        let count = st.count;
        resolve(st, Action::Visual { op: VisualOp::ReplaceChar(ch), count })
    } else {
        command(st, Command::ReplaceChar(ch))
    }
}

fn g_prefix(st: RecordedState, key: Key, cx: &Context) -> Outcome {
    let Some(ch) = key.as_char() else {
        return no_match(key);
    };
    if let Some(m) = lookup(G_MOTIONS, ch) {
        return finish_motion(st, m);
    }
    let Some(op) = lookup(G_OPERATORS, ch) else {
        return no_match(key);
    };
    match st.operator {
        // `g~g~`, `gugu`, `gUgU`
        Some(current) if current == op => {
            let count = st.total_count();
            resolve(st, Action::Operate { op, target: Target::Line, count })
        }
        Some(_) => no_match(key),
        None if cx.mode.is_visual() => {
            let count = st.count;
            resolve(st, Action::Visual { op: VisualOp::Operate { op, linewise: false }, count })
        }
        None => choose_operator(st, op),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text_object::ObjectKind;
    use pretty_assertions::assert_eq;
    use vk_input::parse_keys;

    const NORMAL: Context = Context { mode: Mode::Normal, recording: false };
    const VISUAL: Context = Context { mode: Mode::Visual(VisualKind::Char), recording: false };

    fn run(keys: &str, cx: &Context) -> Outcome {
        let keys = parse_keys(keys).unwrap();
        let (last, init) = keys.split_last().unwrap();
        let mut st = RecordedState::new();
        for key in init {
            match consume(st, *key, cx) {
                Outcome::Incomplete(next) => st = next,
                other => panic!("resolved early at {key}: {other:?}"),
            }
        }
        consume(st, *last, cx)
    }

    fn resolved(keys: &str, cx: &Context) -> Resolved {
        match run(keys, cx) {
            Outcome::Resolved(r) => r,
            other => panic!("{keys}: expected a command, got {other:?}"),
        }
    }

    fn action(keys: &str) -> Action {
        resolved(keys, &NORMAL).action
    }

    fn operate(op: Operator, target: Target, count: Option<usize>) -> Action {
        Action::Operate { op, target, count }
    }

    const W: Motion = Motion::WordForward(WordKind::Small);

    // -- Counts -------------------------------------------------------------

    #[test]
    fn count_and_operator() {
        assert_eq!(action("3dw"), operate(Operator::Delete, Target::Motion(W), Some(3)));
    }

    #[test]
    fn counts_multiply_and_are_stripped_from_replay() {
        let r = resolved("2d3w", &NORMAL);
        assert_eq!(r.action, operate(Operator::Delete, Target::Motion(W), Some(6)));
        assert_eq!(r.replay_keys, parse_keys("dw").unwrap());
        assert_eq!(r.keys, parse_keys("2d3w").unwrap());
        assert!(r.mutating);
    }

    #[test]
    fn leading_zero_is_a_motion() {
        assert_eq!(action("0"), Action::Move { motion: Motion::LineStart, count: None });
        assert_eq!(action("10j"), Action::Move { motion: Motion::Down, count: Some(10) });
        assert_eq!(action("d0"), operate(Operator::Delete, Target::Motion(Motion::LineStart), None));
    }

    #[test]
    fn incomplete_prefixes() {
        for keys in ["2", "d", "\"", "\"a", "f", "g", "d2", "di", "q", "@", "r", "g~"] {
            assert!(matches!(run(keys, &NORMAL), Outcome::Incomplete(_)), "{keys}");
        }
    }

    // -- Operators ----------------------------------------------------------

    #[test]
    fn doubled_operators_are_linewise() {
        assert_eq!(action("dd"), operate(Operator::Delete, Target::Line, None));
        assert_eq!(action("3yy"), operate(Operator::Yank, Target::Line, Some(3)));
        assert_eq!(action(">>"), operate(Operator::Indent, Target::Line, None));
        assert_eq!(action("g~~"), operate(Operator::ToggleCase, Target::Line, None));
        assert_eq!(action("gUU"), operate(Operator::Uppercase, Target::Line, None));
        assert_eq!(action("gugu"), operate(Operator::Lowercase, Target::Line, None));
    }

    #[test]
    fn mixed_operators_are_invalid() {
        assert!(matches!(run("dc", &NORMAL), Outcome::Invalid(Rejection::NoMatch(_))));
        assert!(matches!(run("dz", &NORMAL), Outcome::Invalid(Rejection::NoMatch(_))));
    }

    #[test]
    fn text_objects_after_operator() {
        let Action::Operate { target: Target::Object(obj), .. } = action("ci\"") else {
            panic!("expected an object target");
        };
        assert_eq!(obj.kind, ObjectKind::Quote('"'));
        assert!(obj.inner);
        assert!(matches!(run("diz", &NORMAL), Outcome::Invalid(Rejection::NoMatch(_))));
    }

    #[test]
    fn find_and_g_motions_under_operator() {
        assert_eq!(
            action("dfx"),
            operate(Operator::Delete, Target::Motion(Motion::Find(Find { kind: FindKind::To, ch: 'x' })), None)
        );
        assert_eq!(action("dgg"), operate(Operator::Delete, Target::Motion(Motion::FileStart), None));
        assert_eq!(action("y<End>"), operate(Operator::Yank, Target::Motion(Motion::LineEnd), None));
    }

    #[test]
    fn shorthands_desugar() {
        assert_eq!(action("x"), operate(Operator::Delete, Target::Motion(Motion::Right), None));
        assert_eq!(action("3X"), operate(Operator::Delete, Target::Motion(Motion::Left), Some(3)));
        assert_eq!(action("S"), operate(Operator::Change, Target::Line, None));
        assert_eq!(action("<Del>"), operate(Operator::Delete, Target::Motion(Motion::Right), None));
    }

    // -- Registers ----------------------------------------------------------

    #[test]
    fn register_prefix() {
        let r = resolved("\"a2yy", &NORMAL);
        assert_eq!(r.register, Some('a'));
        assert_eq!(r.replay_keys, parse_keys("yy").unwrap());
        assert!(!r.mutating);
    }

    #[test]
    fn invalid_register_name() {
        assert_eq!(run("\"!", &NORMAL), Outcome::Invalid(Rejection::InvalidRegister('!')));
        assert_eq!(run("q.", &NORMAL), Outcome::Invalid(Rejection::InvalidRegister('.')));
    }

    // -- Cancel -------------------------------------------------------------

    #[test]
    fn cancel_rejects_anywhere() {
        for keys in ["<Esc>", "3<Esc>", "d<Esc>", "\"<Esc>", "2di<Esc>", "f<C-c>"] {
            assert_eq!(run(keys, &NORMAL), Outcome::Invalid(Rejection::Cancelled), "{keys}");
        }
    }

    // -- Commands -------------------------------------------------------------

    #[test]
    fn commands() {
        let cmd = |c, count| Action::Command { command: c, count };
        assert_eq!(action("3i"), cmd(Command::Insert(InsertEntry::Before), Some(3)));
        assert_eq!(action("ra"), cmd(Command::ReplaceChar('a'), None));
        assert_eq!(action("r<CR>"), cmd(Command::ReplaceChar('\n'), None));
        assert_eq!(action("<C-r>"), cmd(Command::Redo, None));
        assert_eq!(action("<C-v>"), cmd(Command::EnterVisual(VisualKind::Block), None));
        assert_eq!(action("4."), cmd(Command::Repeat, Some(4)));
        assert_eq!(action("qa"), cmd(Command::RecordMacro('a'), None));
        assert_eq!(action("@@"), cmd(Command::PlayMacro(None), None));
        assert_eq!(action("3@q"), cmd(Command::PlayMacro(Some('q')), Some(3)));
    }

    #[test]
    fn q_stops_while_recording() {
        let cx = Context { recording: true, ..NORMAL };
        assert_eq!(resolved("q", &cx).action, Action::Command { command: Command::StopRecording, count: None });
    }

    // -- Visual -------------------------------------------------------------

    #[test]
    fn visual_keys() {
        let v = |keys| resolved(keys, &VISUAL).action;
        assert_eq!(v("j"), Action::Move { motion: Motion::Down, count: None });
        assert_eq!(
            v("d"),
            Action::Visual { op: VisualOp::Operate { op: Operator::Delete, linewise: false }, count: None }
        );
        assert_eq!(
            v("u"),
            Action::Visual { op: VisualOp::Operate { op: Operator::Lowercase, linewise: false }, count: None }
        );
        assert_eq!(v("o"), Action::Visual { op: VisualOp::SwapAnchor, count: None });
        assert_eq!(v("rx"), Action::Visual { op: VisualOp::ReplaceChar('x'), count: None });
        assert_eq!(
            v("gU"),
            Action::Visual { op: VisualOp::Operate { op: Operator::Uppercase, linewise: false }, count: None }
        );
        let Action::SelectObject { object, count } = v("3aw") else {
            panic!("expected an object selection");
        };
        assert_eq!(object.kind, ObjectKind::Word(WordKind::Small));
        assert_eq!(count, Some(3));
    }
}
