// SPDX-License-Identifier: MIT
//
// Angle-bracket key notation.
//
// Key scripts, macro register dumps and test fixtures all spell keys the
// way Vim's `:map` does:
//
//   ihello<Esc>         plain characters plus a named key
//   d<C-v>2j            Ctrl + character
//   <S-Tab> <F5> <lt>   shifted named key, function key, literal `<`
//
// Parsing rules:
//
// - `<...>` whose body has the shape `[mod-]*name` is one key. Modifier
//   letters are `C` (Ctrl), `A`/`M` (Alt), `S` (Shift), `D` (Super).
// - A well-shaped body naming no known key is an error, so typos such as
//   `<Ecs>` are caught instead of being typed into the buffer.
// - Any other `<` (no closing `>`, spaces inside, a lone `<x>`) is a
//   literal `<` key.
//
// `normalize` rewrites loose spellings (`ctrl+w`, `c-z`, `<esc>`) into the
// canonical form accepted by `parse_keys`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::key::{Key, KeyCode, Modifiers};

// ─── Errors ─────────────────────────────────────────────────────────────────

/// Failure to parse a key-notation string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    /// `<name>` is well-formed but names no key.
    #[error("unknown key name: <{0}>")]
    UnknownKey(String),
    /// A modifier letter other than `C`, `A`, `M`, `S` or `D`.
    #[error("unknown modifier '{modifier}' in <{spec}>")]
    UnknownModifier { modifier: char, spec: String },
    /// `<F0>`, `<F99>` and friends.
    #[error("function key out of range: <{0}>")]
    FunctionKeyRange(String),
}

// ─── Tables ─────────────────────────────────────────────────────────────────

/// Named keys, canonical spelling first for each code.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("Esc", KeyCode::Escape),
    ("Escape", KeyCode::Escape),
    ("CR", KeyCode::Enter),
    ("Enter", KeyCode::Enter),
    ("Return", KeyCode::Enter),
    ("NL", KeyCode::Enter),
    ("Tab", KeyCode::Tab),
    ("BS", KeyCode::Backspace),
    ("Backspace", KeyCode::Backspace),
    ("Del", KeyCode::Delete),
    ("Delete", KeyCode::Delete),
    ("Insert", KeyCode::Insert),
    ("Ins", KeyCode::Insert),
    ("Up", KeyCode::Up),
    ("Down", KeyCode::Down),
    ("Left", KeyCode::Left),
    ("Right", KeyCode::Right),
    ("Home", KeyCode::Home),
    ("End", KeyCode::End),
    ("PageUp", KeyCode::PageUp),
    ("PageDown", KeyCode::PageDown),
    ("Space", KeyCode::Char(' ')),
    ("lt", KeyCode::Char('<')),
    ("Bar", KeyCode::Char('|')),
    ("Bslash", KeyCode::Char('\\')),
];

/// `[mod-]*name` where name is a word or one non-space character.
static KEY_SPEC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<mods>(?:[A-Za-z]-)*)(?P<name>[A-Za-z][A-Za-z0-9]*|[^\s<>])$")
        .unwrap_or_else(|e| unreachable!("key spec pattern: {e}"))
});

/// A loose modifier prefix: `ctrl+`, `Control-`, `c-`, `alt+`, `M-`, ...
static LOOSE_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(ctrl|control|alt|meta|shift|super|cmd|[cmasd])[+-]")
        .unwrap_or_else(|e| unreachable!("modifier pattern: {e}"))
});

static FUNCTION_KEY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^f([0-9]{1,2})$").unwrap_or_else(|e| unreachable!("function key pattern: {e}"))
});

fn modifier_for_letter(letter: char) -> Option<Modifiers> {
    match letter.to_ascii_uppercase() {
        'C' => Some(Modifiers::CTRL),
        'A' | 'M' => Some(Modifiers::ALT),
        'S' => Some(Modifiers::SHIFT),
        'D' => Some(Modifiers::SUPER),
        _ => None,
    }
}

fn lookup_name(name: &str) -> Option<KeyCode> {
    NAMED_KEYS
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|&(_, code)| code)
}

fn canonical_name(code: KeyCode) -> Option<&'static str> {
    NAMED_KEYS.iter().find(|(_, c)| *c == code).map(|&(n, _)| n)
}

fn function_key(name: &str) -> Option<Result<KeyCode, NotationError>> {
    let caps = FUNCTION_KEY.captures(name)?;
    let n: u8 = caps[1].parse().ok()?;
    Some(if (1..=35).contains(&n) {
        Ok(KeyCode::F(n))
    } else {
        Err(NotationError::FunctionKeyRange(name.to_string()))
    })
}

// ─── Parsing ────────────────────────────────────────────────────────────────

/// Parse a notation string into keys.
///
/// # Errors
///
/// Returns [`NotationError`] when a `<...>` group is well-shaped but names
/// no known key or modifier.
pub fn parse_keys(input: &str) -> Result<Vec<Key>, NotationError> {
    let mut keys = Vec::with_capacity(input.len());
    let mut rest = input;

    while let Some(ch) = rest.chars().next() {
        if ch == '<' {
            if let Some((key, consumed)) = parse_bracketed(rest)? {
                keys.push(key);
                rest = &rest[consumed..];
                continue;
            }
        }
        keys.push(Key::char(ch));
        rest = &rest[ch.len_utf8()..];
    }

    Ok(keys)
}

/// Try to read one `<...>` key at the start of `input`.
///
/// `Ok(None)` means the `<` is literal.
fn parse_bracketed(input: &str) -> Result<Option<(Key, usize)>, NotationError> {
    let Some(close) = input[1..].find('>') else {
        return Ok(None);
    };
    let body = &input[1..=close];
    let Some(caps) = KEY_SPEC.captures(body) else {
        return Ok(None);
    };
    let mods_text = &caps["mods"];
    let name = &caps["name"];

    let mut modifiers = Modifiers::empty();
    for letter in mods_text.chars().filter(|&c| c != '-') {
        let m = modifier_for_letter(letter).ok_or_else(|| NotationError::UnknownModifier {
            modifier: letter,
            spec: body.to_string(),
        })?;
        modifiers |= m;
    }

    let mut name_chars = name.chars();
    let code = match (name_chars.next(), name_chars.next()) {
        // `<x>` with no modifier is just the three characters.
        (Some(_), None) if modifiers.is_empty() => return Ok(None),
        (Some(ch), None) => KeyCode::Char(ch),
        _ => match lookup_name(name) {
            Some(code) => code,
            None => match function_key(name) {
                Some(result) => result?,
                None => return Err(NotationError::UnknownKey(body.to_string())),
            },
        },
    };

    Ok(Some((fold(code, modifiers), close + 2)))
}

/// Canonicalize character keys: `<S-a>` is `A`, `<C-W>` is `<C-w>`.
fn fold(code: KeyCode, mut modifiers: Modifiers) -> Key {
    let KeyCode::Char(mut ch) = code else {
        return Key::new(code, modifiers);
    };
    if modifiers.contains(Modifiers::SHIFT) && ch.is_alphabetic() {
        ch = ch.to_uppercase().next().unwrap_or(ch);
        modifiers.remove(Modifiers::SHIFT);
    }
    if modifiers.contains(Modifiers::CTRL) {
        ch = ch.to_ascii_lowercase();
    }
    Key::new(KeyCode::Char(ch), modifiers)
}

// ─── Formatting ─────────────────────────────────────────────────────────────

pub(crate) fn write_key(f: &mut fmt::Formatter<'_>, key: Key) -> fmt::Result {
    let Key { code, modifiers } = key;

    if modifiers.is_empty() {
        match code {
            KeyCode::Char('<') => return f.write_str("<lt>"),
            KeyCode::Char(ch) => return write!(f, "{ch}"),
            _ => {}
        }
    }

    f.write_str("<")?;
    for (flag, letter) in [
        (Modifiers::CTRL, "C-"),
        (Modifiers::ALT, "A-"),
        (Modifiers::SHIFT, "S-"),
        (Modifiers::SUPER, "D-"),
    ] {
        if modifiers.contains(flag) {
            f.write_str(letter)?;
        }
    }
    match code {
        KeyCode::F(n) => write!(f, "F{n}")?,
        KeyCode::Char(ch) => match canonical_name(code) {
            Some(name) if ch == ' ' || ch == '<' => f.write_str(name)?,
            _ => write!(f, "{ch}")?,
        },
        _ => f.write_str(canonical_name(code).unwrap_or("?"))?,
    }
    f.write_str(">")
}

/// Render keys back into notation. `parse_keys(&format_keys(k)) == k`.
#[must_use]
pub fn format_keys(keys: &[Key]) -> String {
    keys.iter().map(ToString::to_string).collect()
}

// ─── Raw text form ──────────────────────────────────────────────────────────

/// The text a key sequence would leave in a register, Vim style: control
/// characters for `<CR>`, `<Tab>`, `<Esc>`, `<BS>` and `<C-a>`..`<C-z>`.
/// Keys with no single-character form are written in notation.
#[must_use]
pub fn keys_to_text(keys: &[Key]) -> String {
    let mut out = String::with_capacity(keys.len());
    for &key in keys {
        match (key.code, key.modifiers) {
            (KeyCode::Char(ch), m) if m.is_empty() => out.push(ch),
            (KeyCode::Char(ch), m) if m == Modifiers::CTRL && ch.is_ascii_lowercase() => {
                out.push(char::from(ch as u8 - b'a' + 1));
            }
            (KeyCode::Enter, m) if m.is_empty() => out.push('\r'),
            (KeyCode::Tab, m) if m.is_empty() => out.push('\t'),
            (KeyCode::Escape, m) if m.is_empty() => out.push('\x1b'),
            (KeyCode::Backspace, m) if m.is_empty() => out.push('\x08'),
            _ => out.push_str(&key.to_string()),
        }
    }
    out
}

/// Inverse of [`keys_to_text`] for raw text: every character is one key,
/// control characters map back to their named or `Ctrl` keys.
#[must_use]
pub fn text_to_keys(text: &str) -> Vec<Key> {
    text.chars()
        .map(|ch| match ch {
            '\r' | '\n' => Key::ENTER,
            '\t' => Key::plain(KeyCode::Tab),
            '\x1b' => Key::ESC,
            '\x08' => Key::plain(KeyCode::Backspace),
            '\x01'..='\x1a' => Key::ctrl(char::from(ch as u8 - 1 + b'a')),
            _ => Key::char(ch),
        })
        .collect()
}

// ─── Normalization ──────────────────────────────────────────────────────────

/// Rewrite one loosely written key into canonical notation.
///
/// ```
/// use vk_input::notation::normalize;
/// assert_eq!(normalize("<cTrL+w>"), "<C-w>");
/// assert_eq!(normalize("c-z"), "<C-z>");
/// assert_eq!(normalize("<esc>"), "<Esc>");
/// ```
#[must_use]
pub fn normalize(spec: &str) -> String {
    let mut rest = spec
        .strip_prefix('<')
        .and_then(|s| s.strip_suffix('>'))
        .unwrap_or(spec);

    let mut mods = String::new();
    while let Some(m) = LOOSE_MODIFIER.captures(rest) {
        let whole = m.get(0).map_or(0, |g| g.end());
        if whole >= rest.len() {
            break;
        }
        let word = m[1].to_ascii_lowercase();
        let letter = match word.as_str() {
            "ctrl" | "control" | "c" => 'C',
            "alt" | "meta" | "a" | "m" => 'A',
            "shift" | "s" => 'S',
            _ => 'D',
        };
        mods.push(letter);
        mods.push('-');
        rest = &rest[whole..];
    }

    let name = if rest.chars().count() == 1 {
        rest.to_string()
    } else if let Some(code) = lookup_name(rest) {
        canonical_name(code).unwrap_or(rest).to_string()
    } else if let Some(Ok(KeyCode::F(n))) = function_key(rest) {
        format!("F{n}")
    } else {
        rest.to_string()
    };

    if mods.is_empty() && name.chars().count() == 1 {
        name
    } else {
        format!("<{mods}{name}>")
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn keys(s: &str) -> Vec<Key> {
        parse_keys(s).unwrap()
    }

    // -- Parsing ----------------------------------------------------------

    #[test]
    fn plain_characters() {
        assert_eq!(keys("dw"), vec![Key::char('d'), Key::char('w')]);
    }

    #[test]
    fn named_keys_case_insensitive() {
        assert_eq!(keys("<Esc>"), vec![Key::ESC]);
        assert_eq!(keys("<esc>"), vec![Key::ESC]);
        assert_eq!(keys("<cr><Enter>"), vec![Key::ENTER, Key::ENTER]);
        assert_eq!(keys("<BS>"), vec![Key::plain(KeyCode::Backspace)]);
        assert_eq!(keys("<Space>"), vec![Key::char(' ')]);
    }

    #[test]
    fn ctrl_and_shift() {
        assert_eq!(keys("<C-w>"), vec![Key::ctrl('w')]);
        assert_eq!(keys("<C-V>"), vec![Key::ctrl('v')]);
        assert_eq!(keys("<S-a>"), vec![Key::char('A')]);
        assert_eq!(
            keys("<S-Tab>"),
            vec![Key::new(KeyCode::Tab, Modifiers::SHIFT)]
        );
        assert_eq!(keys("<C-[>"), vec![Key::ctrl('[')]);
    }

    #[test]
    fn function_keys() {
        assert_eq!(keys("<F1><f12>"), vec![Key::plain(KeyCode::F(1)), Key::plain(KeyCode::F(12))]);
        assert_eq!(
            parse_keys("<F99>"),
            Err(NotationError::FunctionKeyRange("F99".to_string()))
        );
    }

    #[test]
    fn literal_angle_brackets() {
        assert_eq!(keys("<lt>"), vec![Key::char('<')]);
        assert_eq!(keys("a<b"), vec![Key::char('a'), Key::char('<'), Key::char('b')]);
        assert_eq!(keys("<x>").len(), 3);
        assert_eq!(keys("< b >").len(), 5);
    }

    #[test]
    fn unknown_names_are_errors() {
        assert_eq!(
            parse_keys("i<Ecs>"),
            Err(NotationError::UnknownKey("Ecs".to_string()))
        );
        assert!(matches!(
            parse_keys("<X-a>"),
            Err(NotationError::UnknownModifier { modifier: 'X', .. })
        ));
    }

    // -- Formatting -------------------------------------------------------

    #[test]
    fn format_round_trips() {
        let src = "ihi<Esc>\"a3dw<C-r><lt><S-Tab><Space>";
        let parsed = keys(src);
        assert_eq!(keys(&format_keys(&parsed)), parsed);
    }

    #[test]
    fn modified_space_uses_name() {
        let k = Key::new(KeyCode::Char(' '), Modifiers::CTRL);
        assert_eq!(k.to_string(), "<C-Space>");
    }

    // -- Raw text ---------------------------------------------------------

    #[test]
    fn raw_text_control_characters() {
        let ks = keys("ihi<Esc><C-a>j<CR>");
        let text = keys_to_text(&ks);
        assert_eq!(text, "ihi\x1b\x01j\r");
        assert_eq!(text_to_keys(&text), ks);
    }

    #[test]
    fn raw_text_newline_is_enter() {
        assert_eq!(text_to_keys("x\n"), vec![Key::char('x'), Key::ENTER]);
    }

    // -- Normalization ----------------------------------------------------

    #[test]
    fn normalize_loose_ctrl_spellings() {
        assert_eq!(normalize("<cTrL+w>"), "<C-w>");
        assert_eq!(normalize("cTrL+x"), "<C-x>");
        assert_eq!(normalize("CtRl+y"), "<C-y>");
        assert_eq!(normalize("c-z"), "<C-z>");
    }

    #[test]
    fn normalize_names() {
        assert_eq!(normalize("<esc>"), "<Esc>");
        assert_eq!(normalize("return"), "<CR>");
        assert_eq!(normalize("alt+F4"), "<A-F4>");
        assert_eq!(normalize("x"), "x");
        assert_eq!(normalize("c"), "c");
    }
}
