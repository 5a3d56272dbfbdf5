//! Command line — the `:` and `/` prompts and the `:` command parser.
//!
//! Both prompts share one line editor, [`Prompt`]. `<CR>` submits the text,
//! `<Esc>` (or `<BS>` on an empty line) abandons it. A submitted `:` line is
//! parsed into an [`ExCommand`]; the editor executes it against the host.
//!
//! # Supported commands
//!
//! | Command                 | Action                                     |
//! |-------------------------|--------------------------------------------|
//! | `:w`, `:write`          | Save                                       |
//! | `:wa`, `:wall`          | Save all                                   |
//! | `:q`, `:quit`           | Close (E37 if the buffer is modified)      |
//! | `:qa`, `:qall`          | Close all (same check)                     |
//! | `:q!`, `:qa!`           | Close, discarding changes                  |
//! | `:wq`, `:writequit`     | Save and close                             |
//! | `:x`, `:exit`           | Save if modified, then close               |
//! | `:N`                    | Go to line N                               |
//! | `:reg`, `:registers`    | List registers in the status line          |
//! | `:set`, `:se`           | Set options                                |

use vk_input::{Key, KeyCode};

// ---------------------------------------------------------------------------
// ExCommand
// ---------------------------------------------------------------------------

/// A parsed `:` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExCommand {
    /// Nothing typed; does nothing.
    Empty,
    Write,
    WriteAll,
    Quit { force: bool, all: bool },
    WriteQuit,
    /// `:x` — save only if modified.
    Exit,
    /// `:N`, 1-indexed as typed.
    GotoLine(usize),
    Registers,
    /// `:set` with its argument text.
    Set(String),
    /// Contains the full input for error reporting.
    Unknown(String),
}

impl ExCommand {
    /// Parse a command line (without the leading `:`).
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return trimmed.parse().map_or_else(|_| Self::Unknown(trimmed.to_string()), Self::GotoLine);
        }

        let (word, arg) = trimmed
            .find(char::is_whitespace)
            .map_or((trimmed, ""), |pos| (&trimmed[..pos], trimmed[pos..].trim_start()));
        let (name, bang) = word.strip_suffix('!').map_or((word, false), |n| (n, true));

        match (name, arg.is_empty()) {
            ("w" | "write", true) => Self::Write,
            ("wa" | "wall", true) => Self::WriteAll,
            ("q" | "quit", true) => Self::Quit { force: bang, all: false },
            ("qa" | "qall", true) => Self::Quit { force: bang, all: true },
            ("wq" | "writequit", true) => Self::WriteQuit,
            ("x" | "exit", true) => Self::Exit,
            ("reg" | "registers", true) if !bang => Self::Registers,
            ("se" | "set", _) if !bang => Self::Set(arg.to_string()),
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

/// What a key did to the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Still editing.
    Editing,
    /// `<CR>`: the finished line.
    Submit(String),
    /// `<Esc>`, `<C-c>`, or `<BS>` on an empty line.
    Cancel,
}

/// A one-line input buffer with a cursor. The leading `:` or `/` is not
/// stored.
#[derive(Debug, Clone, Default)]
pub struct Prompt {
    input: String,
    /// Char offset into `input`.
    cursor: usize,
}

impl Prompt {
    #[must_use]
    pub const fn new() -> Self {
        Self { input: String::new(), cursor: 0 }
    }

    #[inline]
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.cursor = 0;
    }

    /// Apply one key.
    pub fn handle(&mut self, key: Key) -> PromptEvent {
        if key.is_cancel() {
            self.clear();
            return PromptEvent::Cancel;
        }
        if key.is_ctrl('w') {
            self.delete_word();
            return PromptEvent::Editing;
        }
        if key.is_ctrl('u') {
            self.delete_to_start();
            return PromptEvent::Editing;
        }
        if let Some(ch) = key.as_char() {
            self.insert_char(ch);
            return PromptEvent::Editing;
        }
        match key.code {
            KeyCode::Enter => {
                let line = std::mem::take(&mut self.input);
                self.cursor = 0;
                return PromptEvent::Submit(line);
            }
            KeyCode::Backspace => {
                if self.input.is_empty() {
                    return PromptEvent::Cancel;
                }
                self.backspace();
            }
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.len(),
            _ => {}
        }
        PromptEvent::Editing
    }

    fn len(&self) -> usize {
        self.input.chars().count()
    }

    fn insert_char(&mut self, ch: char) {
        let at = self.byte_at(self.cursor);
        self.input.insert(at, ch);
        self.cursor += 1;
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_at(self.cursor);
        self.input.remove(at);
    }

    fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_at(self.cursor);
            self.input.remove(at);
        }
    }

    /// `<C-w>`: trailing blanks, then one run of word or non-word chars.
    fn delete_word(&mut self) {
        let chars: Vec<char> = self.input.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        if start > 0 {
            let word = |c: char| c.is_alphanumeric() || c == '_';
            let in_word = word(chars[start - 1]);
            while start > 0 && !chars[start - 1].is_whitespace() && word(chars[start - 1]) == in_word {
                start -= 1;
            }
        }
        let (from, to) = (self.byte_at(start), self.byte_at(self.cursor));
        self.input.replace_range(from..to, "");
        self.cursor = start;
    }

    fn delete_to_start(&mut self) {
        let to = self.byte_at(self.cursor);
        self.input.replace_range(..to, "");
        self.cursor = 0;
    }

    fn byte_at(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(byte_idx, _)| byte_idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
