//! Editor options and the `:set` command.
//!
//! Options are plain values handed to the editor at construction; there is
//! no configuration file. `:set` adjusts them for the session.
//!
//! | Full name       | Abbrev | Type    | Default |
//! |-----------------|--------|---------|---------|
//! | `tabstop`       | `ts`   | integer | 4       |
//! | `shiftwidth`    | `sw`   | integer | 4       |
//! | `expandtab`     | `et`   | bool    | true    |
//! | `wrapscan`      | `ws`   | bool    | true    |
//! | `maxmacrodepth` | `mmd`  | integer | 64      |
//!
//! `:set` syntax: `opt`, `noopt`, `opt!`, `opt?`, `opt=N`, several per line.

use crate::error::EditorError;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Display width of a tab, used to measure indentation.
    pub tabstop: usize,
    /// Columns per `>`/`<` step and per `<C-t>`/`<C-d>`.
    pub shiftwidth: usize,
    /// Indent with spaces instead of tabs.
    pub expandtab: bool,
    /// Searches wrap around the buffer ends.
    pub wrapscan: bool,
    /// Deepest allowed nesting of macro playback.
    pub max_macro_depth: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tabstop: 4,
            shiftwidth: 4,
            expandtab: true,
            wrapscan: true,
            max_macro_depth: 64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Name {
    TabStop,
    ShiftWidth,
    ExpandTab,
    WrapScan,
    MaxMacroDepth,
}

impl Name {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "tabstop" | "ts" => Some(Self::TabStop),
            "shiftwidth" | "sw" => Some(Self::ShiftWidth),
            "expandtab" | "et" => Some(Self::ExpandTab),
            "wrapscan" | "ws" => Some(Self::WrapScan),
            "maxmacrodepth" | "mmd" => Some(Self::MaxMacroDepth),
            _ => None,
        }
    }

    const fn is_bool(self) -> bool {
        matches!(self, Self::ExpandTab | Self::WrapScan)
    }

    const fn full(self) -> &'static str {
        match self {
            Self::TabStop => "tabstop",
            Self::ShiftWidth => "shiftwidth",
            Self::ExpandTab => "expandtab",
            Self::WrapScan => "wrapscan",
            Self::MaxMacroDepth => "maxmacrodepth",
        }
    }
}

impl Options {
    /// The string to insert for one indentation level.
    #[must_use]
    pub fn indent_unit(&self) -> String {
        if self.expandtab {
            " ".repeat(self.shiftwidth)
        } else if self.tabstop > 0 && self.shiftwidth % self.tabstop == 0 {
            "\t".repeat(self.shiftwidth / self.tabstop)
        } else {
            " ".repeat(self.shiftwidth)
        }
    }

    /// Visual width of a run of leading whitespace.
    #[must_use]
    pub fn indent_width(&self, leading: &str) -> usize {
        leading.chars().fold(0, |w, ch| {
            if ch == '\t' && self.tabstop > 0 {
                w + self.tabstop - w % self.tabstop
            } else {
                w + 1
            }
        })
    }

    /// Leading whitespace that renders `width` columns wide.
    #[must_use]
    pub fn indent_string(&self, width: usize) -> String {
        if self.expandtab || self.tabstop == 0 {
            " ".repeat(width)
        } else {
            let mut s = "\t".repeat(width / self.tabstop);
            s.push_str(&" ".repeat(width % self.tabstop));
            s
        }
    }

    fn get(&self, name: Name) -> String {
        match name {
            Name::TabStop => format!("tabstop={}", self.tabstop),
            Name::ShiftWidth => format!("shiftwidth={}", self.shiftwidth),
            Name::MaxMacroDepth => format!("maxmacrodepth={}", self.max_macro_depth),
            Name::ExpandTab => format_bool(name.full(), self.expandtab),
            Name::WrapScan => format_bool(name.full(), self.wrapscan),
        }
    }

    fn set_bool(&mut self, name: Name, value: bool) {
        match name {
            Name::ExpandTab => self.expandtab = value,
            Name::WrapScan => self.wrapscan = value,
            _ => {}
        }
    }

    const fn bool_value(&self, name: Name) -> bool {
        match name {
            Name::ExpandTab => self.expandtab,
            Name::WrapScan => self.wrapscan,
            _ => false,
        }
    }

    /// Apply the arguments of a `:set` command. Returns the text to show
    /// for queries, if any.
    ///
    /// # Errors
    ///
    /// Unknown option names and non-numeric assignments.
    pub fn apply_set(&mut self, args: &str) -> Result<Option<String>, EditorError> {
        let mut shown = Vec::new();
        for arg in args.split_whitespace() {
            if let Some((name, value)) = arg.split_once('=') {
                let opt = Name::parse(name).ok_or_else(|| EditorError::UnknownOption(arg.into()))?;
                if opt.is_bool() {
                    return Err(EditorError::UnknownOption(arg.into()));
                }
                let n: usize = value
                    .parse()
                    .map_err(|_| EditorError::NumberRequired(arg.into()))?;
                match opt {
                    Name::TabStop => self.tabstop = n.max(1),
                    Name::ShiftWidth => self.shiftwidth = n,
                    Name::MaxMacroDepth => self.max_macro_depth = n,
                    Name::ExpandTab | Name::WrapScan => {}
                }
            } else if let Some(name) = arg.strip_suffix('?') {
                let opt = Name::parse(name).ok_or_else(|| EditorError::UnknownOption(arg.into()))?;
                shown.push(self.get(opt));
            } else if let Some(name) = arg.strip_suffix('!') {
                let opt = Name::parse(name)
                    .filter(|o| o.is_bool())
                    .ok_or_else(|| EditorError::UnknownOption(arg.into()))?;
                self.set_bool(opt, !self.bool_value(opt));
            } else if let Some(opt) = Name::parse(arg) {
                if opt.is_bool() {
                    self.set_bool(opt, true);
                } else {
                    shown.push(self.get(opt));
                }
            } else if let Some(opt) = arg
                .strip_prefix("no")
                .and_then(Name::parse)
                .filter(|o| o.is_bool())
            {
                self.set_bool(opt, false);
            } else {
                return Err(EditorError::UnknownOption(arg.into()));
            }
        }
        Ok((!shown.is_empty()).then(|| shown.join("  ")))
    }
}

/// `name` when true, `noname` when false.
#[must_use]
pub fn format_bool(name: &str, value: bool) -> String {
    if value {
        name.to_string()
    } else {
        format!("no{name}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
