// SPDX-License-Identifier: MIT
//
// vimkey — replay Vim keys against a text file.
//
// This is the binary that wires the crates together:
//
//   vk-input  → key notation: "3dw<Esc>" ⇄ [Key]
//   vk-editor → the modal interpreter: grammar, registers, dot, macros
//
// A run loads the text, feeds the keys, and prints the buffer:
//
//   file / stdin → Editor::new → feed(keys) → stdout
//
// Keys come from `--keys` and `--script` (in that order). By default
// failing commands only show up in the final status line, like typing
// them would; `--strict` stops at the first one instead. `:w` writes back
// to FILE; nothing is written otherwise.

use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{Level, debug, info};

use vk_editor::clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
use vk_editor::host::FileHost;
use vk_editor::{Editor, Flow, Options};
use vk_input::format_keys;

// ─── Command line ───────────────────────────────────────────────────────────

/// Replay Vim key sequences against a text file and print the result
#[derive(Debug, Parser)]
#[command(name = "vimkey")]
#[command(version)]
#[command(about = "Replay Vim key sequences against a text file", long_about = None)]
struct Cli {
    /// Text file to edit (omit to read stdin, or start empty)
    file: Option<PathBuf>,

    /// Keys in Vim notation, e.g. "3dw" or "ihello<Esc>"
    #[arg(short, long)]
    keys: Option<String>,

    /// File holding keys in Vim notation; line breaks are ignored
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Stop at the first command that fails
    #[arg(long)]
    strict: bool,

    /// Use the system clipboard for the * and + registers
    #[arg(long)]
    system_clipboard: bool,

    /// Columns per indentation step
    #[arg(long, default_value_t = Options::default().shiftwidth)]
    shiftwidth: usize,

    /// Display width of a tab
    #[arg(long, default_value_t = Options::default().tabstop)]
    tabstop: usize,

    /// Indent with tabs instead of spaces
    #[arg(long)]
    noexpandtab: bool,

    /// Print the final cursor, mode and status line to stderr
    #[arg(long)]
    report: bool,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> Options {
        Options {
            tabstop: self.tabstop,
            shiftwidth: self.shiftwidth,
            expandtab: !self.noexpandtab,
            ..Options::default()
        }
    }

    /// All keys to feed, `--keys` first.
    fn notation(&self) -> Result<String> {
        let mut notation = self.keys.clone().unwrap_or_default();
        if let Some(path) = &self.script {
            let script = fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            notation.extend(script.lines());
        }
        Ok(notation)
    }

    fn text(&self) -> Result<String> {
        if let Some(path) = &self.file {
            if !path.exists() {
                return Ok(String::new());
            }
            return fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()));
        }
        let mut text = String::new();
        if !io::stdin().is_terminal() {
            io::stdin().read_to_string(&mut text).context("failed to read stdin")?;
        }
        Ok(text)
    }
}

// ─── Run ────────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let clipboard: Box<dyn Clipboard> = if cli.system_clipboard {
        Box::new(SystemClipboard)
    } else {
        Box::new(MemoryClipboard::new())
    };
    let mut editor = Editor::new(&cli.text()?)
        .with_options(cli.options())
        .with_clipboard(clipboard)
        .with_host(Box::new(FileHost::new(cli.file.clone())));

    let notation = cli.notation()?;
    info!(keys = notation.len(), strict = cli.strict, "replaying");
    let flow = if cli.strict {
        editor.run_keys(&notation)?
    } else {
        editor.feed(&notation)?
    };
    debug!(?flow, pending = %format_keys(editor.pending_keys()), "replay finished");

    let mut stdout = io::stdout().lock();
    stdout.write_all(editor.text().as_bytes())?;
    stdout.flush()?;

    if cli.report {
        let cursor = editor.cursor();
        eprintln!("cursor {cursor}  mode {}", editor.mode());
        if let Some(status) = editor.status() {
            eprintln!("{}", status.text);
        }
    }
    if cli.strict {
        if let Some(status) = editor.status().filter(|s| s.is_error) {
            bail!("{}", status.text);
        }
    }
    if flow == Flow::Quit {
        debug!("editor closed");
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("vimkey: {e:#}");
            ExitCode::FAILURE
        }
    }
}
