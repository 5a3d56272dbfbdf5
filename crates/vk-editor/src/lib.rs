//! # vk-editor — Modal key-grammar interpreter for vimkey
//!
//! This crate turns a stream of keys into Vim edits on one buffer:
//!
//! - **[`position`]** — `Position` (line, col), `Range`, `Selection`; 0-indexed
//! - **[`buffer`]** — `Buffer` wrapping a rope with editing and coordinates
//! - **[`cursor`]** — cursor with sticky column and Visual anchor
//! - **[`mode`]** — the mode state machine
//! - **[`word`]**, **[`motion`]**, **[`text_object`]**, **[`search`]** — where keys move
//! - **[`action`]** — operators, commands and the `Action` a command resolves to
//! - **[`recorded`]**, **[`grammar`]** — the command under construction and the
//!   resolver that consumes one key at a time
//! - **[`register`]**, **[`clipboard`]** — the register store and its clipboard backend
//! - **[`history`]** — undo and redo
//! - **[`dot`]**, **[`macros`]** — dot-repeat and macro recording/playback
//! - **[`command`]** — the `:` and `/` prompts
//! - **[`options`]**, **[`host`]**, **[`error`]** — configuration, host port, errors
//! - **[`editor`]** — `Editor`, which wires everything into the key pipeline

pub mod action;
pub mod buffer;
pub mod clipboard;
pub mod command;
pub mod cursor;
pub mod dot;
pub mod editor;
pub mod error;
pub mod grammar;
pub mod history;
pub mod host;
pub mod macros;
pub mod mode;
pub mod motion;
pub mod options;
pub mod position;
pub mod recorded;
pub mod register;
pub mod search;
pub mod text_object;
pub mod word;

pub use editor::{Editor, Flow, Status};
pub use error::EditorError;
pub use mode::{Mode, VisualKind};
pub use options::Options;
pub use position::{Position, Range, Selection};
