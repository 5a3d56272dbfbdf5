// SPDX-License-Identifier: MIT
//
// vk-input — key identity and notation for vimkey.
//
// The editor core never sees terminal bytes. Hosts translate whatever
// their platform delivers into `Key` values, and scripts, tests and
// macro dumps spell keys in Vim's angle-bracket notation, which
// `notation` parses and prints.

pub mod key;
pub mod notation;

pub use key::{Key, KeyCode, Modifiers};
pub use notation::{NotationError, format_keys, parse_keys};
