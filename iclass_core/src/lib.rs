#![no_std]

//! # Iclass Core
//!
//! Editing logic for the Iclass terminal editor, independent of any
//! terminal or filesystem.
//!
//! ## Philosophy
//!
//! - **No_std compatible**: Uses alloc but not std
//! - **Deterministic**: Same key trace => same editor state
//! - **Modal editing**: Command and Insert modes plus a bottom-row prompt
//! - **No ambient authority**: File writes are requested from the host, never performed
//!
//! ## Design
//!
//! The core provides:
//! - TextBuffer: Fixed-capacity grid of byte lines
//! - Language detection and per-line syntax highlighting
//! - EditorCore: State machine that dispatches keys
//! - CoreOutcome: Structured results the host acts on
//! - EditorSnapshot: Deterministic state for comparisons in tests

extern crate alloc;

pub mod buffer;
pub mod command;
pub mod core;
pub mod edit;
pub mod highlight;
pub mod key;
pub mod language;
pub mod mode;
pub mod snapshot;
pub mod viewport;

pub use buffer::{Capacity, Position, TextBuffer, MAX_COLS, MAX_LINES};
pub use command::{parse_command, Command};
pub use self::core::{
    CoreIoRequest, CoreOutcome, EditorCore, Prompt, PromptKind, MSG_SAVED, MSG_SAVE_FAILED,
    MSG_UNSAVED,
};
pub use highlight::{highlight_line, Category, Span, Tokens};
pub use key::Key;
pub use language::Language;
pub use mode::EditorMode;
pub use snapshot::EditorSnapshot;
pub use viewport::Viewport;
