//! # Iclass
//!
//! Host side of the Iclass terminal editor: a full-screen modal editor with
//! syntax highlighting for C, Python and x86 assembly.
//!
//! ## Philosophy
//!
//! - **Thin host**: Editing logic lives in `iclass_core`; this crate owns the console and the filesystem
//! - **Recoverable errors**: Load and save failures become a message on the command row
//! - **Testable**: Whole sessions run against a scripted in-memory terminal
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A port of real vi/vim
//! - Unicode aware; documents are byte lines
//! - Configurable through files, plugins or scripts
//!
//! ## Design
//!
//! - Keys arrive through the [`Terminal`] trait and are dispatched by `EditorCore`
//! - File writes are requested by the core and performed by a [`DocumentStore`]
//! - Every frame is redrawn in full by [`EditorView`]

pub mod config;
pub mod editor;
pub mod io;
pub mod render;
pub mod terminal;

pub use config::{Args, EditorConfig};
pub use editor::{Editor, EditorAction, EditorError, EditorResult, RunOutcome};
pub use io::{DocumentStore, FsStore, IoError};
pub use render::EditorView;
pub use terminal::{keys, CrosstermTerminal, ScriptedTerminal, Style, Terminal, TerminalError};
