//! EditorCore state machine
//!
//! A complete, testable, no_std editor state machine. It owns the document,
//! cursor, mode, language, file name, dirty flag and viewport, consumes
//! platform-independent keys, and reports anything that needs the host
//! (file writes, exiting) through [`CoreOutcome`].

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::{
    buffer::{Capacity, Position, TextBuffer},
    command::{parse_command, Command},
    edit,
    key::Key,
    language::Language,
    mode::EditorMode,
    snapshot::EditorSnapshot,
    viewport::Viewport,
};

pub const MSG_SAVED: &str = "File saved successfully.";
pub const MSG_SAVE_FAILED: &str = "Error: Could not save file!";
pub const MSG_UNSAVED: &str = "Unsaved changes! Use :q! to force quit.";

/// Outcome from applying a key to the editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreOutcome {
    /// Continue editing (no state change)
    Continue,
    /// State changed (buffer modified, mode changed, etc)
    Changed,
    /// Request to exit the editor
    RequestExit { forced: bool },
    /// Display a status message
    StatusMessage(String),
    /// Request IO operation from host
    RequestIo(CoreIoRequest),
}

/// IO request from editor core to host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreIoRequest {
    /// Write the document to the given file name
    Save(String),
}

/// What the bottom-row prompt is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// `:` command line
    Command,
    /// File name for a first save
    SaveAs,
}

impl PromptKind {
    pub fn label(&self) -> &'static str {
        match self {
            PromptKind::Command => ":",
            PromptKind::SaveAs => "Enter filename: ",
        }
    }
}

/// Active bottom-row prompt with its echoed input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    kind: PromptKind,
    input: String,
}

impl Prompt {
    fn new(kind: PromptKind) -> Self {
        Self {
            kind,
            input: String::new(),
        }
    }

    pub fn kind(&self) -> PromptKind {
        self.kind
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Prompt label followed by the typed input
    pub fn text(&self) -> String {
        format!("{}{}", self.kind.label(), self.input)
    }
}

/// Editor core state machine
pub struct EditorCore {
    mode: EditorMode,
    buffer: TextBuffer,
    /// Document bytes as of the last load or successful save
    clean: Vec<u8>,
    cursor: Position,
    language: Language,
    filename: String,
    dirty: bool,
    viewport: Viewport,
    prompt: Option<Prompt>,
    status_message: String,
    help_visible: bool,
}

impl EditorCore {
    /// Create a new empty editor
    pub fn new() -> Self {
        Self::with_capacity(Capacity::default())
    }

    pub fn with_capacity(capacity: Capacity) -> Self {
        let buffer = TextBuffer::new(capacity);
        Self {
            mode: EditorMode::Command,
            buffer,
            clean: Vec::new(),
            cursor: Position::zero(),
            language: Language::None,
            filename: String::new(),
            dirty: false,
            viewport: Viewport::new(),
            prompt: None,
            status_message: String::new(),
            help_visible: false,
        }
    }

    /// Apply a key event and return the outcome
    pub fn apply_key(&mut self, key: Key) -> CoreOutcome {
        self.status_message.clear();

        if self.help_visible {
            self.help_visible = false;
            return CoreOutcome::Changed;
        }

        if self.prompt.is_some() {
            return self.handle_prompt(key);
        }

        match self.mode {
            EditorMode::Command => self.handle_command_mode(key),
            EditorMode::Insert => self.handle_insert_mode(key),
        }
    }

    /// Get a complete snapshot of editor state (for parity testing)
    pub fn snapshot(&self) -> EditorSnapshot {
        let live = self.live_end().map_or(0, |last| last + 1);
        EditorSnapshot {
            mode: self.mode,
            cursor: self.cursor,
            language: self.language,
            buffer_lines: self.buffer.lines()[..live].to_vec(),
            dirty: self.dirty,
            filename: self.filename.clone(),
            prompt: self.prompt.as_ref().map(Prompt::text),
            status_message: self.status_message.clone(),
            top_line: self.viewport.top_line(),
        }
    }

    // Public accessors for rendering/testing
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn dirty(&self) -> bool {
        self.dirty
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.prompt.as_ref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    pub fn set_status_message(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Assign the file name and detect the language from its suffix
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        self.filename = filename.into();
        self.language = Language::detect(&self.filename);
    }

    /// Keep the cursor row visible in a window of `screen_height` lines
    pub fn scroll_to_cursor(&mut self, screen_height: usize) {
        self.viewport.scroll_to(self.cursor.row, screen_height);
    }

    /// Last line that belongs to the document: the last non-empty line or
    /// the cursor row, whichever is further down. An untouched empty
    /// document has none.
    pub fn live_end(&self) -> Option<usize> {
        match self.buffer.last_non_empty() {
            Some(last) => Some(last.max(self.cursor.row)),
            None if self.cursor.row > 0 => Some(self.cursor.row),
            None => None,
        }
    }

    /// Bytes to write to disk on save
    pub fn document_bytes(&self) -> Vec<u8> {
        self.buffer.to_bytes(self.live_end())
    }

    // Public API for loading content
    pub fn load_content(&mut self, data: &[u8]) {
        self.buffer = TextBuffer::from_bytes(data, self.buffer.capacity());
        self.cursor = Position::zero();
        self.viewport = Viewport::new();
        self.mark_saved();
    }

    /// Make the current document the clean baseline
    pub fn mark_saved(&mut self) {
        self.clean = self.document_bytes();
        self.dirty = false;
    }

    // Private mode handlers

    fn handle_command_mode(&mut self, key: Key) -> CoreOutcome {
        match key {
            Key::Char(b'i') => {
                self.mode = EditorMode::Insert;
                CoreOutcome::Changed
            }
            Key::Char(b':') => {
                self.prompt = Some(Prompt::new(PromptKind::Command));
                CoreOutcome::Changed
            }

            // Navigation
            Key::Left => {
                edit::move_left(&mut self.cursor);
                CoreOutcome::Changed
            }
            Key::Right => {
                edit::move_right(&self.buffer, &mut self.cursor);
                CoreOutcome::Changed
            }
            Key::Up => {
                edit::move_up(&self.buffer, &mut self.cursor);
                CoreOutcome::Changed
            }
            Key::Down => {
                edit::move_down(&self.buffer, &mut self.cursor);
                CoreOutcome::Changed
            }
            Key::Home => {
                edit::move_home(&mut self.cursor);
                CoreOutcome::Changed
            }
            Key::End => {
                edit::move_end(&self.buffer, &mut self.cursor);
                CoreOutcome::Changed
            }

            _ => CoreOutcome::Continue,
        }
    }

    fn handle_insert_mode(&mut self, key: Key) -> CoreOutcome {
        let changed = match key {
            Key::Escape => {
                self.mode = EditorMode::Command;
                return CoreOutcome::Changed;
            }
            Key::Backspace => edit::delete_left(&mut self.buffer, &mut self.cursor),
            Key::Delete => edit::delete_right(&mut self.buffer, &self.cursor),
            Key::Enter => edit::split_line(&mut self.buffer, &mut self.cursor, self.language),
            Key::Char(byte) => edit::insert_char(&mut self.buffer, &mut self.cursor, byte),
            _ => false,
        };

        if changed {
            self.dirty = self.document_bytes() != self.clean;
            CoreOutcome::Changed
        } else {
            CoreOutcome::Continue
        }
    }

    fn handle_prompt(&mut self, key: Key) -> CoreOutcome {
        let Some(prompt) = self.prompt.as_mut() else {
            return CoreOutcome::Continue;
        };

        match key {
            Key::Escape => {
                self.prompt = None;
                CoreOutcome::Changed
            }
            Key::Enter => {
                let kind = prompt.kind;
                let input = core::mem::take(&mut prompt.input);
                self.prompt = None;
                match kind {
                    PromptKind::Command => self.execute_command(&input),
                    PromptKind::SaveAs => self.save_as(input.trim()),
                }
            }
            Key::Backspace => {
                prompt.input.pop();
                CoreOutcome::Changed
            }
            Key::Char(byte) => {
                prompt.input.push(char::from(byte));
                CoreOutcome::Changed
            }
            _ => CoreOutcome::Continue,
        }
    }

    fn execute_command(&mut self, cmd_str: &str) -> CoreOutcome {
        match parse_command(cmd_str) {
            Command::Write { path: Some(path) } => self.save_as(&path),
            Command::Write { path: None } => {
                if self.filename.is_empty() {
                    self.prompt = Some(Prompt::new(PromptKind::SaveAs));
                    CoreOutcome::Changed
                } else {
                    CoreOutcome::RequestIo(CoreIoRequest::Save(self.filename.clone()))
                }
            }
            Command::Quit { force } => {
                if self.dirty && !force {
                    self.report(MSG_UNSAVED.into())
                } else {
                    CoreOutcome::RequestExit { forced: force }
                }
            }
            Command::Help => {
                self.help_visible = true;
                CoreOutcome::Changed
            }
            Command::SetLanguage(language) => {
                self.language = language;
                CoreOutcome::Changed
            }
            Command::Unknown(cmd_str) => self.report(format!("Unknown command: {}", cmd_str)),
        }
    }

    fn save_as(&mut self, filename: &str) -> CoreOutcome {
        if filename.is_empty() {
            return CoreOutcome::Changed;
        }
        self.set_filename(filename);
        CoreOutcome::RequestIo(CoreIoRequest::Save(self.filename.clone()))
    }

    fn report(&mut self, message: String) -> CoreOutcome {
        self.status_message = message.clone();
        CoreOutcome::StatusMessage(message)
    }
}

impl Default for EditorCore {
    fn default() -> Self {
        Self::new()
    }
}
