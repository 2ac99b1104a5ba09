//! Main editor implementation

use iclass_core::{
    Capacity, CoreIoRequest, CoreOutcome, EditorCore, Key, MSG_SAVED, MSG_SAVE_FAILED,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::io::{DocumentStore, FsStore, IoError};
use crate::render::{text_height, EditorView};
use crate::terminal::{Terminal, TerminalError};

/// Editor error
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] TerminalError),
}

/// Editor result
pub type EditorResult<T> = Result<T, EditorError>;

/// Editor action result
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorAction {
    /// Continue editing
    Continue,
    /// Quit the editor
    Quit { forced: bool },
    /// Document was saved under this name
    Saved(String),
}

/// Why [`Editor::run`] returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// `:q` or `:q!`
    Quit { forced: bool },
    /// The terminal has no more input
    InputClosed,
}

/// The editor: core state machine plus document storage and rendering
pub struct Editor<S: DocumentStore = FsStore> {
    core: EditorCore,
    store: S,
    view: EditorView,
}

impl<S: DocumentStore> Editor<S> {
    /// Create an editor with an empty document
    pub fn new(store: S, capacity: Capacity) -> Self {
        Self {
            core: EditorCore::with_capacity(capacity),
            store,
            view: EditorView::new(),
        }
    }

    /// Get current editor core
    pub fn core(&self) -> &EditorCore {
        &self.core
    }

    /// Get mutable editor core
    pub fn core_mut(&mut self) -> &mut EditorCore {
        &mut self.core
    }

    /// Get the document store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Open a file by name.
    ///
    /// The name and its language stick even when the file cannot be read;
    /// the editor then starts empty with an error on the command row.
    pub fn open(&mut self, filename: &str) {
        self.core.set_filename(filename);

        match self.store.load(filename) {
            Ok(content) => {
                self.core.load_content(&content);
                info!(
                    target: "io",
                    file = filename,
                    size_bytes = content.len(),
                    language = self.core.language().label(),
                    "file_read_ok"
                );
            }
            Err(err) => {
                warn!(target: "io", file = filename, error = %err, "file_read_failed");
                self.core
                    .set_status_message(format!("Could not open file: {}", filename));
            }
        }
    }

    /// Write the document to the current file name
    pub fn save_document(&mut self) -> EditorResult<()> {
        let content = self.core.document_bytes();
        self.store.save(self.core.filename(), &content)?;
        self.core.mark_saved();
        info!(
            target: "io",
            file = self.core.filename(),
            size_bytes = content.len(),
            "file_write_ok"
        );
        Ok(())
    }

    /// Process one key
    pub fn process_key(&mut self, key: Key) -> EditorResult<EditorAction> {
        match self.core.apply_key(key) {
            CoreOutcome::Continue | CoreOutcome::Changed => Ok(EditorAction::Continue),
            CoreOutcome::StatusMessage(message) => {
                debug!(target: "dispatch", %message, "status");
                Ok(EditorAction::Continue)
            }
            CoreOutcome::RequestIo(CoreIoRequest::Save(name)) => match self.save_document() {
                Ok(()) => {
                    self.core.set_status_message(MSG_SAVED);
                    Ok(EditorAction::Saved(name))
                }
                Err(err) => {
                    warn!(target: "io", file = %name, error = %err, "file_write_failed");
                    self.core.set_status_message(MSG_SAVE_FAILED);
                    Ok(EditorAction::Continue)
                }
            },
            CoreOutcome::RequestExit { forced } => {
                info!(target: "dispatch", forced, dirty = self.core.dirty(), "quit");
                Ok(EditorAction::Quit { forced })
            }
        }
    }

    /// Scroll to the cursor and redraw the screen
    pub fn render<T: Terminal>(&mut self, term: &mut T) -> EditorResult<()> {
        let (rows, _) = term.size()?;
        self.core.scroll_to_cursor(text_height(rows));
        self.view.draw(&self.core, term)?;
        Ok(())
    }

    /// Main loop: render, read one key, dispatch, until quit.
    pub fn run<T: Terminal>(&mut self, term: &mut T) -> EditorResult<RunOutcome> {
        loop {
            self.render(term)?;

            let Some(key) = term.read_key()? else {
                debug!(target: "runtime", "input_closed");
                return Ok(RunOutcome::InputClosed);
            };

            if let EditorAction::Quit { forced } = self.process_key(key)? {
                return Ok(RunOutcome::Quit { forced });
            }
        }
    }
}

impl Default for Editor<FsStore> {
    fn default() -> Self {
        Self::new(FsStore::new(), Capacity::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::{keys, ScriptedTerminal};
    use iclass_core::{EditorMode, Language, MSG_UNSAVED};
    use std::fs;
    use tempfile::TempDir;

    fn editor_in(dir: &TempDir) -> Editor {
        Editor::new(FsStore::with_root(dir.path()), Capacity::default())
    }

    fn feed(editor: &mut Editor, text: &str) -> EditorAction {
        let mut last = EditorAction::Continue;
        for key in keys(text) {
            last = editor.process_key(key).unwrap();
        }
        last
    }

    #[test]
    fn test_editor_new() {
        let editor = Editor::default();
        assert_eq!(editor.core().mode(), EditorMode::Command);
        assert!(!editor.core().dirty());
    }

    #[test]
    fn test_open_existing_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("prog.py"), "import os\n").unwrap();

        let mut editor = editor_in(&dir);
        editor.open("prog.py");
        assert_eq!(editor.core().language(), Language::Python);
        assert_eq!(editor.core().buffer().line(0), b"import os");
        assert_eq!(editor.core().status_message(), "");
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut editor = editor_in(&dir);
        editor.open("new.asm");

        assert_eq!(editor.core().status_message(), "Could not open file: new.asm");
        assert_eq!(editor.core().filename(), "new.asm");
        assert_eq!(editor.core().language(), Language::Asm);
        assert!(editor.core().buffer().is_empty());
    }

    #[test]
    fn test_save_clears_dirty() {
        let dir = TempDir::new().unwrap();
        let mut editor = editor_in(&dir);
        editor.open("out.txt");

        feed(&mut editor, "iabc\x1b");
        assert!(editor.core().dirty());

        let action = feed(&mut editor, ":w\n");
        assert_eq!(action, EditorAction::Saved("out.txt".into()));
        assert!(!editor.core().dirty());
        assert_eq!(editor.core().status_message(), MSG_SAVED);
        let path = editor.store().resolve("out.txt");
        assert_eq!(path, dir.path().join("out.txt"));
        assert_eq!(fs::read(path).unwrap(), b"abc\n");
    }

    #[test]
    fn test_save_failure_reports() {
        let dir = TempDir::new().unwrap();
        let mut editor = editor_in(&dir);
        editor.core_mut().set_filename("missing/dir/out.txt");

        feed(&mut editor, "ix\x1b");
        let action = feed(&mut editor, ":w\n");
        assert_eq!(action, EditorAction::Continue);
        assert_eq!(editor.core().status_message(), MSG_SAVE_FAILED);
        assert!(editor.core().dirty());
    }

    #[test]
    fn test_save_document_error_type() {
        let dir = TempDir::new().unwrap();
        let mut editor = editor_in(&dir);
        editor.core_mut().set_filename("missing/dir/out.txt");
        assert!(matches!(editor.save_document(), Err(EditorError::Io(_))));
    }

    #[test]
    fn test_quit_blocked_then_forced() {
        let dir = TempDir::new().unwrap();
        let mut editor = editor_in(&dir);

        feed(&mut editor, "ix\x1b");
        assert_eq!(feed(&mut editor, ":q\n"), EditorAction::Continue);
        assert_eq!(editor.core().status_message(), MSG_UNSAVED);
        assert_eq!(feed(&mut editor, ":q!\n"), EditorAction::Quit { forced: true });
    }

    #[test]
    fn test_run_until_quit() {
        let dir = TempDir::new().unwrap();
        let mut editor = editor_in(&dir);
        let mut term = ScriptedTerminal::with_keys(12, 60, keys(":q\nignored"));

        let outcome = editor.run(&mut term).unwrap();
        assert_eq!(outcome, RunOutcome::Quit { forced: false });
        assert_eq!(term.pending_keys(), 7);
        assert_eq!(term.refreshes(), 3);
    }

    #[test]
    fn test_run_input_closed() {
        let dir = TempDir::new().unwrap();
        let mut editor = editor_in(&dir);
        let mut term = ScriptedTerminal::with_keys(12, 60, keys("ihi"));

        let outcome = editor.run(&mut term).unwrap();
        assert_eq!(outcome, RunOutcome::InputClosed);
        assert_eq!(term.row_text(0), "   1 hi");
    }
}
