//! Editor rendering and output

use iclass_core::{highlight_line, EditorCore, Language};

use crate::terminal::{Style, Terminal, TerminalError};

/// Width of the line-number gutter, trailing space included
pub const GUTTER_WIDTH: usize = 5;

/// Rows below the text area: status line, command row and a spare row
pub const RESERVED_ROWS: usize = 3;

pub const HINT: &str = " :w=Save :q=Quit :h=Help";

const HELP_TITLE: &str = "Iclass v1.0.1 - Help";

const HELP_BODY: &[(usize, usize, &str)] = &[
    (2, 0, "Commands:"),
    (3, 4, ":w      - Save file"),
    (4, 4, ":w <file> - Save as"),
    (5, 4, ":q      - Quit"),
    (6, 4, ":q!     - Force quit without saving"),
    (7, 4, ":h      - Show this help"),
    (8, 4, ":c      - Set language to C"),
    (9, 4, ":p      - Set language to Python"),
    (10, 4, ":a      - Set language to Assembly"),
    (11, 4, ":n      - Set language to Plain Text"),
    (12, 4, "Author : Bardia Naziri"),
    (13, 0, "Navigation:"),
    (14, 4, "Arrow Keys - Move cursor"),
    (15, 4, "i         - Enter insert mode"),
    (16, 4, "ESC       - Return to command mode"),
    (18, 0, "Press any key to continue..."),
];

/// Number of document lines visible on a screen with `rows` rows
pub fn text_height(rows: usize) -> usize {
    rows.saturating_sub(RESERVED_ROWS)
}

/// Printable stand-in for a document byte
fn display_char(byte: u8) -> char {
    match byte {
        b'\t' => ' ',
        0x20..=0x7E => char::from(byte),
        _ => '?',
    }
}

/// Editor view for rendering
///
/// Draws the full screen from an [`EditorCore`]: gutter, highlighted text,
/// status line and the bottom command row.
#[derive(Debug, Default)]
pub struct EditorView;

impl EditorView {
    pub fn new() -> Self {
        Self
    }

    /// Redraw the whole screen and place the cursor
    pub fn draw<T: Terminal>(&self, core: &EditorCore, term: &mut T) -> Result<(), TerminalError> {
        let (rows, cols) = term.size()?;
        term.clear()?;

        if core.help_visible() {
            self.draw_help(term)?;
            return term.refresh();
        }

        let height = text_height(rows);
        let top = core.viewport().top_line();
        let buffer = core.buffer();
        let width = cols.saturating_sub(GUTTER_WIDTH);

        for screen_row in 0..height {
            let line_num = top + screen_row;
            if line_num >= buffer.line_count() {
                break;
            }
            term.move_to(screen_row, 0)?;
            term.put_str(&format!("{:4} ", line_num + 1), Style::LineNumber)?;
            self.draw_line(term, buffer.line(line_num), core.language(), width)?;
        }

        if rows >= 2 {
            self.draw_status(core, term, rows - 2, cols)?;
            self.draw_command_row(core, term, rows - 1)?;
        }

        self.place_cursor(core, term, rows)?;
        term.refresh()
    }

    fn draw_line<T: Terminal>(
        &self,
        term: &mut T,
        line: &[u8],
        language: Language,
        width: usize,
    ) -> Result<(), TerminalError> {
        let visible = &line[..line.len().min(width)];
        for span in highlight_line(visible, language) {
            let text: String = visible[span.range()].iter().map(|b| display_char(*b)).collect();
            term.put_str(&text, Style::for_category(span.category))?;
        }
        Ok(())
    }

    fn draw_status<T: Terminal>(
        &self,
        core: &EditorCore,
        term: &mut T,
        row: usize,
        cols: usize,
    ) -> Result<(), TerminalError> {
        let cursor = core.cursor();
        let filename = if core.filename().is_empty() {
            "[No Name]"
        } else {
            core.filename()
        };
        let status = format!(
            " {} | {} | Line {}, Col {} | {}",
            core.mode().as_str(),
            core.language().label(),
            cursor.row + 1,
            cursor.col + 1,
            filename
        );
        let status: String = status.chars().take(cols).collect();

        term.move_to(row, 0)?;
        term.put_str(&format!("{:<width$}", status, width = cols), Style::StatusBar)?;

        if core.dirty() {
            term.move_to(row, cols.saturating_sub(10))?;
            term.put_str("[Modified]", Style::Keyword)?;
        }
        Ok(())
    }

    fn draw_command_row<T: Terminal>(
        &self,
        core: &EditorCore,
        term: &mut T,
        row: usize,
    ) -> Result<(), TerminalError> {
        term.move_to(row, 0)?;
        if let Some(prompt) = core.prompt() {
            term.put_str(&prompt.text(), Style::Text)
        } else if !core.status_message().is_empty() {
            term.put_str(core.status_message(), Style::Text)
        } else {
            term.put_str(HINT, Style::StatusBar)
        }
    }

    fn place_cursor<T: Terminal>(
        &self,
        core: &EditorCore,
        term: &mut T,
        rows: usize,
    ) -> Result<(), TerminalError> {
        if let Some(prompt) = core.prompt() {
            return term.move_to(rows.saturating_sub(1), prompt.text().len());
        }

        let cursor = core.cursor();
        let screen_row = core
            .viewport()
            .screen_row(cursor.row, text_height(rows))
            .unwrap_or(0);
        term.move_to(screen_row, cursor.col + GUTTER_WIDTH)
    }

    fn draw_help<T: Terminal>(&self, term: &mut T) -> Result<(), TerminalError> {
        term.move_to(0, 0)?;
        term.put_str(HELP_TITLE, Style::StatusBar)?;
        for (row, col, text) in HELP_BODY {
            term.move_to(*row, *col)?;
            term.put_str(text, Style::Text)?;
        }
        Ok(())
    }
}
