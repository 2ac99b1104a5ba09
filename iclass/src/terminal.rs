//! Terminal contract
//!
//! The editor draws through the [`Terminal`] trait and never talks to the
//! console directly. [`CrosstermTerminal`] drives a real console in raw
//! mode on the alternate screen; [`ScriptedTerminal`] replays a fixed key
//! sequence into an in-memory screen grid for tests.

use std::collections::VecDeque;
use std::io::{self, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{cursor, execute, queue};
use iclass_core::{Category, Key};
use thiserror::Error;

/// Terminal error
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

/// Named color styles, numbered like the classic curses color pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Text = 1,
    StatusBar = 2,
    LineNumber = 3,
    /// Keywords and the `[Modified]` marker
    Keyword = 4,
    Symbol = 5,
    /// Strings and registers
    String = 6,
    Number = 7,
    Comment = 8,
}

impl Style {
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Default => Style::Text,
            Category::Keyword => Style::Keyword,
            Category::String | Category::Register => Style::String,
            Category::Number => Style::Number,
            Category::Comment => Style::Comment,
            Category::Symbol => Style::Symbol,
        }
    }

    /// Foreground and background colors
    pub fn colors(&self) -> (Color, Color) {
        match self {
            Style::Text => (Color::White, Color::Black),
            Style::StatusBar => (Color::White, Color::Blue),
            Style::LineNumber => (Color::Yellow, Color::Black),
            Style::Keyword => (Color::Green, Color::Black),
            Style::Symbol => (Color::Cyan, Color::Black),
            Style::String => (Color::Magenta, Color::Black),
            Style::Number => (Color::Yellow, Color::Black),
            Style::Comment => (Color::Blue, Color::Black),
        }
    }
}

/// Full-screen character terminal
pub trait Terminal {
    /// Screen size as `(rows, cols)`
    fn size(&self) -> Result<(usize, usize), TerminalError>;

    fn clear(&mut self) -> Result<(), TerminalError>;

    fn move_to(&mut self, row: usize, col: usize) -> Result<(), TerminalError>;

    /// Write text at the cursor position, advancing the cursor
    fn put_str(&mut self, text: &str, style: Style) -> Result<(), TerminalError>;

    /// Make everything drawn since the last refresh visible
    fn refresh(&mut self) -> Result<(), TerminalError>;

    /// Block until the next key. `None` means input has ended.
    fn read_key(&mut self) -> Result<Option<Key>, TerminalError>;
}

/// Console terminal backed by crossterm.
///
/// Raw mode and the alternate screen are entered on construction and
/// restored on drop, on every exit path.
pub struct CrosstermTerminal {
    stdout: Stdout,
}

impl CrosstermTerminal {
    pub fn new() -> Result<Self, TerminalError> {
        let mut stdout = io::stdout();
        enable_raw_mode()?;
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(err.into());
        }
        Ok(Self { stdout })
    }

    fn translate(event: KeyEvent) -> Option<Key> {
        if event.kind != KeyEventKind::Press {
            return None;
        }
        match event.code {
            KeyCode::Char(ch)
                if ch.is_ascii() && !event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                Key::from_ascii(ch as u8)
            }
            KeyCode::Left => Some(Key::Left),
            KeyCode::Right => Some(Key::Right),
            KeyCode::Up => Some(Key::Up),
            KeyCode::Down => Some(Key::Down),
            KeyCode::Home => Some(Key::Home),
            KeyCode::End => Some(Key::End),
            KeyCode::Enter => Some(Key::Enter),
            KeyCode::Backspace => Some(Key::Backspace),
            KeyCode::Delete => Some(Key::Delete),
            KeyCode::Esc => Some(Key::Escape),
            KeyCode::Tab => Some(Key::Tab),
            _ => None,
        }
    }
}

impl Terminal for CrosstermTerminal {
    fn size(&self) -> Result<(usize, usize), TerminalError> {
        let (cols, rows) = crossterm::terminal::size()?;
        Ok((rows as usize, cols as usize))
    }

    fn clear(&mut self) -> Result<(), TerminalError> {
        queue!(self.stdout, ResetColor, Clear(ClearType::All))?;
        Ok(())
    }

    fn move_to(&mut self, row: usize, col: usize) -> Result<(), TerminalError> {
        let row = u16::try_from(row).unwrap_or(u16::MAX);
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        queue!(self.stdout, cursor::MoveTo(col, row))?;
        Ok(())
    }

    fn put_str(&mut self, text: &str, style: Style) -> Result<(), TerminalError> {
        let (fg, bg) = style.colors();
        queue!(
            self.stdout,
            SetForegroundColor(fg),
            SetBackgroundColor(bg),
            Print(text),
            ResetColor
        )?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), TerminalError> {
        self.stdout.flush()?;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Option<Key>, TerminalError> {
        loop {
            if let Event::Key(event) = event::read()? {
                if let Some(key) = Self::translate(event) {
                    return Ok(Some(key));
                }
            }
        }
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, ResetColor, LeaveAlternateScreen, cursor::Show);
        let _ = disable_raw_mode();
    }
}

/// In-memory terminal that replays queued keys.
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<(char, Style)>>,
    cursor: (usize, usize),
    keys: VecDeque<Key>,
    refreshes: usize,
}

impl ScriptedTerminal {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            grid: vec![vec![(' ', Style::Text); cols]; rows],
            cursor: (0, 0),
            keys: VecDeque::new(),
            refreshes: 0,
        }
    }

    pub fn with_keys(rows: usize, cols: usize, keys: impl IntoIterator<Item = Key>) -> Self {
        let mut term = Self::new(rows, cols);
        term.push_keys(keys);
        term
    }

    pub fn push_keys(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.keys.extend(keys);
    }

    /// Text of one screen row with trailing blanks removed
    pub fn row_text(&self, row: usize) -> String {
        self.grid
            .get(row)
            .map(|cells| cells.iter().map(|(ch, _)| *ch).collect::<String>())
            .unwrap_or_default()
            .trim_end()
            .to_string()
    }

    pub fn style_at(&self, row: usize, col: usize) -> Option<Style> {
        self.grid.get(row)?.get(col).map(|(_, style)| *style)
    }

    /// Cursor position as `(row, col)`
    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn refreshes(&self) -> usize {
        self.refreshes
    }

    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn size(&self) -> Result<(usize, usize), TerminalError> {
        Ok((self.rows, self.cols))
    }

    fn clear(&mut self) -> Result<(), TerminalError> {
        for row in &mut self.grid {
            row.fill((' ', Style::Text));
        }
        Ok(())
    }

    fn move_to(&mut self, row: usize, col: usize) -> Result<(), TerminalError> {
        self.cursor = (row, col);
        Ok(())
    }

    fn put_str(&mut self, text: &str, style: Style) -> Result<(), TerminalError> {
        let (row, mut col) = self.cursor;
        if let Some(cells) = self.grid.get_mut(row) {
            for ch in text.chars() {
                if let Some(cell) = cells.get_mut(col) {
                    *cell = (ch, style);
                }
                col += 1;
            }
        }
        self.cursor = (row, col.min(self.cols));
        Ok(())
    }

    fn refresh(&mut self) -> Result<(), TerminalError> {
        self.refreshes += 1;
        Ok(())
    }

    fn read_key(&mut self) -> Result<Option<Key>, TerminalError> {
        Ok(self.keys.pop_front())
    }
}

/// Keys produced by typing `text` on a plain keyboard
pub fn keys(text: &str) -> Vec<Key> {
    text.bytes().filter_map(Key::from_ascii).collect()
}
