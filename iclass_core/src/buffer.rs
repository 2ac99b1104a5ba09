//! Text buffer and position types

use alloc::vec;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Default number of line slots in a document
pub const MAX_LINES: usize = 1000;

/// Default line width including the implicit terminator
pub const MAX_COLS: usize = 256;

/// Hard limits of the line grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Capacity {
    pub max_lines: usize,
    pub max_cols: usize,
}

impl Capacity {
    /// Limits below 2 lines or 3 columns are raised to that minimum.
    pub const fn new(max_lines: usize, max_cols: usize) -> Self {
        Self {
            max_lines: if max_lines < 2 { 2 } else { max_lines },
            max_cols: if max_cols < 3 { 3 } else { max_cols },
        }
    }

    /// Longest content a line may hold (one column is the terminator)
    pub const fn max_line_len(&self) -> usize {
        self.max_cols - 1
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Self::new(MAX_LINES, MAX_COLS)
    }
}

/// Cursor position in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub const fn zero() -> Self {
        Self { row: 0, col: 0 }
    }
}

/// Fixed-capacity grid of byte lines.
///
/// There are always exactly `max_lines` slots. A slot's length is its
/// content length; content never contains a NUL byte and never exceeds
/// `max_line_len()`. A line is "non-empty" when it holds at least one byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<Vec<u8>>,
    capacity: Capacity,
}

impl TextBuffer {
    pub fn new(capacity: Capacity) -> Self {
        Self {
            lines: vec![Vec::new(); capacity.max_lines],
            capacity,
        }
    }

    /// Build a buffer from raw file bytes.
    ///
    /// Lines are separated by `\n` (one newline stripped per line). Content
    /// after a NUL byte is dropped, a line wider than the grid continues on
    /// the following slots, and reading stops once every slot is filled.
    pub fn from_bytes(data: &[u8], capacity: Capacity) -> Self {
        let mut buffer = Self::new(capacity);
        let max_len = capacity.max_line_len();

        let mut pieces: Vec<&[u8]> = data.split(|b| *b == b'\n').collect();
        if data.is_empty() || data.ends_with(b"\n") {
            pieces.pop();
        }

        let mut row = 0;
        'outer: for piece in pieces {
            let content = match piece.iter().position(|b| *b == 0) {
                Some(nul) => &piece[..nul],
                None => piece,
            };

            if content.is_empty() {
                if row >= capacity.max_lines {
                    break;
                }
                row += 1;
                continue;
            }

            for chunk in content.chunks(max_len) {
                if row >= capacity.max_lines {
                    break 'outer;
                }
                buffer.lines[row].extend_from_slice(chunk);
                row += 1;
            }
        }

        buffer
    }

    /// Serialize lines `0..=last`, each followed by a single `\n`.
    pub fn to_bytes(&self, last: Option<usize>) -> Vec<u8> {
        let mut out = Vec::new();
        if let Some(last) = last {
            for line in self.lines.iter().take(last + 1) {
                out.extend_from_slice(line);
                out.push(b'\n');
            }
        }
        out
    }

    pub fn capacity(&self) -> Capacity {
        self.capacity
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Content of line `row`; out-of-range rows read as empty.
    pub fn line(&self, row: usize) -> &[u8] {
        self.lines.get(row).map(|l| l.as_slice()).unwrap_or(&[])
    }

    pub fn line_length(&self, row: usize) -> usize {
        self.line(row).len()
    }

    pub fn is_line_empty(&self, row: usize) -> bool {
        self.line(row).is_empty()
    }

    /// Index of the last non-empty line
    pub fn last_non_empty(&self) -> Option<usize> {
        self.lines.iter().rposition(|l| !l.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.last_non_empty().is_none()
    }

    /// Write `byte` at column `col` of line `row`.
    ///
    /// `col` may address an existing byte or the end of the line. Writing a
    /// NUL terminates the line at `col`.
    pub fn set_char(&mut self, row: usize, col: usize, byte: u8) -> bool {
        let max_len = self.capacity.max_line_len();
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };
        if col >= max_len || col > line.len() {
            return false;
        }

        if byte == 0 {
            line.truncate(col);
        } else if col == line.len() {
            line.push(byte);
        } else {
            line[col] = byte;
        }
        true
    }

    /// Insert `byte` at `col`, shifting the rest of the line right.
    /// Refuses when the line is full.
    pub fn insert_byte(&mut self, row: usize, col: usize, byte: u8) -> bool {
        let max_len = self.capacity.max_line_len();
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };
        if byte == 0 || col > line.len() || line.len() + 1 > max_len {
            return false;
        }

        line.insert(col, byte);
        true
    }

    /// Remove the byte at `col`, shifting the rest of the line left.
    pub fn delete_byte(&mut self, row: usize, col: usize) -> bool {
        let Some(line) = self.lines.get_mut(row) else {
            return false;
        };
        if col >= line.len() {
            return false;
        }

        line.remove(col);
        true
    }

    /// Open an empty slot at `start`, discarding the last line.
    pub fn shift_lines_down(&mut self, start: usize) -> bool {
        if start >= self.lines.len() {
            return false;
        }

        self.lines.pop();
        self.lines.insert(start, Vec::new());
        true
    }

    /// Remove line `start`, pulling later lines up and clearing the last slot.
    pub fn shift_lines_up(&mut self, start: usize) -> bool {
        if start >= self.lines.len() {
            return false;
        }

        self.lines.remove(start);
        self.lines.push(Vec::new());
        true
    }

    /// Cut line `row` at `col` and return the removed tail.
    pub fn split_off(&mut self, row: usize, col: usize) -> Vec<u8> {
        match self.lines.get_mut(row) {
            Some(line) if col <= line.len() => line.split_off(col),
            _ => Vec::new(),
        }
    }

    /// Append bytes to line `row`, silently truncating at the line limit.
    pub fn append(&mut self, row: usize, bytes: &[u8]) {
        let max_len = self.capacity.max_line_len();
        if let Some(line) = self.lines.get_mut(row) {
            let room = max_len.saturating_sub(line.len());
            let take = bytes.len().min(room);
            line.extend_from_slice(&bytes[..take]);
        }
    }

    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new(Capacity::default())
    }
}
