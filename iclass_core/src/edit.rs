//! Edit operations and cursor navigation
//!
//! Every edit returns `true` when the buffer changed. A refused edit (for
//! example one that would exceed the grid limits) leaves both the buffer
//! and the cursor untouched.

use alloc::vec::Vec;

use crate::buffer::{Position, TextBuffer};
use crate::language::Language;

const INDENT_WIDTH: usize = 4;

/// Printable ASCII, space included
pub fn is_printable(byte: u8) -> bool {
    (0x20..0x7F).contains(&byte)
}

/// Insert a printable byte at the cursor and advance past it.
pub fn insert_char(buffer: &mut TextBuffer, cursor: &mut Position, byte: u8) -> bool {
    if !is_printable(byte) || cursor.col >= buffer.capacity().max_cols.saturating_sub(2) {
        return false;
    }
    if !buffer.insert_byte(cursor.row, cursor.col, byte) {
        return false;
    }

    cursor.col += 1;
    true
}

/// Backspace: delete the byte left of the cursor, or join with the
/// previous line when the cursor is in column 0.
///
/// A join whose result would not fit on one line is refused.
pub fn delete_left(buffer: &mut TextBuffer, cursor: &mut Position) -> bool {
    if cursor.col > 0 {
        if !buffer.delete_byte(cursor.row, cursor.col - 1) {
            return false;
        }
        cursor.col -= 1;
        return true;
    }

    if cursor.row == 0 {
        return false;
    }

    let prev = cursor.row - 1;
    let joined_col = buffer.line_length(prev);
    if joined_col + buffer.line_length(cursor.row) > buffer.capacity().max_line_len() {
        return false;
    }

    let current: Vec<u8> = buffer.line(cursor.row).to_vec();
    buffer.append(prev, &current);
    buffer.shift_lines_up(cursor.row);
    *cursor = Position::new(prev, joined_col);
    true
}

/// Delete: remove the byte under the cursor.
pub fn delete_right(buffer: &mut TextBuffer, cursor: &Position) -> bool {
    buffer.delete_byte(cursor.row, cursor.col)
}

/// Enter: split the line at the cursor and move to the start of the new
/// line, after its auto-indent.
///
/// Refused on the last slot, and when the last slot holds content that the
/// shift would discard.
pub fn split_line(buffer: &mut TextBuffer, cursor: &mut Position, language: Language) -> bool {
    let last = buffer.line_count() - 1;
    if cursor.row >= last || !buffer.is_line_empty(last) {
        return false;
    }

    let row = cursor.row;
    buffer.shift_lines_down(row + 1);
    let tail = buffer.split_off(row, cursor.col);

    let room = buffer.capacity().max_line_len() - tail.len();
    let indent = auto_indent(buffer.line(row), language).min(room);
    for col in 0..indent {
        buffer.set_char(row + 1, col, b' ');
    }
    buffer.append(row + 1, &tail);

    *cursor = Position::new(row + 1, indent);
    true
}

/// Indentation for the line following `line`.
pub fn auto_indent(line: &[u8], language: Language) -> usize {
    let leading = line.iter().take_while(|b| **b == b' ').count();
    match language {
        Language::Python => {
            if line.last() == Some(&b':') {
                leading + INDENT_WIDTH
            } else {
                leading
            }
        }
        Language::C => {
            if line.contains(&b'{') {
                leading + INDENT_WIDTH
            } else if line.contains(&b'}') && leading >= INDENT_WIDTH {
                leading - INDENT_WIDTH
            } else {
                leading
            }
        }
        Language::Asm | Language::None => 0,
    }
}

pub fn move_left(cursor: &mut Position) {
    cursor.col = cursor.col.saturating_sub(1);
}

pub fn move_right(buffer: &TextBuffer, cursor: &mut Position) {
    let max_col = buffer.capacity().max_cols - 1;
    if cursor.col < buffer.line_length(cursor.row) && cursor.col < max_col {
        cursor.col += 1;
    }
}

pub fn move_up(buffer: &TextBuffer, cursor: &mut Position) {
    if cursor.row > 0 {
        cursor.row -= 1;
        clamp_col(buffer, cursor);
    }
}

/// Move down, but only onto a non-empty line.
pub fn move_down(buffer: &TextBuffer, cursor: &mut Position) {
    if cursor.row + 1 < buffer.line_count() && !buffer.is_line_empty(cursor.row + 1) {
        cursor.row += 1;
        clamp_col(buffer, cursor);
    }
}

pub fn move_home(cursor: &mut Position) {
    cursor.col = 0;
}

pub fn move_end(buffer: &TextBuffer, cursor: &mut Position) {
    cursor.col = buffer.line_length(cursor.row);
}

/// Clamp the column to the length of the cursor's line
pub fn clamp_col(buffer: &TextBuffer, cursor: &mut Position) {
    let line_len = buffer.line_length(cursor.row);
    if cursor.col > line_len {
        cursor.col = line_len;
    }
}
