//! Platform-independent key representation

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Platform-independent key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Key {
    // Printable ASCII byte
    Char(u8),

    // Navigation
    Left,
    Right,
    Up,
    Down,
    Home,
    End,

    // Special keys
    Enter,
    Backspace,
    Delete,
    Escape,
    Tab,
}

impl Key {
    /// Convert a raw input byte to a key
    pub fn from_ascii(byte: u8) -> Option<Self> {
        match byte {
            0x1B => Some(Key::Escape),
            0x08 | 0x7F => Some(Key::Backspace),
            b'\r' | b'\n' => Some(Key::Enter),
            b'\t' => Some(Key::Tab),
            ch if (0x20..0x7F).contains(&ch) => Some(Key::Char(ch)),
            _ => None,
        }
    }
}
