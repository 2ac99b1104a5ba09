//! Language detection

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Active syntax rule set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub enum Language {
    /// Plain text, no highlighting or indentation rules
    #[default]
    None,
    C,
    Python,
    Asm,
}

impl Language {
    /// Detect a language from the filename suffix (case-sensitive).
    pub fn detect(filename: &str) -> Self {
        if filename.ends_with(".py") {
            Language::Python
        } else if filename.ends_with(".c") {
            Language::C
        } else if filename.ends_with(".asm") || filename.ends_with(".s") {
            Language::Asm
        } else {
            Language::None
        }
    }

    /// Language selected by a `:c` / `:p` / `:a` / `:n` command
    pub fn from_command(byte: u8) -> Option<Self> {
        match byte {
            b'c' => Some(Language::C),
            b'p' => Some(Language::Python),
            b'a' => Some(Language::Asm),
            b'n' => Some(Language::None),
            _ => None,
        }
    }

    /// Label shown in the status bar
    pub fn label(&self) -> &'static str {
        match self {
            Language::None => "Text",
            Language::C => "C",
            Language::Python => "Python",
            Language::Asm => "Assembly",
        }
    }
}
