//! Command-line parsing
//!
//! Commands are selected by their first byte; anything after it is ignored
//! except the `!` of `:q!` and the file name of `:w <file>`.

use alloc::string::String;

use crate::language::Language;

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Save, optionally under a new file name
    Write { path: Option<String> },
    /// Quit editor
    Quit { force: bool },
    /// Show the help screen
    Help,
    /// Switch highlighting rules
    SetLanguage(Language),
    /// Unknown command
    Unknown(String),
}

/// Parse command string (without leading ':')
pub fn parse_command(cmd_str: &str) -> Command {
    let bytes = cmd_str.as_bytes();
    let Some(&first) = bytes.first() else {
        return Command::Unknown(String::new());
    };

    match first {
        b'w' => {
            let rest = &cmd_str[1..];
            let path = rest.trim();
            if rest.starts_with(' ') && !path.is_empty() {
                Command::Write {
                    path: Some(path.into()),
                }
            } else {
                Command::Write { path: None }
            }
        }
        b'q' => Command::Quit {
            force: bytes.get(1) == Some(&b'!'),
        },
        b'h' => Command::Help,
        other => match Language::from_command(other) {
            Some(language) => Command::SetLanguage(language),
            None => Command::Unknown(cmd_str.into()),
        },
    }
}
