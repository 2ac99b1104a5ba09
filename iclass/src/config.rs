//! Editor configuration
//!
//! There are no configuration files: an [`EditorConfig`] is built from
//! defaults and the command line.

use std::path::PathBuf;

use clap::Parser;
use iclass_core::Capacity;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "iclass", version, about = "Modal terminal text editor with syntax highlighting")]
pub struct Args {
    /// File to open; its suffix selects the highlighting language.
    /// Non-UTF-8 names are accepted and converted lossily.
    pub file: Option<PathBuf>,

    /// Write logs to this file (logging is off without it)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `iclass=trace`
    #[arg(long, value_name = "LEVEL", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    pub capacity: Capacity,
    pub file: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            capacity: Capacity::default(),
            file: None,
            log_file: None,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl From<Args> for EditorConfig {
    fn from(args: Args) -> Self {
        Self {
            file: args.file.map(|path| path.to_string_lossy().into_owned()),
            log_file: args.log_file,
            log_level: args.log_level,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iclass_core::{MAX_COLS, MAX_LINES};

    fn parse(args: &[&str]) -> EditorConfig {
        Args::try_parse_from(args).unwrap().into()
    }

    #[test]
    fn test_defaults() {
        let config = parse(&["iclass"]);
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.capacity.max_lines, MAX_LINES);
        assert_eq!(config.capacity.max_cols, MAX_COLS);
    }

    #[test]
    fn test_file_argument() {
        let config = parse(&["iclass", "main.c"]);
        assert_eq!(config.file.as_deref(), Some("main.c"));
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_logging_flags() {
        let config = parse(&["iclass", "--log-file", "/tmp/iclass.log", "--log-level", "debug"]);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/iclass.log")));
        assert_eq!(config.log_level, "debug");
        assert!(config.file.is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_argument() {
        use std::ffi::OsString;
        use std::os::unix::ffi::OsStringExt;

        let name = OsString::from_vec(vec![b'a', 0xFF, b'.', b'c']);
        let args = Args::try_parse_from([OsString::from("iclass"), name]).unwrap();
        let config = EditorConfig::from(args);
        assert_eq!(config.file.as_deref(), Some("a\u{FFFD}.c"));
    }

    #[test]
    fn test_rejects_second_positional() {
        assert!(Args::try_parse_from(["iclass", "a.c", "b.c"]).is_err());
    }
}
