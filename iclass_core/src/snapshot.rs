//! Editor snapshot for deterministic state comparison

use crate::{EditorMode, Language, Position};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

/// Observable editor state at one point in a key trace.
///
/// Only the live part of the document is captured: trailing empty slots
/// past the cursor are left out.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde_support", derive(Serialize, Deserialize))]
pub struct EditorSnapshot {
    pub mode: EditorMode,
    pub cursor: Position,
    pub language: Language,
    pub buffer_lines: Vec<Vec<u8>>,
    pub dirty: bool,
    pub filename: String,
    pub prompt: Option<String>,
    pub status_message: String,
    pub top_line: usize,
}

impl EditorSnapshot {
    /// Compute a deterministic hash of the snapshot state
    #[cfg(test)]
    pub fn hash(&self) -> u64 {
        use sha2::{Digest, Sha256};

        let mut hasher = Sha256::new();

        hasher.update([self.mode as u8, self.language as u8, self.dirty as u8]);
        hasher.update(self.cursor.row.to_le_bytes());
        hasher.update(self.cursor.col.to_le_bytes());
        hasher.update(self.top_line.to_le_bytes());

        for line in &self.buffer_lines {
            hasher.update(line);
            hasher.update(b"\n");
        }

        hasher.update(self.filename.as_bytes());
        if let Some(prompt) = &self.prompt {
            hasher.update(prompt.as_bytes());
        }
        hasher.update(self.status_message.as_bytes());

        let result = hasher.finalize();
        let bytes: [u8; 8] = result[..8].try_into().unwrap();
        u64::from_le_bytes(bytes)
    }
}
