//! Document I/O operations

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Document I/O error
#[derive(Debug, Error)]
pub enum IoError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IoError {
    pub fn path(&self) -> &Path {
        match self {
            IoError::Read { path, .. } | IoError::Write { path, .. } => path,
        }
    }
}

/// Where documents are loaded from and saved to.
///
/// Documents are addressed by the name the user typed; the store decides
/// how that name maps onto storage.
pub trait DocumentStore {
    fn load(&mut self, name: &str) -> Result<Vec<u8>, IoError>;
    fn save(&mut self, name: &str, content: &[u8]) -> Result<(), IoError>;
}

/// Filesystem-backed document store.
///
/// Relative names resolve against the process working directory, or
/// against `root` when one is given.
#[derive(Debug, Clone, Default)]
pub struct FsStore {
    root: Option<PathBuf>,
}

impl FsStore {
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(name),
            None => PathBuf::from(name),
        }
    }
}

impl DocumentStore for FsStore {
    fn load(&mut self, name: &str) -> Result<Vec<u8>, IoError> {
        let path = self.resolve(name);
        fs::read(&path).map_err(|source| IoError::Read { path, source })
    }

    fn save(&mut self, name: &str, content: &[u8]) -> Result<(), IoError> {
        let path = self.resolve(name);
        fs::write(&path, content).map_err(|source| IoError::Write { path, source })
    }
}
