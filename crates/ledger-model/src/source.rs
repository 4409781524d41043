//! Source files and per-file load outcomes.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Maximum number of characters kept from a load diagnostic.
pub const LOAD_ERROR_MESSAGE_LIMIT: usize = 100;

/// A discovered workbook: display name plus full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    pub name: String,
    pub path: PathBuf,
}

impl SourceFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self { name, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A non-fatal failure to load one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadError {
    pub file_name: String,
    /// Diagnostic clipped to [`LOAD_ERROR_MESSAGE_LIMIT`] characters.
    pub message: String,
}

impl LoadError {
    pub fn new(file_name: impl Into<String>, diagnostic: &str) -> Self {
        Self {
            file_name: file_name.into(),
            message: diagnostic.chars().take(LOAD_ERROR_MESSAGE_LIMIT).collect(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file_name, self.message)
    }
}

impl std::error::Error for LoadError {}

/// Advisory progress report emitted after each file is attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress<'a> {
    /// Number of files processed so far (1-based).
    pub processed: usize,
    pub total: usize,
    pub file_name: &'a str,
}

impl LoadProgress<'_> {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.processed as f64 / self.total as f64
        }
    }
}
