//! Error types for manifest building.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a manifest build.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The reference string could not be split into owner, repo and ref.
    #[error("Invalid GitHub reference '{input}', expected <user>/<repo>/<branch|commit>")]
    InvalidRef { input: String },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Path not found.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Root path is not a directory.
    #[error("Root path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

impl BuildError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Kind of build warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// A directory below the root could not be listed.
    ReadError,
    /// A file could not be stat'ed.
    MetadataError,
    /// A rule file exists but could not be read.
    IgnoreFileUnreadable,
    /// A file's raw URL did not resolve in hash mode.
    Unreachable,
}

/// Non-fatal warning encountered while building the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl BuildWarning {
    /// Create a new build warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a read error warning for an unlistable directory.
    pub fn read_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, format!("Read error: {error}"), WarningKind::ReadError)
    }

    /// Create a metadata warning for a file whose stat failed.
    pub fn metadata_error(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        Self::new(path, format!("Stat failed: {error}"), WarningKind::MetadataError)
    }

    /// Create an unreachable warning for a dropped file.
    pub fn unreachable(path: impl Into<PathBuf>, url: &str) -> Self {
        Self::new(path, format!("Not found at {url}"), WarningKind::Unreachable)
    }
}
