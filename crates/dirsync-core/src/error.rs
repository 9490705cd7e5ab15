//! Error types for the sync engine.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using [`SyncError`]
pub type Result<T, E = SyncError> = std::result::Result<T, E>;

/// Errors that abort a synchronization.
///
/// Every variant carries the path that caused the failure so front-ends can
/// present it directly.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The source root does not exist.
    #[error("source directory not found: {}", path.display())]
    PathNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// A root exists but is not a directory.
    #[error("not a directory: {}", path.display())]
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// The destination root or a subdirectory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    DirectoryCreateFailed {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },

    /// Reading, copying, or deleting a path failed mid-traversal.
    #[error("I/O failure at {}: {source}", path.display())]
    Io {
        /// Path the operation was acting on.
        path: PathBuf,
        /// Underlying cause.
        source: io::Error,
    },

    /// The same name is a file on one side and a directory on the other.
    ///
    /// Only raised when `strict_types` is enabled; otherwise the entry is
    /// skipped with a warning event.
    #[error(
        "type conflict: {} and {} are not the same kind of entry",
        source_path.display(),
        target_path.display()
    )]
    TypeConflict {
        /// Entry on the authoritative side of the pass.
        source_path: PathBuf,
        /// Entry on the receiving side of the pass.
        target_path: PathBuf,
    },
}

impl SyncError {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Wrap a directory creation failure.
    pub fn create_dir(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::DirectoryCreateFailed {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// The path this error refers to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::PathNotFound { path }
            | Self::NotADirectory { path }
            | Self::DirectoryCreateFailed { path, .. }
            | Self::Io { path, .. } => path,
            Self::TypeConflict { target_path, .. } => target_path,
        }
    }
}
