//! Cheap metadata signatures for shallow comparison

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{Result, SyncError};

/// Size and modification time of a regular file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileSignature {
    /// Length in bytes
    pub size: u64,
    /// Last modification time
    pub modified: SystemTime,
}

impl FileSignature {
    /// Read the signature of a file, following symlinks
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub fn read(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|e| SyncError::io(path, e))?;
        let modified = metadata.modified().map_err(|e| SyncError::io(path, e))?;

        Ok(Self {
            size: metadata.len(),
            modified,
        })
    }
}
