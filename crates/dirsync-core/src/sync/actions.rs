//! Sync action determination logic

use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::comparison::EntryKind;

/// Which root is authoritative during a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Original source into original destination
    Forward,
    /// Original destination back into original source (two-way mode only)
    Reverse,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Reverse => f.write_str("reverse"),
        }
    }
}

/// Filesystem action decided for a single entry.
///
/// `source` is always on the authoritative side of the current pass and
/// `target` on the receiving side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// Copy a file absent on the target side
    CopyFile {
        /// File to copy
        source: PathBuf,
        /// Where it lands
        target: PathBuf,
    },
    /// Copy a whole subtree absent on the target side
    CopyDirectory {
        /// Directory to copy
        source: PathBuf,
        /// Where it lands
        target: PathBuf,
    },
    /// Overwrite a common file with the source side's copy
    UpdateFile {
        /// Authoritative copy
        source: PathBuf,
        /// File to overwrite
        target: PathBuf,
    },
    /// Purge a target-only file or special entry
    DeleteFile {
        /// Entry to remove
        target: PathBuf,
    },
    /// Purge a target-only directory and everything below it
    DeleteDirectory {
        /// Directory to remove
        target: PathBuf,
    },
    /// Leave alone an entry that is neither a file nor a directory
    SkipSpecial {
        /// The entry
        source: PathBuf,
    },
}

/// Maps classified names to actions
pub struct SyncActionResolver;

impl SyncActionResolver {
    /// Action for a name present only on the source side
    #[must_use]
    pub fn copy_new(
        source_dir: &Path,
        target_dir: &Path,
        name: &OsStr,
        kind: EntryKind,
    ) -> SyncAction {
        let source = source_dir.join(name);
        let target = target_dir.join(name);

        match kind {
            EntryKind::File => SyncAction::CopyFile { source, target },
            EntryKind::Directory => SyncAction::CopyDirectory { source, target },
            EntryKind::Special => SyncAction::SkipSpecial { source },
        }
    }

    /// Action for a name present only on the target side when purging
    #[must_use]
    pub fn purge(target_dir: &Path, name: &OsStr, kind: EntryKind) -> SyncAction {
        let target = target_dir.join(name);

        match kind {
            EntryKind::Directory => SyncAction::DeleteDirectory { target },
            EntryKind::File | EntryKind::Special => SyncAction::DeleteFile { target },
        }
    }

    /// Action for a common file the update policy selected
    #[must_use]
    pub fn update(source_dir: &Path, target_dir: &Path, name: &OsStr) -> SyncAction {
        SyncAction::UpdateFile {
            source: source_dir.join(name),
            target: target_dir.join(name),
        }
    }
}
