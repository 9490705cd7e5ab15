//! One-level directory classification
//!
//! Compares the immediate children of two directories by name. Nothing below
//! the first level is read; the reconciler recurses on its own so that each
//! level is classified against live filesystem state.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use crate::error::{Result, SyncError};

/// Kind of a directory entry, following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Anything else: broken symlinks, sockets, FIFOs, devices
    Special,
}

impl EntryKind {
    /// Determine the kind of `path`.
    ///
    /// Unreadable metadata (a dangling symlink, for instance) is `Special`.
    #[must_use]
    pub fn of(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Self::Directory,
            Ok(meta) if meta.is_file() => Self::File,
            _ => Self::Special,
        }
    }
}

/// Classification of two directories' immediate children.
///
/// Every name seen on either side lands in exactly one of the five
/// collections. Names are kept sorted so that actions run in a stable order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryClassification {
    /// Names present only in the left directory, with their kind
    pub left_only: BTreeMap<OsString, EntryKind>,
    /// Names present only in the right directory, with their kind
    pub right_only: BTreeMap<OsString, EntryKind>,
    /// Names that are regular files on both sides
    pub common_files: BTreeSet<OsString>,
    /// Names that are directories on both sides
    pub common_dirs: BTreeSet<OsString>,
    /// Names present on both sides whose kinds differ, or that are special
    pub type_conflicts: BTreeSet<OsString>,
}

impl EntryClassification {
    /// Total number of distinct names across both directories
    #[must_use]
    pub fn len(&self) -> usize {
        self.left_only.len()
            + self.right_only.len()
            + self.common_files.len()
            + self.common_dirs.len()
            + self.type_conflicts.len()
    }

    /// Whether both directories are empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Directory comparator for single-level classification
pub struct DirectoryComparator;

impl DirectoryComparator {
    /// Classify the immediate children of `left` and `right`
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Io`] if either path is not a readable directory.
    pub fn classify(left: &Path, right: &Path) -> Result<EntryClassification> {
        let left_entries = Self::list_children(left)?;
        let mut right_entries = Self::list_children(right)?;

        let mut classification = EntryClassification::default();

        for (name, left_kind) in left_entries {
            match right_entries.remove(&name) {
                None => {
                    classification.left_only.insert(name, left_kind);
                }
                Some(right_kind) => match (left_kind, right_kind) {
                    (EntryKind::File, EntryKind::File) => {
                        classification.common_files.insert(name);
                    }
                    (EntryKind::Directory, EntryKind::Directory) => {
                        classification.common_dirs.insert(name);
                    }
                    _ => {
                        classification.type_conflicts.insert(name);
                    }
                },
            }
        }

        classification.right_only = right_entries;

        Ok(classification)
    }

    /// Read the names and kinds of a directory's children
    fn list_children(dir: &Path) -> Result<BTreeMap<OsString, EntryKind>> {
        let mut children = BTreeMap::new();

        for entry in fs::read_dir(dir).map_err(|e| SyncError::io(dir, e))? {
            let entry = entry.map_err(|e| SyncError::io(dir, e))?;
            let kind = EntryKind::of(&entry.path());
            children.insert(entry.file_name(), kind);
        }

        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf) {
        let tmp = TempDir::new().unwrap();
        let left = tmp.path().join("left");
        let right = tmp.path().join("right");
        fs::create_dir(&left).unwrap();
        fs::create_dir(&right).unwrap();
        (tmp, left, right)
    }

    #[test]
    fn test_classify_partitions_names() {
        let (_tmp, left, right) = setup();

        fs::write(left.join("only_left.txt"), "l").unwrap();
        fs::create_dir(left.join("only_left_dir")).unwrap();
        fs::write(right.join("only_right.txt"), "r").unwrap();
        fs::write(left.join("both.txt"), "1").unwrap();
        fs::write(right.join("both.txt"), "2").unwrap();
        fs::create_dir(left.join("shared")).unwrap();
        fs::create_dir(right.join("shared")).unwrap();

        let result = DirectoryComparator::classify(&left, &right).unwrap();

        assert_eq!(result.left_only.len(), 2);
        assert_eq!(
            result.left_only.get(&OsString::from("only_left.txt")),
            Some(&EntryKind::File)
        );
        assert_eq!(
            result.left_only.get(&OsString::from("only_left_dir")),
            Some(&EntryKind::Directory)
        );
        assert_eq!(result.right_only.len(), 1);
        assert!(result.right_only.contains_key(&OsString::from("only_right.txt")));
        assert!(result.common_files.contains(&OsString::from("both.txt")));
        assert!(result.common_dirs.contains(&OsString::from("shared")));
        assert!(result.type_conflicts.is_empty());
        assert_eq!(result.len(), 5);
    }

    #[test]
    fn test_classify_does_not_descend() {
        let (_tmp, left, right) = setup();

        fs::create_dir_all(left.join("sub/deeper")).unwrap();
        fs::create_dir(right.join("sub")).unwrap();
        fs::write(left.join("sub/deeper/file.txt"), "x").unwrap();

        let result = DirectoryComparator::classify(&left, &right).unwrap();

        assert_eq!(result.len(), 1);
        assert!(result.common_dirs.contains(&OsString::from("sub")));
    }

    #[test]
    fn test_classify_type_conflict() {
        let (_tmp, left, right) = setup();

        fs::write(left.join("thing"), "file").unwrap();
        fs::create_dir(right.join("thing")).unwrap();

        let result = DirectoryComparator::classify(&left, &right).unwrap();

        assert!(result.type_conflicts.contains(&OsString::from("thing")));
        assert!(result.left_only.is_empty());
        assert!(result.right_only.is_empty());
        assert!(result.common_files.is_empty());
        assert!(result.common_dirs.is_empty());
    }

    #[test]
    fn test_classify_empty_directories() {
        let (_tmp, left, right) = setup();

        let result = DirectoryComparator::classify(&left, &right).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_classify_missing_directory_fails() {
        let (tmp, left, _right) = setup();
        let missing = tmp.path().join("missing");

        let err = DirectoryComparator::classify(&left, &missing).unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
        assert_eq!(err.path(), missing.as_path());
    }

    #[test]
    fn test_classify_file_instead_of_directory_fails() {
        let (tmp, left, _right) = setup();
        let file = tmp.path().join("plain.txt");
        fs::write(&file, "not a dir").unwrap();

        assert!(DirectoryComparator::classify(&file, &left).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_special() {
        let (_tmp, left, right) = setup();
        std::os::unix::fs::symlink(left.join("nowhere"), left.join("dangling")).unwrap();

        let result = DirectoryComparator::classify(&left, &right).unwrap();
        assert_eq!(
            result.left_only.get(&OsString::from("dangling")),
            Some(&EntryKind::Special)
        );
    }
}
