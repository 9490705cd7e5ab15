//! File operations executor

use std::fs;
use std::path::Path;

use filetime::FileTime;
use tracing::warn;

use super::actions::SyncAction;
use super::reporting::EventRecorder;
use crate::comparison::EntryKind;
use crate::error::{Result, SyncError};
use crate::progress::ProgressEvent;

/// Executes sync actions against the filesystem.
///
/// There is no journal: an error part-way through a subtree copy leaves
/// whatever was already written in place.
pub struct FileOperationExecutor;

impl FileOperationExecutor {
    /// Execute a sync action, recording one event per completed step
    ///
    /// # Errors
    ///
    /// Returns an error if a file operation fails.
    pub fn execute(action: &SyncAction, recorder: &mut EventRecorder<'_>) -> Result<()> {
        match action {
            SyncAction::CopyFile { source, target } => {
                Self::copy_file(source, target)?;
                recorder.record(ProgressEvent::FileCopied {
                    from: source.clone(),
                    to: target.clone(),
                });
            }
            SyncAction::CopyDirectory { source, target } => {
                Self::copy_directory(source, target, recorder)?;
            }
            SyncAction::UpdateFile { source, target } => {
                Self::copy_file(source, target)?;
                recorder.record(ProgressEvent::FileUpdated {
                    from: source.clone(),
                    to: target.clone(),
                });
            }
            SyncAction::DeleteFile { target } => {
                fs::remove_file(target).map_err(|e| SyncError::io(target, e))?;
                recorder.record(ProgressEvent::FileDeleted {
                    path: target.clone(),
                });
            }
            SyncAction::DeleteDirectory { target } => {
                // Does not follow a symlinked directory; the link itself is removed
                fs::remove_dir_all(target).map_err(|e| SyncError::io(target, e))?;
                recorder.record(ProgressEvent::DirectoryDeleted {
                    path: target.clone(),
                });
            }
            SyncAction::SkipSpecial { source } => {
                warn!(
                    path = %source.display(),
                    "skipping entry that is neither a file nor a directory"
                );
                recorder.record(ProgressEvent::SpecialEntrySkipped {
                    path: source.clone(),
                });
            }
        }
        Ok(())
    }

    /// Create a directory and any missing parents
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::DirectoryCreateFailed`] if creation fails.
    pub fn create_directory(path: &Path, recorder: &mut EventRecorder<'_>) -> Result<()> {
        fs::create_dir_all(path).map_err(|e| SyncError::create_dir(path, e))?;
        recorder.record(ProgressEvent::DirectoryCreated {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    /// Copy a file, overwriting the destination and carrying over its timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the destination written.
    pub fn copy_file(source: &Path, dest: &Path) -> Result<()> {
        let metadata = fs::metadata(source).map_err(|e| SyncError::io(source, e))?;

        fs::copy(source, dest).map_err(|e| SyncError::io(dest, e))?;

        let mtime = FileTime::from_last_modification_time(&metadata);
        let atime = FileTime::from_last_access_time(&metadata);
        filetime::set_file_times(dest, atime, mtime).map_err(|e| SyncError::io(dest, e))?;

        Ok(())
    }

    /// Copy a directory recursively, in name order.
    ///
    /// The source is listed before `dest` is created, so a destination nested
    /// inside the source is not copied into itself.
    fn copy_directory(
        source: &Path,
        dest: &Path,
        recorder: &mut EventRecorder<'_>,
    ) -> Result<()> {
        let mut entries = fs::read_dir(source)
            .map_err(|e| SyncError::io(source, e))?
            .map(|entry| entry.map(|e| e.file_name()))
            .collect::<std::io::Result<Vec<_>>>()
            .map_err(|e| SyncError::io(source, e))?;
        entries.sort();

        Self::create_directory(dest, recorder)?;

        for name in entries {
            let path = source.join(&name);
            let dest_path = dest.join(&name);

            match EntryKind::of(&path) {
                EntryKind::Directory => Self::copy_directory(&path, &dest_path, recorder)?,
                EntryKind::File => {
                    Self::copy_file(&path, &dest_path)?;
                    recorder.record(ProgressEvent::FileCopied {
                        from: path,
                        to: dest_path,
                    });
                }
                EntryKind::Special => {
                    Self::execute(&SyncAction::SkipSpecial { source: path }, recorder)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressSink;
    use std::fs;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn run(action: &SyncAction) -> (Result<()>, Vec<ProgressEvent>) {
        let mut events: Vec<ProgressEvent> = Vec::new();
        let result = {
            let sink: &mut dyn ProgressSink = &mut events;
            let mut recorder = EventRecorder::new(sink, true);
            FileOperationExecutor::execute(action, &mut recorder)
        };
        (result, events)
    }

    #[test]
    fn test_copy_directory_nested() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");

        fs::create_dir_all(src.join("subdir")).unwrap();
        fs::write(src.join("root.txt"), "root").unwrap();
        fs::write(src.join("subdir/nested.txt"), "nested").unwrap();

        let (result, events) = run(&SyncAction::CopyDirectory {
            source: src.clone(),
            target: dst.clone(),
        });
        result.unwrap();

        assert_eq!(fs::read_to_string(dst.join("root.txt")).unwrap(), "root");
        assert_eq!(
            fs::read_to_string(dst.join("subdir/nested.txt")).unwrap(),
            "nested"
        );
        // dst, root.txt, subdir, subdir/nested.txt
        assert_eq!(
            events,
            vec![
                ProgressEvent::DirectoryCreated { path: dst.clone() },
                ProgressEvent::FileCopied {
                    from: src.join("root.txt"),
                    to: dst.join("root.txt"),
                },
                ProgressEvent::DirectoryCreated {
                    path: dst.join("subdir"),
                },
                ProgressEvent::FileCopied {
                    from: src.join("subdir/nested.txt"),
                    to: dst.join("subdir/nested.txt"),
                },
            ]
        );
    }

    #[test]
    fn test_copy_directory_empty() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir(&src).unwrap();

        let (result, events) = run(&SyncAction::CopyDirectory {
            source: src,
            target: dst.clone(),
        });
        result.unwrap();

        assert!(dst.is_dir());
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_copy_file_preserves_mtime() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("b.txt");
        fs::write(&src, "data").unwrap();
        let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_500_000_000);
        filetime::set_file_mtime(&src, FileTime::from_system_time(stamp)).unwrap();

        FileOperationExecutor::copy_file(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "data");
        assert_eq!(fs::metadata(&dst).unwrap().modified().unwrap(), stamp);
    }

    #[test]
    fn test_copy_file_overwrites() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("b.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old content").unwrap();

        let (result, events) = run(&SyncAction::UpdateFile {
            source: src.clone(),
            target: dst.clone(),
        });
        result.unwrap();

        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
        assert_eq!(
            events,
            vec![ProgressEvent::FileUpdated { from: src, to: dst }]
        );
    }

    #[test]
    fn test_copy_missing_source_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("vanished.txt");
        let dst = tmp.path().join("b.txt");

        let (result, events) = run(&SyncAction::CopyFile {
            source: src.clone(),
            target: dst,
        });

        let err = result.unwrap_err();
        assert!(matches!(err, SyncError::Io { .. }));
        assert_eq!(err.path(), src.as_path());
        assert!(events.is_empty());
    }

    #[test]
    fn test_delete_directory_recursively() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("old");
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("inner/file.txt"), "x").unwrap();

        let (result, events) = run(&SyncAction::DeleteDirectory {
            target: dir.clone(),
        });
        result.unwrap();

        assert!(!dir.exists());
        assert_eq!(events, vec![ProgressEvent::DirectoryDeleted { path: dir }]);
    }

    #[test]
    fn test_create_directory_under_file_fails() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("plain");
        fs::write(&file, "x").unwrap();

        let mut events: Vec<ProgressEvent> = Vec::new();
        let mut recorder = EventRecorder::new(&mut events, true);
        let err = FileOperationExecutor::create_directory(&file.join("child"), &mut recorder)
            .unwrap_err();

        assert!(matches!(err, SyncError::DirectoryCreateFailed { .. }));
    }
}
