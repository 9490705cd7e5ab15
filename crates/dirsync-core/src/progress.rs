//! Progress events and sinks.
//!
//! The engine reports each completed action to a caller-owned
//! [`ProgressSink`]. Events are emitted synchronously, in the order the
//! underlying actions complete. Buffering and display belong to the sink.

use std::fmt;
use std::path::PathBuf;

use crate::comparison::FileDigest;
use crate::verify::Side;

/// A single completed action, rendered as a human-readable line via `Display`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    /// A directory was created on the receiving side
    DirectoryCreated {
        /// Created directory
        path: PathBuf,
    },
    /// A file absent on the receiving side was copied
    FileCopied {
        /// Copy origin
        from: PathBuf,
        /// Copy destination
        to: PathBuf,
    },
    /// A file present on both sides was overwritten
    FileUpdated {
        /// Copy origin (the authoritative side of the pass)
        from: PathBuf,
        /// Overwritten file
        to: PathBuf,
    },
    /// A purged file
    FileDeleted {
        /// Removed file
        path: PathBuf,
    },
    /// A purged directory, removed with its contents
    DirectoryDeleted {
        /// Removed directory
        path: PathBuf,
    },
    /// A name that is a file on one side and a directory on the other was left alone
    TypeConflictSkipped {
        /// Entry on the authoritative side
        source: PathBuf,
        /// Entry on the receiving side
        target: PathBuf,
    },
    /// An entry that is neither a regular file nor a directory was left alone
    SpecialEntrySkipped {
        /// The skipped entry
        path: PathBuf,
    },
    /// Both sides hold identical content for a relative path
    HashMatch {
        /// Path relative to both roots
        path: PathBuf,
        /// Shared digest
        digest: FileDigest,
    },
    /// Both sides hold the path but the contents differ
    HashMismatch {
        /// Path relative to both roots
        path: PathBuf,
        /// Digest on the source side
        source: FileDigest,
        /// Digest on the destination side
        destination: FileDigest,
    },
    /// The path exists on only one side
    MissingOnOneSide {
        /// Path relative to the root it was found under
        path: PathBuf,
        /// Side the file is missing from
        missing_from: Side,
    },
    /// A file could not be hashed
    HashUnreadable {
        /// Path relative to both roots
        path: PathBuf,
        /// Error description
        message: String,
    },
    /// Final verification verdict
    VerificationSummary {
        /// Whether every path matched
        all_matched: bool,
    },
}

impl fmt::Display for ProgressEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectoryCreated { path } => {
                write!(f, "Created directory: {}", path.display())
            }
            Self::FileCopied { from, to } => {
                write!(f, "Copied file: {} to {}", from.display(), to.display())
            }
            Self::FileUpdated { from, to } => {
                write!(f, "Updated file: {} to {}", from.display(), to.display())
            }
            Self::FileDeleted { path } => write!(f, "Deleted file: {}", path.display()),
            Self::DirectoryDeleted { path } => {
                write!(f, "Deleted directory: {}", path.display())
            }
            Self::TypeConflictSkipped { source, target } => write!(
                f,
                "Skipped type conflict: {} and {} are not the same kind of entry",
                source.display(),
                target.display()
            ),
            Self::SpecialEntrySkipped { path } => {
                write!(f, "Skipped special entry: {}", path.display())
            }
            Self::HashMatch { path, digest } => {
                write!(f, "Hash match for {}: {digest}", path.display())
            }
            Self::HashMismatch {
                path,
                source,
                destination,
            } => write!(
                f,
                "Hash mismatch for {}: {source} (source) vs {destination} (destination)",
                path.display()
            ),
            Self::MissingOnOneSide { path, missing_from } => write!(
                f,
                "File {} is not present in both source and destination (missing from {missing_from})",
                path.display()
            ),
            Self::HashUnreadable { path, message } => {
                write!(f, "Could not hash {}: {message}", path.display())
            }
            Self::VerificationSummary { all_matched: true } => {
                f.write_str("All files are synchronized (hashes match).")
            }
            Self::VerificationSummary { all_matched: false } => {
                f.write_str("Some files are not synchronized (hashes do not match).")
            }
        }
    }
}

impl ProgressEvent {
    /// Whether this event reports a filesystem mutation
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::DirectoryCreated { .. }
                | Self::FileCopied { .. }
                | Self::FileUpdated { .. }
                | Self::FileDeleted { .. }
                | Self::DirectoryDeleted { .. }
        )
    }
}

/// Receiver for progress events, owned by the caller.
pub trait ProgressSink {
    /// Called once per completed action
    fn emit(&mut self, event: &ProgressEvent);
}

/// A sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl ProgressSink for NoOpSink {
    fn emit(&mut self, _event: &ProgressEvent) {}
}

/// A sink that forwards each event to a closure.
pub struct FnSink<F> {
    callback: F,
}

impl<F> FnSink<F>
where
    F: FnMut(&ProgressEvent),
{
    /// Wrap a closure as a sink
    pub const fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressSink for FnSink<F>
where
    F: FnMut(&ProgressEvent),
{
    fn emit(&mut self, event: &ProgressEvent) {
        (self.callback)(event);
    }
}

/// Collects events in order.
impl ProgressSink for Vec<ProgressEvent> {
    fn emit(&mut self, event: &ProgressEvent) {
        self.push(event.clone());
    }
}

impl<S: ProgressSink + ?Sized> ProgressSink for &mut S {
    fn emit(&mut self, event: &ProgressEvent) {
        (**self).emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_lines() {
        let event = ProgressEvent::FileUpdated {
            from: PathBuf::from("src/a.txt"),
            to: PathBuf::from("dst/a.txt"),
        };
        assert_eq!(event.to_string(), "Updated file: src/a.txt to dst/a.txt");

        let event = ProgressEvent::VerificationSummary { all_matched: true };
        assert_eq!(
            event.to_string(),
            "All files are synchronized (hashes match)."
        );
    }

    #[test]
    fn test_mutation_classification() {
        assert!(
            ProgressEvent::FileDeleted {
                path: PathBuf::from("x")
            }
            .is_mutation()
        );
        assert!(!ProgressEvent::VerificationSummary { all_matched: false }.is_mutation());
    }

    #[test]
    fn test_fn_sink_forwards_rendered_lines() {
        let mut lines = Vec::new();
        {
            let mut sink = FnSink::new(|event: &ProgressEvent| lines.push(event.to_string()));
            sink.emit(&ProgressEvent::DirectoryCreated {
                path: PathBuf::from("out"),
            });
        }
        assert_eq!(lines, vec!["Created directory: out".to_string()]);
    }

    #[test]
    fn test_vec_sink_collects_in_order() {
        let mut events: Vec<ProgressEvent> = Vec::new();
        events.emit(&ProgressEvent::FileDeleted {
            path: PathBuf::from("a"),
        });
        events.emit(&ProgressEvent::FileDeleted {
            path: PathBuf::from("b"),
        });
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            ProgressEvent::FileDeleted {
                path: PathBuf::from("b")
            }
        );
    }
}
