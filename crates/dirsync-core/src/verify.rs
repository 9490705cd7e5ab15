//! Hash verification of two synchronized trees
//!
//! Walks both trees in full, hashes every file present on both sides, and
//! reports per-path results plus an overall verdict. Never modifies the
//! filesystem and never fails: unreadable files are recorded in the report.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::comparison::{FileDigest, FileHasher};
use crate::progress::{ProgressEvent, ProgressSink};

/// One of the two roots being verified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The original source root
    Source,
    /// The original destination root
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Outcome for a single relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationStatus {
    /// Both digests are equal
    Match,
    /// Both files exist with different digests
    Mismatch,
    /// The file exists on only one side
    Missing {
        /// Side without the file
        missing_from: Side,
    },
    /// The file could not be read on at least one side
    Unreadable {
        /// Error description
        message: String,
    },
}

/// Verification result for one relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileVerification {
    /// Path relative to both roots
    pub relative_path: PathBuf,
    /// Digest under the source root, if the file exists and was readable
    pub source_digest: Option<FileDigest>,
    /// Digest under the destination root, if the file exists and was readable
    pub destination_digest: Option<FileDigest>,
    /// Comparison outcome
    pub status: VerificationStatus,
}

impl FileVerification {
    /// Whether both sides hold identical content
    #[must_use]
    pub fn is_match(&self) -> bool {
        self.status == VerificationStatus::Match
    }
}

/// Result of verifying two trees
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationReport {
    /// Per-path results, sorted by relative path
    pub files: Vec<FileVerification>,
    /// True when every path matched
    pub all_matched: bool,
}

impl VerificationReport {
    /// Look up the result for a relative path
    #[must_use]
    pub fn get(&self, relative_path: &Path) -> Option<&FileVerification> {
        self.files
            .iter()
            .find(|file| file.relative_path == relative_path)
    }

    /// Results that did not match
    pub fn mismatches(&self) -> impl Iterator<Item = &FileVerification> {
        self.files.iter().filter(|file| !file.is_match())
    }
}

/// Files found under one root, plus walk failures keyed by relative path
struct TreeListing {
    files: BTreeSet<PathBuf>,
    failures: Vec<(PathBuf, String)>,
}

/// Post-sync hash verifier
pub struct Verifier;

impl Verifier {
    /// Verify that `source_root` and `dest_root` hold the same files.
    ///
    /// Emits one event per compared path and a final summary event to
    /// `sink`, regardless of verbosity.
    pub fn verify(
        source_root: &Path,
        dest_root: &Path,
        sink: &mut dyn ProgressSink,
    ) -> VerificationReport {
        let source = Self::collect_files(source_root);
        let dest = Self::collect_files(dest_root);

        let mut files = Vec::new();

        for (relative_path, message) in source.failures.into_iter().chain(dest.failures) {
            sink.emit(&ProgressEvent::HashUnreadable {
                path: relative_path.clone(),
                message: message.clone(),
            });
            files.push(FileVerification {
                relative_path,
                source_digest: None,
                destination_digest: None,
                status: VerificationStatus::Unreadable { message },
            });
        }

        for relative_path in source.files.union(&dest.files) {
            let (result, event) = match (
                source.files.contains(relative_path),
                dest.files.contains(relative_path),
            ) {
                (true, true) => Self::compare(source_root, dest_root, relative_path),
                (true, false) => Self::missing(relative_path, Side::Destination),
                (false, _) => Self::missing(relative_path, Side::Source),
            };

            sink.emit(&event);
            files.push(result);
        }

        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
        let all_matched = files.iter().all(FileVerification::is_match);

        sink.emit(&ProgressEvent::VerificationSummary { all_matched });
        if all_matched {
            debug!(files = files.len(), "verification passed");
        } else {
            warn!(
                mismatched = files.iter().filter(|f| !f.is_match()).count(),
                "verification found differences"
            );
        }

        VerificationReport { files, all_matched }
    }

    fn compare(
        source_root: &Path,
        dest_root: &Path,
        relative_path: &Path,
    ) -> (FileVerification, ProgressEvent) {
        let path = relative_path.to_path_buf();
        let source_digest = FileHasher::hash(&source_root.join(relative_path));
        let dest_digest = FileHasher::hash(&dest_root.join(relative_path));

        match (source_digest, dest_digest) {
            (Ok(source), Ok(destination)) => {
                let (status, event) = if source == destination {
                    (
                        VerificationStatus::Match,
                        ProgressEvent::HashMatch {
                            path: path.clone(),
                            digest: source,
                        },
                    )
                } else {
                    (
                        VerificationStatus::Mismatch,
                        ProgressEvent::HashMismatch {
                            path: path.clone(),
                            source,
                            destination,
                        },
                    )
                };
                let result = FileVerification {
                    relative_path: path,
                    source_digest: Some(source),
                    destination_digest: Some(destination),
                    status,
                };
                (result, event)
            }
            (source_digest, dest_digest) => {
                let message = [source_digest.as_ref().err(), dest_digest.as_ref().err()]
                    .into_iter()
                    .flatten()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                let event = ProgressEvent::HashUnreadable {
                    path: path.clone(),
                    message: message.clone(),
                };
                let result = FileVerification {
                    relative_path: path,
                    source_digest: source_digest.ok(),
                    destination_digest: dest_digest.ok(),
                    status: VerificationStatus::Unreadable { message },
                };
                (result, event)
            }
        }
    }

    fn missing(relative_path: &Path, missing_from: Side) -> (FileVerification, ProgressEvent) {
        let result = FileVerification {
            relative_path: relative_path.to_path_buf(),
            source_digest: None,
            destination_digest: None,
            status: VerificationStatus::Missing { missing_from },
        };
        let event = ProgressEvent::MissingOnOneSide {
            path: relative_path.to_path_buf(),
            missing_from,
        };
        (result, event)
    }

    /// Collect every file under `root`, following symlinks like the reconciler does
    fn collect_files(root: &Path) -> TreeListing {
        let mut listing = TreeListing {
            files: BTreeSet::new(),
            failures: Vec::new(),
        };

        for entry in WalkDir::new(root).follow_links(true) {
            match entry {
                Ok(entry) if entry.file_type().is_file() => {
                    if let Ok(relative) = entry.path().strip_prefix(root) {
                        listing.files.insert(relative.to_path_buf());
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    let relative = err
                        .path()
                        .and_then(|path| path.strip_prefix(root).ok())
                        .filter(|relative| !relative.as_os_str().is_empty())
                        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
                    warn!(root = %root.display(), error = %err, "failed to walk tree");
                    listing.failures.push((relative, err.to_string()));
                }
            }
        }

        listing
    }
}
