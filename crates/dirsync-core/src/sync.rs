//! Tree synchronization engine
//!
//! A sync is a forward pass (source into destination), an optional reverse
//! pass with the roles swapped, and optional hash verification. Each pass
//! classifies one directory level at a time against live filesystem state,
//! copies source-only entries, updates common files per the update policy,
//! recurses into common directories, and finally purges target-only entries
//! when asked to.

mod actions;
mod executor;
mod orchestrator;
mod reporting;

// Public exports for front-end integration
pub use actions::{Pass, SyncAction};
pub use orchestrator::SyncEngine;
pub use reporting::SyncReporter;

use crate::progress::ProgressEvent;
use crate::verify::VerificationReport;

/// Synchronization result with statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Directories created, including the destination root
    pub directories_created: usize,
    /// Files copied because they were absent on the receiving side
    pub files_copied: usize,
    /// Common files overwritten
    pub files_updated: usize,
    /// Files (and special entries) purged
    pub files_deleted: usize,
    /// Directories purged
    pub directories_deleted: usize,
    /// Names skipped because their kinds differ between sides
    pub type_conflicts: usize,
    /// Entries skipped because they are neither files nor directories
    pub special_skipped: usize,
    /// Hash verification result, when it ran
    pub verification: Option<VerificationReport>,
}

impl SyncSummary {
    /// Total filesystem mutations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.directories_created
            + self.files_copied
            + self.files_updated
            + self.files_deleted
            + self.directories_deleted
    }

    /// False only when verification ran and found a difference
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.verification
            .as_ref()
            .is_none_or(|report| report.all_matched)
    }

    /// Tally one reconciliation event
    pub(crate) fn count(&mut self, event: &ProgressEvent) {
        match event {
            ProgressEvent::DirectoryCreated { .. } => self.directories_created += 1,
            ProgressEvent::FileCopied { .. } => self.files_copied += 1,
            ProgressEvent::FileUpdated { .. } => self.files_updated += 1,
            ProgressEvent::FileDeleted { .. } => self.files_deleted += 1,
            ProgressEvent::DirectoryDeleted { .. } => self.directories_deleted += 1,
            ProgressEvent::TypeConflictSkipped { .. } => self.type_conflicts += 1,
            ProgressEvent::SpecialEntrySkipped { .. } => self.special_skipped += 1,
            ProgressEvent::HashMatch { .. }
            | ProgressEvent::HashMismatch { .. }
            | ProgressEvent::MissingOnOneSide { .. }
            | ProgressEvent::HashUnreadable { .. }
            | ProgressEvent::VerificationSummary { .. } => {}
        }
    }
}
