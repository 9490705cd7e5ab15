//! Event recording and summary reporting

use std::fmt::Write;

use tracing::debug;

use super::SyncSummary;
use crate::progress::{ProgressEvent, ProgressSink};

/// Counts every reconciliation event and forwards it to the sink when verbose
pub struct EventRecorder<'a> {
    sink: &'a mut dyn ProgressSink,
    verbose: bool,
    summary: SyncSummary,
}

impl<'a> EventRecorder<'a> {
    /// Create a recorder writing to `sink`
    pub fn new(sink: &'a mut dyn ProgressSink, verbose: bool) -> Self {
        Self {
            sink,
            verbose,
            summary: SyncSummary::default(),
        }
    }

    /// Record a completed action
    pub fn record(&mut self, event: ProgressEvent) {
        debug!(%event, "sync event");
        self.summary.count(&event);
        if self.verbose {
            self.sink.emit(&event);
        }
    }

    /// Counts gathered so far
    #[must_use]
    pub const fn summary(&self) -> &SyncSummary {
        &self.summary
    }

    /// Finish recording and hand back the counts
    #[must_use]
    pub fn into_summary(self) -> SyncSummary {
        self.summary
    }
}

/// Sync operation reporter
pub struct SyncReporter;

impl SyncReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(summary: &SyncSummary) -> String {
        let mut output = String::new();

        output.push_str("\n=== Sync Summary ===\n");
        let _ = writeln!(output, "Directories created:  {}", summary.directories_created);
        let _ = writeln!(output, "Files copied:         {}", summary.files_copied);
        let _ = writeln!(output, "Files updated:        {}", summary.files_updated);
        let _ = writeln!(output, "Files deleted:        {}", summary.files_deleted);
        let _ = writeln!(output, "Directories deleted:  {}", summary.directories_deleted);

        if summary.type_conflicts > 0 || summary.special_skipped > 0 {
            let _ = writeln!(
                output,
                "Skipped:              {} (type conflicts: {}, special entries: {})",
                summary.type_conflicts + summary.special_skipped,
                summary.type_conflicts,
                summary.special_skipped
            );
        }

        let _ = writeln!(output, "\nTotal operations: {}", summary.total_operations());

        match &summary.verification {
            None => output.push_str("Status: ✓ Success\n"),
            Some(report) if report.all_matched => {
                let _ = writeln!(
                    output,
                    "Verification: ✓ {} file(s) match",
                    report.files.len()
                );
                output.push_str("Status: ✓ Success\n");
            }
            Some(report) => {
                let _ = writeln!(
                    output,
                    "Verification: ✗ {} of {} file(s) differ",
                    report.mismatches().count(),
                    report.files.len()
                );
                output.push_str("Status: ✗ Trees are not synchronized\n");
            }
        }

        output
    }
}
