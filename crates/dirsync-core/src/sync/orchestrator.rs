//! Sync orchestration - coordinates the passes of one synchronization

use std::fs;
use std::io;
use std::path::Path;

use tracing::{info, info_span, warn};

use super::SyncSummary;
use super::actions::{Pass, SyncActionResolver};
use super::executor::FileOperationExecutor;
use super::reporting::EventRecorder;
use crate::comparison::{DirectoryComparator, UpdatePolicy};
use crate::error::{Result, SyncError};
use crate::options::SyncOptions;
use crate::progress::{ProgressEvent, ProgressSink};
use crate::verify::Verifier;

/// Main sync engine.
///
/// Runs synchronously to completion and assumes exclusive access to both
/// trees for the duration of a call.
#[derive(Debug, Clone, Default)]
pub struct SyncEngine {
    options: SyncOptions,
}

impl SyncEngine {
    /// Create a new sync engine
    #[must_use]
    pub const fn new(options: SyncOptions) -> Self {
        Self { options }
    }

    /// Options this engine runs with
    #[must_use]
    pub const fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Synchronize `dest_root` with `source_root`.
    ///
    /// Creates the destination if needed, runs the forward pass, then the
    /// reverse pass when `two_way` is set, then hash verification when
    /// `hash_verify` is set. Events reach `sink` in completion order.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing, the destination cannot be
    /// created, or any copy/delete fails. The run stops at the first failure;
    /// completed actions are not rolled back.
    pub fn synchronize(
        &self,
        source_root: &Path,
        dest_root: &Path,
        sink: &mut dyn ProgressSink,
    ) -> Result<SyncSummary> {
        Self::check_source(source_root)?;

        info!(
            source = %source_root.display(),
            dest = %dest_root.display(),
            "starting synchronization"
        );

        let mut recorder = EventRecorder::new(&mut *sink, self.options.verbose);

        Self::ensure_destination(dest_root, &mut recorder)?;

        self.run_pass(Pass::Forward, source_root, dest_root, &mut recorder)?;
        if self.options.two_way {
            self.run_pass(Pass::Reverse, dest_root, source_root, &mut recorder)?;
        }

        let mut summary = recorder.into_summary();

        if self.options.hash_verify {
            summary.verification = Some(Verifier::verify(source_root, dest_root, sink));
        }

        info!(
            operations = summary.total_operations(),
            converged = summary.is_converged(),
            "synchronization finished"
        );

        Ok(summary)
    }

    fn check_source(source_root: &Path) -> Result<()> {
        match fs::metadata(source_root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(SyncError::NotADirectory {
                path: source_root.to_path_buf(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(SyncError::PathNotFound {
                path: source_root.to_path_buf(),
            }),
            Err(e) => Err(SyncError::io(source_root, e)),
        }
    }

    fn ensure_destination(dest_root: &Path, recorder: &mut EventRecorder<'_>) -> Result<()> {
        match fs::metadata(dest_root) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(SyncError::NotADirectory {
                path: dest_root.to_path_buf(),
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                FileOperationExecutor::create_directory(dest_root, recorder)
            }
            Err(e) => Err(SyncError::io(dest_root, e)),
        }
    }

    fn run_pass(
        &self,
        pass: Pass,
        source_root: &Path,
        target_root: &Path,
        recorder: &mut EventRecorder<'_>,
    ) -> Result<()> {
        let _span = info_span!("pass", %pass).entered();

        let mut reconciler = Reconciler {
            options: &self.options,
            policy: UpdatePolicy::from_options(&self.options),
            recorder,
        };
        reconciler.reconcile(source_root, target_root)
    }
}

/// Recursive walk over one pass, carrying options and the recorder so they
/// are not threaded through every call
struct Reconciler<'r, 'a> {
    options: &'r SyncOptions,
    policy: UpdatePolicy,
    recorder: &'r mut EventRecorder<'a>,
}

impl Reconciler<'_, '_> {
    /// Reconcile one directory level, then recurse into common subdirectories.
    ///
    /// Purge acts on the target-only names from this level's classification,
    /// taken before any copies were made.
    fn reconcile(&mut self, source_dir: &Path, target_dir: &Path) -> Result<()> {
        let classification = DirectoryComparator::classify(source_dir, target_dir)?;

        for name in &classification.type_conflicts {
            let source_path = source_dir.join(name);
            let target_path = target_dir.join(name);

            if self.options.strict_types {
                return Err(SyncError::TypeConflict {
                    source_path,
                    target_path,
                });
            }

            warn!(
                source = %source_path.display(),
                target = %target_path.display(),
                "skipping entry that is a file on one side and a directory on the other"
            );
            self.recorder.record(ProgressEvent::TypeConflictSkipped {
                source: source_path,
                target: target_path,
            });
        }

        for (name, kind) in &classification.left_only {
            let action = SyncActionResolver::copy_new(source_dir, target_dir, name, *kind);
            FileOperationExecutor::execute(&action, self.recorder)?;
        }

        for name in &classification.common_files {
            let source_path = source_dir.join(name);
            let target_path = target_dir.join(name);

            if self.policy.should_update(&source_path, &target_path)? {
                let action = SyncActionResolver::update(source_dir, target_dir, name);
                FileOperationExecutor::execute(&action, self.recorder)?;
            }
        }

        for name in &classification.common_dirs {
            self.reconcile(&source_dir.join(name), &target_dir.join(name))?;
        }

        if self.options.purge {
            for (name, kind) in &classification.right_only {
                let action = SyncActionResolver::purge(target_dir, name, *kind);
                FileOperationExecutor::execute(&action, self.recorder)?;
            }
        }

        Ok(())
    }
}
