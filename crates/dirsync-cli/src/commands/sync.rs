use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use dirsync_core::{FnSink, SyncEngine, SyncOptions, SyncReporter};

use super::{exit_code, print_event};

pub struct Synchronize;

impl Synchronize {
    pub fn execute(source: &Path, dest: &Path, options: SyncOptions) -> anyhow::Result<ExitCode> {
        tracing::debug!(?options, "resolved sync options");

        let engine = SyncEngine::new(options);
        let mut sink = FnSink::new(print_event);

        let summary = engine
            .synchronize(source, dest, &mut sink)
            .with_context(|| {
                format!(
                    "Failed to synchronize {} into {}",
                    source.display(),
                    dest.display()
                )
            })?;

        print!("{}", SyncReporter::generate_summary(&summary));

        Ok(exit_code(summary.is_converged()))
    }
}
