use std::path::Path;
use std::process::ExitCode;

use dirsync_core::{FnSink, Verifier};

use super::{exit_code, print_event};

pub struct Verify;

impl Verify {
    pub fn execute(source: &Path, dest: &Path) -> anyhow::Result<ExitCode> {
        for root in [source, dest] {
            anyhow::ensure!(root.is_dir(), "Not a directory: {}", root.display());
        }

        let mut sink = FnSink::new(print_event);
        let report = Verifier::verify(source, dest, &mut sink);

        Ok(exit_code(report.all_matched))
    }
}
