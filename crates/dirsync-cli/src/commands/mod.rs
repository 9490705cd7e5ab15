pub mod config;
pub mod sync;
pub mod verify;

pub use config::Config;
pub use sync::Synchronize;
pub use verify::Verify;

use std::process::ExitCode;

use dirsync_core::ProgressEvent;

/// Exit status reported when verification finds the trees differ
pub const EXIT_DIVERGED: u8 = 2;

/// Print a progress event as one stdout line
fn print_event(event: &ProgressEvent) {
    println!("{event}");
}

fn exit_code(converged: bool) -> ExitCode {
    if converged {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_DIVERGED)
    }
}
