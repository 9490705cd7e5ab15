use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Directory Tree Synchronizer
///
/// Make a destination directory match a source directory, optionally in both
/// directions, purging extras and verifying the result by content hash
#[derive(Parser, Debug)]
#[command(name = "dirsync")]
#[command(about, long_about = None, version)]
pub struct Cli {
    /// Diagnostic log filter for stderr, e.g. `debug` (default: $RUST_LOG or `warn`)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Use specific config file
    #[arg(long, global = true, value_name = "PATH", env = "DIRSYNC_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ignore all config files
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Synchronize DEST with SOURCE
    Sync {
        /// Authoritative directory (must exist)
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Directory to bring in line with SOURCE (created if missing)
        #[arg(value_name = "DEST")]
        dest: PathBuf,

        #[command(flatten)]
        flags: SyncFlags,
    },

    /// Compare two trees by content hash without changing anything
    Verify {
        /// First tree, reported as "source"
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Second tree, reported as "destination"
        #[arg(value_name = "DEST")]
        dest: PathBuf,
    },

    /// Show the active config file and the option defaults it provides
    Config,
}

/// Sync switches. Each one set here turns the option on regardless of the
/// config file.
#[derive(Args, Debug, Default, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct SyncFlags {
    /// Print one line per copy, update, and delete
    #[arg(short, long)]
    pub verbose: bool,

    /// Delete destination entries that do not exist in the source
    #[arg(long)]
    pub purge: bool,

    /// Copy every common file, even when unchanged
    #[arg(long, alias = "forcecopy")]
    pub force_copy: bool,

    /// Compare file contents instead of size and modification time
    #[arg(long)]
    pub use_content: bool,

    /// Also copy destination changes back into the source
    #[arg(long, alias = "2sync")]
    pub two_way: bool,

    /// Verify both trees by content hash afterwards
    #[arg(long, alias = "hverify")]
    pub hash_verify: bool,

    /// Fail when a name is a file on one side and a directory on the other
    #[arg(long)]
    pub strict_types: bool,
}
