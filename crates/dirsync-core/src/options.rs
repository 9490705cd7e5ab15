//! Sync options

use serde::{Deserialize, Serialize};

/// Options for one synchronization run.
///
/// Set once at invocation and read-only for the rest of the run. No option
/// depends on another, though `force_copy` makes `use_content` moot and
/// `two_way` runs the comparison twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct SyncOptions {
    /// Emit progress events for reconciliation actions
    pub verbose: bool,
    /// Delete target-side entries that are absent on the source side
    pub purge: bool,
    /// Copy common files unconditionally
    pub force_copy: bool,
    /// Compare file bytes instead of size and modification time
    pub use_content: bool,
    /// Also reconcile destination back into source
    pub two_way: bool,
    /// Run hash verification after reconciliation
    pub hash_verify: bool,
    /// Fail on file/directory type conflicts instead of skipping them
    pub strict_types: bool,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            verbose: true,
            purge: false,
            force_copy: false,
            use_content: false,
            two_way: false,
            hash_verify: false,
            strict_types: false,
        }
    }
}

impl SyncOptions {
    /// Create options with defaults (verbose on, everything else off)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `verbose`
    #[must_use]
    pub const fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set `purge`
    #[must_use]
    pub const fn with_purge(mut self, purge: bool) -> Self {
        self.purge = purge;
        self
    }

    /// Set `force_copy`
    #[must_use]
    pub const fn with_force_copy(mut self, force_copy: bool) -> Self {
        self.force_copy = force_copy;
        self
    }

    /// Set `use_content`
    #[must_use]
    pub const fn with_use_content(mut self, use_content: bool) -> Self {
        self.use_content = use_content;
        self
    }

    /// Set `two_way`
    #[must_use]
    pub const fn with_two_way(mut self, two_way: bool) -> Self {
        self.two_way = two_way;
        self
    }

    /// Set `hash_verify`
    #[must_use]
    pub const fn with_hash_verify(mut self, hash_verify: bool) -> Self {
        self.hash_verify = hash_verify;
        self
    }

    /// Set `strict_types`
    #[must_use]
    pub const fn with_strict_types(mut self, strict_types: bool) -> Self {
        self.strict_types = strict_types;
        self
    }
}
