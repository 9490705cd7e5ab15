//! Tree classification and file comparison
//!
//! This module provides read-only analysis used by the reconciler:
//! - One-level classification of two directories' children
//! - The per-file update policy (force, content, or shallow metadata)
//! - Streaming SHA-256 digests for verification

mod directory;
mod hash;
mod policy;
mod signature;

pub use directory::{DirectoryComparator, EntryClassification, EntryKind};
pub use hash::{FileDigest, FileHasher};
pub use policy::UpdatePolicy;
pub use signature::FileSignature;
