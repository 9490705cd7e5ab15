//! # dirsync-core
//!
//! Core library for the dirsync directory synchronizer.
//!
//! This library reconciles two local directory trees so that the destination
//! (or, in two-way mode, both trees) matches the source, optionally purging
//! extraneous entries and verifying the result by content hash.
//!
//! Front-ends construct a [`SyncEngine`] from [`SyncOptions`] and pass a
//! [`ProgressSink`] that receives human-readable [`ProgressEvent`]s.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Typed errors returned by the engine
pub mod error;

/// Tree comparison and per-file update policy
pub mod comparison;

/// Immutable options carried through a sync run
pub mod options;

/// Progress events and the sink trait consumed by front-ends
pub mod progress;

/// Reconciliation passes and the engine entry point
pub mod sync;

/// Post-sync content hash verification
pub mod verify;

pub use error::{Result, SyncError};
pub use options::SyncOptions;
pub use progress::{FnSink, NoOpSink, ProgressEvent, ProgressSink};
pub use sync::{SyncEngine, SyncReporter, SyncSummary};
pub use verify::{FileVerification, Side, VerificationReport, VerificationStatus, Verifier};
