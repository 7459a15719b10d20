//! # roster-scan
//!
//! Walks the roster top to bottom for one platform, asks an
//! [`ActivityResolver`](roster_core::ActivityResolver) about every handle that
//! needs it, writes the classification back, and persists the whole table
//! every few rows so an interrupted run loses at most one batch.
//!
//! Re-running after an interruption converges: terminal cells are skipped
//! (or refreshed without regressing) and indeterminate outcomes never erase a
//! known date.

mod checkpoint;
mod error;
mod maintenance;
mod scanner;

pub use checkpoint::{Checkpoint, CountingCheckpoint};
pub use error::ScanError;
pub use maintenance::{pending, reset};
pub use scanner::{RowOutcome, RowReport, ScanOptions, ScanSummary, scan};
