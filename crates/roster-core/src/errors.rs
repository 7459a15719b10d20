//! Cross-cutting error types for the roster crates.
//!
//! Boundary-specific errors (`StoreError`, `ResolveError`, ...) live in their
//! own crates and converge into `anyhow` in the binary.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A platform name did not match any supported platform.
    #[error("unknown platform: {0}")]
    UnknownPlatform(String),

    /// A value claimed to be a canonical date but is not `YYYY-MM-DD`.
    #[error("invalid canonical date: {0:?}")]
    InvalidDate(String),
}
