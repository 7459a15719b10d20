//! The seam between the row scanner and the platform clients.

use std::future::Future;
use std::time::Duration;

use serde::Serialize;

use crate::dates::CanonicalDate;
use crate::enums::Platform;

/// How a resolver classified one handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Resolution {
    /// The platform reported a most-recent post on this day.
    Active(CanonicalDate),
    /// The handle does not exist, is suspended or cannot be resolved.
    NotFound,
    /// Transport failure, rate limit, unexpected payload, malformed handle,
    /// or an existing account with no visible posts. Never destructive.
    Indeterminate,
}

/// A platform client that classifies a stored handle.
///
/// Implementations are pure with respect to the roster: they only return a
/// [`Resolution`]; the scanner decides what gets written.
pub trait ActivityResolver {
    fn platform(&self) -> Platform;

    /// Pause the scanner must take after every call to this resolver.
    fn pace(&self) -> Duration {
        Duration::ZERO
    }

    fn resolve(&self, handle: &str) -> impl Future<Output = Resolution> + Send;
}
