//! # roster-core
//!
//! Core types shared by every roster crate:
//! - The typed roster model ([`RosterTable`], [`RosterRow`], [`Column`])
//! - Activity cells and the canonical `YYYY-MM-DD` date
//! - The date normalization fallback chain
//! - The 30-day recency window used by the aggregate export
//! - Platform and category enums
//! - The [`ActivityResolver`] seam between the scanner and the platform clients

pub mod activity;
pub mod dates;
pub mod enums;
pub mod errors;
pub mod resolution;
pub mod roster;

pub use activity::{ActivityCell, NOT_FOUND_MARKER, RecencyWindow};
pub use dates::{CanonicalDate, RawDate, normalize, normalize_iso8601};
pub use enums::{Category, Platform, RescanPolicy};
pub use errors::CoreError;
pub use resolution::{ActivityResolver, Resolution};
pub use roster::{Account, Column, Field, RosterRow, RosterTable};
