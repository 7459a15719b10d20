//! Activity cells and the recency window.
//!
//! An activity cell is tri-state:
//!
//! ```text
//! "YYYY-MM-DD"  → the platform confirmed a most-recent post on that day
//! "404"         → the handle does not exist / is suspended
//! (empty)       → no handle, or no confirmed result yet (retry later)
//! ```

use std::fmt;

use chrono::{Days, Local, NaiveDate};
use serde::{Serialize, Serializer};

use crate::dates::{self, CanonicalDate};

/// Stored marker for a handle that was confirmed not to exist.
pub const NOT_FOUND_MARKER: &str = "404";

/// Days back from "today" that still count as recently active.
pub const RECENT_WINDOW_DAYS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ActivityCell {
    Active(CanonicalDate),
    NotFound,
    #[default]
    Empty,
}

impl ActivityCell {
    /// Interpret the text of a stored cell.
    ///
    /// Unrecognized text is treated as empty so the row gets retried.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::Empty;
        }
        if text == NOT_FOUND_MARKER {
            return Self::NotFound;
        }
        dates::normalize(text).map_or_else(
            || {
                tracing::warn!(value = text, "unrecognized activity value, treating as empty");
                Self::Empty
            },
            Self::Active,
        )
    }

    /// A date or `404`: the paid resolver never re-queries these.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Empty)
    }

    #[must_use]
    pub const fn date(self) -> Option<CanonicalDate> {
        match self {
            Self::Active(date) => Some(date),
            Self::NotFound | Self::Empty => None,
        }
    }
}

impl fmt::Display for ActivityCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active(date) => date.fmt(f),
            Self::NotFound => f.write_str(NOT_FOUND_MARKER),
            Self::Empty => Ok(()),
        }
    }
}

/// Serializes as `"YYYY-MM-DD"`, `"404"` or `null`.
impl Serialize for ActivityCell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Active(date) => date.serialize(serializer),
            Self::NotFound => serializer.serialize_str(NOT_FOUND_MARKER),
            Self::Empty => serializer.serialize_none(),
        }
    }
}

// ---------------------------------------------------------------------------
// RecencyWindow
// ---------------------------------------------------------------------------

/// The "active in the last 30 days" rule, fixed to one reference day.
///
/// Build one window per export run so every record is judged against the
/// same cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecencyWindow {
    cutoff: NaiveDate,
}

impl RecencyWindow {
    /// Window ending on `today` (inclusive cutoff at `today - 30 days`).
    #[must_use]
    pub fn ending(today: NaiveDate) -> Self {
        let cutoff = today
            .checked_sub_days(Days::new(RECENT_WINDOW_DAYS))
            .unwrap_or(NaiveDate::MIN);
        Self { cutoff }
    }

    /// Window ending on the local calendar day.
    #[must_use]
    pub fn today() -> Self {
        Self::ending(Local::now().date_naive())
    }

    #[must_use]
    pub const fn cutoff(self) -> NaiveDate {
        self.cutoff
    }

    #[must_use]
    pub fn is_recent(self, cell: ActivityCell) -> bool {
        cell.date().is_some_and(|date| date.date() >= self.cutoff)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active(y: i32, m: u32, d: u32) -> ActivityCell {
        ActivityCell::Active(day(y, m, d).into())
    }

    #[test]
    fn parse_recognizes_all_three_states() {
        assert_eq!(ActivityCell::parse("2025-02-10"), active(2025, 2, 10));
        assert_eq!(ActivityCell::parse(" 404 "), ActivityCell::NotFound);
        assert_eq!(ActivityCell::parse(""), ActivityCell::Empty);
        assert_eq!(ActivityCell::parse("sin datos"), ActivityCell::Empty);
    }

    #[test]
    fn parse_accepts_timestamps_left_in_the_sheet() {
        assert_eq!(
            ActivityCell::parse("2025-02-10T14:30:00.000Z"),
            active(2025, 2, 10)
        );
    }

    #[test]
    fn terminal_means_date_or_not_found() {
        assert!(active(2025, 1, 1).is_terminal());
        assert!(ActivityCell::NotFound.is_terminal());
        assert!(!ActivityCell::Empty.is_terminal());
    }

    #[test]
    fn display_matches_stored_text() {
        assert_eq!(active(2025, 3, 9).to_string(), "2025-03-09");
        assert_eq!(ActivityCell::NotFound.to_string(), "404");
        assert_eq!(ActivityCell::Empty.to_string(), "");
    }

    #[test]
    fn serializes_to_string_or_null() {
        let cells = [active(2025, 3, 9), ActivityCell::NotFound, ActivityCell::Empty];
        assert_eq!(
            serde_json::to_string(&cells).unwrap(),
            r#"["2025-03-09","404",null]"#
        );
    }

    #[test]
    fn recency_boundary_is_thirty_days_inclusive() {
        let window = RecencyWindow::ending(day(2025, 6, 30));
        assert!(window.is_recent(active(2025, 6, 1)));
        assert!(window.is_recent(active(2025, 5, 31)));
        assert!(!window.is_recent(active(2025, 5, 30)));
        assert!(!window.is_recent(ActivityCell::NotFound));
        assert!(!window.is_recent(ActivityCell::Empty));
    }

    #[test]
    fn same_date_always_agrees_within_one_window() {
        let window = RecencyWindow::ending(day(2025, 6, 30));
        let cell = active(2025, 6, 15);
        assert_eq!(window.is_recent(cell), window.is_recent(cell));
        assert_eq!(window.cutoff(), day(2025, 5, 31));
    }
}
