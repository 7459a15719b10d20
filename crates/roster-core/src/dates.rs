//! Date normalization.
//!
//! Every activity value ends up as a calendar date rendered `YYYY-MM-DD`.
//! The platform APIs and the spreadsheet disagree on how they spell a date, so
//! [`normalize`] walks a fixed fallback chain:
//!
//! ```text
//! ISO-8601 → RFC 2822 (+ legacy Twitter layout) → leading YYYY-MM-DD → not parseable
//! ```
//!
//! The order matters: some responses are valid under more than one stage and
//! the earlier stage wins.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::CoreError;

/// `strftime` layout of the canonical date.
pub const CANONICAL_FORMAT: &str = "%Y-%m-%d";

/// `"Mon Feb 10 14:30:00 +0000 2025"`
const LEGACY_TWITTER_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

/// Naive ISO-8601 layouts tried after RFC 3339.
const NAIVE_ISO_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

// ---------------------------------------------------------------------------
// CanonicalDate
// ---------------------------------------------------------------------------

/// A calendar date that displays and serializes as `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CanonicalDate(NaiveDate);

impl CanonicalDate {
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    #[must_use]
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for CanonicalDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for CanonicalDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_FORMAT))
    }
}

impl FromStr for CanonicalDate {
    type Err = CoreError;

    /// Strict parse: the whole string must be exactly `YYYY-MM-DD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 10 {
            return Err(CoreError::InvalidDate(s.to_string()));
        }
        leading_date(s)
            .map(Self)
            .ok_or_else(|| CoreError::InvalidDate(s.to_string()))
    }
}

impl Serialize for CanonicalDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CanonicalDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// A date as it arrives from an API payload or a spreadsheet cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawDate<'a> {
    /// A native date/time value (e.g. a spreadsheet date cell).
    Native(NaiveDateTime),
    /// Any textual representation.
    Text(&'a str),
}

impl From<NaiveDateTime> for RawDate<'_> {
    fn from(value: NaiveDateTime) -> Self {
        Self::Native(value)
    }
}

impl<'a> From<&'a str> for RawDate<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(value)
    }
}

/// Normalize a raw date into a [`CanonicalDate`].
///
/// Returns `None` when no stage of the fallback chain accepts the input.
/// Timezone-aware timestamps keep the calendar date of their own offset.
pub fn normalize<'a>(raw: impl Into<RawDate<'a>>) -> Option<CanonicalDate> {
    match raw.into() {
        RawDate::Native(value) => Some(CanonicalDate(value.date())),
        RawDate::Text(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            parse_iso8601(text)
                .or_else(|| parse_rfc2822(text))
                .or_else(|| leading_date(text))
                .map(CanonicalDate)
        }
    }
}

/// ISO-8601 stage alone, for APIs that document ISO timestamps.
///
/// A bare `YYYY-MM-DD` is accepted as the date-only ISO form.
pub fn normalize_iso8601(text: &str) -> Option<CanonicalDate> {
    let text = text.trim();
    parse_iso8601(text)
        .or_else(|| if text.len() == 10 { leading_date(text) } else { None })
        .map(CanonicalDate)
}

fn parse_iso8601(text: &str) -> Option<NaiveDate> {
    if let Ok(value) = DateTime::parse_from_rfc3339(text) {
        return Some(value.date_naive());
    }
    NAIVE_ISO_FORMATS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(text, layout).ok())
        .map(|value| value.date())
}

fn parse_rfc2822(text: &str) -> Option<NaiveDate> {
    DateTime::parse_from_rfc2822(text)
        .or_else(|_| DateTime::parse_from_str(text, LEGACY_TWITTER_FORMAT))
        .ok()
        .map(|value| value.date_naive())
}

/// Parse the first ten characters as `YYYY-MM-DD`, if they have that shape
/// and name a real calendar date.
pub(crate) fn leading_date(text: &str) -> Option<NaiveDate> {
    let prefix = text.get(..10)?;
    let shaped = prefix.bytes().enumerate().all(|(i, b)| match i {
        4 | 7 => b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(prefix, CANONICAL_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn canonical(raw: &str) -> Option<String> {
        normalize(raw).map(|date| date.to_string())
    }

    #[test]
    fn all_supported_shapes_agree_on_the_day() {
        for raw in [
            "2025-02-10T14:30:00.000Z",
            "Mon Feb 10 14:30:00 +0000 2025",
            "2025-02-10",
        ] {
            assert_eq!(canonical(raw).as_deref(), Some("2025-02-10"), "input {raw:?}");
        }
    }

    #[test]
    fn offset_timestamps_keep_their_local_day() {
        assert_eq!(
            canonical("2025-02-10T23:30:00-05:00").as_deref(),
            Some("2025-02-10")
        );
    }

    #[test]
    fn naive_iso_and_strict_rfc2822_are_accepted() {
        assert_eq!(canonical("2025-02-10T14:30:00").as_deref(), Some("2025-02-10"));
        assert_eq!(canonical("2025-02-10 14:30:00.5").as_deref(), Some("2025-02-10"));
        assert_eq!(
            canonical("Mon, 10 Feb 2025 14:30:00 +0000").as_deref(),
            Some("2025-02-10")
        );
    }

    #[test]
    fn leading_date_prefix_is_truncated() {
        assert_eq!(canonical("2025-02-10 (approx)").as_deref(), Some("2025-02-10"));
    }

    #[test]
    fn unparseable_inputs_yield_none() {
        assert_eq!(canonical(""), None);
        assert_eq!(canonical("   "), None);
        assert_eq!(canonical("yesterday"), None);
        assert_eq!(canonical("404"), None);
        assert_eq!(canonical("2025-13-40"), None);
        assert_eq!(canonical("2025/02/10"), None);
    }

    #[test]
    fn iso_only_stage_rejects_legacy_layouts() {
        let iso = |raw| normalize_iso8601(raw).map(|date| date.to_string());
        assert_eq!(iso("2024-11-05T08:00:00.123Z").as_deref(), Some("2024-11-05"));
        assert_eq!(iso("2024-11-05").as_deref(), Some("2024-11-05"));
        assert_eq!(iso("Tue Nov 05 08:00:00 +0000 2024"), None);
        assert_eq!(iso("2024-11-05 and more"), None);
    }

    #[test]
    fn native_values_drop_time_of_day() {
        let value = NaiveDate::from_ymd_opt(2025, 2, 10)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        assert_eq!(normalize(value).unwrap().to_string(), "2025-02-10");
    }

    #[test]
    fn canonical_date_parse_is_strict() {
        assert!("2025-02-10".parse::<CanonicalDate>().is_ok());
        assert!("2025-02-10T00:00:00".parse::<CanonicalDate>().is_err());
        assert!("2025-2-10".parse::<CanonicalDate>().is_err());
    }

    #[test]
    fn canonical_date_serializes_as_string() {
        let date: CanonicalDate = "2024-12-31".parse().unwrap();
        assert_eq!(serde_json::to_string(&date).unwrap(), "\"2024-12-31\"");
        let back: CanonicalDate = serde_json::from_str("\"2024-12-31\"").unwrap();
        assert_eq!(back, date);
    }
}
