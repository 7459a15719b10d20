//! Platforms, rescan policies and roster categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::activity::ActivityCell;
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Twitter,
    Bluesky,
    Mastodon,
}

impl Platform {
    pub const ALL: [Self; 3] = [Self::Twitter, Self::Bluesky, Self::Mastodon];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Bluesky => "bluesky",
            Self::Mastodon => "mastodon",
        }
    }

    /// Twitter/X is queried through a paid proxy, so settled rows are never
    /// re-queried. The free platforms refresh every run to pick up newer posts.
    #[must_use]
    pub const fn rescan_policy(self) -> RescanPolicy {
        match self {
            Self::Twitter => RescanPolicy::SkipTerminal,
            Self::Bluesky | Self::Mastodon => RescanPolicy::Refresh,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "twitter" | "x" => Ok(Self::Twitter),
            "bluesky" | "bsky" => Ok(Self::Bluesky),
            "mastodon" => Ok(Self::Mastodon),
            other => Err(CoreError::UnknownPlatform(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// RescanPolicy
// ---------------------------------------------------------------------------

/// Whether a row whose activity cell is already settled gets queried again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RescanPolicy {
    /// A date or `404` is final.
    SkipTerminal,
    /// Always query; only `404` and fresh dates overwrite.
    Refresh,
}

impl RescanPolicy {
    #[must_use]
    pub const fn should_query(self, current: ActivityCell) -> bool {
        match self {
            Self::SkipTerminal => !current.is_terminal(),
            Self::Refresh => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Roster categories, each exported to its own JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Category {
    Age,
    Autonomias,
    Gobierno,
    Congreso,
    Senado,
    Partidos,
    Universidades,
}

impl Category {
    /// Export order of the category files and of the aggregate records.
    pub const ALL: [Self; 7] = [
        Self::Age,
        Self::Autonomias,
        Self::Gobierno,
        Self::Congreso,
        Self::Senado,
        Self::Partidos,
        Self::Universidades,
    ];

    /// Label used in the spreadsheet's category column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Age => "AGE",
            Self::Autonomias => "Autonomías",
            Self::Gobierno => "Gobierno",
            Self::Congreso => "Congreso",
            Self::Senado => "Senado",
            Self::Partidos => "Partidos",
            Self::Universidades => "Universidades",
        }
    }

    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Age => "age.json",
            Self::Autonomias => "autonomias.json",
            Self::Gobierno => "gobierno.json",
            Self::Congreso => "congreso.json",
            Self::Senado => "senado.json",
            Self::Partidos => "partidos.json",
            Self::Universidades => "universidades.json",
        }
    }

    /// Exact label lookup (surrounding whitespace ignored).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|category| category.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_parses_aliases() {
        assert_eq!("X".parse::<Platform>().unwrap(), Platform::Twitter);
        assert_eq!("bsky".parse::<Platform>().unwrap(), Platform::Bluesky);
        assert_eq!(" Mastodon ".parse::<Platform>().unwrap(), Platform::Mastodon);
        assert!(matches!(
            "myspace".parse::<Platform>(),
            Err(CoreError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn only_twitter_skips_settled_rows() {
        let settled = ActivityCell::NotFound;
        assert!(!Platform::Twitter.rescan_policy().should_query(settled));
        assert!(Platform::Bluesky.rescan_policy().should_query(settled));
        assert!(Platform::Mastodon.rescan_policy().should_query(settled));
        assert!(Platform::Twitter.rescan_policy().should_query(ActivityCell::Empty));
    }

    #[test]
    fn category_labels_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.label()), Some(category));
        }
        assert_eq!(Category::from_label(" Senado "), Some(Category::Senado));
        assert_eq!(Category::from_label("senado"), None);
        assert_eq!(Category::from_label("Ayuntamientos"), None);
    }
}
