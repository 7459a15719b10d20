//! The typed roster table.
//!
//! Resolvers, the scanner and the projector only see [`RosterRow`] fields.
//! The mapping between fields and spreadsheet columns lives in [`Column`] and
//! is validated once, when the store adapter reads the header row.

use serde::Serialize;

use crate::activity::ActivityCell;
use crate::enums::Platform;

// ---------------------------------------------------------------------------
// Column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Category,
    Name,
    TwitterHandle,
    TwitterActivity,
    BlueskyHandle,
    BlueskyActivity,
    MastodonHandle,
    MastodonActivity,
    Email,
    Detail,
    Kind,
    Group,
    District,
    Region,
    Party,
}

impl Column {
    /// Canonical column order, as written back to the store.
    pub const ALL: [Self; 15] = [
        Self::Category,
        Self::Name,
        Self::TwitterHandle,
        Self::TwitterActivity,
        Self::BlueskyHandle,
        Self::BlueskyActivity,
        Self::MastodonHandle,
        Self::MastodonActivity,
        Self::Email,
        Self::Detail,
        Self::Kind,
        Self::Group,
        Self::District,
        Self::Region,
        Self::Party,
    ];

    /// Header label written to the spreadsheet.
    #[must_use]
    pub const fn header(self) -> &'static str {
        match self {
            Self::Category => "Categoría",
            Self::Name => "Nombre",
            Self::TwitterHandle => "Twitter",
            Self::TwitterActivity => "Twitter Activo",
            Self::BlueskyHandle => "Bluesky",
            Self::BlueskyActivity => "Bluesky Activo",
            Self::MastodonHandle => "Mastodon",
            Self::MastodonActivity => "Mastodon Activo",
            Self::Email => "Email",
            Self::Detail => "Detalle",
            Self::Kind => "Tipo",
            Self::Group => "Grupo",
            Self::District => "Circunscripción",
            Self::Region => "CCAA",
            Self::Party => "Partido",
        }
    }

    /// `snake_case` key, also accepted as a header.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Name => "name",
            Self::TwitterHandle => "twitter_handle",
            Self::TwitterActivity => "twitter_activity",
            Self::BlueskyHandle => "bluesky_handle",
            Self::BlueskyActivity => "bluesky_activity",
            Self::MastodonHandle => "mastodon_handle",
            Self::MastodonActivity => "mastodon_activity",
            Self::Email => "email",
            Self::Detail => "detail",
            Self::Kind => "type",
            Self::Group => "group",
            Self::District => "district",
            Self::Region => "region",
            Self::Party => "party",
        }
    }

    /// Match a header cell against the label or the key, ignoring case.
    #[must_use]
    pub fn from_header(text: &str) -> Option<Self> {
        let wanted = text.trim().to_lowercase();
        Self::ALL.into_iter().find(|column| {
            column.header().to_lowercase() == wanted || column.key() == wanted
        })
    }

    /// The platform whose activity this column stores, if any.
    #[must_use]
    pub const fn activity_platform(self) -> Option<Platform> {
        match self {
            Self::TwitterActivity => Some(Platform::Twitter),
            Self::BlueskyActivity => Some(Platform::Bluesky),
            Self::MastodonActivity => Some(Platform::Mastodon),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One platform's handle plus its activity cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Account {
    pub handle: Option<String>,
    pub activity: ActivityCell,
}

impl Account {
    #[must_use]
    pub fn new(handle: Option<&str>, activity: ActivityCell) -> Self {
        Self {
            handle: handle.and_then(clean),
            activity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterRow {
    pub category: Option<String>,
    pub name: Option<String>,
    pub twitter: Account,
    pub bluesky: Account,
    pub mastodon: Account,
    pub email: Option<String>,
    pub detail: Option<String>,
    pub kind: Option<String>,
    pub group: Option<String>,
    pub district: Option<String>,
    pub region: Option<String>,
    pub party: Option<String>,
}

/// A borrowed view of one cell of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    Text(Option<&'a str>),
    Activity(ActivityCell),
}

impl RosterRow {
    #[must_use]
    pub const fn account(&self, platform: Platform) -> &Account {
        match platform {
            Platform::Twitter => &self.twitter,
            Platform::Bluesky => &self.bluesky,
            Platform::Mastodon => &self.mastodon,
        }
    }

    pub const fn account_mut(&mut self, platform: Platform) -> &mut Account {
        match platform {
            Platform::Twitter => &mut self.twitter,
            Platform::Bluesky => &mut self.bluesky,
            Platform::Mastodon => &mut self.mastodon,
        }
    }

    #[must_use]
    pub fn field(&self, column: Column) -> Field<'_> {
        match column.activity_platform() {
            Some(platform) => Field::Activity(self.account(platform).activity),
            None => Field::Text(self.text(column)),
        }
    }

    fn text(&self, column: Column) -> Option<&str> {
        let slot = match column {
            Column::Category => &self.category,
            Column::Name => &self.name,
            Column::TwitterHandle => &self.twitter.handle,
            Column::BlueskyHandle => &self.bluesky.handle,
            Column::MastodonHandle => &self.mastodon.handle,
            Column::Email => &self.email,
            Column::Detail => &self.detail,
            Column::Kind => &self.kind,
            Column::Group => &self.group,
            Column::District => &self.district,
            Column::Region => &self.region,
            Column::Party => &self.party,
            Column::TwitterActivity | Column::BlueskyActivity | Column::MastodonActivity => {
                return None;
            }
        };
        slot.as_deref()
    }

    /// Store raw cell text into the field `column` maps to.
    ///
    /// Text is trimmed (blank becomes `None`); activity columns are parsed
    /// into an [`ActivityCell`].
    pub fn set_text(&mut self, column: Column, raw: &str) {
        if let Some(platform) = column.activity_platform() {
            self.account_mut(platform).activity = ActivityCell::parse(raw);
            return;
        }
        let value = clean(raw);
        match column {
            Column::Category => self.category = value,
            Column::Name => self.name = value,
            Column::TwitterHandle => self.twitter.handle = value,
            Column::BlueskyHandle => self.bluesky.handle = value,
            Column::MastodonHandle => self.mastodon.handle = value,
            Column::Email => self.email = value,
            Column::Detail => self.detail = value,
            Column::Kind => self.kind = value,
            Column::Group => self.group = value,
            Column::District => self.district = value,
            Column::Region => self.region = value,
            Column::Party => self.party = value,
            Column::TwitterActivity | Column::BlueskyActivity | Column::MastodonActivity => {}
        }
    }

    /// True when no cell of the row holds anything.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Column::ALL.into_iter().all(|column| match self.field(column) {
            Field::Text(text) => text.is_none(),
            Field::Activity(cell) => cell == ActivityCell::Empty,
        })
    }
}

/// Trim a cell value; blank becomes `None`.
#[must_use]
pub fn clean(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

// ---------------------------------------------------------------------------
// RosterTable
// ---------------------------------------------------------------------------

/// The ordered record rows of the store (the header is implicit).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterTable {
    rows: Vec<RosterRow>,
}

impl RosterTable {
    #[must_use]
    pub const fn new(rows: Vec<RosterRow>) -> Self {
        Self { rows }
    }

    #[must_use]
    pub fn rows(&self) -> &[RosterRow] {
        &self.rows
    }

    #[must_use]
    pub fn rows_mut(&mut self) -> &mut [RosterRow] {
        &mut self.rows
    }

    pub fn push(&mut self, row: RosterRow) {
        self.rows.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RosterRow> {
        self.rows.iter()
    }
}

impl FromIterator<RosterRow> for RosterTable {
    fn from_iter<I: IntoIterator<Item = RosterRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RosterTable {
    type Item = &'a RosterRow;
    type IntoIter = std::slice::Iter<'a, RosterRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn headers_match_label_or_key() {
        assert_eq!(Column::from_header("Categoría"), Some(Column::Category));
        assert_eq!(Column::from_header("  twitter activo "), Some(Column::TwitterActivity));
        assert_eq!(Column::from_header("bluesky_handle"), Some(Column::BlueskyHandle));
        assert_eq!(Column::from_header("CCAA"), Some(Column::Region));
        assert_eq!(Column::from_header("Notas"), None);
    }

    #[test]
    fn headers_and_keys_are_unique() {
        for (i, a) in Column::ALL.iter().enumerate() {
            for b in &Column::ALL[i + 1..] {
                assert_ne!(a.header(), b.header());
                assert_ne!(a.key(), b.key());
            }
        }
    }

    #[test]
    fn set_text_routes_to_named_fields() {
        let mut row = RosterRow::default();
        row.set_text(Column::Name, "  Ana Pérez ");
        row.set_text(Column::MastodonHandle, "https://mastodon.social/@ana");
        row.set_text(Column::MastodonActivity, "404");
        row.set_text(Column::Party, "   ");

        assert_eq!(row.name.as_deref(), Some("Ana Pérez"));
        assert_eq!(
            row.mastodon.handle.as_deref(),
            Some("https://mastodon.social/@ana")
        );
        assert_eq!(row.mastodon.activity, ActivityCell::NotFound);
        assert_eq!(row.party, None);
        assert_eq!(
            row.field(Column::MastodonActivity),
            Field::Activity(ActivityCell::NotFound)
        );
        assert_eq!(row.field(Column::Name), Field::Text(Some("Ana Pérez")));
    }

    #[test]
    fn blank_rows_are_detected() {
        let mut row = RosterRow::default();
        assert!(row.is_blank());
        row.set_text(Column::TwitterActivity, "2025-01-01");
        assert!(!row.is_blank());
    }

    #[test]
    fn account_accessors_follow_platform() {
        let mut row = RosterRow::default();
        row.account_mut(Platform::Bluesky).handle = Some("ana.bsky.social".into());
        assert_eq!(
            row.account(Platform::Bluesky).handle.as_deref(),
            Some("ana.bsky.social")
        );
        assert!(row.account(Platform::Twitter).handle.is_none());
    }
}
