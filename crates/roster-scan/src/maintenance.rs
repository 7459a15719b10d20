//! Table-wide helpers that run before or instead of a scan.

use roster_core::{ActivityCell, Platform, RosterTable};

/// Rows with a handle that a scan of `platform` would send to the resolver.
#[must_use]
pub fn pending(table: &RosterTable, platform: Platform) -> usize {
    let policy = platform.rescan_policy();
    table
        .iter()
        .map(|row| row.account(platform))
        .filter(|account| account.handle.is_some() && policy.should_query(account.activity))
        .count()
}

/// Clear the settled activity of every row with a handle, so the next scan
/// queries them all again. Returns how many cells were cleared.
pub fn reset(table: &mut RosterTable, platform: Platform) -> usize {
    let mut cleared = 0;
    for row in table.rows_mut() {
        let account = row.account_mut(platform);
        if account.handle.is_some() && account.activity.is_terminal() {
            account.activity = ActivityCell::Empty;
            cleared += 1;
        }
    }
    tracing::info!(%platform, cleared, "reset activity cells");
    cleared
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use roster_core::{Column, RosterRow};

    use super::*;

    fn table() -> RosterTable {
        [
            ("alice", "2025-01-01"),
            ("bob", "404"),
            ("carol", ""),
            ("", "2024-12-12"),
        ]
        .into_iter()
        .map(|(handle, activity)| {
            let mut row = RosterRow::default();
            row.set_text(Column::TwitterHandle, handle);
            row.set_text(Column::TwitterActivity, activity);
            row.set_text(Column::BlueskyHandle, handle);
            row
        })
        .collect()
    }

    #[test]
    fn pending_follows_the_rescan_policy() {
        let table = table();
        assert_eq!(pending(&table, Platform::Twitter), 1);
        assert_eq!(pending(&table, Platform::Bluesky), 3);
        assert_eq!(pending(&table, Platform::Mastodon), 0);
    }

    #[test]
    fn reset_only_touches_rows_with_handles() {
        let mut table = table();
        assert_eq!(reset(&mut table, Platform::Twitter), 2);
        assert_eq!(pending(&table, Platform::Twitter), 3);
        assert_eq!(table.rows()[3].twitter.activity.to_string(), "2024-12-12");
        assert_eq!(reset(&mut table, Platform::Twitter), 0);
    }
}
