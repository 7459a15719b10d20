//! The per-platform scan loop.

use roster_core::{
    Account, ActivityCell, ActivityResolver, CanonicalDate, Platform, Resolution, RosterTable,
};
use serde::Serialize;

use crate::checkpoint::Checkpoint;
use crate::error::ScanError;

const DEFAULT_CHECKPOINT_EVERY: usize = 25;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Persist after this many resolved rows. Zero is treated as one.
    pub checkpoint_every: usize,
    /// Resolve and update in memory, but never hand the table to the sink.
    pub dry_run: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            checkpoint_every: DEFAULT_CHECKPOINT_EVERY,
            dry_run: false,
        }
    }
}

/// Counts reported at the end of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub platform: Platform,
    /// Rows the resolver was asked about.
    pub checked: usize,
    /// Rows that received a date.
    pub updated: usize,
    pub not_found: usize,
    /// Indeterminate outcomes, whether or not a stored date was kept.
    pub no_data: usize,
    /// Rows left alone because their cell is already settled.
    pub skipped: usize,
    /// Handle-less rows whose stale activity was erased.
    pub cleared: usize,
    /// Persists performed, final one included. Dry runs count them too.
    pub checkpoints: usize,
}

impl ScanSummary {
    const fn new(platform: Platform) -> Self {
        Self {
            platform,
            checked: 0,
            updated: 0,
            not_found: 0,
            no_data: 0,
            skipped: 0,
            cleared: 0,
            checkpoints: 0,
        }
    }

    fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::NoHandle => {}
            RowOutcome::Cleared => self.cleared += 1,
            RowOutcome::Skipped => self.skipped += 1,
            RowOutcome::Active(_) => self.updated += 1,
            RowOutcome::NotFound => self.not_found += 1,
            RowOutcome::Kept | RowOutcome::Emptied => self.no_data += 1,
        }
        if outcome.queried() {
            self.checked += 1;
        }
    }
}

/// What happened to one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowOutcome {
    /// No handle and nothing stored.
    NoHandle,
    /// No handle; a stale activity value was removed.
    Cleared,
    /// Already settled under the platform's rescan policy.
    Skipped,
    Active(CanonicalDate),
    NotFound,
    /// Indeterminate; the stored date survives.
    Kept,
    /// Indeterminate and no date to keep; the cell is now empty.
    Emptied,
}

impl RowOutcome {
    /// Whether the resolver was called for this row.
    #[must_use]
    pub const fn queried(self) -> bool {
        matches!(
            self,
            Self::Active(_) | Self::NotFound | Self::Kept | Self::Emptied
        )
    }
}

/// Passed to the observer after every row.
#[derive(Debug, Clone, Copy)]
pub struct RowReport<'a> {
    /// Zero-based position in the table.
    pub index: usize,
    pub name: Option<&'a str>,
    pub handle: Option<&'a str>,
    pub outcome: RowOutcome,
}

/// Scan every row of `table` for the resolver's platform.
///
/// Intermediate checkpoint failures are logged and the scan goes on; only a
/// failing final persist is an error.
///
/// # Errors
///
/// Returns [`ScanError::FinalCheckpoint`] if the end-of-run persist fails.
pub async fn scan<R, C, F>(
    table: &mut RosterTable,
    resolver: &R,
    checkpoint: &mut C,
    options: ScanOptions,
    mut observe: F,
) -> Result<ScanSummary, ScanError>
where
    R: ActivityResolver,
    C: Checkpoint,
    F: FnMut(&RowReport<'_>),
{
    let platform = resolver.platform();
    let policy = platform.rescan_policy();
    let every = options.checkpoint_every.max(1);
    let mut summary = ScanSummary::new(platform);

    tracing::info!(%platform, rows = table.len(), dry_run = options.dry_run, "scan started");

    for index in 0..table.len() {
        let account = table.rows_mut()[index].account_mut(platform);
        let outcome = match account.handle.clone() {
            None => clear(account),
            Some(_) if !policy.should_query(account.activity) => RowOutcome::Skipped,
            Some(handle) => {
                let resolution = resolver.resolve(&handle).await;
                let outcome = apply(account, resolution);
                tracing::info!(%platform, handle = handle.as_str(), ?outcome, "row resolved");
                let pace = resolver.pace();
                if !pace.is_zero() {
                    tokio::time::sleep(pace).await;
                }
                outcome
            }
        };
        summary.record(outcome);

        let row = &table.rows()[index];
        observe(&RowReport {
            index,
            name: row.name.as_deref(),
            handle: row.account(platform).handle.as_deref(),
            outcome,
        });

        if outcome.queried() && summary.checked % every == 0 {
            match persist(checkpoint, table, options) {
                Ok(()) => summary.checkpoints += 1,
                Err(error) => {
                    tracing::warn!(%platform, processed = summary.checked, %error, "checkpoint failed, continuing");
                }
            }
        }
    }

    persist(checkpoint, table, options).map_err(|error| ScanError::FinalCheckpoint {
        processed: summary.checked,
        source: Box::new(error),
    })?;
    summary.checkpoints += 1;

    tracing::info!(
        %platform,
        checked = summary.checked,
        updated = summary.updated,
        not_found = summary.not_found,
        no_data = summary.no_data,
        skipped = summary.skipped,
        "scan finished"
    );
    Ok(summary)
}

fn clear(account: &mut Account) -> RowOutcome {
    if account.activity == ActivityCell::Empty {
        RowOutcome::NoHandle
    } else {
        account.activity = ActivityCell::Empty;
        RowOutcome::Cleared
    }
}

/// Write a resolution into the account, never regressing a stored date.
fn apply(account: &mut Account, resolution: Resolution) -> RowOutcome {
    match resolution {
        Resolution::Active(date) => {
            account.activity = ActivityCell::Active(date);
            RowOutcome::Active(date)
        }
        Resolution::NotFound => {
            account.activity = ActivityCell::NotFound;
            RowOutcome::NotFound
        }
        Resolution::Indeterminate if account.activity.date().is_some() => RowOutcome::Kept,
        Resolution::Indeterminate => {
            account.activity = ActivityCell::Empty;
            RowOutcome::Emptied
        }
    }
}

fn persist<C: Checkpoint>(
    checkpoint: &mut C,
    table: &RosterTable,
    options: ScanOptions,
) -> Result<(), C::Error> {
    if options.dry_run {
        tracing::debug!("dry run, checkpoint not written");
        return Ok(());
    }
    checkpoint.persist(table)
}
