use std::path::PathBuf;

use clap::{Args, Subcommand};
use roster_core::Platform;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Look up the latest activity of every stored handle.
    Check(CheckArgs),
    /// Clear settled activity cells for one platform so they are checked again.
    Reset(ResetArgs),
    /// Print one raw API response, for inspecting payload shapes.
    Discover(DiscoverArgs),
    /// Write the per-category JSON files and total.json.
    Export(ExportArgs),
    /// Re-save the store to reapply the workbook styling.
    Format,
}

#[derive(Clone, Debug, Args)]
pub struct CheckArgs {
    /// Check Twitter/X (paid; needs a token).
    #[arg(long)]
    pub twitter: bool,

    /// Check Bluesky.
    #[arg(long)]
    pub bluesky: bool,

    /// Check Mastodon.
    #[arg(long)]
    pub mastodon: bool,

    /// Twitter/X proxy token (overrides `twitter.token`).
    #[arg(long)]
    pub token: Option<String>,

    /// Resolve and report without writing the store.
    #[arg(long)]
    pub dry_run: bool,
}

impl CheckArgs {
    /// Platforms to scan, in run order. No flag means the free platforms.
    #[must_use]
    pub fn platforms(&self) -> Vec<Platform> {
        if !(self.twitter || self.bluesky || self.mastodon) {
            return vec![Platform::Bluesky, Platform::Mastodon];
        }
        [
            (self.twitter, Platform::Twitter),
            (self.bluesky, Platform::Bluesky),
            (self.mastodon, Platform::Mastodon),
        ]
        .into_iter()
        .filter_map(|(selected, platform)| selected.then_some(platform))
        .collect()
    }
}

#[derive(Clone, Debug, Args)]
pub struct ResetArgs {
    /// Platform whose activity cells are cleared.
    #[arg(long)]
    pub platform: Platform,
}

#[derive(Clone, Debug, Args)]
pub struct DiscoverArgs {
    /// Platform to query.
    #[arg(long)]
    pub platform: Platform,

    /// Handle to look up (defaults to the first stored handle).
    pub handle: Option<String>,

    /// Twitter/X proxy token (overrides `twitter.token`).
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Output directory (defaults to `general.data_dir`).
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Report what would be written without touching any file.
    #[arg(long)]
    pub dry_run: bool,
}
