use std::path::PathBuf;

use anyhow::Context;
use roster_core::RecencyWindow;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster export`.
pub fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let table = ctx.store.load()?;
    let dir = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&ctx.config.general.data_dir));

    let report = roster_export::export(&table, &dir, RecencyWindow::today(), args.dry_run)
        .with_context(|| format!("failed to export JSON into {}", dir.display()))?;
    output(&report, flags.format)
}
