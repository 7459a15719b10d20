use roster_core::Platform;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ResetArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ResetResponse {
    platform: Platform,
    cleared: usize,
    pending: usize,
}

/// Handle `roster reset`.
pub fn handle(args: &ResetArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let mut table = ctx.store.load()?;
    let cleared = roster_scan::reset(&mut table, args.platform);
    if cleared > 0 {
        ctx.store.save(&table)?;
    }

    output(
        &ResetResponse {
            platform: args.platform,
            cleared,
            pending: roster_scan::pending(&table, args.platform),
        },
        flags.format,
    )
}
