use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FormatResponse {
    store: String,
    rows: usize,
}

/// Handle `roster format`: load and re-save, which reapplies the styling.
pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let table = ctx.store.load()?;
    ctx.store.save(&table)?;

    output(
        &FormatResponse {
            store: ctx.store.path().display().to_string(),
            rows: table.len(),
        },
        flags.format,
    )
}
