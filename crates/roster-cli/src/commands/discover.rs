use anyhow::Context;
use roster_core::{Platform, RosterTable};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DiscoverArgs;
use crate::commands::check::{build_resolver, with_token};
use crate::context::AppContext;
use crate::output::output;

/// Handle `roster discover`.
pub async fn handle(
    args: &DiscoverArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let config = with_token(&ctx.config, args.token.as_deref());
    let resolver = build_resolver(args.platform, &config)?;

    let handle = match &args.handle {
        Some(handle) => handle.clone(),
        None => {
            let table = ctx.store.load()?;
            first_handle(&table, args.platform)
                .with_context(|| format!("no {} handle stored; pass one explicitly", args.platform))?
        }
    };

    let discovery = resolver
        .discover(&handle)
        .await
        .with_context(|| format!("{} request for {handle} failed", args.platform))?;
    output(&discovery, flags.format)
}

fn first_handle(table: &RosterTable, platform: Platform) -> Option<String> {
    table
        .iter()
        .find_map(|row| row.account(platform).handle.clone())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use roster_core::{Column, RosterRow};

    use super::*;

    #[test]
    fn picks_the_first_row_with_a_handle() {
        let table: RosterTable = ["", "second", "third"]
            .into_iter()
            .map(|handle| {
                let mut row = RosterRow::default();
                row.set_text(Column::BlueskyHandle, handle);
                row
            })
            .collect();
        assert_eq!(first_handle(&table, Platform::Bluesky).as_deref(), Some("second"));
        assert_eq!(first_handle(&table, Platform::Mastodon), None);
    }
}
