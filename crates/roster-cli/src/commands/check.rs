use anyhow::Context;
use roster_config::RosterConfig;
use roster_core::{ActivityResolver, Platform};
use roster_resolvers::PlatformResolver;
use roster_scan::{ScanOptions, ScanSummary, pending, scan};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::CheckArgs;
use crate::context::{AppContext, StoreCheckpoint};
use crate::output::output;
use crate::progress::Progress;

#[derive(Debug, Serialize)]
struct CheckResponse {
    store: String,
    dry_run: bool,
    platforms: Vec<PlatformReport>,
}

#[derive(Debug, Serialize)]
struct PlatformReport {
    platform: Platform,
    pending: usize,
    /// `None` when the platform was skipped because nothing was pending.
    summary: Option<ScanSummary>,
}

/// Handle `roster check`.
pub async fn handle(args: &CheckArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let config = with_token(&ctx.config, args.token.as_deref());

    let resolvers = args
        .platforms()
        .into_iter()
        .map(|platform| build_resolver(platform, &config))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut table = ctx.store.load()?;
    let options = ScanOptions {
        checkpoint_every: config.general.checkpoint_every,
        dry_run: args.dry_run,
    };

    let mut reports = Vec::with_capacity(resolvers.len());
    for resolver in &resolvers {
        let platform = resolver.platform();
        let pending = pending(&table, platform);

        if pending == 0 && platform == Platform::Twitter {
            tracing::info!(%platform, "nothing pending, skipping paid lookups");
            reports.push(PlatformReport {
                platform,
                pending,
                summary: None,
            });
            continue;
        }

        let progress = Progress::bar(u64::try_from(pending).unwrap_or(u64::MAX), &format!("checking {platform}"), flags);
        let mut checkpoint = StoreCheckpoint::new(&ctx.store);
        let result = scan(&mut table, resolver, &mut checkpoint, options, |report| {
            if report.outcome.queried() {
                progress.inc(1);
                progress.set_message(report.name.or(report.handle).unwrap_or_default());
            }
        })
        .await;

        let summary = match result {
            Ok(summary) => {
                progress.finish_clear();
                summary
            }
            Err(error) => {
                progress.finish_err(&format!("{platform} failed"));
                return Err(error).with_context(|| format!("{platform} scan failed"));
            }
        };
        reports.push(PlatformReport {
            platform,
            pending,
            summary: Some(summary),
        });
    }

    output(
        &CheckResponse {
            store: ctx.store.path().display().to_string(),
            dry_run: args.dry_run,
            platforms: reports,
        },
        flags.format,
    )
}

/// Apply a `--token` override to a copy of the config.
pub fn with_token(config: &RosterConfig, token: Option<&str>) -> RosterConfig {
    let mut config = config.clone();
    if let Some(token) = token.filter(|token| !token.trim().is_empty()) {
        config.twitter.token = token.trim().to_string();
    }
    config
}

pub fn build_resolver(platform: Platform, config: &RosterConfig) -> anyhow::Result<PlatformResolver> {
    PlatformResolver::from_config(platform, config).with_context(|| match platform {
        Platform::Twitter => {
            "Twitter/X needs a proxy token: pass --token or set ROSTER_TWITTER__TOKEN".to_string()
        }
        Platform::Bluesky | Platform::Mastodon => format!("failed to set up the {platform} client"),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn token_flag_overrides_config() {
        let mut config = RosterConfig::default();
        config.twitter.token = "from-config".to_string();

        assert_eq!(with_token(&config, None).twitter.token, "from-config");
        assert_eq!(with_token(&config, Some("  ")).twitter.token, "from-config");
        assert_eq!(with_token(&config, Some(" flag ")).twitter.token, "flag");
    }

    #[test]
    fn twitter_without_token_fails_before_touching_the_store() {
        let Err(error) = build_resolver(Platform::Twitter, &RosterConfig::default()) else {
            panic!("twitter resolver built without a token");
        };
        assert!(format!("{error:#}").contains("--token"));
        assert!(build_resolver(Platform::Bluesky, &RosterConfig::default()).is_ok());
    }
}
