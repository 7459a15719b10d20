//! # roster-resolvers
//!
//! Platform clients that classify a stored handle as active on some date,
//! missing, or indeterminate:
//! - Twitter/X, through a paid bearer-token proxy
//! - Bluesky, through the public AppView
//! - Mastodon, two-step lookup on the handle's own instance
//!
//! Every client implements [`ActivityResolver`]. Failures never cross that
//! seam; they are logged and surface as [`Resolution::Indeterminate`].

pub mod bluesky;
pub mod mastodon;
pub mod twitter;

mod error;
mod http;

pub use bluesky::BlueskyResolver;
pub use error::ResolveError;
pub use mastodon::{MastodonHandle, MastodonResolver};
pub use twitter::TwitterResolver;

use std::time::Duration;

use roster_config::RosterConfig;
use roster_core::{ActivityResolver, Platform, Resolution};
use serde::Serialize;
use serde_json::Value;

/// One raw API exchange, for inspecting payload shapes by hand.
#[derive(Debug, Clone, Serialize)]
pub struct Discovery {
    pub platform: Platform,
    pub handle: String,
    /// HTTP status of the (first) request.
    pub status: u16,
    pub body: Value,
    /// How the payload would be classified, when that is decidable from it.
    pub resolution: Option<Resolution>,
}

/// Any of the platform resolvers, chosen at runtime.
pub enum PlatformResolver {
    Twitter(TwitterResolver),
    Bluesky(BlueskyResolver),
    Mastodon(MastodonResolver),
}

impl PlatformResolver {
    /// Build the resolver for `platform` from its config section.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Config`] for Twitter/X without a token, or
    /// [`ResolveError::Http`] if the HTTP client cannot be built.
    pub fn from_config(platform: Platform, config: &RosterConfig) -> Result<Self, ResolveError> {
        Ok(match platform {
            Platform::Twitter => Self::Twitter(TwitterResolver::new(config.require_twitter()?)?),
            Platform::Bluesky => Self::Bluesky(BlueskyResolver::new(&config.bluesky)?),
            Platform::Mastodon => Self::Mastodon(MastodonResolver::new(&config.mastodon)?),
        })
    }

    /// Fetch and return one raw payload for `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the request fails or the body is not JSON.
    pub async fn discover(&self, handle: &str) -> Result<Discovery, ResolveError> {
        match self {
            Self::Twitter(resolver) => resolver.discover(handle).await,
            Self::Bluesky(resolver) => resolver.discover(handle).await,
            Self::Mastodon(resolver) => resolver.discover(handle).await,
        }
    }
}

impl ActivityResolver for PlatformResolver {
    fn platform(&self) -> Platform {
        match self {
            Self::Twitter(resolver) => resolver.platform(),
            Self::Bluesky(resolver) => resolver.platform(),
            Self::Mastodon(resolver) => resolver.platform(),
        }
    }

    fn pace(&self) -> Duration {
        match self {
            Self::Twitter(resolver) => resolver.pace(),
            Self::Bluesky(resolver) => resolver.pace(),
            Self::Mastodon(resolver) => resolver.pace(),
        }
    }

    async fn resolve(&self, handle: &str) -> Resolution {
        match self {
            Self::Twitter(resolver) => resolver.resolve(handle).await,
            Self::Bluesky(resolver) => resolver.resolve(handle).await,
            Self::Mastodon(resolver) => resolver.resolve(handle).await,
        }
    }
}
