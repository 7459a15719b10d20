//! Bluesky resolver via the public, unauthenticated AppView.
//!
//! `GET {api_base}/app.bsky.feed.getAuthorFeed?actor=<handle>&limit=1`
//! returns the author's newest feed item. The AppView answers 400 for actors
//! it cannot resolve, which is the only "not found" signal it gives.

use std::time::Duration;

use reqwest::StatusCode;
use roster_config::BlueskyConfig;
use roster_core::{ActivityResolver, Platform, Resolution, normalize_iso8601};
use serde::Deserialize;
use serde_json::Value;

use crate::Discovery;
use crate::error::ResolveError;
use crate::http::{build_client, check_response, settle};

/// Only the newest item is ever needed.
const FEED_PAGE_SIZE: u32 = 1;

#[derive(Debug, Deserialize)]
struct AuthorFeed {
    #[serde(default)]
    feed: Vec<FeedItem>,
}

#[derive(Debug, Deserialize)]
struct FeedItem {
    post: FeedPost,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FeedPost {
    indexed_at: Option<String>,
}

pub struct BlueskyResolver {
    http: reqwest::Client,
    api_base: String,
    delay: Duration,
}

impl BlueskyResolver {
    /// # Errors
    ///
    /// Returns [`ResolveError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &BlueskyConfig) -> Result<Self, ResolveError> {
        Ok(Self {
            http: build_client(config.timeout_secs)?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            delay: Duration::from_millis(config.delay_ms),
        })
    }

    fn feed_url(&self, handle: &str) -> String {
        format!(
            "{}/app.bsky.feed.getAuthorFeed?actor={}&limit={FEED_PAGE_SIZE}",
            self.api_base,
            urlencoding::encode(handle.trim_start_matches('@'))
        )
    }

    /// Classify `handle` by the indexing date of its newest feed item.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] on transport failure, unexpected status,
    /// malformed payload or an empty feed.
    pub async fn last_post(&self, handle: &str) -> Result<Resolution, ResolveError> {
        let resp = self.http.get(self.feed_url(handle)).send().await?;
        classify_response(resp).await
    }

    /// Fetch the raw feed payload for `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the request fails or the body is not JSON.
    pub async fn discover(&self, handle: &str) -> Result<Discovery, ResolveError> {
        let resp = self.http.get(self.feed_url(handle)).send().await?;
        let status = resp.status();
        let body: Value = resp.json().await?;
        let resolution = if status == StatusCode::BAD_REQUEST {
            Some(Resolution::NotFound)
        } else if status == StatusCode::OK {
            serde_json::from_value(body.clone())
                .ok()
                .and_then(|feed| classify_feed(feed).ok())
        } else {
            None
        };
        Ok(Discovery {
            platform: Platform::Bluesky,
            handle: handle.to_string(),
            status: status.as_u16(),
            body,
            resolution,
        })
    }
}

impl ActivityResolver for BlueskyResolver {
    fn platform(&self) -> Platform {
        Platform::Bluesky
    }

    fn pace(&self) -> Duration {
        self.delay
    }

    async fn resolve(&self, handle: &str) -> Resolution {
        settle(Platform::Bluesky, handle, self.last_post(handle).await)
    }
}

async fn classify_response(resp: reqwest::Response) -> Result<Resolution, ResolveError> {
    if resp.status() == StatusCode::BAD_REQUEST {
        return Ok(Resolution::NotFound);
    }
    let feed: AuthorFeed = check_response(resp).await?.json().await?;
    classify_feed(feed)
}

fn classify_feed(feed: AuthorFeed) -> Result<Resolution, ResolveError> {
    let item = feed.feed.into_iter().next().ok_or(ResolveError::NoPosts)?;
    let indexed_at = item
        .post
        .indexed_at
        .ok_or_else(|| ResolveError::Parse("feed post without indexedAt".to_string()))?;
    normalize_iso8601(&indexed_at)
        .map(Resolution::Active)
        .ok_or(ResolveError::Parse(indexed_at))
}
