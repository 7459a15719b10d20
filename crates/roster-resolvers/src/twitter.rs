//! Twitter/X resolver, through a paid third-party proxy API.
//!
//! `GET {api_base}/twitter/user/tweets?userName=<handle>` with a bearer token
//! answers either `{"error": "..."}` or `{"tweets": [...]}`. Every call costs
//! money, so a 429 is retried exactly once and nothing else is retried.

use std::time::Duration;

use reqwest::StatusCode;
use roster_config::TwitterConfig;
use roster_core::{ActivityResolver, CanonicalDate, Platform, Resolution, normalize};
use serde_json::Value;

use crate::Discovery;
use crate::error::ResolveError;
use crate::http::{build_client, parse_retry_after, settle};

/// Fields a tweet object may carry its creation time under, in priority order.
pub const DATE_FIELDS: [&str; 5] = [
    "createdAt",
    "created_at",
    "date",
    "timestamp",
    "tweetCreatedAt",
];

/// Substrings of an API error that mean the account is gone.
const NOT_FOUND_PATTERNS: [&str; 5] = ["resolve", "not found", "suspend", "does not exist", "404"];

pub struct TwitterResolver {
    http: reqwest::Client,
    api_base: String,
    token: String,
    delay: Duration,
    backoff: Duration,
}

impl TwitterResolver {
    /// # Errors
    ///
    /// Returns [`ResolveError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &TwitterConfig) -> Result<Self, ResolveError> {
        Ok(Self {
            http: build_client(config.timeout_secs)?,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            delay: Duration::from_millis(config.delay_ms),
            backoff: Duration::from_secs(config.rate_limit_backoff_secs),
        })
    }

    fn tweets_url(&self, handle: &str) -> String {
        format!(
            "{}/twitter/user/tweets?userName={}",
            self.api_base,
            urlencoding::encode(handle.trim_start_matches('@'))
        )
    }

    async fn fetch(&self, handle: &str) -> Result<reqwest::Response, ResolveError> {
        Ok(self
            .http
            .get(self.tweets_url(handle))
            .bearer_auth(&self.token)
            .send()
            .await?)
    }

    /// Fetch the most recent tweets, retrying a 429 once after the back-off.
    async fn fetch_with_retry(&self, handle: &str) -> Result<reqwest::Response, ResolveError> {
        let resp = self.fetch(handle).await?;
        if resp.status() != StatusCode::TOO_MANY_REQUESTS {
            return Ok(resp);
        }
        tracing::info!(
            handle,
            backoff_secs = self.backoff.as_secs(),
            "rate limited, retrying once"
        );
        tokio::time::sleep(self.backoff).await;
        self.fetch(handle).await
    }

    /// Classify `handle` by the date of its most recent tweet.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] for transport failures, a second 429, non-JSON
    /// bodies, API errors that do not mean "not found", and empty timelines.
    pub async fn last_post(&self, handle: &str) -> Result<Resolution, ResolveError> {
        let resp = self.fetch_with_retry(handle).await?;
        classify_response(resp).await
    }

    /// Fetch the raw payload for `handle` (one paid call).
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the request fails or the body is not JSON.
    pub async fn discover(&self, handle: &str) -> Result<Discovery, ResolveError> {
        let resp = self.fetch(handle).await?;
        let status = resp.status().as_u16();
        let body: Value = resp.json().await?;
        let resolution = classify_tweets(&body).ok();
        Ok(Discovery {
            platform: Platform::Twitter,
            handle: handle.to_string(),
            status,
            body,
            resolution,
        })
    }
}

impl ActivityResolver for TwitterResolver {
    fn platform(&self) -> Platform {
        Platform::Twitter
    }

    fn pace(&self) -> Duration {
        self.delay
    }

    async fn resolve(&self, handle: &str) -> Resolution {
        settle(Platform::Twitter, handle, self.last_post(handle).await)
    }
}

/// Classify a (possibly retried) proxy response.
///
/// The proxy reports most failures in the JSON body, so the status code is
/// only consulted for rate limiting.
async fn classify_response(resp: reqwest::Response) -> Result<Resolution, ResolveError> {
    if resp.status() == StatusCode::TOO_MANY_REQUESTS {
        return Err(ResolveError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    let body: Value = resp.json().await?;
    classify_tweets(&body)
}

/// Classify a decoded proxy payload.
///
/// An empty timeline is NOT treated as a missing account.
fn classify_tweets(body: &Value) -> Result<Resolution, ResolveError> {
    if let Some(error) = body.get("error") {
        let message = match error {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        if is_not_found_message(&message) {
            return Ok(Resolution::NotFound);
        }
        return Err(ResolveError::Upstream(message));
    }

    let first = body
        .get("tweets")
        .and_then(Value::as_array)
        .and_then(|tweets| tweets.first())
        .ok_or(ResolveError::NoPosts)?;

    extract_date(first)
        .map(Resolution::Active)
        .ok_or_else(|| ResolveError::Parse("no parseable date field on tweet".to_string()))
}

fn is_not_found_message(message: &str) -> bool {
    let message = message.to_lowercase();
    NOT_FOUND_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}

/// First candidate field holding a parseable date.
pub fn extract_date(tweet: &Value) -> Option<CanonicalDate> {
    DATE_FIELDS
        .iter()
        .filter_map(|field| tweet.get(field).and_then(Value::as_str))
        .find_map(|raw| normalize(raw))
}
