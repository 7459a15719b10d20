//! Shared HTTP helpers for the platform resolvers.
//!
//! Centralizes client construction and the common status checks (429 with
//! `Retry-After` parsing, anything but 200 → [`ResolveError::Api`]) so each
//! platform module only handles its own status codes and payload shape.

use std::time::Duration;

use reqwest::StatusCode;
use roster_core::{Platform, Resolution};

use crate::error::ResolveError;

const USER_AGENT: &str = concat!("roster/", env!("CARGO_PKG_VERSION"));

/// Build a client with the shared user agent and a per-request timeout.
///
/// # Errors
///
/// Returns [`ResolveError::Http`] if the TLS backend cannot be initialized.
pub fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ResolveError> {
    Ok(reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}

/// Check an HTTP response for the common error conditions.
///
/// Returns the response unchanged on `200 OK`. Handles:
/// - **429 Too Many Requests** → [`ResolveError::RateLimited`]
/// - **any other status** → [`ResolveError::Api`] with the response body
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ResolveError> {
    if resp.status() == StatusCode::TOO_MANY_REQUESTS {
        return Err(ResolveError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if resp.status() != StatusCode::OK {
        return Err(ResolveError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
pub fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Collapse a resolver result into a [`Resolution`].
///
/// Errors never escape a resolver: they become `Indeterminate`, which the
/// scanner treats as "keep what you have".
pub fn settle(
    platform: Platform,
    handle: &str,
    result: Result<Resolution, ResolveError>,
) -> Resolution {
    result.unwrap_or_else(|error| {
        tracing::debug!(%platform, handle, %error, "resolution indeterminate");
        Resolution::Indeterminate
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub fn mock_response(status: u16, body: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body.to_string())
                .unwrap(),
        )
    }

    fn mock_response_with_retry_after(status: u16, value: &str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .header("Retry-After", value)
                .body("")
                .unwrap(),
        )
    }

    #[test]
    fn parse_retry_after_from_header() {
        let resp = mock_response_with_retry_after(429, "120");
        assert_eq!(parse_retry_after(&resp), 120);
    }

    #[test]
    fn parse_retry_after_missing_or_garbage() {
        assert_eq!(parse_retry_after(&mock_response(429, "")), 60);
        let resp = mock_response_with_retry_after(429, "soon");
        assert_eq!(parse_retry_after(&resp), 60);
    }

    #[tokio::test]
    async fn check_response_rate_limited() {
        let resp = mock_response_with_retry_after(429, "30");
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            ResolveError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn check_response_rejects_non_200_success_codes() {
        let err = check_response(mock_response(204, "")).await.unwrap_err();
        assert!(matches!(err, ResolveError::Api { status: 204, .. }));
    }

    #[tokio::test]
    async fn check_response_keeps_error_body() {
        let err = check_response(mock_response(502, "bad gateway"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Api { status: 502, ref message } if message == "bad gateway"));
    }

    #[tokio::test]
    async fn check_response_success() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }

    #[test]
    fn settle_demotes_errors() {
        let settled = settle(
            Platform::Bluesky,
            "someone.bsky.social",
            Err(ResolveError::NoPosts),
        );
        assert_eq!(settled, Resolution::Indeterminate);
        assert_eq!(
            settle(Platform::Bluesky, "x", Ok(Resolution::NotFound)),
            Resolution::NotFound
        );
    }
}
