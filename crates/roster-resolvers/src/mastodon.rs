//! Mastodon resolver.
//!
//! Handles are profile URLs (`https://<instance>/@<user>`) and every lookup
//! goes to the handle's own instance in two steps:
//!
//! 1. `GET https://<instance>/api/v1/accounts/lookup?acct=<user>` → account id
//! 2. `GET https://<instance>/api/v1/accounts/<id>/statuses?limit=1&exclude_replies=true`

use std::fmt;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use roster_config::MastodonConfig;
use roster_core::{ActivityResolver, Platform, Resolution, normalize_iso8601};
use serde::Deserialize;
use serde_json::Value;

use crate::Discovery;
use crate::error::ResolveError;
use crate::http::{build_client, check_response, settle};

/// Instance host and local username decomposed from a profile URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MastodonHandle {
    /// Host, with the port when the URL names one.
    pub instance: String,
    pub user: String,
}

impl MastodonHandle {
    /// Split a profile URL into instance and user.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::MalformedHandle`] unless the handle is an
    /// absolute URL with a host whose path starts with `/@<user>`.
    pub fn parse(raw: &str) -> Result<Self, ResolveError> {
        let malformed = || ResolveError::MalformedHandle(raw.to_string());

        let url = Url::parse(raw.trim()).map_err(|_| malformed())?;
        let host = url.host_str().filter(|host| !host.is_empty()).ok_or_else(malformed)?;
        let user = url
            .path()
            .strip_prefix("/@")
            .and_then(|rest| rest.split('/').next())
            .filter(|user| !user.is_empty())
            .ok_or_else(malformed)?;

        let instance = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Ok(Self {
            instance,
            user: user.to_string(),
        })
    }

    fn lookup_url(&self) -> String {
        format!(
            "https://{}/api/v1/accounts/lookup?acct={}",
            self.instance,
            urlencoding::encode(&self.user)
        )
    }

    fn statuses_url(&self, account_id: &str) -> String {
        format!(
            "https://{}/api/v1/accounts/{}/statuses?limit=1&exclude_replies=true",
            self.instance,
            urlencoding::encode(account_id)
        )
    }
}

impl fmt::Display for MastodonHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}@{}", self.user, self.instance)
    }
}

#[derive(Debug, Deserialize)]
struct Account {
    id: Option<Value>,
}

impl Account {
    /// Account ids are documented as strings; some servers send numbers.
    fn id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Status {
    created_at: Option<String>,
}

pub struct MastodonResolver {
    http: reqwest::Client,
    delay: Duration,
}

impl MastodonResolver {
    /// # Errors
    ///
    /// Returns [`ResolveError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &MastodonConfig) -> Result<Self, ResolveError> {
        Ok(Self {
            http: build_client(config.timeout_secs)?,
            delay: Duration::from_millis(config.delay_ms),
        })
    }

    /// Classify `handle` by the creation date of its newest non-reply status.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] for malformed handles (before any request),
    /// transport failures, unexpected statuses and empty timelines.
    pub async fn last_post(&self, handle: &str) -> Result<Resolution, ResolveError> {
        let handle = MastodonHandle::parse(handle)?;

        let resp = self.http.get(handle.lookup_url()).send().await?;
        let Some(account_id) = lookup_account(resp).await? else {
            return Ok(Resolution::NotFound);
        };

        let resp = self.http.get(handle.statuses_url(&account_id)).send().await?;
        let statuses: Vec<Status> = check_response(resp).await?.json().await?;
        classify_statuses(statuses)
    }

    /// Fetch the raw account lookup payload for `handle`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if the handle is malformed, the request fails
    /// or the body is not JSON.
    pub async fn discover(&self, handle: &str) -> Result<Discovery, ResolveError> {
        let parsed = MastodonHandle::parse(handle)?;
        let resp = self.http.get(parsed.lookup_url()).send().await?;
        let status = resp.status().as_u16();
        let body: Value = resp.json().await?;
        let resolution = (status == 404).then_some(Resolution::NotFound);
        Ok(Discovery {
            platform: Platform::Mastodon,
            handle: handle.to_string(),
            status,
            body,
            resolution,
        })
    }
}

impl ActivityResolver for MastodonResolver {
    fn platform(&self) -> Platform {
        Platform::Mastodon
    }

    fn pace(&self) -> Duration {
        self.delay
    }

    async fn resolve(&self, handle: &str) -> Resolution {
        settle(Platform::Mastodon, handle, self.last_post(handle).await)
    }
}

/// `Ok(None)` means the instance does not know the account.
async fn lookup_account(resp: reqwest::Response) -> Result<Option<String>, ResolveError> {
    if resp.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    let account: Account = check_response(resp).await?.json().await?;
    account
        .id()
        .map(Some)
        .ok_or_else(|| ResolveError::Parse("account lookup without id".to_string()))
}

fn classify_statuses(statuses: Vec<Status>) -> Result<Resolution, ResolveError> {
    let status = statuses.into_iter().next().ok_or(ResolveError::NoPosts)?;
    let created_at = status
        .created_at
        .ok_or_else(|| ResolveError::Parse("status without created_at".to_string()))?;
    normalize_iso8601(&created_at)
        .map(Resolution::Active)
        .ok_or(ResolveError::Parse(created_at))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::http::tests::mock_response;

    #[test]
    fn parses_profile_urls() {
        let handle = MastodonHandle::parse("https://mastodon.social/@Gargron").unwrap();
        assert_eq!(
            handle,
            MastodonHandle {
                instance: "mastodon.social".to_string(),
                user: "Gargron".to_string(),
            }
        );
        assert_eq!(handle.to_string(), "@Gargron@mastodon.social");

        let handle = MastodonHandle::parse(" https://social.example:8443/@ana/with_replies ").unwrap();
        assert_eq!(handle.instance, "social.example:8443");
        assert_eq!(handle.user, "ana");
    }

    #[test]
    fn malformed_handles_are_rejected() {
        for raw in [
            "",
            "@ana@mastodon.social",
            "mastodon.social/@ana",
            "https://mastodon.social/ana",
            "https://mastodon.social/@",
            "https:///@ana",
        ] {
            assert!(
                matches!(MastodonHandle::parse(raw), Err(ResolveError::MalformedHandle(_))),
                "{raw:?}"
            );
        }
    }

    #[tokio::test]
    async fn malformed_handle_makes_no_request() {
        let resolver = MastodonResolver::new(&MastodonConfig::default()).unwrap();
        assert_eq!(resolver.resolve("not a url").await, Resolution::Indeterminate);
    }

    #[test]
    fn builds_endpoint_urls() {
        let handle = MastodonHandle::parse("https://mastodon.social/@Gargron").unwrap();
        assert_eq!(
            handle.lookup_url(),
            "https://mastodon.social/api/v1/accounts/lookup?acct=Gargron"
        );
        assert_eq!(
            handle.statuses_url("1"),
            "https://mastodon.social/api/v1/accounts/1/statuses?limit=1&exclude_replies=true"
        );
    }

    #[tokio::test]
    async fn lookup_404_means_not_found() {
        let resp = mock_response(404, r#"{"error":"Record not found"}"#);
        assert_eq!(lookup_account(resp).await.unwrap(), None);
    }

    #[tokio::test]
    async fn lookup_accepts_string_and_numeric_ids() {
        let resp = mock_response(200, r#"{"id":"109","username":"ana"}"#);
        assert_eq!(lookup_account(resp).await.unwrap().as_deref(), Some("109"));

        let resp = mock_response(200, r#"{"id":110}"#);
        assert_eq!(lookup_account(resp).await.unwrap().as_deref(), Some("110"));
    }

    #[tokio::test]
    async fn lookup_without_id_or_with_error_status_is_indeterminate() {
        let err = lookup_account(mock_response(200, r#"{"username":"ana"}"#))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Parse(_)));

        let err = lookup_account(mock_response(410, "{}")).await.unwrap_err();
        assert!(matches!(err, ResolveError::Api { status: 410, .. }));
    }

    #[test]
    fn first_status_date_is_used() {
        let statuses = vec![
            Status {
                created_at: Some("2025-01-15T09:12:00.000Z".to_string()),
            },
            Status {
                created_at: Some("2024-12-01T00:00:00.000Z".to_string()),
            },
        ];
        assert_eq!(
            classify_statuses(statuses).unwrap(),
            Resolution::Active("2025-01-15".parse().unwrap())
        );
    }

    #[test]
    fn empty_timeline_is_not_a_missing_account() {
        assert!(matches!(classify_statuses(Vec::new()), Err(ResolveError::NoPosts)));
    }

    #[tokio::test]
    #[ignore] // requires network
    async fn live_last_post() {
        let resolver = MastodonResolver::new(&MastodonConfig::default()).unwrap();
        let result = resolver.last_post("https://mastodon.social/@Mastodon").await;
        assert!(matches!(result, Ok(Resolution::Active(_))), "{result:?}");
    }
}
