//! Resolver error types.
//!
//! Every variant is demoted to [`roster_core::Resolution::Indeterminate`]
//! before it reaches the scanner; the variants exist for logging and for the
//! discovery command.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    /// HTTP transport error (connect, timeout, body decode).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with an unexpected status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, possibly empty.
        message: String,
    },

    /// The API reported an error that does not mean "account missing".
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The payload did not have the documented shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The account exists but has no visible posts.
    #[error("no visible posts")]
    NoPosts,

    /// The handle cannot be turned into a request.
    #[error("malformed handle: {0:?}")]
    MalformedHandle(String),

    /// The resolver cannot be built from the current configuration.
    #[error(transparent)]
    Config(#[from] roster_config::ConfigError),

    /// The API returned 429 Too Many Requests and the retry budget is spent.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the server asked us to wait.
        retry_after_secs: u64,
    },
}
