//! Twitter/X proxy API configuration.

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "https://api.getxapi.com".to_string()
}

const fn default_delay_ms() -> u64 {
    300
}

const fn default_rate_limit_backoff_secs() -> u64 {
    10
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TwitterConfig {
    /// Base URL of the paid proxy API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Bearer token for the proxy API.
    #[serde(default)]
    pub token: String,

    /// Pause after every request, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Wait before the single retry of a 429 response, in seconds.
    #[serde(default = "default_rate_limit_backoff_secs")]
    pub rate_limit_backoff_secs: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TwitterConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            token: String::new(),
            delay_ms: default_delay_ms(),
            rate_limit_backoff_secs: default_rate_limit_backoff_secs(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl TwitterConfig {
    /// The proxy rejects unauthenticated calls, so a token is required.
    pub fn is_configured(&self) -> bool {
        !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = TwitterConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.delay_ms, 300);
        assert_eq!(config.rate_limit_backoff_secs, 10);
    }
}
