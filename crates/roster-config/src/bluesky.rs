//! Bluesky public AppView configuration.

use serde::{Deserialize, Serialize};

fn default_api_base() -> String {
    "https://public.api.bsky.app/xrpc".to_string()
}

/// Without this pause the AppView starts answering with empty feeds.
const fn default_delay_ms() -> u64 {
    400
}

const fn default_timeout_secs() -> u64 {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlueskyConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for BlueskyConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            delay_ms: default_delay_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
