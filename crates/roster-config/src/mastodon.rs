//! Mastodon configuration. The instance comes from each handle.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MastodonConfig {
    /// Pause after every account, in milliseconds.
    #[serde(default)]
    pub delay_ms: u64,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for MastodonConfig {
    fn default() -> Self {
        Self {
            delay_ms: 0,
            timeout_secs: default_timeout_secs(),
        }
    }
}
