//! # roster-config
//!
//! Layered configuration loading for the roster tools using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROSTER_*` prefix, `__` as separator)
//! 2. Project-level `roster.toml` in the working directory
//! 3. User-level `~/.config/roster/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROSTER_TWITTER__TOKEN` -> `twitter.token`,
//! `ROSTER_GENERAL__STORE_PATH` -> `general.store_path`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use roster_config::RosterConfig;
//!
//! let config = RosterConfig::load_with_dotenv().expect("config");
//! if config.twitter.is_configured() {
//!     println!("proxy: {}", config.twitter.api_base);
//! }
//! ```

mod bluesky;
mod error;
mod general;
mod mastodon;
mod twitter;

pub use bluesky::BlueskyConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use mastodon::MastodonConfig;
pub use twitter::TwitterConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = "roster.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RosterConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub twitter: TwitterConfig,
    #[serde(default)]
    pub bluesky: BlueskyConfig,
    #[serde(default)]
    pub mastodon: MastodonConfig,
}

impl RosterConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a source cannot be parsed or a value is invalid.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if extraction fails or a value is invalid.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("ROSTER_").split("__"))
    }

    /// Check values serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a zero checkpoint cadence or
    /// an empty store path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.checkpoint_every == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.checkpoint_every".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.general.store_path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "general.store_path".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Fail unless the paid Twitter/X proxy has a token.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotConfigured`] when `twitter.token` is empty.
    pub fn require_twitter(&self) -> Result<&TwitterConfig, ConfigError> {
        if self.twitter.is_configured() {
            Ok(&self.twitter)
        } else {
            Err(ConfigError::NotConfigured {
                section: "twitter".to_string(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("roster").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = RosterConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.twitter.is_configured());
        assert_eq!(config.bluesky.delay_ms, 400);
        assert_eq!(config.mastodon.delay_ms, 0);
    }

    #[test]
    fn zero_checkpoint_cadence_is_rejected() {
        let mut config = RosterConfig::default();
        config.general.checkpoint_every = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "general.checkpoint_every"
        ));
    }

    #[test]
    fn twitter_requires_token() {
        let mut config = RosterConfig::default();
        assert!(matches!(
            config.require_twitter(),
            Err(ConfigError::NotConfigured { section }) if section == "twitter"
        ));
        config.twitter.token = "secret".to_string();
        assert!(config.require_twitter().is_ok());
    }
}
