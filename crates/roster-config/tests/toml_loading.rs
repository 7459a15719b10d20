//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed working directories and env vars.

use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use roster_config::{ConfigError, RosterConfig};

#[test]
fn loads_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
store_path = "roster.xlsx"
sheet = "Hoja1"
data_dir = "public/data"
checkpoint_every = 10

[twitter]
token = "tw-token"
delay_ms = 0

[bluesky]
api_base = "http://localhost:2583/xrpc"
delay_ms = 50
"#,
        )?;

        let config: RosterConfig = Figment::from(Serialized::defaults(RosterConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.store_path, "roster.xlsx");
        assert_eq!(config.general.sheet, "Hoja1");
        assert_eq!(config.general.data_dir, "public/data");
        assert_eq!(config.general.checkpoint_every, 10);
        assert!(config.twitter.is_configured());
        assert_eq!(config.twitter.delay_ms, 0);
        assert_eq!(config.twitter.api_base, "https://api.getxapi.com");
        assert_eq!(config.bluesky.api_base, "http://localhost:2583/xrpc");
        assert_eq!(config.bluesky.delay_ms, 50);
        assert_eq!(config.mastodon.timeout_secs, 8);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_load() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "roster.toml",
            r#"
[general]
data_dir = "out"
"#,
        )?;

        let config = RosterConfig::load().expect("config loads");
        assert_eq!(config.general.data_dir, "out");
        assert_eq!(config.general.store_path, "datosfinales.xlsx");
        Ok(())
    });
}

#[test]
fn invalid_cadence_in_file_fails_validation() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "roster.toml",
            r#"
[general]
checkpoint_every = 0
"#,
        )?;

        let err = RosterConfig::load().expect_err("zero cadence must be rejected");
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        Ok(())
    });
}
