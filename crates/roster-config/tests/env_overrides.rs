use figment::Jail;
use roster_config::RosterConfig;

#[test]
fn env_fills_nested_values() {
    Jail::expect_with(|jail| {
        jail.set_env("ROSTER_TWITTER__TOKEN", "from-env");
        jail.set_env("ROSTER_GENERAL__CHECKPOINT_EVERY", "5");

        let config = RosterConfig::load().expect("config loads");
        assert_eq!(config.twitter.token, "from-env");
        assert_eq!(config.general.checkpoint_every, 5);
        Ok(())
    });
}

#[test]
fn env_beats_project_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "roster.toml",
            r#"
[general]
sheet = "FromFile"
"#,
        )?;
        jail.set_env("ROSTER_GENERAL__SHEET", "FromEnv");

        let config = RosterConfig::load().expect("config loads");
        assert_eq!(config.general.sheet, "FromEnv");
        Ok(())
    });
}
