use anyhow::Context;
use roster_config::RosterConfig;

/// Load `.env` (if any) and then the layered configuration.
pub fn load_config() -> anyhow::Result<RosterConfig> {
    load_dotenv()?;
    RosterConfig::load().context("failed to load roster configuration")
}

fn load_dotenv() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        tracing::debug!(path = %env_path.display(), "loaded dotenv");
    }
    Ok(())
}
