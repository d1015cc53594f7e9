use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub team: TeamConfig,
    pub season: SeasonConfig,
    pub providers: ProviderConfig,
    pub store: StoreConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamConfig {
    /// Our team's id in the scores provider's keyspace.
    pub espn_id: String,
    /// Display name, also the team filter for the win-probability provider.
    pub name: String,
    /// Conference grouping id for the standings endpoint.
    pub conference_group_id: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SeasonConfig {
    pub year: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub espn_base_url: String,
    pub cfbd_base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub log_level: String,
}

/// Secrets loaded exclusively from environment variables.
/// Not serializable, not stored in config files.
pub struct Secrets {
    pub cfbd_api_key: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            cfbd_api_key: std::env::var("CFBD_API_KEY").ok(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, overlaying environment variables for secrets.
    pub fn load(config_path: &Path) -> Result<(Self, Secrets)> {
        dotenvy::dotenv().ok();

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        let secrets = Secrets::from_env();

        Ok((config, secrets))
    }
}
