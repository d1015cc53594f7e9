use std::path::PathBuf;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;

use gameday_sync::config::AppConfig;
use gameday_sync::monitoring::logger;
use gameday_sync::pipeline::Pipeline;

/// Fetch live schedule, record, roster, and standings data and reconcile it
/// into the site's curated JSON documents.
#[derive(Debug, Parser)]
#[command(name = "gameday-sync", version)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, default_value = "config/default.toml")]
    config: PathBuf,

    /// Override the data directory from the config file.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Override the season year from the config file.
    #[arg(long)]
    season: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, secrets) = AppConfig::load(&cli.config)?;
    if let Some(data_dir) = cli.data_dir {
        config.store.data_dir = data_dir;
    }
    if let Some(season) = cli.season {
        config.season.year = season;
    }

    logger::init_logging(&config.monitoring)?;

    tracing::info!(
        team = %config.team.name,
        season = config.season.year,
        data_dir = %config.store.data_dir.display(),
        "gameday-sync starting"
    );

    let pipeline = Pipeline::new(config, &secrets);
    pipeline.run(Utc::now()).await
}
