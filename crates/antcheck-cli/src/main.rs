use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use antcheck_api::{AntClient, TmdbClient};
use antcheck_core::config::AppConfig;
use antcheck_core::error::AntCheckError;
use antcheck_core::media::FsInspector;
use antcheck_core::orchestrator::{self, RunOutcome};

/// Check whether local films already exist on ANT before uploading.
#[derive(Debug, Parser)]
#[command(name = "antcheck", version, about)]
struct Cli {
    /// Path to a config file, overriding the per-user one.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("antcheck=info")),
        )
        .init();

    info!("Starting ANT upload checker");
    match run(Cli::parse()).await {
        Ok(RunOutcome::AllDuplicates { total }) => {
            info!(total, "Nothing new to check, ending early");
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::Completed {
            total,
            searched,
            skipped,
        }) => {
            info!(total, searched, skipped, "Run complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<RunOutcome, AntCheckError> {
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    config.validate()?;

    let catalog = AntClient::new(
        config.ant.api_key.clone(),
        config.ant.base_url.clone(),
        Duration::from_secs(config.ant.search_interval_secs),
    );
    let metadata = config.tmdb.api_key.as_ref().map(|key| {
        TmdbClient::new(
            key.clone(),
            config.tmdb.base_url.clone(),
            Duration::from_millis(config.tmdb.request_interval_ms),
        )
    });

    orchestrator::run_batch(&config, &catalog, metadata.as_ref(), &FsInspector).await
}
