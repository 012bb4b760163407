use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use feedback_app::cli::Cli;
use feedback_app::commands;
use feedback_app::config::AppConfig;
use feedback_app::state::AppState;
use feedback_db::FileKvStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "feedback_app=info,feedback_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // --- Configuration ---
    let mut config = AppConfig::from_env()?;
    if let Some(dir) = cli.data_dir.clone() {
        config.data_dir = dir;
    }
    tracing::debug!(
        data_dir = %config.data_dir.display(),
        latency_ms = config.latency.as_millis() as u64,
        "Loaded configuration"
    );

    // --- Storage ---
    let storage = FileKvStore::open(&config.data_dir)
        .await
        .with_context(|| format!("opening storage in {}", config.data_dir.display()))?;
    let mut state = AppState::open(Arc::new(storage), config.latency)
        .await
        .context("loading saved state")?;

    let mut stdout = std::io::stdout().lock();
    commands::execute(&mut state, cli.command, &mut stdout).await?;
    Ok(())
}
