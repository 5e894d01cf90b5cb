//! Happiness Dashboard Server
//!
//! Run with: cargo run --bin happiness-dashboard -- [--config PATH]
//!
//! # Configuration
//!
//! Reads the TOML file given with `--config`, or the first of the default locations
//! (`~/.config/happiness/config.toml`, `/etc/happiness/config.toml`,
//! `./config.toml`). Environment variables override file settings:
//! - `HAPPINESS_DATA_PATH`: Spreadsheet path (default: happiness_data.xlsx)
//! - `HAPPINESS_API_HOST` / `HAPPINESS_API_PORT`: Bind address (default: 0.0.0.0:8501)
//! - `HAPPINESS_LATEST_YEAR_POLICY`: `global` or `country_latest`
//! - `RUST_LOG`: Log filter (default: from config, info)

use clap::Parser;
use happiness_dashboard::api::{serve, AppState};
use happiness_dashboard::config::Config;
use happiness_dashboard::data::{DatasetCache, SpreadsheetLoader};
use happiness_dashboard::logging;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "happiness-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Global Happiness Index dashboard server")]
struct Args {
    /// Config file (default: first existing default location)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = logging::with_bootstrap(|| match &args.config {
        Some(path) => Config::load_with_env(path),
        None => Ok(Config::load_default()),
    })?;

    // Initialize logging
    logging::init(&config.logging)?;

    tracing::info!("Starting happiness dashboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data file: {}", config.data.path);
    tracing::info!(
        "Latest-year policy: {:?}",
        config.dashboard.latest_year_policy
    );

    let loader = SpreadsheetLoader::new(&config.data.path).with_sheet(config.data.sheet.clone());
    let dataset = Arc::new(DatasetCache::new(loader));

    // Warm the cache. A failed load is retried on the next request.
    match dataset.load().await {
        Ok(table) => tracing::info!(
            rows = table.len(),
            latest_year = table.latest_year(),
            "Dataset ready"
        ),
        Err(e) => tracing::error!("Failed to load dataset: {}", e),
    }

    let api_config = config.server_config();
    let state = AppState::new(dataset, config.render_options(), api_config.clone());

    serve(state, &api_config).await?;

    tracing::info!("Happiness dashboard stopped");
    Ok(())
}
