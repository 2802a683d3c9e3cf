//! Regboard Dashboard Server
//!
//! Run with: cargo run --bin regboard
//!
//! # Configuration
//!
//! Read from `config.toml` in the usual locations (see
//! [`Config::load_default`]), then overridden by environment variables:
//! - `REGBOARD_DATA_PATH`: Spreadsheet to load, .xlsx or .csv (default: users_with_location.xlsx)
//! - `REGBOARD_HOST`: Host to bind to (default: 0.0.0.0)
//! - `REGBOARD_PORT`: Port to listen on (default: 3000)
//! - `REGBOARD_LOG_LEVEL`: Log level (default: info)
//! - `REGBOARD_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over the level

use regboard::api::{serve, AppState};
use regboard::config::{Config, LoggingConfig};
use regboard::dashboard::Dataset;
use regboard::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match Config::load_default() {
        Ok(config) => config,
        Err(e) => {
            // Logging settings are unknown, report with the defaults
            logging::init(&LoggingConfig::default(), std::io::stdout)?;
            tracing::error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };
    logging::init(&config.logging, std::io::stdout)?;

    tracing::info!("Starting Regboard v{}", env!("CARGO_PKG_VERSION"));
    match Config::default_path() {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    tracing::info!("Data file: {:?}", config.data.path);

    // The dashboard has no fallback data source; a bad file stops startup
    let dataset = match Dataset::load(&config.data.loader(), &config.data.path) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::error!("Failed to load registrations: {}", e);
            return Err(e.into());
        }
    };

    tracing::info!(
        "Loaded {} registrations across {} cities",
        dataset.table().len(),
        dataset.table().cities().len()
    );

    let state = AppState::new(dataset, config.server.clone());
    serve(state, &config.server).await?;

    tracing::info!("Regboard stopped");
    Ok(())
}
