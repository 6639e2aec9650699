//! Transaction simulator - command line entry point

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, ConfigLoader, LoggingConfig};
use simulator::HttpSimulator;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Missing .env is the common case
    let dotenv_result = dotenv::dotenv();

    let cli = Cli::parse();

    if !cli.command.needs_simulator() {
        return commands::run_offline(&cli.command);
    }

    let config = load_config(cli.config.clone())?;
    init_logging(&config.logging)?;

    if let Err(e) = dotenv_result {
        if !e.to_string().contains("No such file or directory") {
            warn!("Could not load .env file: {}", e);
        }
    }

    info!("Starting simulator v{}", env!("CARGO_PKG_VERSION"));

    let simulator = HttpSimulator::connect(&config).context("Failed to connect simulator")?;
    commands::run(&simulator, cli.command).await
}

/// Load from the given file, CONFIG_PATH, or config.yaml; environment only when none exists
fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(|| {
        PathBuf::from(env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string()))
    });

    if path.exists() {
        ConfigLoader::load(&path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))
    } else {
        ConfigLoader::load_from_env().context("Failed to load configuration from environment")
    }
}

/// Initialize logging; RUST_LOG takes precedence over the configured level
fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match logging.format.as_str() {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
    }

    tracing::debug!(level = %logging.level, format = %logging.format, "Logging initialized");
    Ok(())
}
