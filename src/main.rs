//! epidash Server
//!
//! Run with: cargo run --bin epidash -- --config config.toml
//!
//! # Configuration
//!
//! Settings come from the first config file found (see `epidash::config`),
//! then `EPIDASH_*` environment variables, then command-line flags.
//! `RUST_LOG` takes precedence over the configured log level.

use anyhow::Context;
use clap::Parser;
use epidash::api::{serve, AppState};
use epidash::config::{Config, LoggingConfig};
use epidash::countries::FlagResolver;
use epidash::dataset::DatasetCache;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "epidash")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "COVID-19 dashboard server")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset CSV, overrides the configured path
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Port to listen on, overrides the configured port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let source = args.config.clone().or_else(Config::locate);
    let mut config = match &source {
        Some(path) => Config::load_with_env(path)?,
        None => Config::from_env(),
    };
    if let Some(dataset) = args.dataset {
        config.dataset.path = dataset.to_string_lossy().to_string();
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    init_tracing(&config.logging)?;

    tracing::info!("Starting epidash v{}", env!("CARGO_PKG_VERSION"));
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    tracing::info!("Dataset: {}", config.dataset.path);

    let dataset = Arc::new(DatasetCache::new(&config.dataset.path));
    if config.dataset.preload {
        let table = dataset
            .get()
            .await
            .with_context(|| format!("Failed to preload {}", config.dataset.path))?;
        tracing::info!("Preloaded {}", table.stats());
    }

    let api_config = config.api.to_runtime();
    let state = AppState::new(
        dataset,
        FlagResolver::new(&config.dataset.flag_host),
        api_config.clone(),
    );

    serve(state, &api_config).await?;

    tracing::info!("epidash stopped");
    Ok(())
}

/// Install the global subscriber described by the logging config
fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("epidash={},tower_http=info", logging.level).into());

    let writer = match &logging.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stdout),
    };

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format.eq_ignore_ascii_case("json") {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init();
    }

    Ok(())
}
