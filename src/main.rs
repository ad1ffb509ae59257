//! Nuclide Explorer
//!
//! Command-line entry point: serve the explorer, inspect datasets or
//! generate a configuration file.
//!
//! # Configuration
//!
//! Settings come from a TOML file (`--config`, or the default locations)
//! overridden by environment variables:
//! - `NUCLIDE_DATA_DIR`: Directory holding the dataset files (default: ./Data)
//! - `NUCLIDE_HOST`: Host to bind to (default: 0.0.0.0)
//! - `NUCLIDE_PORT`: Port to listen on (default: 8050)
//! - `NUCLIDE_LOG_LEVEL`: Log level (default: info)
//! - `NUCLIDE_LOG_FORMAT`: pretty or json (default: pretty)
//! - `RUST_LOG`: Full tracing filter, takes precedence over the log level

use anyhow::Context;
use clap::{Parser, Subcommand};
use nuclide_explorer::api::{serve, AppState};
use nuclide_explorer::config::{generate_default_config, Config, LoggingConfig};
use nuclide_explorer::dataset::DatasetRegistry;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "nuclide-explorer")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive explorer for nuclear property datasets")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the datasets and serve the explorer
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory holding the dataset files
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Load the datasets and list them
    Datasets {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print a default config file
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            host,
            port,
            data_dir,
        } => {
            let (mut config, source) = load_config(config)?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data.data_dir = data_dir.to_string_lossy().into_owned();
            }
            init_tracing(&config.logging, source.as_deref());
            run_server(config).await
        }
        Commands::Datasets { config } => {
            let (config, source) = load_config(config)?;
            init_tracing(&config.logging, source.as_deref());
            list_datasets(&config)
        }
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Wrote default config to {}", path.display());
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

/// Load the given config file, or the first one found in the default
/// locations. Returns the file used, if any. Runs before logging is set up,
/// so every failure is returned rather than logged.
fn load_config(path: Option<PathBuf>) -> anyhow::Result<(Config, Option<PathBuf>)> {
    match path {
        Some(path) => {
            let config = Config::load_with_env(&path)?;
            Ok((config, Some(path)))
        }
        None => match Config::load_first(&Config::default_paths())? {
            Some((config, path)) => Ok((config, Some(path))),
            None => Ok((Config::from_env()?, None)),
        },
    }
}

fn init_tracing(logging: &LoggingConfig, source: Option<&Path>) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "nuclide_explorer={level},tower_http={level}",
            level = logging.level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    match source {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("Using default config with environment overrides"),
    }
}

fn load_registry(config: &Config) -> anyhow::Result<DatasetRegistry> {
    let sources = config.data.sources();
    tracing::info!("Data directory: {}", config.data.data_dir);
    tracing::info!("Loading {} dataset sources...", sources.len());

    let registry = DatasetRegistry::load(&sources).context("Failed to load datasets")?;
    tracing::info!("Loaded {} datasets", registry.len());
    Ok(registry)
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Nuclide Explorer v{}", env!("CARGO_PKG_VERSION"));

    let registry = Arc::new(load_registry(&config)?);
    let api_config = config.api_config();
    let state = AppState::with_sessions(registry, api_config.clone(), config.session_config())
        .context("Failed to build explore controller")?;

    serve(state, &api_config).await?;

    tracing::info!("Nuclide Explorer stopped");
    Ok(())
}

fn list_datasets(config: &Config) -> anyhow::Result<()> {
    let registry = load_registry(config)?;

    println!("{:<28} {:>8} {:>8}  DEFAULT AXES", "NAME", "ROWS", "FIELDS");
    for name in registry.names() {
        let entry = registry.entry(name)?;
        let axes = entry.defaults.axes();
        println!(
            "{:<28} {:>8} {:>8}  {} vs {}",
            name,
            entry.dataset.row_count(),
            entry.dataset.fields().len(),
            axes.y,
            axes.x,
        );
    }
    Ok(())
}
