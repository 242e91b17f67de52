//! Price Generator Server
//!
//! REST API serving a simulated FX price feed.

use clap::Parser;
use pricegen_server::config::{build_config, CliArgs as ConfigCliArgs, LogFormat};
use pricegen_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Price Generator Server - simulated FX quotes over HTTP
#[derive(Parser, Debug)]
#[command(name = "pricegen_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "PRICEGEN_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PRICEGEN_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "PRICEGEN_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long, env = "PRICEGEN_LOG_FORMAT")]
    log_format: Option<String>,

    /// Seed for a reproducible price feed
    #[arg(long, env = "PRICEGEN_SEED")]
    seed: Option<u64>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            log_format: args.log_format,
            seed: args.seed,
        }
    }
}

fn init_tracing(log_level: &str, format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    match format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    // Initialize tracing
    init_tracing(config.log_level.as_filter_str(), config.log_format);

    tracing::info!("Price Generator Server v{}", pricegen_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        log_format = %config.log_format,
        environment = %config.environment,
        seed = ?config.seed,
        "Server configuration loaded"
    );

    if config.environment.is_production() && config.seed.is_some() {
        tracing::warn!("Fixed seed configured in production; the price feed is reproducible");
    }

    // Create and start the server
    let server = Server::new(config)?;
    let instruments = server.config().registry()?.list_instruments().join(", ");
    tracing::info!(instruments = %instruments, "Instrument registry loaded");

    let addr = server.socket_addr()?;
    tracing::info!(address = %addr, "Starting server");

    server.run().await?;

    Ok(())
}
