//! Wavematch Daemon - reference waveform matching service
//!
//! The daemon provides:
//! - REST API for channel data and scan submission
//! - Background scans over the selected channels
//! - Server-sent event stream of scan progress and results

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wavematch_daemon::config::StorageConfig;
use wavematch_daemon::error::{DaemonError, DaemonResult};
use wavematch_daemon::{DaemonConfig, Server};

/// Wavematch Daemon CLI
#[derive(Parser)]
#[command(name = "wavematchd")]
#[command(about = "Wavematch Daemon - reference waveform matching service", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "WAVEMATCH_CONFIG")]
    config: Option<String>,

    /// Listen address (overrides the configuration file)
    #[arg(short, long, env = "WAVEMATCH_LISTEN_ADDR")]
    listen: Option<String>,

    /// Data directory holding channel files (overrides the configuration file)
    #[arg(short, long, env = "WAVEMATCH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level (overrides the configuration file)
    #[arg(long, env = "WAVEMATCH_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "WAVEMATCH_LOG_JSON")]
    json: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(data_dir) = cli.data_dir {
        config.set_data_dir(data_dir);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    config.logging.json |= cli.json;

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let storage = match &config.storage {
        StorageConfig::File { data_dir, .. } => data_dir.display().to_string(),
        StorageConfig::Memory => "memory".to_string(),
    };

    // Print startup banner
    println!(
        r#"
  WAVEMATCH
  Reference Waveform Matcher
  Version: {}
  Storage: {}
  Listening: {}
"#,
        env!("CARGO_PKG_VERSION"),
        storage,
        config.server.listen_addr
    );

    // Create and run server
    let server = Server::new(config)?;
    server.run().await
}
