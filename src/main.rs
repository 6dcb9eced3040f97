use std::path::PathBuf;
use std::sync::Arc;

use api_relay::config::{load_config, RelayConfig};
use api_relay::lifecycle::{signals, startup};
use api_relay::observability::logging;
use api_relay::{RelayServer, Shutdown};
use clap::Parser;

#[derive(Parser)]
#[command(name = "api-relay")]
#[command(about = "CORS-enabled relay for third-party HTTP APIs", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }

    logging::init_logging(&config.observability);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config_file = ?cli.config,
        "api-relay starting"
    );

    let listener = startup::prepare(&config).await?;

    let shutdown = Arc::new(Shutdown::new());
    let server_shutdown = shutdown.signal();
    signals::spawn_signal_watcher(shutdown.clone());

    let server = RelayServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
