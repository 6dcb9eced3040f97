//! Startup orchestration.
//!
//! Order: metrics exporter (if enabled), then the listener. Any failure is
//! fatal; traffic is only accepted once everything before it is ready.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::RelayConfig;
use crate::observability::metrics;

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid address `{0}`")]
    Address(String),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("failed to start metrics exporter: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),
}

/// Start the metrics exporter if enabled and bind the relay listener.
pub async fn prepare(config: &RelayConfig) -> Result<TcpListener, StartupError> {
    let observability = &config.observability;
    if observability.metrics_enabled {
        let addr = parse_addr(&observability.metrics_address)?;
        metrics::init_metrics(addr)?;
    }

    let addr = parse_addr(&config.listener.bind_address)?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr, source })?;

    tracing::info!(address = %addr, "Listening for connections");
    Ok(listener)
}

fn parse_addr(value: &str) -> Result<SocketAddr, StartupError> {
    value
        .parse()
        .map_err(|_| StartupError::Address(value.to_string()))
}
