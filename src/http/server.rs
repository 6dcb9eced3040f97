//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the relay handler on every path
//! - Wire up middleware (request ID, tracing, CORS)
//! - Serve on a bound listener until shutdown is signalled

use axum::{middleware, routing::any, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::http::cors::{cors_layer, options_no_content, options_short_circuit};
use crate::http::relay::{relay_handler, RelayState};
use crate::http::request::{make_request_span, propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::ShutdownSignal;
use crate::upstream::Upstream;

/// HTTP server for the relay.
pub struct RelayServer {
    router: Router,
    config: RelayConfig,
}

impl RelayServer {
    /// Create a new relay server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let upstream = Upstream::from_config(&config.upstream)?;
        let router = build_router(&config, upstream);
        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownSignal,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mirror_origin = self.config.cors.mirror_origin,
            cancel_on_disconnect = self.config.upstream.cancel_on_disconnect,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.wait().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Layers run outermost first: request ID assignment, request ID
/// propagation, tracing, `OPTIONS` status rewrite, CORS, bare `OPTIONS`
/// short-circuit, then the handler. CORS sits inside the ID layers so
/// preflight answers carry an ID too.
pub fn build_router(config: &RelayConfig, upstream: Upstream) -> Router {
    let state = RelayState { upstream };

    Router::new()
        .route("/", any(relay_handler))
        .route("/{*path}", any(relay_handler))
        .with_state(state)
        .layer(middleware::from_fn(options_short_circuit))
        .layer(cors_layer(&config.cors))
        .layer(middleware::from_fn(options_no_content))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
}
