//! Cross-origin policy.
//!
//! Built once from [`CorsConfig`] at startup and wrapped around the whole
//! router, so every response (relayed, rejected or failed) carries CORS
//! headers. Every `OPTIONS` request, preflight or not, ends with an empty
//! 204 and never reaches the relay handler.

use std::time::Duration;

use axum::extract::Request;
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Methods advertised on preflight.
pub const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::PUT,
    Method::PATCH,
    Method::POST,
    Method::DELETE,
];

/// Build the CORS layer permitting any origin.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origin = if config.mirror_origin {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::any()
    };

    let layer = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(ALLOWED_METHODS.to_vec())
        .allow_headers(AllowHeaders::mirror_request());

    match config.max_age_secs {
        Some(secs) => layer.max_age(Duration::from_secs(secs)),
        None => layer,
    }
}

/// Answer every `OPTIONS` request with an empty 204.
///
/// Sits outside [`cors_layer`], which answers real preflights itself with
/// 200; this rewrites that status.
pub async fn options_no_content(request: Request, next: Next) -> Response {
    if request.method() != Method::OPTIONS {
        return next.run(request).await;
    }

    let mut response = next.run(request).await;
    *response.status_mut() = StatusCode::NO_CONTENT;
    response
}

/// Terminate bare `OPTIONS` requests (no `Access-Control-Request-Method`)
/// that the CORS layer passes through, before they reach the relay handler.
pub async fn options_short_circuit(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return StatusCode::NO_CONTENT.into_response();
    }
    next.run(request).await
}
