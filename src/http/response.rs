//! Building the reply to the caller.
//!
//! Upstream status and headers are never propagated: a completed transfer
//! is always 200 with the raw upstream body.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Content type of relayed bodies.
pub const RELAYED_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Wrap an accumulated upstream body in a 200 response.
pub fn relayed(body: Vec<u8>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, RELAYED_CONTENT_TYPE)],
        body,
    )
        .into_response()
}
