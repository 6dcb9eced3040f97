//! The relay handler.
//!
//! Reads `url` from the query string, fetches it once with GET and returns
//! the body. Responses collapse to three outcomes:
//!
//! | Condition                    | Status | Body                             |
//! |------------------------------|--------|----------------------------------|
//! | `url` missing or empty       | 400    | `Missing 'url' query parameter.` |
//! | transfer completed           | 200    | upstream body, byte-exact        |
//! | transport failure            | 500    | `Failed to call Google API.`     |

use std::time::Instant;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;

use crate::error::RelayError;
use crate::http::response::relayed;
use crate::observability::metrics::{self, Outcome};
use crate::upstream::Upstream;

/// Application state injected into the handler.
#[derive(Clone)]
pub struct RelayState {
    pub upstream: Upstream,
}

/// Query parameters understood by the relay. Anything else is ignored.
#[derive(Debug, Deserialize)]
pub struct RelayParams {
    pub url: Option<String>,
}

impl RelayParams {
    /// The target URL, if present and non-empty.
    pub fn target(&self) -> Option<&str> {
        self.url.as_deref().filter(|url| !url.is_empty())
    }
}

/// Relay one request. Any method, any path.
pub async fn relay_handler(
    State(state): State<RelayState>,
    params: Result<Query<RelayParams>, QueryRejection>,
) -> Result<Response, RelayError> {
    let start_time = Instant::now();

    // An undecodable query string counts as a missing parameter.
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Query string rejected");
            RelayParams { url: None }
        }
    };

    let Some(url) = params.target() else {
        tracing::warn!("Request without target url");
        metrics::record_relay(Outcome::MissingUrl, start_time);
        return Err(RelayError::MissingUrl);
    };

    tracing::debug!(url = %url, "Relaying request");

    match state.upstream.relay(url).await {
        Ok(body) => {
            metrics::record_relay(Outcome::Relayed, start_time);
            Ok(relayed(body))
        }
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Error calling upstream API");
            metrics::record_relay(Outcome::UpstreamFailed, start_time);
            Err(e)
        }
    }
}
