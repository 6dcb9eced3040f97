//! Relay error taxonomy and its mapping onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Body returned when the `url` query parameter is absent or empty.
pub const MISSING_URL_BODY: &str = "Missing 'url' query parameter.";

/// Body returned for any transport-level upstream failure.
pub const UPSTREAM_FAILURE_BODY: &str = "Failed to call Google API.";

/// Errors a relay invocation can end in.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The caller did not supply a target URL.
    #[error("missing 'url' query parameter")]
    MissingUrl,

    /// Connecting to, or reading from, the target failed.
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The detached fetch task panicked or was cancelled.
    #[error("upstream task aborted: {0}")]
    Detached(#[from] tokio::task::JoinError),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::MissingUrl => StatusCode::BAD_REQUEST,
            RelayError::Upstream(_) | RelayError::Detached(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Fixed body shown to the caller. The cause is never exposed.
    pub fn body(&self) -> &'static str {
        match self {
            RelayError::MissingUrl => MISSING_URL_BODY,
            RelayError::Upstream(_) | RelayError::Detached(_) => UPSTREAM_FAILURE_BODY,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        (self.status(), self.body()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_maps_to_400() {
        let err = RelayError::MissingUrl;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body(), "Missing 'url' query parameter.");
    }

    #[tokio::test]
    async fn test_detached_failure_maps_to_500() {
        let join_err = tokio::spawn(async { panic!("boom") }).await.unwrap_err();
        let response = RelayError::from(join_err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], UPSTREAM_FAILURE_BODY.as_bytes());
    }
}
