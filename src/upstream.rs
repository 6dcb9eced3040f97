//! Outbound calls to the target API.
//!
//! # Responsibilities
//! - Issue a single GET to the caller-supplied URL
//! - Accumulate the body chunk by chunk, in arrival order
//! - Decide whether the call outlives the inbound connection
//!
//! # Design Decisions
//! - One shared `reqwest::Client` (pooled connections, default timeouts
//!   and redirect policy)
//! - System proxy settings are ignored; the relay always dials the target
//! - The URL is passed through untouched; a string the client cannot parse
//!   surfaces as a transport error

use crate::config::UpstreamConfig;
use crate::error::RelayError;

/// Handle to the outbound HTTP client.
#[derive(Clone)]
pub struct Upstream {
    client: reqwest::Client,
    cancel_on_disconnect: bool,
}

impl Upstream {
    /// Build the outbound client from configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder().no_proxy();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        Ok(Self {
            client: builder.build()?,
            cancel_on_disconnect: config.cancel_on_disconnect,
        })
    }

    /// Fetch `url` and return its full body.
    ///
    /// Unless `cancel_on_disconnect` is set, the fetch runs on a spawned
    /// task: dropping the returned future does not abort the outbound call.
    pub async fn relay(&self, url: &str) -> Result<Vec<u8>, RelayError> {
        if self.cancel_on_disconnect {
            return Ok(fetch(&self.client, url).await?);
        }

        let client = self.client.clone();
        let url = url.to_owned();
        let body = tokio::spawn(async move { fetch(&client, &url).await }).await??;
        Ok(body)
    }
}

/// Perform one GET and concatenate the body chunks in arrival order.
///
/// The upstream status is logged but otherwise ignored; only transport
/// failures are errors.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, reqwest::Error> {
    let mut response = client.get(url).send().await?;

    tracing::debug!(
        status = %response.status(),
        content_length = ?response.content_length(),
        "Upstream responded"
    );

    let mut body = Vec::new();
    let mut chunks = 0usize;
    while let Some(chunk) = response.chunk().await? {
        chunks += 1;
        body.extend_from_slice(&chunk);
    }

    tracing::debug!(chunks, bytes = body.len(), "Upstream body complete");
    Ok(body)
}
