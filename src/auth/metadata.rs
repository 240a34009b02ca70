//! Identity token client for the instance metadata endpoint.
//!
//! # Responsibilities
//! - Fetch a short-lived identity token scoped to a target audience
//! - Enforce the fetch timeout so a stalled endpoint cannot hang a request
//!
//! # Design Decisions
//! - One round trip per proxied request: tokens are never cached or reused,
//!   their TTL is owned entirely by the issuing endpoint
//! - No retries; a fetch failure maps straight to a gateway error

use std::time::Duration;

use crate::config::TokenConfig;

/// Header the metadata endpoint requires on every request.
const METADATA_FLAVOR: &str = "Metadata-Flavor";

/// Error type for token acquisition.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Network-level failure or timeout reaching the metadata endpoint.
    #[error("metadata endpoint unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The metadata endpoint answered with a non-success status.
    #[error("metadata endpoint returned {status}")]
    Status { status: reqwest::StatusCode },
}

/// Client for the local credential-issuing endpoint.
#[derive(Debug, Clone)]
pub struct TokenProvider {
    client: reqwest::Client,
    metadata_url: String,
}

impl TokenProvider {
    /// Build a provider from configuration.
    pub fn new(config: &TokenConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.fetch_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            metadata_url: config.metadata_url.clone(),
        })
    }

    /// Fetch a fresh identity token scoped to `audience`.
    ///
    /// The response body verbatim is the token; the caller wraps it into the
    /// outbound auth header.
    pub async fn fetch_token(&self, audience: &str) -> Result<String, TokenError> {
        let response = self
            .client
            .get(&self.metadata_url)
            .query(&[("audience", audience)])
            .header(METADATA_FLAVOR, "Google")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TokenError::Status { status });
        }

        Ok(response.text().await?)
    }
}
