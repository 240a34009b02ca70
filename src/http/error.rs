//! Error taxonomy for the forwarding path.
//!
//! Every fallible stage (token fetch, upstream call, anything unexpected)
//! surfaces here, and status mapping happens in exactly one place. Upstream
//! HTTP error statuses are not errors at this level: they are relayed as
//! regular responses with the upstream's own headers and body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::auth::TokenError;

/// A failure while proxying a single request. Terminal: there are no retries.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// The identity token could not be obtained; no upstream call was made.
    #[error("identity token fetch failed: {0}")]
    TokenFetch(#[from] TokenError),

    /// The upstream was unreachable, refused the connection, or timed out.
    #[error("{1}")]
    Upstream(#[source] reqwest::Error, String),

    /// Anything else that should never happen on the forwarding path.
    #[error("{0}")]
    Internal(String),
}

impl ProxyError {
    /// Wrap a transport failure, flattening the error chain into a single
    /// reason string for the client-visible body.
    pub fn upstream(err: reqwest::Error) -> Self {
        let mut reason = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            reason = format!("{}: {}", reason, cause);
            source = cause.source();
        }
        ProxyError::Upstream(err, reason)
    }

    /// The client-visible status for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::TokenFetch(_) | ProxyError::Upstream(..) => StatusCode::BAD_GATEWAY,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = match &self {
            ProxyError::TokenFetch(e) => format!("Bad Gateway: {}", e),
            ProxyError::Upstream(_, reason) => format!("Bad Gateway: {}", reason),
            ProxyError::Internal(msg) => format!("Internal Server Error: {}", msg),
        };
        (self.status(), body).into_response()
    }
}
