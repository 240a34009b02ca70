//! CORS preflight handling.
//!
//! Browsers send an OPTIONS probe before cross-origin requests. The proxy
//! answers these itself with a fixed policy; no route lookup, token fetch,
//! or upstream call is involved.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Methods advertised to preflighting browsers.
const ALLOWED_METHODS: &str = "GET, POST, PUT, DELETE, PATCH, OPTIONS";

/// Headers advertised to preflighting browsers.
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Preflight result cache lifetime in seconds (24 hours).
const MAX_AGE_SECS: &str = "86400";

/// Synthesize the canned preflight response: 200, fixed CORS headers,
/// empty body.
pub fn preflight_response() -> Response {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (header::ACCESS_CONTROL_MAX_AGE, MAX_AGE_SECS),
        ],
    )
        .into_response()
}
