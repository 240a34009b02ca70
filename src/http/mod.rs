//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, catch-all handler)
//!     → request.rs (request ID)
//!     → [OPTIONS?] cors.rs (canned preflight response)
//!     → routing + auth (route and token for this request)
//!     → headers.rs (request-direction filter, token injection)
//!     → upstream call
//!     → headers.rs (response-direction filter)
//!     → error.rs (status mapping for any failure along the way)
//! ```

pub mod cors;
pub mod error;
pub mod headers;
pub mod request;
pub mod server;

pub use error::ProxyError;
pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
