//! Observability subsystem: structured logging and metrics.
//!
//! Access lines that the original deployment wrote to stderr are emitted
//! here as tracing events with structured fields (request ID, target,
//! method, path, status).

pub mod logging;
pub mod metrics;
