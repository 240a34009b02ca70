//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty config file yields the stock
//! deployment.

use serde::{Deserialize, Serialize};

/// Root configuration for the identity proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// The two fixed routes (backend behind a path prefix, frontend catch-all).
    pub routes: RoutesConfig,

    /// Identity token provider settings.
    pub token: TokenConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8080".to_string(),
        }
    }
}

/// The fixed route table: one prefixed backend route, one frontend catch-all.
///
/// The backend route matches any path starting with `api_prefix` (literal,
/// case-sensitive). Everything else falls through to the frontend. The token
/// audience for each route is its base URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path prefix that selects the backend route.
    pub api_prefix: String,

    /// Backend base URL (no trailing slash).
    pub backend_url: String,

    /// Frontend base URL (no trailing slash).
    pub frontend_url: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api/".to_string(),
            backend_url: "https://alchile-backend-ooexwakkyq-uc.a.run.app".to_string(),
            frontend_url: "https://alchile-frontend-ooexwakkyq-uc.a.run.app".to_string(),
        }
    }
}

/// Identity token provider configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Metadata identity endpoint. The target audience is appended as the
    /// `audience` query parameter.
    pub metadata_url: String,

    /// Token fetch timeout in seconds.
    pub fetch_timeout_secs: u64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            metadata_url:
                "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/identity"
                    .to_string(),
            fetch_timeout_secs: 5,
        }
    }
}

/// Timeout configuration for upstream calls.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for an upstream request/response in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { upstream_secs: 60 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
