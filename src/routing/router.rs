//! Route lookup.
//!
//! # Responsibilities
//! - Hold the two compiled routes (backend behind a prefix, frontend default)
//! - Resolve every inbound path to exactly one route
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Total function: no path can fail to route, the frontend is the catch-all
//! - Literal, case-sensitive prefix match; `/api` without the trailing slash
//!   falls through to the frontend, and `/apiX` never matches

use crate::config::RoutesConfig;

/// A resolved forwarding target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Target identifier for logging/metrics ("BACKEND" or "FRONTEND").
    pub name: &'static str,
    /// Upstream base URL the request path is appended to.
    pub base_url: String,
    /// Audience the identity token must be scoped to (the base URL).
    pub audience: String,
}

impl Route {
    fn new(name: &'static str, base_url: &str) -> Self {
        Self {
            name,
            base_url: base_url.to_string(),
            audience: base_url.to_string(),
        }
    }
}

/// The fixed two-route table, compiled once at startup.
#[derive(Debug)]
pub struct Router {
    api_prefix: String,
    backend: Route,
    frontend: Route,
}

impl Router {
    /// Compile the route table from configuration.
    pub fn from_config(routes: &RoutesConfig) -> Self {
        Self {
            api_prefix: routes.api_prefix.clone(),
            backend: Route::new("BACKEND", &routes.backend_url),
            frontend: Route::new("FRONTEND", &routes.frontend_url),
        }
    }

    /// Resolve a request path to its route. Never fails.
    pub fn route(&self, path: &str) -> &Route {
        if path.starts_with(&self.api_prefix) {
            &self.backend
        } else {
            &self.frontend
        }
    }
}
