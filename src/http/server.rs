//! HTTP server setup and request forwarding.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all proxy handler
//! - Wire up middleware (tracing, request ID)
//! - Bind the server to a listener with graceful shutdown
//! - Orchestrate the per-request pipeline: route → token → upstream → relay
//! - Own all error-to-status translation (via `http::error`)

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, Method, Request},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::auth::TokenProvider;
use crate::config::ProxyConfig;
use crate::http::cors::preflight_response;
use crate::http::error::ProxyError;
use crate::http::headers::{request_headers, response_headers};
use crate::http::request::{RequestIdLayer, X_REQUEST_ID};
use crate::lifecycle::signals::shutdown_signal;
use crate::observability::metrics;
use crate::routing::{Route, Router as ProxyRouter};

/// Application state injected into the handler.
///
/// Everything here is immutable or internally synchronized; requests share
/// nothing else.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub tokens: TokenProvider,
    pub client: reqwest::Client,
}

/// HTTP server for the identity proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, reqwest::Error> {
        let proxy_router = Arc::new(ProxyRouter::from_config(&config.routes));
        let tokens = TokenProvider::new(&config.token)?;

        // Upstream client; the timeout covers the whole request/response.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeouts.upstream_secs))
            .build()?;

        let state = AppState {
            router: proxy_router,
            tokens,
            client,
        };

        let router = Self::build_router(state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(proxy_handler))
            .route("/", any(proxy_handler))
            .with_state(state)
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server on the given listener until a shutdown signal arrives,
    /// either from the OS or from the provided channel.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            frontend = %self.config.routes.frontend_url,
            backend = %self.config.routes.backend_url,
            api_prefix = %self.config.routes.api_prefix,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => {}
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }
}

/// Main proxy handler.
///
/// Never lets a failure escape: every path through here produces a complete
/// HTTP response for the client.
async fn proxy_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request
        .headers()
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let method = request.method().clone();

    // Preflight short-circuits everything: no routing, no token, no upstream.
    if method == Method::OPTIONS {
        tracing::debug!(request_id = %request_id, "CORS preflight");
        metrics::record_request(method.as_str(), 200, "CORS", start_time);
        return preflight_response();
    }

    // Path and query are forwarded byte-for-byte.
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string());

    let route = state.router.route(request.uri().path()).clone();

    tracing::info!(
        request_id = %request_id,
        target = route.name,
        method = %method,
        path = %path_and_query,
        "Proxying request"
    );

    match forward(&state, &route, request, &path_and_query).await {
        Ok(response) => {
            let status = response.status();
            metrics::record_request(method.as_str(), status.as_u16(), route.name, start_time);
            tracing::debug!(
                request_id = %request_id,
                target = route.name,
                status = status.as_u16(),
                "Upstream responded"
            );
            response
        }
        Err(err) => {
            let status = err.status();
            metrics::record_request(method.as_str(), status.as_u16(), route.name, start_time);
            tracing::warn!(
                request_id = %request_id,
                target = route.name,
                status = status.as_u16(),
                error = %err,
                "Proxy request failed"
            );
            err.into_response()
        }
    }
}

/// The linear forwarding pipeline: token fetch → outbound build → upstream
/// call → response relay.
async fn forward(
    state: &AppState,
    route: &Route,
    request: Request<Body>,
    path_and_query: &str,
) -> Result<Response, ProxyError> {
    // Token first; on failure the upstream is never contacted.
    let token = state.tokens.fetch_token(&route.audience).await?;

    let (parts, body) = request.into_parts();

    // A body is only read when the client declared one: no Content-Length,
    // or a value of 0, means nothing is read or sent upstream.
    let declared_len = parts
        .headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(0);
    let body_bytes = if declared_len > 0 {
        axum::body::to_bytes(body, usize::MAX)
            .await
            .map_err(|e| ProxyError::Internal(format!("failed to read request body: {}", e)))?
    } else {
        Bytes::new()
    };

    let headers = request_headers(&parts.headers, &token)
        .map_err(|e| ProxyError::Internal(format!("token is not a valid header value: {}", e)))?;

    let url = format!("{}{}", route.base_url, path_and_query);
    let mut outbound = state.client.request(parts.method, &url).headers(headers);
    if !body_bytes.is_empty() {
        outbound = outbound.body(body_bytes);
    }

    let upstream = outbound.send().await.map_err(ProxyError::upstream)?;

    // Upstream HTTP errors (4xx/5xx) are relayed as-is, same as successes.
    let status = upstream.status();
    let mut headers = response_headers(upstream.headers());
    let body = match upstream.bytes().await {
        Ok(bytes) => bytes,
        Err(e) => {
            // A success body lost mid-read is an upstream connection error.
            if status.is_success() {
                return Err(ProxyError::upstream(e));
            }
            // Error relays are best effort: an unreadable body is omitted,
            // and the now-stale length header with it.
            tracing::debug!(error = %e, "Upstream error body unreadable, relaying status only");
            headers.remove(header::CONTENT_LENGTH);
            Bytes::new()
        }
    };

    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    Ok(response)
}
