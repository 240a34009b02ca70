//! Shared utilities for integration testing: mock upstreams, a mock
//! metadata endpoint, and a proxy spawner.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::Query;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::Router;
use serde_json::json;
use tokio::net::TcpListener;

use identity_proxy::config::ProxyConfig;
use identity_proxy::http::HttpServer;
use identity_proxy::lifecycle::Shutdown;

/// Bind an app on an ephemeral port and serve it in the background.
pub async fn spawn_app(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Spawn the proxy under test; returns its address and a shutdown handle.
pub async fn start_proxy(config: ProxyConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    let server = HttpServer::new(config).unwrap();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Observed state of the mock metadata endpoint.
#[derive(Clone, Default)]
pub struct MetadataMock {
    pub hits: Arc<AtomicUsize>,
    pub audiences: Arc<Mutex<Vec<String>>>,
}

/// Start a mock metadata endpoint issuing `token`, answering with `status`
/// after `delay`. Rejects callers missing the Metadata-Flavor header.
/// Returns the URL to configure as `token.metadata_url`.
pub async fn start_metadata_endpoint(
    mock: MetadataMock,
    token: &'static str,
    status: StatusCode,
    delay: Duration,
) -> String {
    let app = Router::new().route(
        "/identity",
        get(
            move |headers: HeaderMap, Query(params): Query<HashMap<String, String>>| {
                let mock = mock.clone();
                async move {
                    mock.hits.fetch_add(1, Ordering::SeqCst);

                    if headers
                        .get("metadata-flavor")
                        .and_then(|v| v.to_str().ok())
                        != Some("Google")
                    {
                        return (StatusCode::FORBIDDEN, "missing Metadata-Flavor".to_string());
                    }

                    if let Some(audience) = params.get("audience") {
                        mock.audiences.lock().unwrap().push(audience.clone());
                    }

                    tokio::time::sleep(delay).await;
                    (status, token.to_string())
                }
            },
        ),
    );

    let addr = spawn_app(app).await;
    format!("http://{}/identity", addr)
}

/// Start a mock upstream that echoes method, path+query, body, and the
/// received headers as JSON, tagged with `name`. Returns its base URL.
pub async fn start_echo_upstream(name: &'static str, hits: Arc<AtomicUsize>) -> String {
    let echo = move |req: axum::extract::Request| {
        let hits = hits.clone();
        async move {
            hits.fetch_add(1, Ordering::SeqCst);

            let (parts, body) = req.into_parts();
            let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();

            let mut headers = serde_json::Map::new();
            for (header_name, value) in parts.headers.iter() {
                headers.insert(
                    header_name.as_str().to_string(),
                    json!(value.to_str().unwrap_or("")),
                );
            }

            axum::Json(json!({
                "upstream": name,
                "method": parts.method.as_str(),
                "path": parts.uri.path_and_query().map(|pq| pq.as_str()).unwrap_or(""),
                "body": String::from_utf8_lossy(&bytes),
                "headers": headers,
            }))
            .into_response()
        }
    };

    let app = Router::new()
        .route("/", any(echo.clone()))
        .route("/{*path}", any(echo));

    let addr = spawn_app(app).await;
    format!("http://{}", addr)
}

/// Start a raw-TCP upstream that advertises a 10-byte body but sends only
/// 3 bytes before closing the connection. Returns its base URL.
pub async fn start_truncating_upstream(status_line: &'static str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let mut buf = [0u8; 4096];
                        let _ = socket.read(&mut buf).await;
                        let response =
                            format!("HTTP/1.1 {}\r\nContent-Length: 10\r\n\r\nabc", status_line);
                        let _ = socket.write_all(response.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    format!("http://{}", addr)
}

/// Config pointing the proxy at the given mocks.
pub fn test_config(frontend_url: String, backend_url: String, metadata_url: String) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.routes.frontend_url = frontend_url;
    config.routes.backend_url = backend_url;
    config.token.metadata_url = metadata_url;
    config
}

/// Non-pooling client so every request hits a fresh connection.
pub fn test_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
