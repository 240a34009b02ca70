//! Process bootstrap for the identity proxy.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use identity_proxy::config::{load_config, ProxyConfig};
use identity_proxy::http::HttpServer;
use identity_proxy::lifecycle::Shutdown;
use identity_proxy::observability::{logging, metrics};

#[derive(Parser, Debug)]
#[command(name = "identity-proxy", about = "Identity-injecting reverse proxy")]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };

    logging::init(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        frontend = %config.routes.frontend_url,
        backend = %config.routes.backend_url,
        api_prefix = %config.routes.api_prefix,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
