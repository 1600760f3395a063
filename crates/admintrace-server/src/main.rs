//! CLI entry point for the admintrace HTTP API.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use admintrace_core::AppConfig;
use admintrace_graph::{AdminGraph, EndpointClient, GraphConfig};
use admintrace_server::{router, AppState};

#[derive(Parser)]
#[command(name = "admintrace")]
#[command(about = "Read-only HTTP API over the administrative-unit lifecycle graph")]
struct Cli {
    /// Config file prefix (default: admintrace).
    #[arg(short, long, default_value = "admintrace")]
    config: String,

    /// Override the listen host from config.
    #[arg(long)]
    host: Option<String>,

    /// Override the listen port from config.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let mut config = AppConfig::load(&cli.config)?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let endpoint = EndpointClient::new(&GraphConfig::from(&config))?;
    let graph = AdminGraph::new(Arc::new(endpoint), config.ontology.namespace.clone());
    let app = router(AppState::new(graph));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, endpoint = %config.endpoint.url, "admintrace listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
