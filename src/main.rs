mod collector;
mod config;
mod metrics;
mod models;
mod search;
mod server;

use anyhow::{Context, Result};
use clap::Parser;
use collector::Collector;
use config::Config;
use metrics::UpstreamMetrics;
use search::DomainClient;
use server::AppState;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::parse();
    if config.result_cap > search::types::RESULT_CAP {
        warn!(
            requested = config.result_cap,
            applied = search::types::RESULT_CAP,
            "Result cap is above what the Domain API will page to, clamping"
        );
    }

    let registry = metrics::process_registry()?;
    let upstream = UpstreamMetrics::register(&registry).context("Failed to register client metrics")?;

    let client = DomainClient::new(&config.api_url, &config.api_key, config.page_timeout())?
        .with_metrics(upstream);
    let collector = Collector::new(Arc::new(client), config.fetch_settings());

    let app = server::router(AppState {
        collector,
        criteria_dir: Arc::new(config.criteria_dir.clone()),
        registry,
    });

    let addr = config.bind_addr();
    info!(
        %addr,
        criteria_dir = %config.criteria_dir.display(),
        result_cap = config.result_cap,
        "Exporter starting"
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
