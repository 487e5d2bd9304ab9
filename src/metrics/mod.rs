pub mod aggregate;
pub mod upstream;

pub use aggregate::{aggregate, AggregateTable};
pub use upstream::UpstreamMetrics;

use anyhow::{Context, Result};
use prometheus::proto::MetricFamily;
use prometheus::{Encoder, Registry, TextEncoder};

/// Registry for metrics that live as long as the process
pub fn process_registry() -> Result<Registry> {
    let registry = Registry::new();

    #[cfg(target_os = "linux")]
    registry
        .register(Box::new(
            prometheus::process_collector::ProcessCollector::for_self(),
        ))
        .context("Failed to register process collector")?;

    Ok(registry)
}

/// Encode metric families in the Prometheus text format
pub fn encode(families: &[MetricFamily]) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    TextEncoder::new()
        .encode(families, &mut buffer)
        .context("Failed to encode metrics")?;
    Ok(buffer)
}
