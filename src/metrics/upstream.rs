use prometheus::{Histogram, HistogramOpts, IntCounterVec, Opts, Registry};
use std::time::Duration;

/// Instrumentation for calls made to the listings API.
/// Lives in the long-lived registry and is shared by every scrape.
#[derive(Clone)]
pub struct UpstreamMetrics {
    requests: IntCounterVec,
    duration: Histogram,
}

impl UpstreamMetrics {
    pub fn register(registry: &Registry) -> prometheus::Result<Self> {
        let requests = IntCounterVec::new(
            Opts::new(
                "domain_api_requests_total",
                "Requests made to the Domain listings API, by response code.",
            ),
            &["code"],
        )?;
        let duration = Histogram::with_opts(HistogramOpts::new(
            "domain_api_request_duration_seconds",
            "Time taken by requests to the Domain listings API.",
        ))?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self { requests, duration })
    }

    /// Record one finished call. `code` is the HTTP status, or "error" when
    /// no response arrived.
    pub fn observe(&self, code: &str, elapsed: Duration) {
        self.requests.with_label_values(&[code]).inc();
        self.duration.observe(elapsed.as_secs_f64());
    }
}
