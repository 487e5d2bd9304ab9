mod routes;

use crate::collector::Collector;
use axum::{routing::get, Router};
use prometheus::Registry;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// State shared by every request handler. All of it is read-only;
/// scrapes and on-demand requests never share a table.
#[derive(Clone)]
pub struct AppState {
    pub collector: Collector,
    pub criteria_dir: Arc<PathBuf>,
    /// Process and upstream-client metrics served alongside listing counts
    pub registry: Registry,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/metrics", get(routes::metrics))
        .route("/listings", get(routes::listings))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
