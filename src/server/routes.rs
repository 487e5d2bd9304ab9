use crate::collector::{criteria, ListingQuery};
use crate::metrics::encode;
use crate::server::AppState;
use axum::{
    extract::{Query, State},
    http::{header::CONTENT_TYPE, StatusCode},
    response::{Html, IntoResponse, Response},
};
use prometheus::proto::MetricFamily;
use tracing::{error, info};

const INDEX: &str = r#"<!doctype html>
<title>Domain Exporter</title>
<h1>Domain Exporter</h1>
<a href="/metrics">Metrics</a>"#;

pub(super) async fn index() -> Html<&'static str> {
    Html(INDEX)
}

/// Scrape endpoint: searches every criteria document on each call
pub(super) async fn metrics(State(state): State<AppState>) -> Response {
    let criteria = criteria::load_dir(&state.criteria_dir).await;
    info!(criteria = criteria.len(), "Loaded search criteria");

    let table = state.collector.collect_batch(&criteria).await;
    info!(
        listings = table.total(),
        series = table.len(),
        "Collected listings for scrape"
    );

    let mut families = state.registry.gather();
    match table.gather() {
        Ok(listing_families) => families.extend(listing_families),
        Err(e) => error!(error = %e, "Failed to build listing metrics"),
    }
    families.sort_by(|a, b| a.get_name().cmp(b.get_name()));

    exposition(&families)
}

/// One-off search for a single location, answered with its own metrics
pub(super) async fn listings(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let criteria = ListingQuery::from_pairs(params).into_criteria();

    let table = match state.collector.collect_one(&criteria).await {
        Ok(table) => table,
        Err(e) => {
            error!(?criteria, error = %e, "Error searching domain");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("error searching domain: {e}"),
            )
                .into_response();
        }
    };

    match table.gather() {
        Ok(families) => exposition(&families),
        Err(e) => {
            error!(error = %e, "Failed to build listing metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn exposition(families: &[MetricFamily]) -> Response {
    match encode(families) {
        Ok(body) => ([(CONTENT_TYPE, prometheus::TEXT_FORMAT)], body).into_response(),
        Err(e) => {
            error!(error = %format!("{e:#}"), "Failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, format!("{e:#}")).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::collector::Collector;
    use crate::search::testing::{listing, FakeSource};
    use crate::search::{FetchError, FetchSettings};
    use crate::server::{router, AppState};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use prometheus::{IntCounter, Registry};
    use std::path::PathBuf;
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};
    use tower::ServiceExt;

    fn source() -> Arc<FakeSource> {
        Arc::new(FakeSource::new(|criteria| {
            match criteria.locations.first().map(|l| l.suburb.as_str()) {
                Some("Pyrmont") => Ok(vec![
                    listing("ApartmentUnitFlat", "Pyrmont", "2009", 2.0, 1.0, 1),
                    listing("ApartmentUnitFlat", "Pyrmont", "2009", 2.0, 1.0, 1),
                    listing("Studio", "Pyrmont", "2009", 0.0, 1.0, 0),
                ]),
                _ => Err(FetchError::Status {
                    status: 500,
                    body: "internal error".to_string(),
                }),
            }
        }))
    }

    fn state(source: Arc<FakeSource>, criteria_dir: PathBuf) -> AppState {
        AppState {
            collector: Collector::new(source, FetchSettings::default()),
            criteria_dir: Arc::new(criteria_dir),
            registry: Registry::new(),
        }
    }

    /// Criteria directory holding `(file name, document)` pairs
    fn criteria_dir(documents: &[(&str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (name, document) in documents {
            std::fs::write(dir.path().join(name), document).unwrap();
        }
        dir
    }

    const PYRMONT: &str = r#"{ "listingType": "Rent", "locations": [{ "suburb": "Pyrmont" }] }"#;
    const NOWHERE: &str = r#"{ "listingType": "Rent", "locations": [{ "suburb": "Nowhere" }] }"#;

    async fn get(state: AppState, uri: &str) -> (StatusCode, String) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn index_links_to_metrics() {
        let (status, body) = get(state(source(), PathBuf::from("unused")), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Domain Exporter</title>"));
        assert!(body.contains(r#"href="/metrics""#));
    }

    #[tokio::test]
    async fn on_demand_search_returns_its_own_counts() {
        let source = source();
        let (status, body) = get(
            state(source.clone(), PathBuf::from("unused")),
            "/listings?suburb=Pyrmont",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("domain_listing_count{"));
        assert!(body.contains(r#"propertytype="Studio""#));

        let sent = &source.requests()[0];
        assert_eq!(sent.listing_type, "Rent");
        assert_eq!(sent.locations.len(), 1);
        assert_eq!(sent.locations[0].suburb, "Pyrmont");
        assert_eq!(sent.locations[0].state, "");
    }

    #[tokio::test]
    async fn on_demand_failure_is_a_500_with_the_error() {
        let (status, body) = get(
            state(source(), PathBuf::from("unused")),
            "/listings?suburb=Nowhere&state=NSW&postCode=0000",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("error searching domain: "));
        assert!(body.contains("500"));
    }

    #[tokio::test]
    async fn on_demand_query_string_fills_the_location() {
        let source = source();
        let (status, _) = get(
            state(source.clone(), PathBuf::from("unused")),
            "/listings?state=NSW&suburb=Glebe&postCode=2037",
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let location = &source.requests()[0].locations[0];
        assert_eq!(location.state, "NSW");
        assert_eq!(location.suburb, "Glebe");
        assert_eq!(location.post_code, "2037");
    }

    #[tokio::test]
    async fn on_demand_repeated_parameter_uses_the_first() {
        let source = source();
        let (status, _) = get(
            state(source.clone(), PathBuf::from("unused")),
            "/listings?suburb=Pyrmont&suburb=Glebe",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(source.requests()[0].locations[0].suburb, "Pyrmont");
    }

    #[tokio::test]
    async fn scrape_survives_a_failing_criteria_set() {
        let dir = criteria_dir(&[("broken.json", NOWHERE), ("pyrmont.json", PYRMONT)]);

        let state = state(source(), dir.path().to_path_buf());
        let up = IntCounter::new("exporter_up_total", "Long-lived test metric").unwrap();
        up.inc();
        state.registry.register(Box::new(up)).unwrap();

        let (status, body) = get(state, "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("exporter_up_total 1"));
        let samples: Vec<&str> = body
            .lines()
            .filter(|line| line.starts_with("domain_listing_count{"))
            .collect();
        assert_eq!(samples.len(), 2);
        assert!(samples.iter().any(|line| line.ends_with(" 2")));
    }

    #[tokio::test]
    async fn scrapes_do_not_accumulate() {
        let dir = criteria_dir(&[("pyrmont.json", PYRMONT)]);

        let state = state(source(), dir.path().to_path_buf());
        let (_, first) = get(state.clone(), "/metrics").await;
        let (_, second) = get(state, "/metrics").await;

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn scrape_without_criteria_directory_still_answers() {
        let dir = tempdir().unwrap();

        let (status, body) = get(state(source(), dir.path().join("absent")), "/metrics").await;

        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("domain_listing_count{"));
    }
}
