//! In-memory listing source for tests

use crate::models::{ListingRecord, PropertyDetails, PropertyListing, SearchCriteria};
use crate::search::traits::ListingSource;
use crate::search::FetchError;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

type Responder = Box<dyn Fn(&SearchCriteria) -> Result<Vec<ListingRecord>, FetchError> + Send + Sync>;

/// Answers pages from a closure and remembers every request it saw
pub struct FakeSource {
    respond: Responder,
    delay: Option<Duration>,
    requests: Mutex<Vec<SearchCriteria>>,
}

impl FakeSource {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&SearchCriteria) -> Result<Vec<ListingRecord>, FetchError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Serves `total` listings, sliced by the requested page size and number
    pub fn paged(total: usize) -> Self {
        Self::new(move |criteria| {
            let size = criteria.page_size as usize;
            let start = (criteria.page_number as usize * size).min(total);
            let end = (start + size).min(total);
            Ok((start..end).map(sample_listing).collect())
        })
    }

    /// Every page fails with `status`
    pub fn failing(status: u16) -> Self {
        Self::new(move |_| {
            Err(FetchError::Status {
                status,
                body: "internal error".to_string(),
            })
        })
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<SearchCriteria> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ListingSource for FakeSource {
    async fn search_page(&self, criteria: &SearchCriteria) -> Result<Vec<ListingRecord>, FetchError> {
        self.requests.lock().unwrap().push(criteria.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        (self.respond)(criteria)
    }

    fn source_name(&self) -> &'static str {
        "Fake"
    }
}

pub fn listing(
    property_type: &str,
    suburb: &str,
    postcode: &str,
    bedrooms: f32,
    bathrooms: f32,
    carspaces: i32,
) -> ListingRecord {
    ListingRecord {
        listing: PropertyListing {
            property_details: PropertyDetails {
                state: "NSW".to_string(),
                property_type: property_type.to_string(),
                bathrooms,
                bedrooms,
                carspaces,
                suburb: suburb.to_string(),
                postcode: postcode.to_string(),
            },
        },
    }
}

/// A listing whose bedroom count varies with `i`
pub fn sample_listing(i: usize) -> ListingRecord {
    listing("ApartmentUnitFlat", "PYRMONT", "2009", (i % 4) as f32, 1.0, 1)
}
