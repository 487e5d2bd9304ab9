use crate::models::{ListingRecord, SearchCriteria};
use crate::search::FetchError;
use async_trait::async_trait;

/// Anything that can answer a single page of a residential search.
/// The paginator drives it; tests swap in an in-memory source.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch the page described by `criteria.page_size` and `criteria.page_number`
    async fn search_page(&self, criteria: &SearchCriteria) -> Result<Vec<ListingRecord>, FetchError>;

    /// Get the name of the listings source
    fn source_name(&self) -> &'static str;
}
