pub mod criteria;
pub mod query;

pub use query::ListingQuery;

use crate::metrics::{aggregate, AggregateTable};
use crate::models::SearchCriteria;
use crate::search::{fetch_all, FetchError, FetchSettings, ListingSource};
use std::sync::Arc;
use tracing::{info, warn};

/// Runs searches and folds their listings into an [`AggregateTable`].
/// Every call builds its own table; only the source is shared.
#[derive(Clone)]
pub struct Collector {
    source: Arc<dyn ListingSource>,
    settings: FetchSettings,
}

impl Collector {
    pub fn new(source: Arc<dyn ListingSource>, settings: FetchSettings) -> Self {
        Self { source, settings }
    }

    /// Search each criteria set in turn and merge everything into one table.
    /// A failed search is logged and left out of the table.
    pub async fn collect_batch(&self, criteria: &[SearchCriteria]) -> AggregateTable {
        let mut table = AggregateTable::new();

        for (index, criteria) in criteria.iter().enumerate() {
            match fetch_all(self.source.as_ref(), criteria, &self.settings).await {
                Ok(listings) => {
                    info!(index, count = listings.len(), "Collected listings for criteria");
                    aggregate(&listings, &mut table);
                }
                Err(e) => {
                    warn!(index, ?criteria, error = %e, "Skipping criteria after failed search");
                }
            }
        }

        if table.is_empty() && !criteria.is_empty() {
            warn!(criteria = criteria.len(), "No listings collected for any criteria");
        }

        table
    }

    /// Search a single criteria set; any failure fails the whole call
    pub async fn collect_one(&self, criteria: &SearchCriteria) -> Result<AggregateTable, FetchError> {
        let listings = fetch_all(self.source.as_ref(), criteria, &self.settings).await?;

        let mut table = AggregateTable::new();
        aggregate(&listings, &mut table);
        Ok(table)
    }
}
