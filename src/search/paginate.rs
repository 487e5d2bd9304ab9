use crate::models::{ListingRecord, SearchCriteria};
use crate::search::traits::ListingSource;
use crate::search::{FetchError, FetchSettings};
use tracing::debug;

/// Run a search to completion, one page at a time.
///
/// Pages are requested in order from page 0 until a page comes back short
/// (which includes empty), or until the next page would reach past
/// `settings.cap()`. Any failed page fails the whole search and the
/// listings gathered so far are dropped.
pub async fn fetch_all(
    source: &dyn ListingSource,
    criteria: &SearchCriteria,
    settings: &FetchSettings,
) -> Result<Vec<ListingRecord>, FetchError> {
    match tokio::time::timeout(settings.deadline, paginate(source, criteria.clone(), settings)).await {
        Ok(result) => result,
        Err(_) => Err(FetchError::Deadline(settings.deadline)),
    }
}

async fn paginate(
    source: &dyn ListingSource,
    mut criteria: SearchCriteria,
    settings: &FetchSettings,
) -> Result<Vec<ListingRecord>, FetchError> {
    let cap = settings.cap();
    let page_size = settings.page_size();
    let mut listings = Vec::new();

    if page_size == 0 {
        return Ok(listings);
    }

    criteria.page_size = page_size as u32;
    criteria.page_number = 0;

    loop {
        let page = source.search_page(&criteria).await?;
        let count = page.len();
        listings.extend(page);

        debug!(
            source = source.source_name(),
            page = criteria.page_number,
            count,
            total = listings.len(),
            "Appended listings page"
        );

        if count < page_size {
            break;
        }

        if listings.len() >= cap {
            break;
        }

        // Page n covers records [n * size, (n + 1) * size)
        let next_end = (criteria.page_number as usize + 2) * page_size;
        if next_end > cap {
            break;
        }

        criteria.page_number += 1;
    }

    // Only an API that ignores pageSize can overshoot here
    listings.truncate(cap);

    Ok(listings)
}
