use std::time::Duration;
use thiserror::Error;

/// Why a search against the listings API produced no result set.
/// None of these are retried; the next scrape is the retry.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("got non-200 code: {status}: {body}")]
    Status { status: u16, body: String },

    #[error("couldn't parse json: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("search did not finish within {0:?}")]
    Deadline(Duration),
}
