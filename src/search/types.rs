use std::time::Duration;

/// Largest page the listings API serves
pub const PAGE_SIZE: usize = 200;

/// The API answers "Cannot page beyond 1000 records" past this point
pub const RESULT_CAP: usize = 1000;

/// Bounds applied to one paginated search
#[derive(Debug, Clone)]
pub struct FetchSettings {
    /// Maximum number of listings collected for one criteria set.
    /// Values above [`RESULT_CAP`] are clamped, see [`FetchSettings::cap`].
    pub result_cap: usize,
    /// Wall-clock budget for all pages of one criteria set
    pub deadline: Duration,
}

impl FetchSettings {
    /// Cap actually applied: the API refuses to page past [`RESULT_CAP`]
    pub fn cap(&self) -> usize {
        self.result_cap.min(RESULT_CAP)
    }

    /// Page size used for a search, never larger than the cap itself
    pub fn page_size(&self) -> usize {
        PAGE_SIZE.min(self.cap())
    }
}


impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            result_cap: RESULT_CAP,
            deadline: Duration::from_secs(120),
        }
    }
}
