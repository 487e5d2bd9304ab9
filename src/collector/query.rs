use crate::models::{LocationFilter, SearchCriteria};

/// Listing type used for on-demand searches
pub const ON_DEMAND_LISTING_TYPE: &str = "Rent";

/// Query string of an on-demand listings request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub state: String,
    pub suburb: String,
    pub post_code: String,
}

impl ListingQuery {
    /// Build from decoded query pairs. A repeated parameter keeps its first
    /// value and unknown parameters are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut state = None;
        let mut suburb = None;
        let mut post_code = None;

        for (name, value) in pairs {
            let slot = match name.as_str() {
                "state" => &mut state,
                "suburb" => &mut suburb,
                "postCode" => &mut post_code,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        Self {
            state: state.unwrap_or_default(),
            suburb: suburb.unwrap_or_default(),
            post_code: post_code.unwrap_or_default(),
        }
    }

    /// Rental search with no minimums and a single location built from the query
    pub fn into_criteria(self) -> SearchCriteria {
        SearchCriteria {
            listing_type: ON_DEMAND_LISTING_TYPE.to_string(),
            locations: vec![LocationFilter {
                state: self.state,
                suburb: self.suburb,
                post_code: self.post_code,
                ..Default::default()
            }],
            ..Default::default()
        }
    }
}
