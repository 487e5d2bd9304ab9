use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` the same as an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One geographic constraint of a search
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFilter {
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub region: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub area: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suburb: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub post_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub include_surrounding_suburbs: bool,
}

/// Residential search request, in the shape the Domain API expects.
///
/// `page_size` and `page_number` belong to the paginator: whatever a caller
/// or a criteria document puts there is overwritten before the first page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    #[serde(default, deserialize_with = "null_as_default")]
    pub listing_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_bedrooms: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_bathrooms: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub min_carspaces: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_size: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub page_number: u32,
    #[serde(default, alias = "Locations", deserialize_with = "null_as_default")]
    pub locations: Vec<LocationFilter>,
}

impl SearchCriteria {
    /// Parse and validate an externally authored criteria document
    pub fn from_json(raw: &str) -> Result<Self> {
        let criteria: SearchCriteria =
            serde_json::from_str(raw).context("Criteria document is not valid JSON")?;

        if criteria.listing_type.trim().is_empty() {
            bail!("Criteria document has no listingType");
        }

        Ok(criteria)
    }
}

/// One result of the residential search endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub listing: PropertyListing,
}

impl ListingRecord {
    pub fn details(&self) -> &PropertyDetails {
        &self.listing.property_details
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    #[serde(default, deserialize_with = "null_as_default")]
    pub property_details: PropertyDetails,
}

/// Property attributes the exporter groups listings by.
/// Bedrooms and bathrooms are fractional since half rooms are listed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub property_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bathrooms: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bedrooms: f32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub carspaces: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub suburb: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub postcode: String,
}
