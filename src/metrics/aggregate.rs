use crate::models::ListingRecord;
use prometheus::proto::MetricFamily;
use prometheus::{IntGaugeVec, Opts, Registry};
use std::collections::BTreeMap;

pub const LISTING_METRIC: &str = "domain_listing_count";

/// Label names, in the order of the fields of [`AggregateKey`]
pub const LISTING_LABELS: [&str; 6] = [
    "propertytype",
    "suburb",
    "postcode",
    "bedrooms",
    "bathrooms",
    "carspaces",
];

/// The label values one listing is counted under.
///
/// Room counts keep one decimal ("3.0", "2.5") and car spaces are a plain
/// integer ("1"). These strings end up as label values, so they must not drift.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AggregateKey {
    pub property_type: String,
    pub suburb: String,
    pub postcode: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub carspaces: String,
}

impl AggregateKey {
    pub fn from_listing(record: &ListingRecord) -> Self {
        let details = record.details();
        Self {
            property_type: details.property_type.clone(),
            suburb: details.suburb.clone(),
            postcode: details.postcode.clone(),
            bedrooms: format!("{:.1}", details.bedrooms),
            bathrooms: format!("{:.1}", details.bathrooms),
            carspaces: details.carspaces.to_string(),
        }
    }

    fn label_values(&self) -> [&str; 6] {
        [
            self.property_type.as_str(),
            self.suburb.as_str(),
            self.postcode.as_str(),
            self.bedrooms.as_str(),
            self.bathrooms.as_str(),
            self.carspaces.as_str(),
        ]
    }
}

/// Listing counts for one scrape or one on-demand request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateTable {
    counts: BTreeMap<AggregateKey, u64>,
}

impl AggregateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: AggregateKey) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Number of distinct keys
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of listings counted
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&AggregateKey, u64)> {
        self.counts.iter().map(|(key, count)| (key, *count))
    }

    /// Render the table as a `domain_listing_count` gauge family in a
    /// throwaway registry, so nothing outlives the request that built it.
    pub fn gather(&self) -> prometheus::Result<Vec<MetricFamily>> {
        let gauge = IntGaugeVec::new(
            Opts::new(
                LISTING_METRIC,
                "Number of listings returned by the Domain search API.",
            ),
            &LISTING_LABELS,
        )?;

        for (key, count) in self.iter() {
            gauge
                .get_metric_with_label_values(&key.label_values())?
                .set(count as i64);
        }

        let registry = Registry::new();
        registry.register(Box::new(gauge))?;
        Ok(registry.gather())
    }
}

/// Count every record under its [`AggregateKey`]
pub fn aggregate(records: &[ListingRecord], table: &mut AggregateTable) {
    for record in records {
        table.increment(AggregateKey::from_listing(record));
    }
}
