//! Record filtering
//!
//! Narrows the crawled records down by price range and exact star rating
//! before they are exported.

use crate::catalog::ListingRecord;
use crate::config::FilterConfig;
use rust_decimal::Decimal;

/// Price range and rating constraints; unset bounds accept everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListingFilter {
    /// Inclusive lower price bound
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound
    pub max_price: Option<Decimal>,

    /// Exact star rating
    pub rating: Option<u8>,
}

impl ListingFilter {
    /// Returns true if no constraint is set
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none() && self.max_price.is_none() && self.rating.is_none()
    }

    /// Returns true if the record satisfies every set constraint
    pub fn matches(&self, record: &ListingRecord) -> bool {
        self.min_price.map_or(true, |min| record.price >= min)
            && self.max_price.map_or(true, |max| record.price <= max)
            && self.rating.map_or(true, |rating| record.rating == rating)
    }

    /// Returns the matching records, keeping their order
    pub fn apply(&self, records: &[ListingRecord]) -> Vec<ListingRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }
}

impl From<&FilterConfig> for ListingFilter {
    fn from(config: &FilterConfig) -> Self {
        Self {
            min_price: config.min_price,
            max_price: config.max_price,
            rating: config.rating,
        }
    }
}
