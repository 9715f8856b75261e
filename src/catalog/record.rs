//! Listing records
//!
//! One record per listed book, as parsed from a listing page and then tagged
//! with the category it was requested under.

use rust_decimal::Decimal;
use serde::Serialize;

/// Fields extracted from one listing fragment, before the category is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub title: String,
    pub price: Decimal,
    pub rating: u8,
    pub url: String,
}

impl ListingEntry {
    /// Tags the entry with the category it was requested under
    pub fn into_record(self, category: &str) -> ListingRecord {
        ListingRecord {
            title: self.title,
            price: self.price,
            rating: self.rating,
            category: category.to_string(),
            url: self.url,
        }
    }
}

/// One catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRecord {
    /// Book title, never empty
    pub title: String,

    /// Price without currency, 0 when the price text was unreadable
    pub price: Decimal,

    /// Star rating from 1 to 5, 0 when unknown
    pub rating: u8,

    /// The category name as requested, not the site's label
    pub category: String,

    /// Absolute URL of the book's detail page
    pub url: String,
}
