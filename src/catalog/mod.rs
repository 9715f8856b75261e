//! Catalog data types
//!
//! - `CategoryMap`: category name to site-relative path, built from the site navigation
//! - `ListingEntry` / `ListingRecord`: one book as extracted from a listing page

mod category_map;
mod record;

pub use category_map::{CategoryEntry, CategoryMap};
pub use record::{ListingEntry, ListingRecord};
