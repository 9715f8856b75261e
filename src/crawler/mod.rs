//! Crawler module for catalog page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of single pages
//! - HTML parsing of the category navigation and listing entries
//! - The per-category pagination loop and overall crawl coordination

mod coordinator;
mod fetcher;
mod parser;

pub use coordinator::{CategoryReport, Coordinator, CrawlOptions, CrawlReport};
pub use fetcher::{build_http_client, fetch_page, FetchError, HttpFetcher, PageFetcher};
pub use parser::{
    parse_category_map, parse_entry, parse_listing_page, parse_price, parse_rating, ListingPage,
};

use crate::catalog::ListingRecord;
use crate::config::Config;
use crate::ScrapeError;

/// Runs a complete crawl with the given configuration
///
/// This is the main entry point for a one-shot crawl. It will:
/// 1. Build the HTTP client
/// 2. Discover the site's categories
/// 3. Walk every requested category's listing pages
///
/// # Arguments
///
/// * `config` - The scraper configuration
///
/// # Returns
///
/// * `Ok(Vec<ListingRecord>)` - Records of all requested categories, in request order
/// * `Err(ScrapeError)` - The site root could not be fetched or the setup failed
pub async fn crawl(config: &Config) -> Result<Vec<ListingRecord>, ScrapeError> {
    let coordinator = Coordinator::from_config(config)?;
    coordinator.crawl(&config.requested_categories()).await
}
