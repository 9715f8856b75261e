//! Statistics generation from a crawl report
//!
//! This module summarizes what a crawl produced and prints it for the user.

use crate::crawler::{CategoryReport, CrawlReport};
use rust_decimal::Decimal;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Total number of records extracted
    pub total_records: usize,

    /// Total number of listing pages fetched
    pub pages_fetched: u32,

    /// Listing fragments dropped for missing fields
    pub skipped_entries: usize,

    /// Per-category outcome, in request order
    pub categories: Vec<CategoryReport>,

    /// Mean price over all records, if any
    pub average_price: Option<Decimal>,

    /// Record count per rating, index 0 for unknown through 5
    pub rating_histogram: [usize; 6],

    /// Wall-clock duration of the crawl
    pub duration_seconds: f64,
}

impl CrawlStatistics {
    /// Categories that ended early for a reason other than cancellation
    pub fn failed_categories(&self) -> usize {
        self.categories
            .iter()
            .filter(|c| c.status.is_failure())
            .count()
    }
}

/// Computes statistics from a crawl report
pub fn compute_statistics(report: &CrawlReport) -> CrawlStatistics {
    let mut rating_histogram = [0usize; 6];
    let mut price_total = Decimal::ZERO;

    for record in &report.records {
        let bucket = usize::from(record.rating.min(5));
        rating_histogram[bucket] += 1;
        price_total += record.price;
    }

    let average_price = if report.records.is_empty() {
        None
    } else {
        Some((price_total / Decimal::from(report.records.len())).round_dp(2))
    };

    let duration_seconds = (report.finished_at - report.started_at)
        .num_milliseconds()
        .max(0) as f64
        / 1000.0;

    CrawlStatistics {
        total_records: report.records.len(),
        pages_fetched: report.categories.iter().map(|c| c.pages_fetched).sum(),
        skipped_entries: report.categories.iter().map(|c| c.skipped_entries).sum(),
        categories: report.categories.clone(),
        average_price,
        rating_histogram,
        duration_seconds,
    }
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Records extracted: {}", stats.total_records);
    println!("  Listing pages fetched: {}", stats.pages_fetched);
    println!("  Entries skipped: {}", stats.skipped_entries);
    println!("  Duration: {:.1}s", stats.duration_seconds);
    if let Some(average) = stats.average_price {
        println!("  Average price: {}", average);
    }
    println!();

    println!("Categories:");
    for category in &stats.categories {
        println!(
            "  {}: {} records, {} pages ({})",
            category.requested, category.records, category.pages_fetched, category.status
        );
    }
    println!();

    println!("Ratings:");
    for (rating, count) in stats.rating_histogram.iter().enumerate().rev() {
        if *count == 0 {
            continue;
        }
        let label = if rating == 0 {
            "unknown".to_string()
        } else {
            format!("{} star", rating)
        };
        println!("  {}: {}", label, count);
    }
    println!();

    if stats.failed_categories() > 0 {
        println!(
            "Warning: {} of {} categories did not complete",
            stats.failed_categories(),
            stats.categories.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ListingRecord;
    use crate::state::CategoryStatus;
    use chrono::{Duration, Utc};

    fn record(cents: i64, rating: u8) -> ListingRecord {
        ListingRecord {
            title: format!("Book {}", cents),
            price: Decimal::new(cents, 2),
            rating,
            category: "Travel".to_string(),
            url: "https://books.toscrape.com/".to_string(),
        }
    }

    fn category(name: &str, pages: u32, records: usize, status: CategoryStatus) -> CategoryReport {
        CategoryReport {
            requested: name.to_string(),
            url: None,
            pages_fetched: pages,
            records,
            skipped_entries: 1,
            status,
        }
    }

    #[test]
    fn test_compute_statistics() {
        let started_at = Utc::now();
        let report = CrawlReport {
            started_at,
            finished_at: started_at + Duration::milliseconds(2500),
            records: vec![record(1000, 5), record(2000, 5), record(3001, 0)],
            categories: vec![
                category("Travel", 2, 3, CategoryStatus::Completed),
                category("Cooking", 0, 0, CategoryStatus::NotFound),
            ],
        };

        let stats = compute_statistics(&report);

        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.pages_fetched, 2);
        assert_eq!(stats.skipped_entries, 2);
        assert_eq!(stats.average_price, Some(Decimal::new(2000, 2)));
        assert_eq!(stats.rating_histogram, [1, 0, 0, 0, 0, 2]);
        assert_eq!(stats.failed_categories(), 1);
        assert!((stats.duration_seconds - 2.5).abs() < 0.001);
    }

    #[test]
    fn test_statistics_without_records() {
        let now = Utc::now();
        let report = CrawlReport {
            started_at: now,
            finished_at: now,
            records: vec![],
            categories: vec![],
        };

        let stats = compute_statistics(&report);
        assert_eq!(stats.total_records, 0);
        assert_eq!(stats.average_price, None);
        assert_eq!(stats.failed_categories(), 0);
    }
}
