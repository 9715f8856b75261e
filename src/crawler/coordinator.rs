//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the crawl loop that ties the fetcher and the parser
//! together:
//! - Discovering the category map from the site root
//! - Resolving each requested category through it
//! - Walking each category's listing pages until no next link remains
//! - Collecting per-category outcomes without aborting the run

use crate::catalog::{CategoryMap, ListingRecord};
use crate::config::{Config, ScraperConfig};
use crate::crawler::fetcher::{HttpFetcher, PageFetcher};
use crate::crawler::parser::{parse_category_map, parse_listing_page};
use crate::state::{CategoryStatus, PaginationState};
use crate::url::normalize_base_url;
use crate::ScrapeError;
use chrono::{DateTime, Utc};
use tokio_util::sync::CancellationToken;
use url::Url;

/// Tunables for the crawl loop
#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Listing pages fetched per category before giving up on it
    pub max_pages_per_category: u32,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages_per_category: 500,
        }
    }
}

impl From<&ScraperConfig> for CrawlOptions {
    fn from(config: &ScraperConfig) -> Self {
        Self {
            max_pages_per_category: config.max_pages_per_category,
        }
    }
}

/// What happened to one requested category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    /// The name as requested
    pub requested: String,

    /// First listing page, when the name resolved
    pub url: Option<String>,

    /// Listing pages fetched successfully
    pub pages_fetched: u32,

    /// Records produced for this category
    pub records: usize,

    /// Listing fragments dropped for missing a mandatory field
    pub skipped_entries: usize,

    /// How the walk ended
    pub status: CategoryStatus,
}

impl CategoryReport {
    fn unfetched(requested: &str, status: CategoryStatus) -> Self {
        Self {
            requested: requested.to_string(),
            url: None,
            pages_fetched: 0,
            records: 0,
            skipped_entries: 0,
            status,
        }
    }
}

/// Result of a crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// All records, grouped by category in request order
    pub records: Vec<ListingRecord>,

    /// One report per requested name, in request order
    pub categories: Vec<CategoryReport>,
}

impl CrawlReport {
    /// Returns true if the run was interrupted by cancellation
    pub fn was_cancelled(&self) -> bool {
        self.categories
            .iter()
            .any(|c| c.status == CategoryStatus::Cancelled)
    }
}

/// Records and bookkeeping for one category walk
#[derive(Debug)]
struct CategoryCrawl {
    records: Vec<ListingRecord>,
    pages_fetched: u32,
    skipped_entries: usize,
    status: CategoryStatus,
}

/// Main crawler coordinator structure
pub struct Coordinator<F: PageFetcher = HttpFetcher> {
    base_url: Url,
    fetcher: F,
    options: CrawlOptions,
    cancel: CancellationToken,
}

impl Coordinator<HttpFetcher> {
    /// Creates a coordinator that fetches over HTTP as configured
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to crawl
    /// * `Err(ScrapeError)` - The base URL is invalid or the client could not be built
    pub fn from_config(config: &Config) -> Result<Self, ScrapeError> {
        let base_url = normalize_base_url(&config.scraper.base_url)?;
        let fetcher = HttpFetcher::from_config(&config.user_agent, &config.http)?;

        Ok(Self::new(base_url, fetcher).with_options(CrawlOptions::from(&config.scraper)))
    }
}

impl<F: PageFetcher> Coordinator<F> {
    /// Creates a coordinator for the site at `base_url`
    ///
    /// `base_url` is expected to be normalized already, see
    /// [`normalize_base_url`].
    pub fn new(base_url: Url, fetcher: F) -> Self {
        Self {
            base_url,
            fetcher,
            options: CrawlOptions::default(),
            cancel: CancellationToken::new(),
        }
    }

    /// Replaces the crawl options
    pub fn with_options(mut self, options: CrawlOptions) -> Self {
        self.options = options;
        self
    }

    /// Uses `token` for cooperative cancellation
    ///
    /// The token is checked before every page request; a request already in
    /// flight is allowed to finish.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// A handle that cancels this coordinator's crawls
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches the site root and builds the category map
    ///
    /// # Returns
    ///
    /// * `Ok(CategoryMap)` - Possibly empty if the page has no category navigation
    /// * `Err(ScrapeError::Discovery)` - The root page could not be fetched
    pub async fn discover_categories(&self) -> Result<CategoryMap, ScrapeError> {
        let html = self
            .fetcher
            .fetch(&self.base_url)
            .await
            .map_err(|source| ScrapeError::Discovery {
                url: self.base_url.to_string(),
                source,
            })?;

        let map = parse_category_map(&html);
        if map.is_empty() {
            tracing::warn!("No category navigation found on {}", self.base_url);
        } else {
            tracing::debug!("Discovered {} categories", map.len());
        }

        Ok(map)
    }

    /// Crawls the requested categories and returns their records
    ///
    /// Records are grouped by category in request order, each group in page
    /// order and each page in document order. Only a failure to fetch the site
    /// root is returned as an error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shelf_scout::config::Config;
    /// use shelf_scout::crawler::Coordinator;
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let coordinator = Coordinator::from_config(&Config::default())?;
    /// let records = coordinator.crawl(&["Travel", "Poetry"]).await?;
    /// println!("{} books", records.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn crawl<S: AsRef<str>>(
        &self,
        category_names: &[S],
    ) -> Result<Vec<ListingRecord>, ScrapeError> {
        Ok(self.crawl_report(category_names).await?.records)
    }

    /// Crawls the requested categories and reports on each of them
    pub async fn crawl_report<S: AsRef<str>>(
        &self,
        category_names: &[S],
    ) -> Result<CrawlReport, ScrapeError> {
        let started_at = Utc::now();
        let category_map = self.discover_categories().await?;

        let mut records = Vec::new();
        let mut categories = Vec::with_capacity(category_names.len());

        for name in category_names {
            let name = name.as_ref().trim();

            if self.cancel.is_cancelled() {
                categories.push(CategoryReport::unfetched(name, CategoryStatus::Cancelled));
                continue;
            }

            let Some(entry) = category_map.get(name) else {
                tracing::warn!("Category not found on site: {}", name);
                categories.push(CategoryReport::unfetched(name, CategoryStatus::NotFound));
                continue;
            };

            let first_page = match self.base_url.join(&entry.path) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Unusable link for category {}: {}", name, e);
                    categories.push(CategoryReport::unfetched(
                        name,
                        CategoryStatus::FetchFailed {
                            url: entry.path.clone(),
                            error: e.to_string(),
                        },
                    ));
                    continue;
                }
            };

            tracing::info!("Scraping category: {} -> {}", name, first_page);
            let crawl = self.crawl_category(name, first_page.clone()).await;

            tracing::info!(
                "Category {}: {} records from {} pages ({})",
                name,
                crawl.records.len(),
                crawl.pages_fetched,
                crawl.status
            );

            categories.push(CategoryReport {
                requested: name.to_string(),
                url: Some(first_page.to_string()),
                pages_fetched: crawl.pages_fetched,
                records: crawl.records.len(),
                skipped_entries: crawl.skipped_entries,
                status: crawl.status,
            });
            records.extend(crawl.records);
        }

        Ok(CrawlReport {
            started_at,
            finished_at: Utc::now(),
            records,
            categories,
        })
    }

    /// Walks one category's listing pages
    ///
    /// Runs the pagination state machine from `first_page` until a page has no
    /// next link, a fetch fails, the page bound is hit or cancellation is
    /// requested. Records gathered before the walk ends are always kept.
    async fn crawl_category(&self, category: &str, first_page: Url) -> CategoryCrawl {
        let mut records = Vec::new();
        let mut pages_fetched = 0u32;
        let mut skipped_entries = 0usize;
        let mut state = PaginationState::Fetching(first_page);

        let status = loop {
            state = match state {
                PaginationState::Fetching(url) => {
                    if self.cancel.is_cancelled() {
                        tracing::info!("Crawl cancelled before fetching {}", url);
                        PaginationState::Done(CategoryStatus::Cancelled)
                    } else if pages_fetched >= self.options.max_pages_per_category {
                        tracing::warn!(
                            "Stopping {} after {} pages, next page would be {}",
                            category,
                            pages_fetched,
                            url
                        );
                        PaginationState::Done(CategoryStatus::PageLimitReached {
                            limit: self.options.max_pages_per_category,
                        })
                    } else {
                        match self.fetcher.fetch(&url).await {
                            Ok(body) => {
                                pages_fetched += 1;
                                PaginationState::Parsing { url, body }
                            }
                            Err(e) => {
                                tracing::warn!("Failed to load {}: {}", url, e);
                                PaginationState::Done(CategoryStatus::FetchFailed {
                                    url: url.to_string(),
                                    error: e.to_string(),
                                })
                            }
                        }
                    }
                }

                PaginationState::Parsing { url, body } => {
                    let page = parse_listing_page(&body, &url);
                    tracing::debug!(
                        "{}: {} entries, {} skipped",
                        url,
                        page.entries.len(),
                        page.skipped
                    );

                    skipped_entries += page.skipped;
                    records.extend(
                        page.entries
                            .into_iter()
                            .map(|entry| entry.into_record(category)),
                    );

                    match page.next_page {
                        Some(next) => PaginationState::Fetching(next),
                        None => PaginationState::Done(CategoryStatus::Completed),
                    }
                }

                PaginationState::Done(status) => break status,
            };
        };

        CategoryCrawl {
            records,
            pages_fetched,
            skipped_entries,
            status,
        }
    }
}
