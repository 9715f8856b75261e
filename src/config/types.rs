use crate::url::DEFAULT_BASE_URL;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Categories requested when the configuration names fewer than the limit
pub const DEFAULT_CATEGORIES: [&str; 3] = ["Travel", "Mystery", "Science"];

/// Main configuration structure for Shelf-Scout
///
/// Every section is optional; missing sections and keys take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub http: HttpConfig,
    pub filters: FilterConfig,
    pub output: OutputConfig,
    pub api: ApiConfig,
}

/// What to crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Root of the catalog site
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Category names to crawl, in output order
    pub categories: Vec<String>,

    /// Maximum number of categories crawled in one run
    #[serde(rename = "category-limit")]
    pub category_limit: usize,

    /// Upper bound on listing pages fetched per category
    #[serde(rename = "max-pages-per-category")]
    pub max_pages_per_category: u32,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            category_limit: 3,
            max_pages_per_category: 500,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Product name sent in the User-Agent header
    pub name: String,

    /// Product version sent in the User-Agent header
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "shelf-scout".to_string(),
            version: "1.0".to_string(),
        }
    }
}

/// Transport settings for catalog page requests
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout for a single page fetch
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}

/// Record filters applied after the crawl
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Inclusive lower price bound
    #[serde(rename = "min-price")]
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound
    #[serde(rename = "max-price")]
    pub max_price: Option<Decimal>,

    /// Exact star rating
    pub rating: Option<u8>,
}

/// Export file locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON export
    #[serde(rename = "json-path")]
    pub json_path: String,

    /// Path of the XML export
    #[serde(rename = "xml-path")]
    pub xml_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            json_path: "books.json".to_string(),
            xml_path: "books.xml".to_string(),
        }
    }
}

/// Downstream endpoint receiving the filtered records
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// URL the records are POSTed to
    pub endpoint: String,

    /// Timeout for the POST request
    #[serde(rename = "timeout-seconds")]
    pub timeout_seconds: u64,

    /// Whether to publish at all
    pub enabled: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://httpbin.org/post".to_string(),
            timeout_seconds: 30,
            enabled: true,
        }
    }
}

/// Values supplied on the command line or through the environment
///
/// Each `Some` replaces the corresponding configuration value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
    pub categories: Vec<String>,
    pub max_pages_per_category: Option<u32>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub rating: Option<u8>,
    pub json_path: Option<String>,
    pub xml_path: Option<String>,
    pub endpoint: Option<String>,
    pub no_publish: bool,
}

impl Config {
    /// Applies command-line and environment overrides on top of this configuration
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.scraper.base_url = base_url;
        }
        if !overrides.categories.is_empty() {
            self.scraper.categories = overrides.categories;
        }
        if let Some(max_pages) = overrides.max_pages_per_category {
            self.scraper.max_pages_per_category = max_pages;
        }
        if overrides.min_price.is_some() {
            self.filters.min_price = overrides.min_price;
        }
        if overrides.max_price.is_some() {
            self.filters.max_price = overrides.max_price;
        }
        if overrides.rating.is_some() {
            self.filters.rating = overrides.rating;
        }
        if let Some(path) = overrides.json_path {
            self.output.json_path = path;
        }
        if let Some(path) = overrides.xml_path {
            self.output.xml_path = path;
        }
        if let Some(endpoint) = overrides.endpoint {
            self.api.endpoint = endpoint;
        }
        if overrides.no_publish {
            self.api.enabled = false;
        }
    }

    /// The categories to crawl, deduplicated and capped at the category limit
    pub fn requested_categories(&self) -> Vec<String> {
        normalize_categories(&self.scraper.categories, self.scraper.category_limit)
    }
}

/// Normalizes the requested category list
///
/// Names are trimmed, empty names dropped, and case-insensitive duplicates
/// removed keeping the first spelling. While fewer than `limit` names remain
/// the list is padded from [`DEFAULT_CATEGORIES`]; it is then cut to `limit`.
pub fn normalize_categories(requested: &[String], limit: usize) -> Vec<String> {
    fn push_unique(categories: &mut Vec<String>, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        let folded = name.to_lowercase();
        if !categories.iter().any(|c| c.to_lowercase() == folded) {
            categories.push(name.to_string());
        }
    }

    let mut categories: Vec<String> = Vec::new();

    for name in requested {
        push_unique(&mut categories, name);
    }

    for name in DEFAULT_CATEGORIES {
        if categories.len() >= limit {
            break;
        }
        push_unique(&mut categories, name);
    }

    categories.truncate(limit);
    categories
}
