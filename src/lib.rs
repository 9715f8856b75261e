//! Shelf-Scout: a book-catalog crawler
//!
//! This crate discovers the categories of a book-catalog website, walks the
//! paginated listing pages of the requested categories and extracts one
//! normalized record per listed book.

pub mod catalog;
pub mod config;
pub mod crawler;
pub mod filter;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Shelf-Scout operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Category discovery failed at {url}: {source}")]
    Discovery {
        url: String,
        source: crawler::FetchError,
    },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for Shelf-Scout operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use catalog::{CategoryMap, ListingRecord};
pub use config::Config;
pub use crawler::{Coordinator, CrawlReport};
pub use state::CategoryStatus;
pub use url::normalize_base_url;
