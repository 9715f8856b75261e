//! Configuration module for Shelf-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files,
//! layering command-line overrides on top, and normalizing the requested
//! category list.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf-scout.toml")).unwrap();
//! println!("Crawling: {:?}", config.requested_categories());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    normalize_categories, ApiConfig, Config, ConfigOverrides, FilterConfig, HttpConfig,
    OutputConfig, ScraperConfig, UserAgentConfig, DEFAULT_CATEGORIES,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
