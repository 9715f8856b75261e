use crate::config::types::{
    ApiConfig, Config, FilterConfig, HttpConfig, OutputConfig, ScraperConfig, UserAgentConfig,
};
use crate::url::normalize_base_url;
use crate::ConfigError;
use rust_decimal::Decimal;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_http_config(&config.http)?;
    validate_filter_config(&config.filters)?;
    validate_output_config(&config.output)?;
    validate_api_config(&config.api)?;
    Ok(())
}

/// Validates what to crawl
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    normalize_base_url(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if config.category_limit < 1 {
        return Err(ConfigError::Validation(
            "category-limit must be >= 1".to_string(),
        ));
    }

    if config.max_pages_per_category < 1 {
        return Err(ConfigError::Validation(
            "max-pages-per-category must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config.name.chars().all(|c| c.is_alphanumeric() || c == '-') {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_seconds < 1 {
        return Err(ConfigError::Validation(
            "http timeout-seconds must be >= 1".to_string(),
        ));
    }
    Ok(())
}

/// Validates price bounds and rating
fn validate_filter_config(config: &FilterConfig) -> Result<(), ConfigError> {
    for (name, bound) in [("min-price", config.min_price), ("max-price", config.max_price)] {
        if let Some(value) = bound {
            if value < Decimal::ZERO {
                return Err(ConfigError::Validation(format!(
                    "{} cannot be negative, got {}",
                    name, value
                )));
            }
        }
    }

    if let (Some(min), Some(max)) = (config.min_price, config.max_price) {
        if min > max {
            return Err(ConfigError::Validation(format!(
                "min-price ({}) cannot be greater than max-price ({})",
                min, max
            )));
        }
    }

    if let Some(rating) = config.rating {
        if rating > 5 {
            return Err(ConfigError::Validation(format!(
                "rating must be between 0 and 5, got {}",
                rating
            )));
        }
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.json_path.is_empty() {
        return Err(ConfigError::Validation(
            "json-path cannot be empty".to_string(),
        ));
    }

    if config.xml_path.is_empty() {
        return Err(ConfigError::Validation(
            "xml-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the downstream endpoint, only when publishing is enabled
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    if !config.enabled {
        return Ok(());
    }

    let url = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api endpoint: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "api endpoint '{}' must use HTTP or HTTPS",
            config.endpoint
        )));
    }

    if config.timeout_seconds < 1 {
        return Err(ConfigError::Validation(
            "api timeout-seconds must be >= 1".to_string(),
        ));
    }

    Ok(())
}
