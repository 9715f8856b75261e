//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for catalog pages:
//! - Building the HTTP client with the configured user agent and timeout
//! - A single GET per page, no retries, transport-default redirects
//! - Classifying failures into `FetchError`

use crate::config::{HttpConfig, UserAgentConfig};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Failure to fetch one page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the connection failed
    #[error("request to {url} failed: {source}")]
    Transport { url: String, source: reqwest::Error },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body could not be read as text
    #[error("failed to read body of {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    /// Failure reported by a fetcher that does not use HTTP
    #[error("failed to load {url}: {message}")]
    Other { url: String, message: String },
}

impl FetchError {
    /// The URL that failed
    pub fn url(&self) -> &str {
        match self {
            Self::Transport { url, .. }
            | Self::Status { url, .. }
            | Self::Body { url, .. }
            | Self::Other { url, .. } => url,
        }
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Source of page content
///
/// Implementations perform exactly one request per call and keep no state
/// between calls.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches `url` and returns the page text
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - Product name and version for the User-Agent header
/// * `http` - Transport settings
///
/// # Example
///
/// ```no_run
/// use shelf_scout::config::{HttpConfig, UserAgentConfig};
/// use shelf_scout::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    // Format: name/version
    let user_agent = format!("{}/{}", user_agent.name, user_agent.version);

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(http.timeout_seconds))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// `PageFetcher` backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Wraps an existing client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a client from configuration and wraps it
    pub fn from_config(
        user_agent: &UserAgentConfig,
        http: &HttpConfig,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(user_agent, http)?))
    }

    /// The underlying client, shared with other HTTP users such as publishing
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        fetch_page(&self.client, url).await
    }
}

/// Fetches a URL and returns its body text
///
/// # Error Mapping
///
/// | Condition | Error |
/// |-----------|-------|
/// | Connection refused, DNS, TLS, timeout | `FetchError::Transport` |
/// | Any non-2xx status after redirects | `FetchError::Status` |
/// | Body not decodable | `FetchError::Body` |
pub async fn fetch_page(client: &Client, url: &Url) -> Result<String, FetchError> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|source| FetchError::Body {
        url: url.to_string(),
        source,
    })
}
