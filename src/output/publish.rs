//! Publishing records to a downstream HTTP endpoint

use crate::catalog::ListingRecord;
use crate::config::ApiConfig;
use crate::output::traits::{OutputError, OutputResult};
use reqwest::Client;
use std::time::Duration;

/// Number of titles echoed back after publishing
const SAMPLE_TITLES: usize = 5;

/// What the endpoint was sent and how it answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReceipt {
    pub endpoint: String,

    /// HTTP status of the endpoint's response
    pub status: u16,

    /// Number of records sent
    pub count: usize,

    /// The first few titles sent
    pub sample_titles: Vec<String>,
}

impl PublishReceipt {
    /// Returns true if the endpoint answered with a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// POSTs the records as a JSON array to the configured endpoint
///
/// Any response counts as delivered; the status is reported in the receipt.
/// Only transport failures and timeouts are errors.
///
/// # Arguments
///
/// * `client` - HTTP client to send with
/// * `api` - Endpoint and timeout
/// * `records` - Records to send
pub async fn publish_records(
    client: &Client,
    api: &ApiConfig,
    records: &[ListingRecord],
) -> OutputResult<PublishReceipt> {
    let response = client
        .post(&api.endpoint)
        .timeout(Duration::from_secs(api.timeout_seconds))
        .json(records)
        .send()
        .await
        .map_err(|source| OutputError::Publish {
            endpoint: api.endpoint.clone(),
            source,
        })?;

    let status = response.status().as_u16();
    tracing::info!("POST {} -> {}", api.endpoint, response.status());

    Ok(PublishReceipt {
        endpoint: api.endpoint.clone(),
        status,
        count: records.len(),
        sample_titles: records
            .iter()
            .take(SAMPLE_TITLES)
            .map(|r| r.title.clone())
            .collect(),
    })
}

/// Prints a publish receipt to stdout
pub fn print_receipt(receipt: &PublishReceipt) {
    println!("POST {} -> Status: {}", receipt.endpoint, receipt.status);
    println!("Summary sent:");
    println!("- Count: {}", receipt.count);
    println!("- Sample titles: {}", receipt.sample_titles.join(", "));
}
