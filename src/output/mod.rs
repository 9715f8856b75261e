//! Output module for exporting crawl results
//!
//! This module handles:
//! - Writing records to JSON and XML files
//! - Summarizing a crawl into statistics
//! - Forwarding records to a downstream endpoint

mod json;
mod publish;
pub mod stats;
mod traits;
mod xml;

pub use json::JsonOutput;
pub use publish::{print_receipt, publish_records, PublishReceipt};
pub use stats::{compute_statistics, print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputHandler, OutputResult};
pub use xml::{render_xml, XmlOutput};

use crate::catalog::ListingRecord;
use crate::config::OutputConfig;

/// Builds the exporters named in the output configuration
pub fn configured_outputs(config: &OutputConfig) -> Vec<Box<dyn OutputHandler>> {
    vec![
        Box::new(JsonOutput::new(&config.json_path)),
        Box::new(XmlOutput::new(&config.xml_path)),
    ]
}

/// Runs every exporter, continuing past failures
///
/// # Returns
///
/// One result per exporter, paired with its name, in the given order
pub fn write_all(
    outputs: &[Box<dyn OutputHandler>],
    records: &[ListingRecord],
) -> Vec<(String, OutputResult<()>)> {
    outputs
        .iter()
        .map(|output| {
            let result = output.write(records);
            match &result {
                Ok(()) => tracing::info!(
                    "Exported {} records as {} to {}",
                    records.len(),
                    output.name(),
                    output.destination()
                ),
                Err(e) => tracing::error!("Failed to export {}: {}", output.name(), e),
            }
            (output.name().to_string(), result)
        })
        .collect()
}
