//! Output handler traits and types
//!
//! This module defines the trait interface for record exporters and the
//! errors they share with publishing.

use crate::catalog::ListingRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to format output: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to publish to {endpoint}: {source}")]
    Publish {
        endpoint: String,
        source: reqwest::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record exporters
///
/// An exporter writes the full record list in one call, replacing any
/// previous output at its destination.
pub trait OutputHandler {
    /// Short name used in log lines, e.g. "JSON"
    fn name(&self) -> &str;

    /// Where the output goes, for display
    fn destination(&self) -> String;

    /// Writes all records
    ///
    /// # Arguments
    ///
    /// * `records` - The records to export, in output order
    fn write(&self, records: &[ListingRecord]) -> OutputResult<()>;
}
