//! JSON export

use crate::catalog::ListingRecord;
use crate::output::traits::{OutputHandler, OutputResult};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Writes records as a pretty-printed JSON array
#[derive(Debug, Clone)]
pub struct JsonOutput {
    path: PathBuf,
}

impl JsonOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl OutputHandler for JsonOutput {
    fn name(&self) -> &str {
        "JSON"
    }

    fn destination(&self) -> String {
        self.path.display().to_string()
    }

    fn write(&self, records: &[ListingRecord]) -> OutputResult<()> {
        let mut writer = BufWriter::new(File::create(&self.path)?);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }
}
