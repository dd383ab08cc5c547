//! Output settings for saved files and the console report.

use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for JSON/CSV exports
    pub directory: PathBuf,
    /// Prefix for exported file names
    pub file_prefix: String,
    /// Number of items in the report's ranking
    pub top_n: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            file_prefix: "tiktok".to_string(),
            top_n: 10,
        }
    }
}
