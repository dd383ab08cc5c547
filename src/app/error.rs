use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum ClipstatError {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("Navigation to {url} timed out after {timeout_secs}s")]
    NavigationTimeout { url: String, timeout_secs: u64 },

    #[error("Page driver error: {0}")]
    Driver(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("No channel URL given")]
    MissingUrl,

    #[error("Unsupported site {url}: expected a {expected} channel URL")]
    UnsupportedSite { url: String, expected: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ClipstatError>;
