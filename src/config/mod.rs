//! Configuration management for clipstat.
//!
//! Configuration is read from `~/.config/clipstat/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.
//! A path passed with `--config` is read as-is and never created.

pub mod output;

pub use output::OutputConfig;

use crate::scraper::ScraperConfig;
use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Main configuration struct.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;

        if !config_path.exists() {
            // Create default config with comments
            Self::create_default_config(&config_path)?;
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the default config file path: `~/.config/clipstat/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("clipstat").join("config.toml"))
    }

    /// Create a default config file with comments.
    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        Ok(())
    }

    /// Generate the default config file content with comments.
    fn default_config_content() -> String {
        r##"# clipstat configuration

[scraper]
# Run browser in headless mode (no visible window)
headless = true

# Scroll cycles before giving up on loading more content
max_scroll_attempts = 20

# Unchanged page heights in a row that mean everything has loaded
stability_threshold = 3

# Wait after each scroll before measuring (milliseconds)
scroll_delay_ms = 3000

# Page load timeout in seconds
navigation_timeout_secs = 60

# Wait after the page loads, before scrolling (milliseconds)
settle_delay_ms = 5000

# Wait for network requests to stop before scrolling
wait_for_network_idle = true

# Captions are cut to this many characters
caption_max_chars = 100

# Browser window size
window_width = 1920
window_height = 1080

# CSS selectors for content tiles (in priority order; first match wins)
container_selectors = [
    '[data-e2e="user-post-item"]',
    '[data-e2e="user-post-item-list"] > div',
    ".video-feed-item",
    'div[data-e2e="user-post-item-list"] div',
]

[output]
# Where --save-json / --save-csv write files
directory = "."

# Exported files are named <prefix>_stats_<channel>_<time>.json
file_prefix = "tiktok"

# Number of items in the report ranking
top_n = 10
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
