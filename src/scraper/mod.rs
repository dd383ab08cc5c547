//! Browser-driven channel scraping.
//!
//! # Architecture
//!
//! ```text
//! navigate → scroll until the height settles → channel info
//!          → content tiles → per-tile fields → ChannelReport
//! ```
//!
//! The pipeline only talks to a [`PageDriver`]; [`ChromeDriver`] is the
//! chromiumoxide-backed implementation.
//!
//! # Usage
//!
//! ```rust,ignore
//! use clipstat::scraper::{ChannelScraper, ChromeLauncher, ScraperConfig};
//!
//! let config = ScraperConfig::default();
//! let scraper = ChannelScraper::new(ChromeLauncher::new(config.clone()), config);
//!
//! let result = scraper.scrape_channel("https://www.tiktok.com/@someone").await;
//! ```

pub mod channel;
mod chrome;
mod config;
pub mod driver;
pub mod extractor;
pub mod scroll;
pub mod strategies;

pub use channel::{scrape_channels, ChannelScraper};
pub use chrome::{ChromeDriver, ChromeLauncher};
pub use config::ScraperConfig;
pub use driver::{DriverLauncher, PageDriver, WaitMode};
pub use extractor::{extract_count, extract_field, Extracted, Lookup, Scope, Strategy};
pub use scroll::{scroll_until_converged, ScrollOutcome, ScrollPolicy, Termination};
