//! # clipstat
//!
//! Channel statistics for infinite-scroll video profiles.
//!
//! ## Architecture
//!
//! ```text
//! Browser → Scroll → Extract → Aggregate → Report / Store
//! ```
//!
//! - [`scraper`]: drives a browser, scrolls until content stops loading and
//!   reads fields through prioritized fallback strategies
//! - [`normalizer`]: turns "1.2M" style counters into exact integers
//! - [`aggregator`]: totals, averages, engagement rate and rankings
//! - [`store`]: JSON and CSV export
//! - [`report`]: console summary
//!
//! ## Quick Start
//!
//! ```bash
//! clipstat https://www.tiktok.com/@username --save-json --save-csv
//!
//! # several channels, scraped in turn and compared
//! clipstat https://www.tiktok.com/@one https://www.tiktok.com/@two
//! ```

/// Error types.
pub mod app;

/// Totals and rankings over collected items.
pub mod aggregator;

/// Command-line interface using clap.
pub mod cli;

/// Configuration loaded from `~/.config/clipstat/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`ChannelInfo`](domain::ChannelInfo): profile metadata
/// - [`ContentItem`](domain::ContentItem): one scraped tile
/// - [`ScrapeResult`](domain::ScrapeResult): success or failure of a scrape
pub mod domain;

/// Abbreviated counter parsing and formatting.
pub mod normalizer;

/// Human-readable report printing.
pub mod report;

/// Browser-driven scraping pipeline.
///
/// - [`ChannelScraper`](scraper::ChannelScraper): the scrape orchestrator
/// - [`PageDriver`](scraper::PageDriver): browser capability trait
/// - [`ChromeLauncher`](scraper::ChromeLauncher): chromiumoxide implementation
pub mod scraper;

/// Result persistence.
///
/// - [`JsonStore`](store::JsonStore): full result as JSON
/// - [`CsvStore`](store::CsvStore): item table as CSV
pub mod store;
