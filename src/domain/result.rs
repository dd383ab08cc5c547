use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::aggregator;
use crate::domain::{ChannelInfo, ContentItem};

/// Sums over every collected item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub views: u64,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
}

impl Totals {
    pub fn interactions(&self) -> u64 {
        self.likes
            .saturating_add(self.comments)
            .saturating_add(self.shares)
    }
}

/// Metrics computed from the totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Derived {
    /// `views / items` with floor division; 0 for an empty list
    pub average_views: u64,
    /// `interactions / (followers * items) * 100`, two decimals; 0 when undefined
    pub engagement_rate_percent: f64,
}

/// A successful scrape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelReport {
    pub source_url: String,
    pub channel_info: ChannelInfo,
    pub items: Vec<ContentItem>,
    pub totals: Totals,
    pub derived: Derived,
    pub timestamp_utc: DateTime<Utc>,
}

impl ChannelReport {
    pub fn new(source_url: &str, channel_info: ChannelInfo, items: Vec<ContentItem>) -> Self {
        let summary = aggregator::summarize(&channel_info, &items);
        Self {
            source_url: source_url.to_string(),
            channel_info,
            items,
            totals: summary.totals,
            derived: summary.derived,
            timestamp_utc: Utc::now(),
        }
    }

    /// Items ordered by views, highest first.
    pub fn ranking(&self) -> Vec<&ContentItem> {
        aggregator::rank_by_views(&self.items)
    }
}

/// A scrape that could not complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeFailure {
    pub source_url: String,
    pub error_message: String,
    pub timestamp_utc: DateTime<Utc>,
}

/// Outcome of one channel scrape. Serialized without a tag so each shape
/// keeps only its own fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeResult {
    Success(ChannelReport),
    Failure(ScrapeFailure),
}

impl ScrapeResult {
    pub fn failure(source_url: &str, error: impl std::fmt::Display) -> Self {
        Self::Failure(ScrapeFailure {
            source_url: source_url.to_string(),
            error_message: error.to_string(),
            timestamp_utc: Utc::now(),
        })
    }

    pub fn source_url(&self) -> &str {
        match self {
            Self::Success(report) => &report.source_url,
            Self::Failure(failure) => &failure.source_url,
        }
    }

    pub fn timestamp_utc(&self) -> DateTime<Utc> {
        match self {
            Self::Success(report) => report.timestamp_utc,
            Self::Failure(failure) => failure.timestamp_utc,
        }
    }

    pub fn report(&self) -> Option<&ChannelReport> {
        match self {
            Self::Success(report) => Some(report),
            Self::Failure(_) => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(failure) => Some(&failure.error_message),
        }
    }
}
