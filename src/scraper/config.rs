use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::scraper::driver::WaitMode;
use crate::scraper::scroll::ScrollPolicy;

/// Configuration for the channel scraper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Whether to run the browser in headless mode (default: true)
    pub headless: bool,

    /// Upper bound on scroll cycles (default: 20)
    pub max_scroll_attempts: u32,

    /// Unchanged height reads in a row that end scrolling (default: 3)
    pub stability_threshold: u32,

    /// Wait between scrolling and measuring in milliseconds (default: 3000)
    pub scroll_delay_ms: u64,

    /// Navigation timeout in seconds (default: 60)
    pub navigation_timeout_secs: u64,

    /// Wait after navigation before scrolling in milliseconds (default: 5000)
    pub settle_delay_ms: u64,

    /// Wait for network activity to stop before returning from navigation (default: true)
    pub wait_for_network_idle: bool,

    /// Maximum caption length in characters (default: 100)
    pub caption_max_chars: usize,

    /// Browser window width (default: 1920)
    pub window_width: u32,

    /// Browser window height (default: 1080)
    pub window_height: u32,

    /// CSS selectors for content tiles, in priority order; the first one
    /// that matches anything wins
    pub container_selectors: Vec<String>,

    /// User agent string to use
    pub user_agent: Option<String>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            max_scroll_attempts: 20,
            stability_threshold: 3,
            scroll_delay_ms: 3000,
            navigation_timeout_secs: 60,
            settle_delay_ms: 5000,
            wait_for_network_idle: true,
            caption_max_chars: 100,
            window_width: 1920,
            window_height: 1080,
            container_selectors: vec![
                r#"[data-e2e="user-post-item"]"#.to_string(),
                r#"[data-e2e="user-post-item-list"] > div"#.to_string(),
                ".video-feed-item".to_string(),
                r#"div[data-e2e="user-post-item-list"] div"#.to_string(),
            ],
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }
}

impl ScraperConfig {
    /// Get the navigation timeout as a Duration
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    /// Get the post-navigation settle delay as a Duration
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn wait_mode(&self) -> WaitMode {
        if self.wait_for_network_idle {
            WaitMode::NetworkIdle
        } else {
            WaitMode::Load
        }
    }

    pub fn scroll_policy(&self) -> ScrollPolicy {
        ScrollPolicy {
            max_attempts: self.max_scroll_attempts,
            stability_threshold: self.stability_threshold.max(1),
            delay: Duration::from_millis(self.scroll_delay_ms),
        }
    }
}
