use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::scraper::driver::PageDriver;

pub const SCROLL_TO_BOTTOM_SCRIPT: &str = "window.scrollTo(0, document.body.scrollHeight)";
pub const SCROLL_HEIGHT_SCRIPT: &str = "document.body.scrollHeight";

/// Bounds for the scroll loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollPolicy {
    pub max_attempts: u32,
    /// Consecutive unchanged height reads that count as converged
    pub stability_threshold: u32,
    /// Pause between scrolling and measuring
    pub delay: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The height stopped changing for `stability_threshold` reads
    Converged,
    /// The attempt budget ran out first
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollOutcome {
    pub termination: Termination,
    /// Scroll cycles performed
    pub attempts_used: u32,
    /// Last successfully read document height
    pub final_height: u64,
}

/// Scroll to the bottom repeatedly until the document height settles.
///
/// Never fails. A failed scroll command is logged and the cycle still runs;
/// a failed height read neither extends nor breaks the stable streak.
pub async fn scroll_until_converged<D: PageDriver>(
    driver: &D,
    policy: &ScrollPolicy,
) -> ScrollOutcome {
    let threshold = policy.stability_threshold.max(1);
    let mut previous_height = 0u64;
    let mut stable_streak = 0u32;
    let mut attempt = 0u32;

    while attempt < policy.max_attempts {
        if let Err(e) = driver.evaluate(SCROLL_TO_BOTTOM_SCRIPT).await {
            warn!(attempt = attempt + 1, "Scroll command failed: {}", e);
        }

        tokio::time::sleep(policy.delay).await;

        match driver.evaluate(SCROLL_HEIGHT_SCRIPT).await.map(|v| height(&v)) {
            Ok(Some(current_height)) if current_height == previous_height => {
                stable_streak += 1;
                if stable_streak >= threshold {
                    let attempts_used = attempt + 1;
                    info!(
                        attempts = attempts_used,
                        height = current_height,
                        "Scrolling converged"
                    );
                    return ScrollOutcome {
                        termination: Termination::Converged,
                        attempts_used,
                        final_height: current_height,
                    };
                }
            }
            Ok(Some(current_height)) => {
                stable_streak = 0;
                previous_height = current_height;
            }
            Ok(None) => warn!(attempt = attempt + 1, "Scroll height was not a number"),
            Err(e) => warn!(attempt = attempt + 1, "Failed to read scroll height: {}", e),
        }

        attempt += 1;
        debug!(
            attempt,
            max = policy.max_attempts,
            height = previous_height,
            stable = stable_streak,
            "Scroll attempt"
        );
    }

    info!(
        attempts = attempt,
        height = previous_height,
        "Scroll budget exhausted before the page settled"
    );
    ScrollOutcome {
        termination: Termination::Exhausted,
        attempts_used: attempt,
        final_height: previous_height,
    }
}

fn height(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_f64().filter(|h| *h >= 0.0).map(|h| h as u64))
}
