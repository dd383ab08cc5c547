//! Pure reduction of collected items into totals, derived metrics and rankings.

use crate::domain::{ChannelInfo, ContentItem, Derived, Totals};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub totals: Totals,
    pub derived: Derived,
}

pub fn summarize(channel: &ChannelInfo, items: &[ContentItem]) -> Summary {
    let totals = totals(items);
    let derived = Derived {
        average_views: average_views(&totals, items.len()),
        engagement_rate_percent: engagement_rate(&totals, channel.followers, items.len()),
    };
    Summary { totals, derived }
}

pub fn totals(items: &[ContentItem]) -> Totals {
    items.iter().fold(Totals::default(), |acc, item| Totals {
        views: acc.views.saturating_add(item.views),
        likes: acc.likes.saturating_add(item.likes),
        comments: acc.comments.saturating_add(item.comments),
        shares: acc.shares.saturating_add(item.shares),
    })
}

fn average_views(totals: &Totals, count: usize) -> u64 {
    match count {
        0 => 0,
        n => totals.views / n as u64,
    }
}

/// Interactions relative to `followers * items`, as a percentage.
///
/// This normalizes by follower count times item count rather than per item;
/// the figure is reported as-is for comparability with earlier exports.
fn engagement_rate(totals: &Totals, followers: u64, count: usize) -> f64 {
    let interactions = totals.interactions();
    if followers == 0 || count == 0 || interactions == 0 {
        return 0.0;
    }

    let rate = interactions as f64 / (followers as f64 * count as f64) * 100.0;
    (rate * 100.0).round() / 100.0
}

/// Items by descending views. Equal counts keep discovery order.
pub fn rank_by_views(items: &[ContentItem]) -> Vec<&ContentItem> {
    let mut ranked: Vec<&ContentItem> = items.iter().collect();
    // sort_by is stable
    ranked.sort_by(|a, b| b.views.cmp(&a.views));
    ranked
}
