//! Priority-ordered lookup chains for every field the scraper reads.
//!
//! Numeric chains list exact, machine-readable sources (`aria-label`,
//! `title`) ahead of the rounded display text.

use crate::domain::ViewSource;
use crate::scraper::extractor::Strategy;

pub const ITEM_ANCHOR: &str = "a";

pub const CHANNEL_NAME: &[Strategy<&str>] = &[
    Strategy::text("user-title", r#"h1[data-e2e="user-title"]"#),
    Strategy::text("user-subtitle", r#"h2[data-e2e="user-subtitle"]"#),
];

pub const CHANNEL_HANDLE: &[Strategy<&str>] = &[
    Strategy::text("user-subtitle", r#"h2[data-e2e="user-subtitle"]"#),
    Strategy::text("unique-id", r#"[data-e2e="user-unique-id"]"#),
];

pub const CHANNEL_BIO: &[Strategy<&str>] = &[
    Strategy::text("user-bio", r#"h2[data-e2e="user-bio"]"#),
    Strategy::text("user-bio-any", r#"[data-e2e="user-bio"]"#),
];

pub const FOLLOWERS: &[Strategy<&str>] = &[
    Strategy::attribute("followers-title", r#"[data-e2e="followers-count"]"#, "title"),
    Strategy::text("followers-count", r#"[data-e2e="followers-count"]"#),
];

pub const FOLLOWING: &[Strategy<&str>] = &[
    Strategy::attribute("following-title", r#"[data-e2e="following-count"]"#, "title"),
    Strategy::text("following-count", r#"[data-e2e="following-count"]"#),
];

pub const CHANNEL_LIKES: &[Strategy<&str>] = &[
    Strategy::attribute("likes-title", r#"[data-e2e="likes-count"]"#, "title"),
    Strategy::text("likes-count", r#"[data-e2e="likes-count"]"#),
];

/// View count chain: exact attribute sources first, then display text.
pub const ITEM_VIEWS: &[Strategy<ViewSource>] = &[
    Strategy::attribute(ViewSource::AriaLabel, r#"[data-e2e="video-views"]"#, "aria-label"),
    Strategy::attribute(ViewSource::TitleAttribute, r#"[title*="views" i]"#, "title"),
    Strategy::text(ViewSource::ViewsBadge, r#"strong[data-e2e="video-views"]"#),
    Strategy::text(ViewSource::ViewsLabel, r#"[data-e2e="video-views"]"#),
    Strategy::text(ViewSource::StrongText, "strong"),
    Strategy::text(ViewSource::CountClass, ".video-count"),
];

pub const ITEM_LIKES: &[Strategy<&str>] = &[Strategy::attribute_or_text(
    "like-count",
    r#"[data-e2e="like-count"]"#,
    "aria-label",
)];

pub const ITEM_COMMENTS: &[Strategy<&str>] = &[Strategy::attribute_or_text(
    "comment-count",
    r#"[data-e2e="comment-count"]"#,
    "aria-label",
)];

pub const ITEM_SHARES: &[Strategy<&str>] = &[Strategy::attribute_or_text(
    "share-count",
    r#"[data-e2e="share-count"]"#,
    "aria-label",
)];

pub const ITEM_CAPTION: &[Strategy<&str>] = &[
    Strategy::text("post-item-desc", r#"[data-e2e="user-post-item-desc"]"#),
    Strategy::text("video-meta-caption", ".video-meta-caption"),
    Strategy::attribute("thumbnail-alt", "img[alt]", "alt"),
];
