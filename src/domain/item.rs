use serde::{Deserialize, Serialize};

/// Which lookup produced an item's view count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSource {
    /// Exact count in the views badge's `aria-label`
    AriaLabel,
    /// Exact count in a `title` attribute mentioning views
    TitleAttribute,
    /// `<strong data-e2e="video-views">` display text
    ViewsBadge,
    /// Any `data-e2e="video-views"` element's display text
    ViewsLabel,
    /// First `<strong>` in the tile
    StrongText,
    /// Legacy `.video-count` markup
    CountClass,
    /// No strategy matched; the count defaulted to zero
    Missing,
}

impl ViewSource {
    /// Whether the source carries an exact count rather than a rounded one.
    pub fn is_exact(self) -> bool {
        matches!(self, Self::AriaLabel | Self::TitleAttribute)
    }
}

/// One discovered content tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentItem {
    /// 1-based position in discovery order
    pub index: usize,
    pub views: u64,
    pub view_text: String,
    pub view_source: ViewSource,
    pub likes: u64,
    pub comments: u64,
    pub shares: u64,
    pub link: Option<String>,
    pub caption: String,
}

impl ContentItem {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            views: 0,
            view_text: "0".to_string(),
            view_source: ViewSource::Missing,
            likes: 0,
            comments: 0,
            shares: 0,
            link: None,
            caption: String::new(),
        }
    }
}

/// Truncate to at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
