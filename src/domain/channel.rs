use serde::{Deserialize, Serialize};

/// Profile-level metadata read once per scrape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelInfo {
    pub name: String,
    pub handle: String,
    pub bio: String,
    pub followers: u64,
    pub following: u64,
    pub channel_likes: u64,
}

impl ChannelInfo {
    /// Name suitable for embedding in a file name.
    pub fn file_stem(&self) -> String {
        let stem: String = self
            .name
            .trim()
            .chars()
            .filter(|c| *c != '@')
            .map(|c| match c {
                '/' | '\\' | ' ' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c => c,
            })
            .collect();

        if stem.is_empty() {
            "unknown".to_string()
        } else {
            stem
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_stem_strips_at_and_separators() {
        let info = ChannelInfo {
            name: "@some user/clips".into(),
            ..Default::default()
        };
        assert_eq!(info.file_stem(), "some_user_clips");
    }

    #[test]
    fn test_file_stem_empty_name() {
        let info = ChannelInfo::default();
        assert_eq!(info.file_stem(), "unknown");
    }
}
