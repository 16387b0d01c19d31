use serde::Serialize;

pub const DEFAULT_FEED_TITLE: &str = "Untitled Feed";
pub const DEFAULT_ITEM_TITLE: &str = "Untitled";
pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelMetadata {
    pub title: String,
    pub link: Option<String>,
    pub description: String,
    pub self_url: Option<String>,
    pub language: String,
}

impl Default for ChannelMetadata {
    fn default() -> Self {
        Self {
            title: DEFAULT_FEED_TITLE.to_string(),
            link: None,
            description: String::new(),
            self_url: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// One entry of the source list, with alternate field names already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub title: String,
    pub link: Option<String>,
    pub guid: Option<String>,
    pub published: Option<String>,
    pub description_html: Option<String>,
}

impl Default for FeedItem {
    fn default() -> Self {
        Self {
            title: DEFAULT_ITEM_TITLE.to_string(),
            link: None,
            guid: None,
            published: None,
            description_html: None,
        }
    }
}

impl FeedItem {
    // A guid is a permalink when it looks like a URL.
    pub fn guid_is_permalink(guid: &str) -> bool {
        guid.starts_with("http")
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeedDocument {
    pub channel: ChannelMetadata,
    pub items: Vec<FeedItem>,
}

// Plan / result envelope payloads
#[derive(Serialize)]
pub struct FeedPlan {
    pub input: String,
    pub output: String,
    pub items: usize,
    pub fallback_dated: usize,
    pub bytes: usize,
}

#[derive(Serialize)]
pub struct FeedResult {
    pub output: String,
    pub items: usize,
    pub fallback_dated: usize,
    pub bytes: usize,
}
