//! RSS 2.0 element records.
//!
//! Each struct mirrors one element of the RSS 2.0 vocabulary (plus the
//! `content:` and `media:` extensions). Required elements are plain fields;
//! optional ones are `Option`s and are omitted from the output when `None`
//! or empty. See <https://www.rssboard.org/rss-specification>.

use super::field::{RssDescription, RssTitle};

/// `<content:encoded>`, always written as CDATA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssContent {
    pub content: String,
}

/// `<image>` inside `<channel>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssImage {
    pub url: String,
    pub title: String,
    pub link: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// `<textInput>` inside `<channel>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssTextInput {
    pub title: String,
    pub description: String,
    pub name: String,
    pub link: String,
}

/// `<guid>`. The `isPermaLink` attribute is only written when true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssGuid {
    pub value: String,
    pub is_perma_link: bool,
}

/// `<media:content url=".." length=".." type=".." medium=".."/>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssMediaContent {
    pub url: String,
    pub length: Option<String>,
    pub mime_type: String,
    /// Top-level MIME type, e.g. `image` for `image/png`.
    pub medium: String,
}

/// `<media:title type="..">`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssMediaTitle {
    pub title_type: Option<String>,
    pub title: String,
}

/// `<item>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssItem {
    pub title: RssTitle,
    pub link: String,
    pub description: RssDescription,
    pub content: Option<RssContent>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub comments: Option<String>,
    pub media_content: Option<RssMediaContent>,
    pub media_keywords: Option<String>,
    pub media_title: Option<RssMediaTitle>,
    pub guid: Option<RssGuid>,
    pub pub_date: Option<String>,
    pub source: Option<String>,
}

/// `<channel>`
///
/// `title`, `link` and `description` are required by RSS 2.0 but are not
/// checked here; supplying them is up to whoever built the source feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RssChannel {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: Option<String>,
    pub copyright: Option<String>,
    pub managing_editor: Option<String>,
    pub web_master: Option<String>,
    pub pub_date: Option<String>,
    pub last_build_date: Option<String>,
    pub category: Option<String>,
    pub generator: Option<String>,
    pub docs: Option<String>,
    pub cloud: Option<String>,
    pub ttl: Option<u32>,
    pub rating: Option<String>,
    pub skip_hours: Option<String>,
    pub skip_days: Option<String>,
    pub image: Option<RssImage>,
    pub text_input: Option<RssTextInput>,
    pub items: Vec<RssItem>,
}
