use super::records::RssChannel;

pub const RSS_VERSION: &str = "2.0";
/// RSS Content Module, for `<content:encoded>`.
pub const CONTENT_NAMESPACE: &str = "http://purl.org/rss/1.0/modules/content/";
/// Media RSS, for `<media:content>` and friends.
pub const MEDIA_NAMESPACE: &str = "http://search.yahoo.com/mrss/";

/// The `<rss>` root element, ready to hand to [`super::writer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RssDocument {
    pub version: &'static str,
    pub content_namespace: &'static str,
    pub media_namespace: &'static str,
    pub channel: RssChannel,
}

impl RssDocument {
    pub fn wrap(channel: RssChannel) -> Self {
        Self {
            version: RSS_VERSION,
            content_namespace: CONTENT_NAMESPACE,
            media_namespace: MEDIA_NAMESPACE,
            channel,
        }
    }
}
