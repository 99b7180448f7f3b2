//! Conversion from the generic [`crate::model`] types into RSS records.
//!
//! Nothing here can fail. A missing or empty input field simply leaves the
//! corresponding RSS element out, so one incomplete item never costs the
//! whole document.

use chrono::{DateTime, FixedOffset};

use super::field::{RssDescription, RssTitle, TextStyle};
use super::records::{
    RssChannel, RssContent, RssGuid, RssImage, RssItem, RssMediaContent, RssMediaTitle,
};
use crate::model::{Author, Feed, Item, Media};

/// RFC 1123 with a numeric zone, e.g. `Mon, 02 Jan 2006 15:04:05 -0700`.
pub const RFC1123Z: &str = "%a, %d %b %Y %H:%M:%S %z";

/// Formats the first present timestamp, or `None` if all are absent.
pub fn any_time_format(times: &[Option<DateTime<FixedOffset>>]) -> Option<String> {
    times
        .iter()
        .flatten()
        .next()
        .map(|t| t.format(RFC1123Z).to_string())
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Builds an item with plain title and description.
pub fn map_item(item: &Item) -> RssItem {
    map_item_styled(item, TextStyle::Plain)
}

/// Builds an item, emitting title and description with the given style.
pub fn map_item_styled(item: &Item, style: TextStyle) -> RssItem {
    let (media_content, media_title, media_keywords) = match item.media.as_ref() {
        Some(media) => map_media(media),
        None => (None, None, None),
    };

    RssItem {
        title: RssTitle::new(style, item.title.as_str()),
        link: item
            .link
            .as_ref()
            .map(|l| l.href.clone())
            .unwrap_or_default(),
        description: RssDescription::new(style, item.description.as_str()),
        content: non_empty(&item.content).map(|content| RssContent { content }),
        author: item.author.as_ref().and_then(|a| non_empty(&a.name)),
        category: non_empty(&item.category),
        comments: None,
        media_content,
        media_keywords,
        media_title,
        guid: non_empty(&item.id).map(|value| RssGuid {
            value,
            is_perma_link: true,
        }),
        pub_date: any_time_format(&[item.created, item.updated]),
        source: item.source.as_ref().and_then(|s| non_empty(&s.href)),
    }
}

/// Media is only described when both the MIME type and length are known.
fn map_media(
    media: &Media,
) -> (
    Option<RssMediaContent>,
    Option<RssMediaTitle>,
    Option<String>,
) {
    if media.mime_type.is_empty() || media.length.is_empty() {
        tracing::trace!(url = %media.url, "Skipping media without type or length");
        return (None, None, None);
    }

    let medium = media
        .mime_type
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string();
    let content = RssMediaContent {
        url: media.url.clone(),
        length: Some(media.length.clone()),
        mime_type: media.mime_type.clone(),
        medium,
    };
    let title = non_empty(&media.title).map(|title| RssMediaTitle {
        title_type: Some("plain".to_string()),
        title,
    });

    (Some(content), title, non_empty(&media.keywords))
}

/// `email` or `email (name)`.
pub fn managing_editor(author: &Author) -> String {
    if author.name.is_empty() {
        author.email.clone()
    } else {
        format!("{} ({})", author.email, author.name)
    }
}

/// Builds a channel, mapping every item in order.
pub fn map_channel(feed: &Feed) -> RssChannel {
    map_channel_styled(feed, TextStyle::Plain)
}

pub fn map_channel_styled(feed: &Feed, style: TextStyle) -> RssChannel {
    let items: Vec<RssItem> = feed
        .items
        .iter()
        .map(|item| map_item_styled(item, style))
        .collect();

    tracing::debug!(title = %feed.title, items = items.len(), "Mapped RSS channel");

    RssChannel {
        title: feed.title.clone(),
        link: feed
            .link
            .as_ref()
            .map(|l| l.href.clone())
            .unwrap_or_default(),
        description: feed.description.clone(),
        copyright: non_empty(&feed.copyright),
        managing_editor: feed
            .author
            .as_ref()
            .map(managing_editor)
            .and_then(|s| non_empty(&s)),
        pub_date: any_time_format(&[feed.created, feed.updated]),
        last_build_date: any_time_format(&[feed.updated]),
        image: feed.image.as_ref().map(|img| RssImage {
            url: img.url.clone(),
            title: img.title.clone(),
            link: img.link.clone(),
            width: img.width,
            height: img.height,
        }),
        items,
        ..RssChannel::default()
    }
}
