//! Format-agnostic feed model.
//!
//! These types are what callers populate before handing a feed to one of the
//! output adapters (currently only [`crate::rss`]). They carry no RSS-specific
//! rules: every field is optional in practice, and an unset timestamp is
//! `None` rather than a sentinel date.
//!
//! All types derive `Deserialize` with `#[serde(default)]`, so a feed can be
//! described in TOML or JSON with any subset of keys (see [`crate::input`]).

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamps come either as RFC 3339 strings (JSON, quoted TOML) or as
/// native TOML offset datetimes.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Toml(toml::value::Datetime),
}

fn deserialize_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<FixedOffset>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = match Option::<RawTimestamp>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let text = match raw {
        RawTimestamp::Text(s) => s,
        RawTimestamp::Toml(dt) => dt.to_string(),
    };
    DateTime::parse_from_rfc3339(&text).map(Some).map_err(|e| {
        serde::de::Error::custom(format!(
            "invalid timestamp '{text}' (expected RFC 3339 with a UTC offset): {e}"
        ))
    })
}

/// A hyperlink reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: String,
    pub rel: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub length: String,
}

impl Link {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            ..Self::default()
        }
    }
}

/// Feed or item author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Author {
    pub name: String,
    pub email: String,
}

impl Author {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

/// Channel artwork.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    pub url: String,
    pub title: String,
    pub link: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// A media attachment on an item (audio, video, image...).
///
/// `length` is kept as a string because upstream producers usually copy it
/// verbatim from an HTTP `Content-Length` header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Media {
    pub url: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub length: String,
    pub keywords: String,
    pub title: String,
}

/// One entry of a [`Feed`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    pub title: String,
    pub link: Option<Link>,
    pub source: Option<Link>,
    pub author: Option<Author>,
    pub description: String,
    /// Full body, typically HTML.
    pub content: String,
    pub category: String,
    pub id: String,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated: Option<DateTime<FixedOffset>>,
    pub media: Option<Media>,
}

/// A complete feed: header fields plus an ordered list of items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feed {
    pub title: String,
    pub link: Option<Link>,
    pub description: String,
    pub author: Option<Author>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created: Option<DateTime<FixedOffset>>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated: Option<DateTime<FixedOffset>>,
    pub copyright: String,
    pub image: Option<Image>,
    pub items: Vec<Item>,
}

impl Feed {
    /// Appends an item to the end of the feed.
    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Sorts items in place with the given comparator.
    ///
    /// The sort is stable, so items that compare equal keep their relative
    /// order.
    ///
    /// ```
    /// use feedgen::model::Feed;
    ///
    /// let mut feed = Feed::default();
    /// // Newest first
    /// feed.sort_items(|a, b| b.created.cmp(&a.created));
    /// ```
    pub fn sort_items<F>(&mut self, compare: F)
    where
        F: FnMut(&Item, &Item) -> Ordering,
    {
        self.items.sort_by(compare);
    }
}
