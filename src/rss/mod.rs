//! RSS 2.0 output adapter.
//!
//! Turns a generic [`Feed`](crate::model::Feed) into an RSS 2.0 document:
//!
//! - [`field`] - title/description renderers (plain or CDATA-encoded)
//! - [`records`] - one struct per RSS element
//! - [`mapper`] - generic model to RSS records
//! - [`document`] - the `<rss>` envelope
//! - [`writer`] - XML text emission via `quick-xml`
//!
//! # Example
//!
//! ```
//! use feedgen::model::{Feed, Item, Link};
//!
//! let mut feed = Feed {
//!     title: "Example".to_string(),
//!     link: Some(Link::new("https://example.com/")),
//!     description: "Latest posts".to_string(),
//!     ..Feed::default()
//! };
//! feed.add(Item {
//!     title: "Hello".to_string(),
//!     link: Some(Link::new("https://example.com/hello")),
//!     ..Item::default()
//! });
//!
//! let xml = feedgen::rss::to_string(&feed).unwrap();
//! assert!(xml.contains("<title>Hello</title>"));
//! ```

pub mod document;
pub mod field;
pub mod mapper;
pub mod records;
pub mod writer;

use anyhow::{Context, Result};

pub use document::RssDocument;
pub use field::{RssDescription, RssTitle, TextStyle};
pub use mapper::{map_channel, map_channel_styled, map_item, map_item_styled};
pub use records::{
    RssChannel, RssContent, RssGuid, RssImage, RssItem, RssMediaContent, RssMediaTitle,
    RssTextInput,
};
pub use writer::{to_xml_string, write_document, RenderError};

use crate::config::Config;
use crate::model::Feed;

/// Builds the document for `feed` using the given configuration.
pub fn build_document(feed: &Feed, config: &Config) -> RssDocument {
    let mut channel = map_channel_styled(feed, config.text_style);
    config.channel.apply(&mut channel);
    RssDocument::wrap(channel)
}

/// Renders `feed` as RSS 2.0 with default settings.
pub fn to_string(feed: &Feed) -> Result<String, RenderError> {
    to_string_with(feed, &Config::default())
}

pub fn to_string_with(feed: &Feed, config: &Config) -> Result<String, RenderError> {
    to_xml_string(&build_document(feed, config), config.indent)
}

/// Writes a document to a file atomically.
///
/// The XML is written to a temporary file in the same directory, synced to
/// disk, then renamed over `path`, so readers never see a partial feed.
pub fn export_to_file(doc: &RssDocument, path: &std::path::Path, indent: usize) -> Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let content = to_xml_string(doc, indent).context("Failed to render RSS document")?;

    // Unpredictable temp name, created with create_new so an existing file or symlink is never reused
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = path.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions",
                temp_path.display()
            )
        })?;

    std::io::Write::write_all(&mut file, content.as_bytes()).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to write RSS to temporary file '{}'",
            temp_path.display()
        )
    })?;

    file.sync_all().with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to sync temporary file '{}' to disk",
            temp_path.display()
        )
    })?;

    drop(file);

    // On Windows, rename fails if destination exists
    #[cfg(windows)]
    if path.exists() {
        std::fs::remove_file(path).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!("Failed to remove existing '{}'", path.display())
        })?;
    }

    std::fs::rename(&temp_path, path).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}'",
            temp_path.display(),
            path.display()
        )
    })?;

    tracing::info!(path = %path.display(), items = doc.channel.items.len(), "Exported RSS feed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChannelDefaults;
    use crate::model::Item;

    fn feed() -> Feed {
        Feed {
            title: "T".to_string(),
            description: "D".to_string(),
            items: vec![Item {
                title: "<I>".to_string(),
                ..Item::default()
            }],
            ..Feed::default()
        }
    }

    #[test]
    fn test_to_string_defaults_to_plain() {
        let xml = to_string(&feed()).unwrap();
        assert!(xml.contains("<title>&lt;I&gt;</title>"));
        assert!(xml.contains("\n  <channel>"));
    }

    #[test]
    fn test_to_string_with_encoded_style() {
        let config = Config {
            text_style: TextStyle::Encoded,
            indent: 0,
            ..Config::default()
        };
        let xml = to_string_with(&feed(), &config).unwrap();
        assert!(xml.contains("<item><title><![CDATA[<I>]]></title>"));
    }

    #[test]
    fn test_build_document_applies_channel_defaults() {
        let config = Config {
            channel: ChannelDefaults {
                generator: Some("feedgen".to_string()),
                ttl: Some(30),
                ..ChannelDefaults::default()
            },
            ..Config::default()
        };
        let doc = build_document(&feed(), &config);
        assert_eq!(doc.channel.generator.as_deref(), Some("feedgen"));
        assert_eq!(doc.channel.ttl, Some(30));
        assert_eq!(doc.channel.items.len(), 1);
    }

    #[test]
    fn test_export_to_file() {
        let dir = std::env::temp_dir().join("feedgen_export_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("feed.xml");

        let doc = build_document(&feed(), &Config::default());
        export_to_file(&doc, &path, 2).expect("Failed to export to file");

        let content = std::fs::read_to_string(&path).expect("Failed to read exported file");
        assert!(content.starts_with("<?xml"));
        assert!(content.contains("<description>D</description>"));

        // Overwrites an existing file
        export_to_file(&doc, &path, 0).expect("Failed to overwrite file");
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<channel><title>T</title>"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
