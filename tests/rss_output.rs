//! End-to-end tests: generic feed in, RSS 2.0 text out.
//!
//! Generated documents are read back with `feed-rs` so the assertions do not
//! depend on our own writer's formatting.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use feed_rs::model::FeedType;
use pretty_assertions::assert_eq;

use feedgen::config::{ChannelDefaults, Config};
use feedgen::model::{Author, Feed, Image, Item, Link, Media};
use feedgen::rss::{self, RssDocument, TextStyle};

fn ts(s: &str) -> Option<DateTime<FixedOffset>> {
    Some(DateTime::parse_from_rfc3339(s).unwrap())
}

fn sample_feed() -> Feed {
    let mut feed = Feed {
        title: "T".to_string(),
        link: Some(Link::new("http://x/")),
        description: "D".to_string(),
        ..Feed::default()
    };
    feed.add(Item {
        title: "I".to_string(),
        link: Some(Link::new("http://x/1")),
        description: "ID".to_string(),
        created: ts("2021-01-01T00:00:00Z"),
        ..Item::default()
    });
    feed
}

// ============================================================================
// Document Shape
// ============================================================================

#[test]
fn test_end_to_end_minimal_feed() {
    let xml = rss::to_string(&sample_feed()).unwrap();

    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(r#"<rss version="2.0""#));
    assert_eq!(xml.matches("<channel>").count(), 1);
    assert_eq!(xml.matches("<item>").count(), 1);
    assert!(xml.contains("<pubDate>Fri, 01 Jan 2021 00:00:00 +0000</pubDate>"));

    let parsed = feed_rs::parser::parse(xml.as_bytes()).expect("feed-rs rejected output");
    assert_eq!(parsed.feed_type, FeedType::RSS2);
    assert_eq!(parsed.title.map(|t| t.content).as_deref(), Some("T"));
    assert_eq!(parsed.entries.len(), 1);

    let entry = &parsed.entries[0];
    assert_eq!(entry.title.as_ref().map(|t| t.content.as_str()), Some("I"));
    assert_eq!(entry.links[0].href, "http://x/1");
    assert_eq!(
        entry.published,
        Some(Utc.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_full_feed_reads_back() {
    let mut feed = sample_feed();
    feed.author = Some(Author::new("Name", "a@b.com"));
    feed.updated = ts("2021-03-04T05:06:07-05:00");
    feed.copyright = "CC BY 4.0".to_string();
    feed.image = Some(Image {
        url: "http://x/logo.png".to_string(),
        title: "T".to_string(),
        link: "http://x/".to_string(),
        width: Some(88),
        height: Some(31),
    });
    feed.add(Item {
        title: "Video".to_string(),
        link: Some(Link::new("http://x/2")),
        description: "A clip".to_string(),
        content: "<p>Watch <b>this</b></p>".to_string(),
        id: "http://x/2".to_string(),
        author: Some(Author::new("Jane", "")),
        updated: ts("2021-02-01T00:00:00Z"),
        media: Some(Media {
            url: "http://x/2.mp4".to_string(),
            mime_type: "video/mp4".to_string(),
            length: "2048".to_string(),
            keywords: "cats, dogs".to_string(),
            title: "Clip".to_string(),
        }),
        ..Item::default()
    });

    let xml = rss::to_string(&feed).unwrap();

    assert!(xml.contains("<managingEditor>a@b.com (Name)</managingEditor>"));
    assert!(xml.contains("<lastBuildDate>Thu, 04 Mar 2021 05:06:07 -0500</lastBuildDate>"));
    assert!(xml.contains("<pubDate>Thu, 04 Mar 2021 05:06:07 -0500</pubDate>"));
    assert!(xml.contains("<copyright>CC BY 4.0</copyright>"));
    assert!(xml.contains("<width>88</width>"));
    assert!(xml.contains("<content:encoded><![CDATA[<p>Watch <b>this</b></p>]]></content:encoded>"));
    assert!(xml.contains(r#"medium="video""#));
    assert!(xml.contains(r#"<guid isPermaLink="true">http://x/2</guid>"#));

    let parsed = feed_rs::parser::parse(xml.as_bytes()).expect("feed-rs rejected output");
    assert_eq!(parsed.entries.len(), 2);
    assert_eq!(parsed.entries[1].id, "http://x/2");
    assert_eq!(
        parsed.entries[1].published,
        Some(Utc.with_ymd_and_hms(2021, 2, 1, 0, 0, 0).unwrap())
    );
}

#[test]
fn test_empty_feed_is_well_formed() {
    let xml = rss::to_string(&Feed::default()).unwrap();
    assert!(!xml.contains("<item>"));
    assert!(!xml.contains("managingEditor"));
    assert!(!xml.contains("lastBuildDate"));
    assert!(!xml.contains("<image>"));

    let parsed = feed_rs::parser::parse(xml.as_bytes()).expect("feed-rs rejected output");
    assert!(parsed.entries.is_empty());
}

#[test]
fn test_control_characters_do_not_break_document() {
    let mut feed = sample_feed();
    feed.title = "Feed\u{1B}[0m".to_string();
    feed.items[0].title = "a\u{0B}b".to_string();
    feed.items[0].description = "c\u{1}d".to_string();

    let xml = rss::to_string(&feed).unwrap();
    assert!(!xml.chars().any(|c| c.is_control() && !matches!(c, '\t' | '\n' | '\r')));
    assert!(xml.contains("<title>a\u{FFFD}b</title>"));
    assert!(xml.contains("<description>c\u{FFFD}d</description>"));

    let parsed = feed_rs::parser::parse(xml.as_bytes()).expect("feed-rs rejected output");
    assert_eq!(parsed.entries.len(), 1);
}

// ============================================================================
// Item Ordering
// ============================================================================

#[test]
fn test_item_order_survives_serialization() {
    let mut feed = sample_feed();
    feed.items.clear();
    for n in [3, 1, 2] {
        feed.add(Item {
            title: format!("item {n}"),
            link: Some(Link::new(format!("http://x/{n}"))),
            ..Item::default()
        });
    }

    let xml = rss::to_string(&feed).unwrap();
    let parsed = feed_rs::parser::parse(xml.as_bytes()).unwrap();
    let titles: Vec<String> = parsed
        .entries
        .into_iter()
        .filter_map(|e| e.title.map(|t| t.content))
        .collect();
    assert_eq!(titles, ["item 3", "item 1", "item 2"]);
}

#[test]
fn test_sorted_then_rendered() {
    let mut feed = sample_feed();
    feed.add(Item {
        title: "Newer".to_string(),
        created: ts("2022-01-01T00:00:00Z"),
        ..Item::default()
    });
    feed.sort_items(|a, b| b.created.cmp(&a.created));

    let channel = rss::map_channel(&feed);
    assert_eq!(channel.items[0].title.as_str(), "Newer");
    assert_eq!(channel.items[1].title.as_str(), "I");
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_encoded_style_and_channel_defaults() {
    let mut feed = sample_feed();
    feed.items[0].title = "Tom & Jerry".to_string();

    let config = Config {
        text_style: TextStyle::Encoded,
        indent: 0,
        channel: ChannelDefaults {
            language: Some("en-us".to_string()),
            generator: Some("feedgen".to_string()),
            ttl: Some(60),
            ..ChannelDefaults::default()
        },
    };
    let xml = rss::to_string_with(&feed, &config).unwrap();

    assert!(xml.contains("<item><title><![CDATA[Tom & Jerry]]></title>"));
    assert!(xml.contains("<description><![CDATA[ID]]></description>"));
    assert!(xml.contains("<language>en-us</language>"));
    assert!(xml.contains("<generator>feedgen</generator>"));
    assert!(xml.contains("<ttl>60</ttl>"));

    let parsed = feed_rs::parser::parse(xml.as_bytes()).unwrap();
    assert_eq!(parsed.language.as_deref(), Some("en-us"));
    assert_eq!(
        parsed.entries[0].title.as_ref().map(|t| t.content.as_str()),
        Some("Tom & Jerry")
    );
}

#[test]
fn test_write_document_to_writer() {
    let doc = RssDocument::wrap(rss::map_channel(&sample_feed()));
    let mut out = Vec::new();
    rss::write_document(&doc, &mut out, 0).unwrap();

    let xml = String::from_utf8(out).unwrap();
    assert!(xml.contains("<channel><title>T</title><link>http://x/</link><description>D</description>"));
}
