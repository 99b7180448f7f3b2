//! Text emission for [`RssDocument`] using the `quick-xml` event writer.
//!
//! Emission rules:
//! - optional fields that are `None` or empty are left out entirely
//! - `Encoded` titles/descriptions and `<content:encoded>` go into CDATA
//! - `isPermaLink` is only written when true
//! - characters XML 1.0 forbids are replaced with U+FFFD

use std::borrow::Cow;
use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use thiserror::Error;

use super::document::RssDocument;
use super::field::{RssDescription, RssTitle};
use super::records::{RssChannel, RssImage, RssItem, RssTextInput};

/// Errors that can occur while writing a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The underlying XML writer failed.
    #[error("XML write error: {0}")]
    Xml(String),

    #[error("Generated RSS contains invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a document to a string, indenting nested elements by
/// `indent` spaces (0 writes everything on one line).
pub fn to_xml_string(doc: &RssDocument, indent: usize) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    write_document(doc, &mut buf, indent)?;
    Ok(String::from_utf8(buf)?)
}

/// Writes the XML declaration followed by the `<rss>` tree.
pub fn write_document<W: Write>(
    doc: &RssDocument,
    out: W,
    indent: usize,
) -> Result<(), RenderError> {
    let writer = if indent == 0 {
        Writer::new(out)
    } else {
        Writer::new_with_indent(out, b' ', indent)
    };
    let mut rss = RssWriter { writer };

    rss.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("rss");
    root.push_attribute(("version", doc.version));
    root.push_attribute(("xmlns:content", doc.content_namespace));
    root.push_attribute(("xmlns:media", doc.media_namespace));
    rss.event(Event::Start(root))?;
    rss.channel(&doc.channel)?;
    rss.end("rss")?;

    tracing::debug!(items = doc.channel.items.len(), "Wrote RSS document");
    Ok(())
}

/// Whether `c` matches the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replaces characters that may not appear in an XML document with U+FFFD.
pub fn sanitize(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(
            value
                .chars()
                .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
                .collect(),
        )
    }
}

struct RssWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> RssWriter<W> {
    fn event(&mut self, event: Event<'_>) -> Result<(), RenderError> {
        self.writer
            .write_event(event)
            .map_err(|e| RenderError::Xml(e.to_string()))
    }

    fn start(&mut self, name: &str) -> Result<(), RenderError> {
        self.event(Event::Start(BytesStart::new(name)))
    }

    fn end(&mut self, name: &str) -> Result<(), RenderError> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// Escaped character data. All text goes through here.
    fn chars(&mut self, value: &str) -> Result<(), RenderError> {
        self.event(Event::Text(BytesText::new(&sanitize(value))))
    }

    /// `<name>value</name>`, written even when `value` is empty.
    fn text(&mut self, name: &str, value: &str) -> Result<(), RenderError> {
        self.start(name)?;
        self.chars(value)?;
        self.end(name)
    }

    fn optional_text(&mut self, name: &str, value: Option<&str>) -> Result<(), RenderError> {
        match value {
            Some(v) if !v.is_empty() => self.text(name, v),
            _ => Ok(()),
        }
    }

    fn optional_number(&mut self, name: &str, value: Option<u32>) -> Result<(), RenderError> {
        match value {
            Some(n) if n > 0 => self.text(name, &n.to_string()),
            _ => Ok(()),
        }
    }

    fn cdata_text(&mut self, name: &str, value: &str) -> Result<(), RenderError> {
        self.start(name)?;
        self.cdata(value)?;
        self.end(name)
    }

    /// A `]]>` inside the value would close the section early, so it is
    /// split across two sections: `]]` ends the first, `>` opens the next.
    fn cdata(&mut self, value: &str) -> Result<(), RenderError> {
        let value = sanitize(value);
        let mut parts = value.split("]]>").peekable();
        let mut first = true;
        while let Some(part) = parts.next() {
            let mut piece = String::with_capacity(part.len() + 3);
            if !first {
                piece.push('>');
            }
            piece.push_str(part);
            if parts.peek().is_some() {
                piece.push_str("]]");
            }
            self.event(Event::CData(BytesCData::new(piece)))?;
            first = false;
        }
        Ok(())
    }

    fn title(&mut self, title: &RssTitle) -> Result<(), RenderError> {
        match title {
            RssTitle::Plain(s) => self.text("title", s),
            RssTitle::Encoded(s) => self.cdata_text("title", s),
        }
    }

    fn description(&mut self, description: &RssDescription) -> Result<(), RenderError> {
        match description {
            RssDescription::Plain(s) => self.text("description", s),
            RssDescription::Encoded(s) => self.cdata_text("description", s),
        }
    }

    fn channel(&mut self, channel: &RssChannel) -> Result<(), RenderError> {
        self.start("channel")?;
        self.text("title", &channel.title)?;
        self.text("link", &channel.link)?;
        self.text("description", &channel.description)?;
        self.optional_text("language", channel.language.as_deref())?;
        self.optional_text("copyright", channel.copyright.as_deref())?;
        self.optional_text("managingEditor", channel.managing_editor.as_deref())?;
        self.optional_text("webMaster", channel.web_master.as_deref())?;
        self.optional_text("pubDate", channel.pub_date.as_deref())?;
        self.optional_text("lastBuildDate", channel.last_build_date.as_deref())?;
        self.optional_text("category", channel.category.as_deref())?;
        self.optional_text("generator", channel.generator.as_deref())?;
        self.optional_text("docs", channel.docs.as_deref())?;
        self.optional_text("cloud", channel.cloud.as_deref())?;
        self.optional_number("ttl", channel.ttl)?;
        self.optional_text("rating", channel.rating.as_deref())?;
        self.optional_text("skipHours", channel.skip_hours.as_deref())?;
        self.optional_text("skipDays", channel.skip_days.as_deref())?;
        if let Some(image) = &channel.image {
            self.image(image)?;
        }
        if let Some(text_input) = &channel.text_input {
            self.text_input(text_input)?;
        }
        for item in &channel.items {
            self.item(item)?;
        }
        self.end("channel")
    }

    fn image(&mut self, image: &RssImage) -> Result<(), RenderError> {
        self.start("image")?;
        self.text("url", &image.url)?;
        self.text("title", &image.title)?;
        self.text("link", &image.link)?;
        self.optional_number("width", image.width)?;
        self.optional_number("height", image.height)?;
        self.end("image")
    }

    fn text_input(&mut self, text_input: &RssTextInput) -> Result<(), RenderError> {
        self.start("textInput")?;
        self.text("title", &text_input.title)?;
        self.text("description", &text_input.description)?;
        self.text("name", &text_input.name)?;
        self.text("link", &text_input.link)?;
        self.end("textInput")
    }

    fn item(&mut self, item: &RssItem) -> Result<(), RenderError> {
        self.start("item")?;
        self.title(&item.title)?;
        self.text("link", &item.link)?;
        self.description(&item.description)?;
        if let Some(content) = &item.content {
            self.cdata_text("content:encoded", &content.content)?;
        }
        self.optional_text("author", item.author.as_deref())?;
        self.optional_text("category", item.category.as_deref())?;
        self.optional_text("comments", item.comments.as_deref())?;

        if let Some(media) = &item.media_content {
            let mut el = BytesStart::new("media:content");
            el.push_attribute(("url", &*sanitize(&media.url)));
            if let Some(length) = media.length.as_deref().filter(|l| !l.is_empty()) {
                el.push_attribute(("length", &*sanitize(length)));
            }
            el.push_attribute(("type", &*sanitize(&media.mime_type)));
            el.push_attribute(("medium", &*sanitize(&media.medium)));
            self.event(Event::Empty(el))?;
        }
        self.optional_text("media:keywords", item.media_keywords.as_deref())?;
        if let Some(title) = &item.media_title {
            let mut el = BytesStart::new("media:title");
            if let Some(kind) = title.title_type.as_deref().filter(|t| !t.is_empty()) {
                el.push_attribute(("type", &*sanitize(kind)));
            }
            self.event(Event::Start(el))?;
            self.chars(&title.title)?;
            self.end("media:title")?;
        }

        if let Some(guid) = &item.guid {
            let mut el = BytesStart::new("guid");
            if guid.is_perma_link {
                el.push_attribute(("isPermaLink", "true"));
            }
            self.event(Event::Start(el))?;
            self.chars(&guid.value)?;
            self.end("guid")?;
        }
        self.optional_text("pubDate", item.pub_date.as_deref())?;
        self.optional_text("source", item.source.as_deref())?;
        self.end("item")
    }
}
