//! Configuration file parser for ~/.config/feedgen/config.toml.
//!
//! The config file is optional — a missing file yields `Config::default()`.
//! Unknown keys are silently ignored by serde (with `deny_unknown_fields` off),
//! though we log a warning when the file contains potential typos.
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::rss::{RssChannel, RssTextInput, TextStyle};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// Config file exceeds `Config::MAX_FILE_SIZE`.
    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Top-level configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// How item titles and descriptions are emitted: `"plain"` or `"encoded"` (CDATA).
    pub text_style: TextStyle,

    /// Spaces per nesting level in the output. 0 = no pretty printing.
    pub indent: usize,

    /// Channel elements the source feed has no field for.
    pub channel: ChannelDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            text_style: TextStyle::Plain,
            indent: 2,
            channel: ChannelDefaults::default(),
        }
    }
}

/// Values for channel elements the mapper never fills in.
///
/// Applied after mapping; a field already set on the channel is kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChannelDefaults {
    pub language: Option<String>,
    pub generator: Option<String>,
    pub docs: Option<String>,
    pub web_master: Option<String>,
    pub category: Option<String>,
    pub cloud: Option<String>,
    pub ttl: Option<u32>,
    pub rating: Option<String>,
    pub skip_hours: Option<String>,
    pub skip_days: Option<String>,
    pub text_input: Option<TextInputConfig>,
}

/// `[channel.text_input]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextInputConfig {
    pub title: String,
    pub description: String,
    pub name: String,
    pub link: String,
}

fn fill(slot: &mut Option<String>, value: &Option<String>) {
    if matches!(slot.as_deref(), None | Some("")) {
        if let Some(v) = value.as_ref().filter(|v| !v.is_empty()) {
            *slot = Some(v.clone());
        }
    }
}

impl ChannelDefaults {
    pub fn apply(&self, channel: &mut RssChannel) {
        fill(&mut channel.language, &self.language);
        fill(&mut channel.generator, &self.generator);
        fill(&mut channel.docs, &self.docs);
        fill(&mut channel.web_master, &self.web_master);
        fill(&mut channel.category, &self.category);
        fill(&mut channel.cloud, &self.cloud);
        fill(&mut channel.rating, &self.rating);
        fill(&mut channel.skip_hours, &self.skip_hours);
        fill(&mut channel.skip_days, &self.skip_days);
        if channel.ttl.is_none() {
            channel.ttl = self.ttl;
        }
        if channel.text_input.is_none() {
            channel.text_input = self.text_input.as_ref().map(|t| RssTextInput {
                title: t.title.clone(),
                description: t.description.clone(),
                name: t.name.clone(),
                link: t.link.clone(),
            });
        }
    }
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)` with line number info
    /// - Unknown keys → silently accepted (serde default behavior), logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // Race condition: file deleted between metadata and read
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            warn_unknown_keys(&raw);
        }

        let config: Config = toml::from_str(&content)?;
        tracing::info!(path = %path.display(), style = ?config.text_style, "Loaded configuration");
        Ok(config)
    }
}

fn warn_unknown_keys(raw: &toml::Table) {
    const KNOWN_KEYS: [&str; 3] = ["text_style", "indent", "channel"];
    const KNOWN_CHANNEL_KEYS: [&str; 11] = [
        "language",
        "generator",
        "docs",
        "web_master",
        "category",
        "cloud",
        "ttl",
        "rating",
        "skip_hours",
        "skip_days",
        "text_input",
    ];

    for key in raw.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            tracing::warn!(key = %key, "Unknown key in config file, ignoring");
        }
    }
    if let Some(channel) = raw.get("channel").and_then(|c| c.as_table()) {
        for key in channel.keys() {
            if !KNOWN_CHANNEL_KEYS.contains(&key.as_str()) {
                tracing::warn!(key = %key, "Unknown key in [channel], ignoring");
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
