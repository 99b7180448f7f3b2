//! Loading a generic [`Feed`] description from disk.
//!
//! `.json` files are read with `serde_json`; anything else is treated as
//! TOML. Both formats use the field names of [`crate::model`]. Timestamps
//! are RFC 3339 with an offset (`"2021-01-01T00:00:00Z"`); TOML files may
//! also use unquoted offset datetimes.

use std::path::Path;

use thiserror::Error;

use crate::model::Feed;

/// Maximum input file size (8 MB).
const MAX_INPUT_SIZE: u64 = 8 * 1_048_576;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read feed file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON feed description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML feed description: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Feed file too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: u64, max: u64 },
}

/// Reads and parses a feed description file.
pub fn load_feed(path: &Path) -> Result<Feed, InputError> {
    let size = std::fs::metadata(path)?.len();
    if size > MAX_INPUT_SIZE {
        return Err(InputError::TooLarge {
            size,
            max: MAX_INPUT_SIZE,
        });
    }

    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let feed = if is_json {
        parse_json(&content)?
    } else {
        parse_toml(&content)?
    };

    tracing::info!(
        path = %path.display(),
        title = %feed.title,
        items = feed.items.len(),
        "Loaded feed description"
    );
    Ok(feed)
}

pub fn parse_json(content: &str) -> Result<Feed, InputError> {
    Ok(serde_json::from_str(content)?)
}

pub fn parse_toml(content: &str) -> Result<Feed, InputError> {
    Ok(toml::from_str(content)?)
}
