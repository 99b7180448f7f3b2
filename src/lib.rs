//! feedgen renders a format-agnostic feed model as an RSS 2.0 document.
//!
//! - [`model`] - the generic feed/item types callers populate
//! - [`rss`] - mapping to RSS records and XML emission
//! - [`config`] - optional TOML configuration
//! - [`input`] - loading feed descriptions from JSON or TOML

pub mod config;
pub mod input;
pub mod model;
pub mod rss;
