use serde::Deserialize;

/// How a text field is emitted in the XML output.
///
/// `Plain` writes entity-escaped character data; `Encoded` wraps the raw
/// string in a CDATA section so embedded HTML survives untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextStyle {
    #[default]
    Plain,
    Encoded,
}

/// Item title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RssTitle {
    Plain(String),
    Encoded(String),
}

impl RssTitle {
    pub fn new(style: TextStyle, title: impl Into<String>) -> Self {
        match style {
            TextStyle::Plain => Self::Plain(title.into()),
            TextStyle::Encoded => Self::Encoded(title.into()),
        }
    }

    /// Returns a title of the same variant holding `title`.
    pub fn set_title(&self, title: impl Into<String>) -> Self {
        Self::new(self.style(), title)
    }

    pub fn style(&self) -> TextStyle {
        match self {
            Self::Plain(_) => TextStyle::Plain,
            Self::Encoded(_) => TextStyle::Encoded,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Encoded(s) => s,
        }
    }
}

impl Default for RssTitle {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

/// Item description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RssDescription {
    Plain(String),
    Encoded(String),
}

impl RssDescription {
    pub fn new(style: TextStyle, description: impl Into<String>) -> Self {
        match style {
            TextStyle::Plain => Self::Plain(description.into()),
            TextStyle::Encoded => Self::Encoded(description.into()),
        }
    }

    /// Returns a description of the same variant holding `description`.
    pub fn set_description(&self, description: impl Into<String>) -> Self {
        Self::new(self.style(), description)
    }

    pub fn style(&self) -> TextStyle {
        match self {
            Self::Plain(_) => TextStyle::Plain,
            Self::Encoded(_) => TextStyle::Encoded,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Plain(s) | Self::Encoded(s) => s,
        }
    }
}

impl Default for RssDescription {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}
