//! Report format identifiers.

use thiserror::Error;

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReportFormat {
    /// Standalone HTML page with inline styles.
    #[default]
    Html,
    /// Markdown document.
    Markdown,
}

impl ReportFormat {
    /// Looks up a format by tag, falling back to [`ReportFormat::Html`] for
    /// unknown or absent tags.
    #[must_use]
    pub fn from_tag(tag: Option<&str>) -> Self {
        tag.and_then(|tag| tag.parse().ok()).unwrap_or_default()
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
        }
    }

    /// Returns the MIME type of rendered reports.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Html => "text/html",
            Self::Markdown => "text/markdown",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Html, Self::Markdown]
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            // `htm` and `markdown` are aliases; the upload UI only sends `html` and `md`.
            "html" | "htm" => Ok(Self::Html),
            "md" | "markdown" => Ok(Self::Markdown),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur when selecting a report format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Unknown report format.
    #[error("Unknown report format: {0}")]
    UnknownFormat(String),
}
