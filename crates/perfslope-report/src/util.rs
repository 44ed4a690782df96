//! Text helpers shared by the renderers.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// Prefix given to bare base64 chart payloads.
const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Pattern for chart sources that may be embedded.
const IMAGE_SRC_PATTERN: &str = r"^data:image/(png|jpeg|gif|svg\+xml);base64,[A-Za-z0-9+/=]+$";

static IMAGE_SRC: OnceLock<Option<Regex>> = OnceLock::new();

/// Splits a counter display name into a process name and a counter name.
///
/// For `\\SERVER\Process(w3wp)\Working Set` this returns
/// `("w3wp", "Working Set")`. Without an instance the category is used as the
/// process name. Names with fewer than three path parts return the display
/// name twice.
#[must_use]
pub fn split_counter_name(display_name: &str) -> (&str, &str) {
    let parts: Vec<&str> = display_name.split('\\').filter(|p| !p.is_empty()).collect();
    let [_, category, counter, ..] = parts[..] else {
        return (display_name, display_name);
    };

    let instance = category.find('(').and_then(|open| {
        let close = category.find(')')?;
        (close > open).then(|| &category[open + 1..close])
    });
    (instance.unwrap_or(category), counter)
}

/// Turns a chart payload into a `data:` URI.
///
/// Payloads that already start with `data:` are returned unchanged; anything
/// else is treated as base64 PNG.
#[must_use]
pub fn to_data_uri(chart: &str) -> Cow<'_, str> {
    if chart.starts_with("data:") {
        Cow::Borrowed(chart)
    } else {
        Cow::Owned(format!("{PNG_DATA_URI_PREFIX}{chart}"))
    }
}

/// Returns true if `src` is a base64 image `data:` URI safe to embed.
#[must_use]
pub fn is_valid_image_src(src: &str) -> bool {
    IMAGE_SRC
        .get_or_init(|| Regex::new(IMAGE_SRC_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(src))
}

/// Escapes text for use in HTML element content and attribute values.
#[must_use]
pub fn html_escape(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Escapes text for use inside a Markdown table cell.
pub(crate) fn markdown_cell(text: &str) -> Cow<'_, str> {
    if text.contains('|') {
        Cow::Owned(text.replace('|', "\\|"))
    } else {
        Cow::Borrowed(text)
    }
}
