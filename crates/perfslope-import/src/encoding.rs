//! Text encoding detection for PDH-CSV exports.

use std::borrow::Cow;

use encoding_rs::{Encoding, SHIFT_JIS, UTF_8};

/// UTF-8 byte-order mark.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Text encoding of an export.
///
/// Performance Monitor writes UTF-8 with a BOM or the system ANSI code page,
/// which for the supported locale is Shift-JIS. BOM-less UTF-8 does not occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8, announced by a BOM.
    Utf8,
    /// Shift-JIS (code page 932).
    ShiftJis,
}

impl TextEncoding {
    /// Picks the encoding from the first bytes of the input.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(&UTF8_BOM) {
            Self::Utf8
        } else {
            Self::ShiftJis
        }
    }

    /// Returns the encoding name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::ShiftJis => "shift_jis",
        }
    }

    const fn encoding(self) -> &'static Encoding {
        match self {
            Self::Utf8 => UTF_8,
            Self::ShiftJis => SHIFT_JIS,
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decodes raw export bytes to text.
///
/// The BOM is stripped from UTF-8 input. Malformed byte sequences are
/// replaced with U+FFFD rather than failing.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, TextEncoding) {
    let encoding = TextEncoding::detect(bytes);
    let body = match encoding {
        TextEncoding::Utf8 => &bytes[UTF8_BOM.len()..],
        TextEncoding::ShiftJis => bytes,
    };

    let (text, had_errors) = encoding.encoding().decode_without_bom_handling(body);
    if had_errors {
        tracing::debug!(%encoding, "input contained undecodable bytes, replaced");
    }

    (text, encoding)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_bom() {
        assert_eq!(TextEncoding::detect(&[0xEF, 0xBB, 0xBF, b'a']), TextEncoding::Utf8);
        assert_eq!(TextEncoding::detect(b"abc"), TextEncoding::ShiftJis);
        assert_eq!(TextEncoding::detect(&[0xEF, 0xBB]), TextEncoding::ShiftJis);
        assert_eq!(TextEncoding::detect(&[]), TextEncoding::ShiftJis);
    }

    #[test]
    fn test_decode_utf8_strips_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("\"メモリ\"".as_bytes());

        let (text, encoding) = decode_text(&bytes);
        assert_eq!(encoding, TextEncoding::Utf8);
        assert_eq!(text, "\"メモリ\"");
    }

    #[test]
    fn test_decode_shift_jis() {
        let (bytes, _, _) = SHIFT_JIS.encode("\\\\SERVER\\メモリ\\使用可能バイト");

        let (text, encoding) = decode_text(&bytes);
        assert_eq!(encoding, TextEncoding::ShiftJis);
        assert_eq!(text, "\\\\SERVER\\メモリ\\使用可能バイト");
    }

    #[test]
    fn test_bomless_utf8_is_read_as_shift_jis() {
        let (text, encoding) = decode_text("メモリ".as_bytes());
        assert_eq!(encoding, TextEncoding::ShiftJis);
        assert_ne!(text, "メモリ");
    }
}
