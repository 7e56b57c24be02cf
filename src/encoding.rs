//! Character encoding detection and transcoding.
//!
//! Byte input is decoded before parsing: a byte order mark wins, then a
//! charset declared in the first kilobyte (`<meta charset>` or the
//! `http-equiv="Content-Type"` form), then UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// How much of the document is searched for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>;/]+)"#).expect("valid regex")
});

/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`
#[allow(clippy::expect_used)]
static HTTP_EQUIV_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?"#,
        r#"[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>;]+)"#,
    ))
    .expect("valid regex")
});

/// The charset label declared in the document head, if any.
#[must_use]
pub fn declared_charset(html: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    [&*META_CHARSET_RE, &*HTTP_EQUIV_CHARSET_RE]
        .iter()
        .find_map(|re| re.captures(&head).and_then(|c| c.get(1)))
        .map(|m| m.as_str().to_string())
}

/// Pick the encoding for `html`: BOM, declared charset, UTF-8.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }
    declared_charset(html)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a `String`.
///
/// Malformed sequences become U+FFFD instead of failing.
///
/// # Examples
///
/// ```
/// use rs_textextract::encoding::transcode_to_utf8;
///
/// let html = b"<html><body>Caf\xE9</body></html>";
/// assert!(transcode_to_utf8(html).contains("Caf"));
/// ```
#[must_use]
pub fn transcode_to_utf8(html: &[u8]) -> String {
    let encoding = detect_encoding(html);
    let (decoded, used, had_errors) = encoding.decode(html);
    if had_errors {
        log::debug!("malformed {} input; replacement characters inserted", used.name());
    }
    decoded.into_owned()
}
