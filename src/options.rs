//! Configuration options for text extraction.
//!
//! The `Options` struct is built once and handed to the extractor, which never
//! changes it afterwards. Besides plain struct construction it can be
//! deserialized from a crawler-style configuration map, where the keys are
//! dotted names such as `textextractor.include.pattern`.

use serde::{Deserialize, Deserializer};

use crate::error::Result;

/// Conf key for [`Options::max_text_size`].
pub const MAX_TEXT_SIZE_KEY: &str = "textextractor.skip.after";

/// Conf key for [`Options::no_text`].
pub const NO_TEXT_KEY: &str = "textextractor.no.text";

/// Conf key for [`Options::include_patterns`].
pub const INCLUDE_PATTERNS_KEY: &str = "textextractor.include.pattern";

/// Conf key for [`Options::exclude_tags`].
pub const EXCLUDE_TAGS_KEY: &str = "textextractor.exclude.tags";

/// Configuration options for text extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings: whole document, nothing excluded, no size cap.
///
/// # Example
///
/// ```rust
/// use rs_textextract::Options;
///
/// let options = Options {
///     include_patterns: vec!["DIV[itemprop=\"articleBody\"]".into(), "ARTICLE".into()],
///     exclude_tags: vec!["STYLE".into(), "SCRIPT".into()],
///     ..Options::default()
/// };
/// assert_eq!(options.max_text_limit(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Hard cap on the number of characters produced.
    ///
    /// Zero or negative means unbounded.
    ///
    /// Default: `-1`
    #[serde(rename = "textextractor.skip.after", alias = "max-text-size")]
    pub max_text_size: i64,

    /// Skip text extraction entirely; every call yields an empty string.
    ///
    /// Default: `false`
    #[serde(rename = "textextractor.no.text", alias = "no-text")]
    pub no_text: bool,

    /// Selector patterns tried in order; the first one matching anything
    /// scopes the extraction. Empty means the whole document.
    ///
    /// Default: empty
    #[serde(
        rename = "textextractor.include.pattern",
        alias = "include-patterns",
        deserialize_with = "one_or_many"
    )]
    pub include_patterns: Vec<String>,

    /// Tag names whose whole subtree is left out of the text.
    /// Matched case-insensitively.
    ///
    /// Default: empty
    #[serde(
        rename = "textextractor.exclude.tags",
        alias = "exclude-tags",
        deserialize_with = "one_or_many"
    )]
    pub exclude_tags: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_text_size: -1,
            no_text: false,
            include_patterns: Vec::new(),
            exclude_tags: Vec::new(),
        }
    }
}

impl Options {
    /// Build options from a JSON configuration document.
    ///
    /// Keys other than the `textextractor.*` ones are ignored, so a complete
    /// crawler configuration can be passed as is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the JSON is malformed
    /// or a known key has the wrong type.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build options from an already parsed configuration value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if a known key has the
    /// wrong type.
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }

    /// The size cap in characters, or `None` when unbounded.
    #[must_use]
    pub fn max_text_limit(&self) -> Option<usize> {
        usize::try_from(self.max_text_size).ok().filter(|limit| *limit > 0)
    }
}

/// Accepts a single string, a list of strings, or null.
fn one_or_many<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(value)) => vec![value],
        Some(OneOrMany::Many(values)) => values,
    })
}
