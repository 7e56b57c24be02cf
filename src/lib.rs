//! # rs-textextract
//!
//! Plain text extraction from HTML documents.
//!
//! The document is walked once, depth first and without recursion, while
//! whitespace is collapsed and block boundaries become single spaces. The walk
//! can be scoped to the first matching selector pattern, can skip whole
//! subtrees by tag name, and stops early once a size cap is reached.
//!
//! ## Quick Start
//!
//! ```rust
//! use rs_textextract::{extract_text, Options};
//!
//! let html = "<html><body><div>One</div>Two<script>ignored()</script></body></html>";
//! let options = Options {
//!     exclude_tags: vec!["script".into()],
//!     ..Options::default()
//! };
//!
//! assert_eq!(extract_text(html, &options)?, "One Two");
//! # Ok::<(), rs_textextract::Error>(())
//! ```
//!
//! ## Working on a tree
//!
//! [`dom::parse`] gives the arena tree plus a CSS selector service for it;
//! [`DomTextExtractor`] runs on any [`dom::Document`], including hand-built
//! ones, with any [`ElementSelector`].

mod error;
mod options;

/// Arena document tree and HTML parsing.
pub mod dom;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Exclusion of subtrees by tag name.
pub mod exclusion;

/// Extraction orchestration.
pub mod extractor;

/// Scope resolution and selector services.
pub mod scope;

/// Tag catalog (block-level and preserve-whitespace tags).
pub mod tags;

/// Mutation-tolerant depth-first traversal.
pub mod traversal;

/// Whitespace normalization and the text accumulator.
pub mod whitespace;

// Public API - re-exports
pub use error::{Error, Result};
pub use extractor::{DomTextExtractor, TextExtractor};
pub use options::{
    Options, EXCLUDE_TAGS_KEY, INCLUDE_PATTERNS_KEY, MAX_TEXT_SIZE_KEY, NO_TEXT_KEY,
};
pub use scope::{CssSelector, ElementSelector, NoSelector};

/// Extracts the text of an HTML document.
///
/// Include patterns are CSS selectors.
///
/// # Errors
///
/// Returns [`Error::Selector`] if an include pattern is not valid CSS.
///
/// # Example
///
/// ```rust
/// use rs_textextract::{extract_text, Options};
///
/// let options = Options {
///     include_patterns: vec!["ARTICLE".into()],
///     ..Options::default()
/// };
/// let text = extract_text("<nav>Menu</nav><article><p>Body</p></article>", &options)?;
/// assert_eq!(text, "Body");
/// # Ok::<(), rs_textextract::Error>(())
/// ```
pub fn extract_text(html: &str, options: &Options) -> Result<String> {
    let dom::ParsedHtml { mut document, selector } = dom::parse(html);
    let root = document.root();
    DomTextExtractor::new(options).text(&mut document, root, &selector)
}

/// Extracts the text of an HTML document given as bytes, detecting its
/// character encoding first.
///
/// # Errors
///
/// Same as [`extract_text`].
///
/// # Example
///
/// ```rust
/// use rs_textextract::{extract_text_bytes, Options};
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// assert_eq!(extract_text_bytes(html, &Options::default())?, "Café");
/// # Ok::<(), rs_textextract::Error>(())
/// ```
pub fn extract_text_bytes(html: &[u8], options: &Options) -> Result<String> {
    extract_text(&encoding::transcode_to_utf8(html), options)
}
