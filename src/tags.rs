//! Tag catalog.
//!
//! Intrinsic rendering properties of HTML tags: whether a tag is block-level
//! (implies a visual line break around it) and whether its text must keep its
//! whitespace. Provides both arrays (for iteration) and `HashSets` (for O(1)
//! lookup).

use std::collections::HashSet;
use std::sync::LazyLock;

/// The line break tag.
pub const LINE_BREAK_TAG: &str = "br";

/// Block-level tags.
pub static BLOCK_TAGS: [&str; 68] = [
    // document structure
    "html", "head", "body", "frameset", "script", "noscript", "style", "meta", "link",
    "title", "frame", "noframes",
    // sectioning
    "section", "nav", "aside", "hgroup", "header", "footer", "article", "main",
    "address", "center", "details", "menu", "dir",
    // text blocks
    "p", "h1", "h2", "h3", "h4", "h5", "h6", "pre", "div", "blockquote", "hr",
    "figure", "figcaption", "plaintext", "listing", "ins", "del",
    // lists
    "ul", "ol", "dl", "dt", "dd", "li",
    // forms
    "form", "fieldset",
    // tables
    "table", "caption", "thead", "tfoot", "tbody", "colgroup", "col", "tr", "th", "td",
    // embedded
    "video", "audio", "canvas", "svg", "math", "applet", "marquee", "template",
];

/// `BLOCK_TAGS` as a `HashSet`
pub static BLOCK_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    BLOCK_TAGS.into_iter().collect()
});

/// Tags whose text is emitted verbatim.
pub static PRESERVE_WHITESPACE_TAGS: [&str; 4] = ["pre", "plaintext", "title", "textarea"];

/// `PRESERVE_WHITESPACE_TAGS` as a `HashSet`
pub static PRESERVE_WHITESPACE_TAG_SET: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    PRESERVE_WHITESPACE_TAGS.into_iter().collect()
});

/// A tag name together with its intrinsic properties.
///
/// Names are case-folded on construction, so `Tag::value_of("DIV")` and
/// `Tag::value_of("div")` are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    name: String,
    block: bool,
    preserve_whitespace: bool,
}

impl Tag {
    /// Look up a tag by name. Unknown tags are inline and collapse whitespace.
    #[must_use]
    pub fn value_of(name: &str) -> Self {
        let name = name.trim().to_lowercase();
        let block = BLOCK_TAG_SET.contains(name.as_str());
        let preserve_whitespace = PRESERVE_WHITESPACE_TAG_SET.contains(name.as_str());
        Self {
            name,
            block,
            preserve_whitespace,
        }
    }

    /// Lower-cased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the tag is rendered as a block.
    #[must_use]
    pub fn is_block(&self) -> bool {
        self.block
    }

    /// Whether text inside the tag keeps its whitespace.
    #[must_use]
    pub fn preserves_whitespace(&self) -> bool {
        self.preserve_whitespace
    }

    /// Whether this is the `<br>` tag.
    #[must_use]
    pub fn is_line_break(&self) -> bool {
        self.name == LINE_BREAK_TAG
    }
}
