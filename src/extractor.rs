//! Text extraction.
//!
//! [`DomTextExtractor`] ties the pieces together for one call: it resolves
//! the scope, walks every region once with a [`TextVisitor`] and returns the
//! trimmed text. The extractor holds only its configuration, so a single
//! instance can serve any number of calls, from any thread.

use std::collections::HashSet;

use log::{debug, trace};

use crate::dom::{Document, NodeData, NodeId};
use crate::error::{Error, Result};
use crate::exclusion::ExclusionTracker;
use crate::options::Options;
use crate::scope::{self, ElementSelector};
use crate::traversal::{self, NodeVisitor};
use crate::whitespace::{self, last_char_is_whitespace, TextAccumulator};

/// Turns a document, or part of it, into plain text.
pub trait TextExtractor {
    /// Extract the text below `root`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `root` is not part of `doc`; selector
    /// errors from `selector` are passed through.
    fn text(
        &self,
        doc: &mut Document,
        root: NodeId,
        selector: &dyn ElementSelector,
    ) -> Result<String>;
}

/// Extractor configured with scope patterns, excluded tags and a size cap.
///
/// # Example
///
/// ```rust
/// use rs_textextract::{dom, DomTextExtractor, Options, TextExtractor};
///
/// let options = Options {
///     exclude_tags: vec!["SCRIPT".into()],
///     ..Options::default()
/// };
/// let extractor = DomTextExtractor::new(&options);
///
/// let mut parsed = dom::parse("<div>Keep<script>drop()</script>More</div>");
/// let root = parsed.document.root();
/// let text = extractor.text(&mut parsed.document, root, &parsed.selector)?;
/// assert_eq!(text, "Keep More");
/// # Ok::<(), rs_textextract::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DomTextExtractor {
    include_patterns: Vec<String>,
    excluded_tags: HashSet<String>,
    no_text: bool,
    max_text_size: Option<usize>,
}

impl DomTextExtractor {
    /// Build an extractor; excluded tag names are case-folded here.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            include_patterns: options.include_patterns.clone(),
            excluded_tags: options
                .exclude_tags
                .iter()
                .map(|tag| tag.trim().to_lowercase())
                .collect(),
            no_text: options.no_text,
            max_text_size: options.max_text_limit(),
        }
    }

    #[must_use]
    pub fn include_patterns(&self) -> &[String] {
        &self.include_patterns
    }

    #[must_use]
    pub fn excluded_tags(&self) -> &HashSet<String> {
        &self.excluded_tags
    }

    /// Walk one region, appending to `accum`.
    fn collect(
        &self,
        doc: &mut Document,
        region: NodeId,
        accum: &mut TextAccumulator,
    ) -> Result<()> {
        let mut visitor = TextVisitor::new(accum, &self.excluded_tags);
        traversal::traverse(doc, region, &mut visitor)
    }
}

impl Default for DomTextExtractor {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

impl TextExtractor for DomTextExtractor {
    fn text(
        &self,
        doc: &mut Document,
        root: NodeId,
        selector: &dyn ElementSelector,
    ) -> Result<String> {
        if self.no_text {
            return Ok(String::new());
        }

        let Some(data) = doc.data(root) else {
            return Err(Error::InvalidArgument(format!(
                "root node {root} is not part of the document"
            )));
        };
        if !matches!(data, NodeData::Element(_) | NodeData::Document) {
            debug!("root {root} is neither an element nor a document; no text");
            return Ok(String::new());
        }

        let mut accum = TextAccumulator::with_limit(self.max_text_size);

        if self.include_patterns.is_empty() && self.excluded_tags.is_empty() {
            self.collect(doc, root, &mut accum)?;
        } else {
            for region in scope::resolve(doc, root, &self.include_patterns, selector)? {
                self.collect(doc, region, &mut accum)?;
                accum.push('\n');
            }
        }

        if accum.is_full() {
            debug!("text capped at {} chars", accum.char_count());
        }
        Ok(whitespace::trim_edges(accum.as_str()).to_string())
    }
}

/// Per-region traversal context: the shared accumulator, this walk's
/// exclusion state and the excluded tag set.
pub struct TextVisitor<'a> {
    accum: &'a mut TextAccumulator,
    exclusion: ExclusionTracker,
    excluded_tags: &'a HashSet<String>,
}

impl<'a> TextVisitor<'a> {
    pub fn new(accum: &'a mut TextAccumulator, excluded_tags: &'a HashSet<String>) -> Self {
        Self {
            accum,
            exclusion: ExclusionTracker::new(),
            excluded_tags,
        }
    }

    fn append_space(&mut self) {
        if !last_char_is_whitespace(self.accum) {
            self.accum.push(' ');
        }
    }
}

impl NodeVisitor for TextVisitor<'_> {
    fn head(&mut self, doc: &mut Document, node: NodeId, _depth: usize) {
        match doc.data(node) {
            Some(NodeData::Text(_) | NodeData::CData(_)) => {
                if !self.exclusion.is_active() {
                    whitespace::append_text(doc, self.accum, node);
                }
            }
            Some(NodeData::Element(element)) => {
                let tag = element.tag();
                if self.exclusion.enter(node, tag, self.excluded_tags) {
                    trace!("excluding <{}> at {node}", tag.name());
                }
                if !self.accum.is_empty() && (tag.is_block() || tag.is_line_break()) {
                    self.append_space();
                }
            }
            _ => {}
        }
    }

    fn tail(&mut self, doc: &mut Document, node: NodeId, _depth: usize) {
        let Some(element) = doc.element(node) else {
            return;
        };
        self.exclusion.exit(node);

        // <div>One</div>Two reads "One Two"
        let text_follows = doc
            .next_sibling(node)
            .is_some_and(|next| doc.is_text_like(next));
        if element.tag().is_block() && text_follows {
            self.append_space();
        }
    }

    fn halted(&self) -> bool {
        self.accum.is_full()
    }
}
