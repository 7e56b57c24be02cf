//! Scope resolution.
//!
//! Extraction can be restricted to a region of the document with an ordered
//! list of selector patterns. The first pattern that matches anything wins;
//! later patterns are not tried. Without patterns, or when none matches, the
//! whole root is used.

use std::collections::HashMap;

use dom_query::Matcher;
use log::debug;

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};

/// A selector matching service.
pub trait ElementSelector {
    /// Elements at or below `root` matching `pattern`, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Selector`] if `pattern` is malformed.
    fn select(&self, doc: &Document, root: NodeId, pattern: &str) -> Result<Vec<NodeId>>;
}

impl<F> ElementSelector for F
where
    F: Fn(&Document, NodeId, &str) -> Result<Vec<NodeId>>,
{
    fn select(&self, doc: &Document, root: NodeId, pattern: &str) -> Result<Vec<NodeId>> {
        self(doc, root, pattern)
    }
}

/// Selector service that never matches; scoping always falls back to the root.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelector;

impl ElementSelector for NoSelector {
    fn select(&self, _doc: &Document, _root: NodeId, _pattern: &str) -> Result<Vec<NodeId>> {
        Ok(Vec::new())
    }
}

/// CSS selector matching backed by `dom_query`.
///
/// Patterns are evaluated against the HTML the [`Document`] was parsed from
/// and matches are mapped back to arena ids. Only meaningful for the document
/// produced by the same [`crate::dom::parse`] call.
pub struct CssSelector {
    source: dom_query::Document,
    ids: HashMap<dom_query::NodeId, NodeId>,
}

impl CssSelector {
    pub(crate) fn new(
        source: dom_query::Document,
        ids: HashMap<dom_query::NodeId, NodeId>,
    ) -> Self {
        Self { source, ids }
    }
}

impl ElementSelector for CssSelector {
    fn select(&self, doc: &Document, root: NodeId, pattern: &str) -> Result<Vec<NodeId>> {
        let matcher = Matcher::new(pattern).map_err(|err| Error::Selector {
            pattern: pattern.to_string(),
            reason: format!("{err:?}"),
        })?;

        let matches = self.source.select_matcher(&matcher);
        Ok(matches
            .nodes()
            .iter()
            .filter_map(|node| self.ids.get(&node.id).copied())
            .filter(|id| doc.is_element(*id) && doc.is_inclusive_ancestor(root, *id))
            .collect())
    }
}

/// Regions of `root` to extract from: the matches of the first pattern that
/// matches anything, else `[root]`.
///
/// # Errors
///
/// Selector errors are returned as is; a malformed pattern never falls back
/// to the whole document.
pub fn resolve(
    doc: &Document,
    root: NodeId,
    patterns: &[String],
    selector: &dyn ElementSelector,
) -> Result<Vec<NodeId>> {
    for pattern in patterns {
        let matches = selector.select(doc, root, pattern)?;
        if !matches.is_empty() {
            debug!("scope pattern '{pattern}' matched {} element(s)", matches.len());
            return Ok(matches);
        }
    }

    if !patterns.is_empty() {
        debug!("no scope pattern matched; using the whole document");
    }
    Ok(vec![root])
}
