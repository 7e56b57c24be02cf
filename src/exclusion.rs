//! Exclusion tracking.
//!
//! A single slot remembers the outermost element whose tag is excluded. While
//! the slot is occupied no text is emitted. Excluded tags nested inside an
//! already excluded region leave the slot alone, so the region ends exactly
//! when its outermost element is exited.

use std::collections::HashSet;

use crate::dom::NodeId;
use crate::tags::Tag;

/// Tracks the current exclusion root, if any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExclusionTracker {
    excluded: Option<NodeId>,
}

impl ExclusionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Called when entering an element. Starts an exclusion region if none is
    /// active and the tag is in `excluded_tags` (lower-case names).
    ///
    /// Returns whether a region was started.
    pub fn enter(&mut self, element: NodeId, tag: &Tag, excluded_tags: &HashSet<String>) -> bool {
        if self.excluded.is_none() && excluded_tags.contains(tag.name()) {
            self.excluded = Some(element);
            return true;
        }
        false
    }

    /// Called when exiting an element. Ends the region if `element` is its
    /// root. Returns whether the region ended.
    pub fn exit(&mut self, element: NodeId) -> bool {
        if self.excluded == Some(element) {
            self.excluded = None;
            return true;
        }
        false
    }

    /// Whether text is currently suppressed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.excluded.is_some()
    }

    /// The current exclusion root.
    #[must_use]
    pub fn excluded_root(&self) -> Option<NodeId> {
        self.excluded
    }
}
