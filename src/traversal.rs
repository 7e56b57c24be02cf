//! Mutation-tolerant depth-first traversal.
//!
//! [`traverse`] walks a subtree in document order without recursion, calling
//! [`NodeVisitor::head`] when a node is entered and [`NodeVisitor::tail`] when
//! it is left. A `head` hook may detach or replace the node it was handed; the
//! walk then resynchronizes from what it recorded before the hook ran (parent,
//! parent's child count, sibling index, next sibling):
//!
//! - same child count: the node was replaced, the walk continues into the node
//!   now sitting at the recorded index;
//! - fewer children: the node was removed, its `tail` is skipped and the walk
//!   moves to the recorded next sibling, or finishes the parent.
//!
//! Hooks must only touch the node they were handed (or its already visited
//! descendants); ancestors of nodes still to be visited stay as they were.

use log::trace;

use crate::dom::{Document, NodeId};
use crate::error::{Error, Result};

/// Enter/exit callbacks for [`traverse`].
pub trait NodeVisitor {
    /// Called when `node` is entered, before its children.
    fn head(&mut self, doc: &mut Document, node: NodeId, depth: usize);

    /// Called when `node` is left, after its children.
    fn tail(&mut self, doc: &mut Document, node: NodeId, depth: usize);

    /// Checked before each node is entered; returning true ends the walk.
    fn halted(&self) -> bool {
        false
    }
}

/// A [`NodeVisitor`] made of two closures.
pub struct FnVisitor<H, T> {
    head: H,
    tail: T,
}

impl<H, T> FnVisitor<H, T>
where
    H: FnMut(&mut Document, NodeId, usize),
    T: FnMut(&mut Document, NodeId, usize),
{
    pub fn new(head: H, tail: T) -> Self {
        Self { head, tail }
    }
}

impl<H, T> NodeVisitor for FnVisitor<H, T>
where
    H: FnMut(&mut Document, NodeId, usize),
    T: FnMut(&mut Document, NodeId, usize),
{
    fn head(&mut self, doc: &mut Document, node: NodeId, depth: usize) {
        (self.head)(doc, node, depth);
    }

    fn tail(&mut self, doc: &mut Document, node: NodeId, depth: usize) {
        (self.tail)(doc, node, depth);
    }
}

/// Where a node sat before its `head` hook ran.
struct Slot {
    parent: NodeId,
    child_count: usize,
    index: usize,
    next: Option<NodeId>,
}

impl Slot {
    fn record(doc: &Document, node: NodeId) -> Option<Self> {
        let parent = doc.parent(node)?;
        Some(Self {
            parent,
            child_count: doc.child_count(parent),
            index: doc.sibling_index(node)?,
            next: doc.next_sibling(node),
        })
    }
}

/// Walk `root` and its descendants depth-first.
///
/// If the root itself is replaced by its `head` hook the replacement is walked
/// instead; if it is removed the walk ends.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if `root` is not part of `doc`.
pub fn traverse<V>(doc: &mut Document, root: NodeId, visitor: &mut V) -> Result<()>
where
    V: NodeVisitor + ?Sized,
{
    if !doc.contains(root) {
        return Err(Error::InvalidArgument(format!("root node {root} is not part of the document")));
    }

    let mut root = root;
    let mut node = root;
    let mut depth = 0usize;

    loop {
        if visitor.halted() {
            trace!("traversal halted by visitor at {node}");
            return Ok(());
        }

        let slot = Slot::record(doc, node);
        visitor.head(doc, node, depth);

        if let Some(slot) = slot {
            if doc.parent(node) != Some(slot.parent) {
                if doc.child_count(slot.parent) == slot.child_count {
                    let Some(replacement) = doc.child(slot.parent, slot.index) else {
                        return Ok(());
                    };
                    trace!("{node} replaced by {replacement}");
                    if node == root {
                        root = replacement;
                    }
                    node = replacement;
                } else {
                    trace!("{node} removed");
                    if node == root {
                        return Ok(());
                    }
                    if let Some(next) = slot.next {
                        node = next;
                        continue;
                    }
                    // removed the last child: its parent is done
                    match ascend(doc, visitor, root, slot.parent, depth.saturating_sub(1)) {
                        Some((next, next_depth)) => {
                            node = next;
                            depth = next_depth;
                            continue;
                        }
                        None => return Ok(()),
                    }
                }
            }
        }

        if let Some(first) = doc.first_child(node) {
            node = first;
            depth += 1;
            continue;
        }

        match ascend(doc, visitor, root, node, depth) {
            Some((next, next_depth)) => {
                node = next;
                depth = next_depth;
            }
            None => return Ok(()),
        }
    }
}

/// Leave `node` and every ancestor that has no further sibling, firing their
/// tails. Returns the sibling to continue with, or `None` once the root has
/// been left.
fn ascend<V>(
    doc: &mut Document,
    visitor: &mut V,
    root: NodeId,
    mut node: NodeId,
    mut depth: usize,
) -> Option<(NodeId, usize)>
where
    V: NodeVisitor + ?Sized,
{
    loop {
        // links are read before the tail, which may detach its node
        let next = doc.next_sibling(node);
        let parent = doc.parent(node);

        if next.is_none() && depth > 0 {
            visitor.tail(doc, node, depth);
            node = parent?;
            depth -= 1;
            continue;
        }

        visitor.tail(doc, node, depth);
        if node == root {
            return None;
        }
        return next.map(|next| (next, depth));
    }
}
