//! Arena document tree.
//!
//! Nodes live in a `Vec` and are addressed by [`NodeId`]. A parent lists its
//! children by id and every node keeps a lookup-only link to its parent.
//! Detaching a node clears that link but keeps the node in the arena, so ids
//! are never reused and stay comparable for the lifetime of the document.
//! Every attached node also knows its position among its siblings, so sibling
//! lookups do not scan the parent's child list.
//!
//! HTML parsing is delegated to `dom_query`; [`parse`] walks the parsed tree
//! once and copies it into the arena.

use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};
use crate::scope::CssSelector;
use crate::tags::Tag;

/// Index of a node inside its [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element: tag plus attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: Tag,
    attrs: Vec<(String, String)>,
}

impl Element {
    /// Create an element without attributes.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            tag: Tag::value_of(name),
            attrs: Vec::new(),
        }
    }

    /// The element's tag.
    #[must_use]
    pub fn tag(&self) -> &Tag {
        &self.tag
    }

    /// Lower-cased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.tag.name()
    }

    /// Attribute value by (case-sensitive) name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set or overwrite an attribute.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        match self.attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => value.clone_into(existing),
            None => self.attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// All attributes in source order.
    #[must_use]
    pub fn attrs(&self) -> &[(String, String)] {
        &self.attrs
    }
}

/// Node payload, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document node at the top of the tree.
    Document,
    /// `<!DOCTYPE name>`
    Doctype(String),
    /// An element.
    Element(Element),
    /// Character data.
    Text(String),
    /// A `<![CDATA[...]]>` section; its content is never normalized.
    CData(String),
    /// A comment; never part of the extracted text.
    Comment(String),
}

impl NodeData {
    /// The element payload, if this is an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Whether this is a Text or CData node.
    #[must_use]
    pub fn is_text_like(&self) -> bool {
        matches!(self, Self::Text(_) | Self::CData(_))
    }
}

#[derive(Debug, Clone)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    /// Position in the parent's child list; stale while detached.
    index: usize,
    children: Vec<NodeId>,
}

impl Node {
    fn new(data: NodeData) -> Self {
        Self {
            data,
            parent: None,
            index: 0,
            children: Vec::new(),
        }
    }
}

/// A mutable document tree.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document holding only its document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            root: NodeId(0),
        }
    }

    /// The document node.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of nodes ever created, attached or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: a document holds at least its document node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` belongs to this document.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn checked(&self, id: NodeId) -> Result<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!("node {id} is not part of this document")))
        }
    }

    // === Node Information ===

    /// Payload of a node.
    #[must_use]
    pub fn data(&self, id: NodeId) -> Option<&NodeData> {
        self.node(id).map(|node| &node.data)
    }

    /// Element payload of a node, if it is an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        self.data(id).and_then(NodeData::as_element)
    }

    /// Mutable element payload, e.g. to set attributes.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match self.nodes.get_mut(id.0).map(|node| &mut node.data) {
            Some(NodeData::Element(element)) => Some(element),
            _ => None,
        }
    }

    /// Whether a node is an element.
    #[must_use]
    pub fn is_element(&self, id: NodeId) -> bool {
        self.element(id).is_some()
    }

    /// Whether a node is a Text or CData node.
    #[must_use]
    pub fn is_text_like(&self, id: NodeId) -> bool {
        self.data(id).is_some_and(NodeData::is_text_like)
    }

    // === Tree Navigation ===

    /// Parent of a node; `None` for the document node and detached nodes.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Number of children.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Child at `index`.
    #[must_use]
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// First child.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.child(id, 0)
    }

    /// Position of a node among its parent's children.
    #[must_use]
    pub fn sibling_index(&self, id: NodeId) -> Option<usize> {
        let node = self.node(id)?;
        node.parent.map(|_| node.index)
    }

    /// Following sibling.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.sibling_index(id)?;
        self.child(parent, index + 1)
    }

    /// Preceding sibling.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let index = self.sibling_index(id)?;
        index.checked_sub(1).and_then(|prev| self.child(parent, prev))
    }

    /// Whether `ancestor` is `node` itself or one of its ancestors.
    #[must_use]
    pub fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// All text below a node, unnormalized, in document order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.data(current) {
                Some(NodeData::Text(content) | NodeData::CData(content)) => text.push_str(content),
                _ => stack.extend(self.children(current).iter().rev()),
            }
        }
        text
    }

    // === Construction ===

    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(name)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_string()))
    }

    /// Create a detached CDATA node.
    pub fn create_cdata(&mut self, text: &str) -> NodeId {
        self.push(NodeData::CData(text.to_string()))
    }

    /// Create a detached comment.
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Comment(text.to_string()))
    }

    /// Create a detached doctype node.
    pub fn create_doctype(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Doctype(name.to_string()))
    }

    // === Tree Manipulation ===

    fn ensure_insertable(&self, parent: NodeId, child: NodeId) -> Result<()> {
        self.checked(parent)?;
        self.checked(child)?;
        if child == self.root {
            return Err(Error::InvalidArgument("the document node cannot be moved".into()));
        }
        if self.is_inclusive_ancestor(child, parent) {
            return Err(Error::InvalidArgument(format!(
                "cannot insert {child} below its own descendant {parent}"
            )));
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, detaching it first.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArgument`] for unknown ids, for moving the
    /// document node, or when `parent` lies inside `child`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.ensure_insertable(parent, child)?;
        self.detach(child);
        self.attach_last(parent, child);
        Ok(())
    }

    /// Link a detached node as the last child of `parent`, without checks.
    fn attach_last(&mut self, parent: NodeId, child: NodeId) {
        let index = self.nodes[parent.0].children.len();
        self.nodes[parent.0].children.push(child);
        let node = &mut self.nodes[child.0];
        node.parent = Some(parent);
        node.index = index;
    }

    /// Remove a node from its parent. The node and its subtree stay in the
    /// arena and can be re-inserted. Returns whether anything was detached.
    pub fn detach(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };
        let index = self.nodes[id.0].index;
        self.nodes[parent.0].children.remove(index);
        for position in index..self.nodes[parent.0].children.len() {
            let sibling = self.nodes[parent.0].children[position];
            self.nodes[sibling.0].index = position;
        }
        self.nodes[id.0].parent = None;
        true
    }

    /// Put `replacement` in the place of `old`, which ends up detached.
    ///
    /// The parent's child count is unchanged and `replacement` takes `old`'s
    /// sibling index.
    ///
    /// # Errors
    ///
    /// Fails with [`Error::InvalidArgument`] for unknown ids, when `old` is
    /// detached, or when `replacement` contains `old`'s parent.
    pub fn replace(&mut self, old: NodeId, replacement: NodeId) -> Result<()> {
        self.checked(old)?;
        if old == replacement {
            return Ok(());
        }
        let parent = self
            .parent(old)
            .ok_or_else(|| Error::InvalidArgument(format!("node {old} has no parent")))?;
        self.ensure_insertable(parent, replacement)?;
        self.detach(replacement);
        let index = self
            .sibling_index(old)
            .ok_or_else(|| Error::InvalidArgument(format!("node {old} has no parent")))?;
        self.nodes[parent.0].children[index] = replacement;
        let node = &mut self.nodes[replacement.0];
        node.parent = Some(parent);
        node.index = index;
        self.nodes[old.0].parent = None;
        Ok(())
    }
}

/// Result of parsing HTML: the arena tree plus a CSS selector service bound
/// to the same document.
pub struct ParsedHtml {
    /// The document tree.
    pub document: Document,
    /// CSS selector matching for `document`.
    pub selector: CssSelector,
}

/// Parse an HTML string.
///
/// The result always has the usual `html`/`head`/`body` skeleton, as produced
/// by the html5ever tree builder behind `dom_query`.
#[must_use]
pub fn parse(html: &str) -> ParsedHtml {
    let source = dom_query::Document::from(html);
    let (document, ids) = copy_tree(&source);
    ParsedHtml {
        document,
        selector: CssSelector::new(source, ids),
    }
}

/// Copy the `dom_query` tree into a fresh arena, remembering which arena id
/// each source node became.
fn copy_tree(source: &dom_query::Document) -> (Document, HashMap<dom_query::NodeId, NodeId>) {
    let mut document = Document::new();
    let mut ids = HashMap::new();

    let source_root = source.root();
    ids.insert(source_root.id, document.root());

    let mut pending = vec![(source_root, document.root())];
    while let Some((source_node, parent)) = pending.pop() {
        for child in source_node.children() {
            let Some(data) = copy_node(&child) else {
                continue;
            };
            let id = document.push(data);
            document.attach_last(parent, id);
            ids.insert(child.id, id);
            pending.push((child, id));
        }
    }

    (document, ids)
}

fn copy_node(node: &dom_query::NodeRef<'_>) -> Option<NodeData> {
    if node.is_element() {
        let name = node.node_name()?;
        let mut element = Element::new(&name);
        for attr in node.attrs().iter() {
            element.set_attr(&attr.name.local, &attr.value);
        }
        Some(NodeData::Element(element))
    } else if node.is_text() {
        Some(NodeData::Text(node.text().to_string()))
    } else {
        // comments, doctype and processing instructions carry no text
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, NodeId, [NodeId; 3]) {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let a = doc.create_text("a");
        let b = doc.create_element("span");
        let c = doc.create_text("c");
        doc.append_child(doc.root(), div).unwrap();
        for child in [a, b, c] {
            doc.append_child(div, child).unwrap();
        }
        (doc, div, [a, b, c])
    }

    #[test]
    fn test_navigation() {
        let (doc, div, [a, b, c]) = sample();

        assert_eq!(doc.parent(a), Some(div));
        assert_eq!(doc.children(div), &[a, b, c]);
        assert_eq!(doc.first_child(div), Some(a));
        assert_eq!(doc.next_sibling(a), Some(b));
        assert_eq!(doc.next_sibling(c), None);
        assert_eq!(doc.prev_sibling(b), Some(a));
        assert_eq!(doc.prev_sibling(a), None);
        assert_eq!(doc.sibling_index(c), Some(2));
        assert_eq!(doc.parent(doc.root()), None);
    }

    #[test]
    fn test_detach_keeps_node_in_arena() {
        let (mut doc, div, [a, b, c]) = sample();

        assert!(doc.detach(b));
        assert_eq!(doc.children(div), &[a, c]);
        assert_eq!(doc.parent(b), None);
        assert!(doc.contains(b));
        assert!(!doc.detach(b), "second detach is a no-op");
    }

    #[test]
    fn test_replace_keeps_index_and_count() {
        let (mut doc, div, [a, b, c]) = sample();
        let p = doc.create_element("p");

        doc.replace(b, p).unwrap();

        assert_eq!(doc.children(div), &[a, p, c]);
        assert_eq!(doc.parent(p), Some(div));
        assert_eq!(doc.parent(b), None);
    }

    #[test]
    fn test_replace_with_attached_node_moves_it() {
        let (mut doc, div, [a, b, c]) = sample();

        doc.replace(a, c).unwrap();

        assert_eq!(doc.children(div), &[c, b]);
        assert_eq!(doc.parent(a), None);
    }

    #[test]
    fn test_sibling_positions_follow_mutations() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        doc.append_child(doc.root(), div).unwrap();
        let items: Vec<NodeId> = (0..6)
            .map(|i| {
                let item = doc.create_text(&i.to_string());
                doc.append_child(div, item).unwrap();
                item
            })
            .collect();

        doc.detach(items[1]);
        doc.replace(items[3], items[5]).unwrap();
        doc.append_child(div, items[1]).unwrap();

        assert_eq!(doc.children(div), &[items[0], items[2], items[5], items[4], items[1]]);
        for (position, child) in doc.children(div).iter().enumerate() {
            assert_eq!(doc.sibling_index(*child), Some(position));
        }
        assert_eq!(doc.next_sibling(items[4]), Some(items[1]));
        assert_eq!(doc.prev_sibling(items[5]), Some(items[2]));
        assert_eq!(doc.sibling_index(items[3]), None);
    }

    #[test]
    fn test_cycles_are_rejected() {
        let (mut doc, div, [_, span, _]) = sample();

        assert!(doc.append_child(span, div).is_err());
        assert!(doc.append_child(div, div).is_err());
        assert!(doc.append_child(div, doc.root()).is_err());
    }

    #[test]
    fn test_unknown_ids_are_invalid_arguments() {
        let (mut doc, div, _) = sample();
        let mut other = Document::new();
        for _ in 0..10 {
            other.create_text("x");
        }
        let foreign = other.create_text("y");

        assert!(!doc.contains(foreign));
        assert!(matches!(doc.append_child(div, foreign), Err(Error::InvalidArgument(_))));
        assert_eq!(doc.data(foreign), None);
        assert!(doc.children(foreign).is_empty());
    }

    #[test]
    fn test_text_content() {
        let (mut doc, _, [_, span, _]) = sample();
        let inner = doc.create_cdata("b");
        doc.append_child(span, inner).unwrap();

        assert_eq!(doc.text_content(doc.root()), "abc");
    }

    #[test]
    fn test_is_inclusive_ancestor() {
        let (doc, div, [a, ..]) = sample();

        assert!(doc.is_inclusive_ancestor(div, a));
        assert!(doc.is_inclusive_ancestor(a, a));
        assert!(doc.is_inclusive_ancestor(doc.root(), a));
        assert!(!doc.is_inclusive_ancestor(a, div));
    }

    #[test]
    fn test_element_attributes() {
        let mut doc = Document::new();
        let div = doc.create_element("DIV");
        let element = doc.element_mut(div).unwrap();
        element.set_attr("id", "x");
        element.set_attr("id", "y");

        let element = doc.element(div).unwrap();
        assert_eq!(element.name(), "div");
        assert_eq!(element.attr("id"), Some("y"));
        assert_eq!(element.attrs().len(), 1);
    }

    #[test]
    fn test_parse_builds_html_skeleton() {
        let parsed = parse("<p class=\"lead\">Hello <b>world</b></p>");
        let doc = &parsed.document;

        let html = doc.first_child(doc.root()).unwrap();
        assert_eq!(doc.element(html).map(Element::name), Some("html"));

        let body = doc.children(html)[1];
        assert_eq!(doc.element(body).map(Element::name), Some("body"));

        let p = doc.first_child(body).unwrap();
        assert_eq!(doc.element(p).and_then(|el| el.attr("class")), Some("lead"));
        assert_eq!(doc.text_content(p), "Hello world");
    }

    #[test]
    fn test_parse_skips_comments() {
        let parsed = parse("<div><!-- note -->text</div>");
        let doc = &parsed.document;

        assert_eq!(doc.text_content(doc.root()), "text");
    }
}
