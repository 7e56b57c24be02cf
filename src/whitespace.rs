//! Whitespace normalization.
//!
//! Text is collapsed so that every whitespace run becomes a single space,
//! unless it is CDATA or sits inside a preserve-whitespace element (`pre`,
//! `textarea`, ...). Duplicate spaces across append boundaries are avoided by
//! looking at the last character already accumulated.

use crate::dom::{Document, NodeData, NodeId};

/// How many element levels, starting at a text node's parent, are checked for
/// a preserve-whitespace tag. Deeper ancestors are not consulted.
pub const PRESERVE_WHITESPACE_DEPTH: usize = 6;

/// Append-only text buffer with an optional character limit.
///
/// Once the limit is reached further appends are dropped; the buffer never
/// holds more than `limit` characters.
#[derive(Debug, Clone, Default)]
pub struct TextAccumulator {
    buf: String,
    chars: usize,
    limit: Option<usize>,
}

impl TextAccumulator {
    /// An unbounded accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An accumulator holding at most `limit` characters (`None` = unbounded).
    #[must_use]
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Append one character. Returns false if the limit dropped it.
    pub fn push(&mut self, c: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.buf.push(c);
        self.chars += 1;
        true
    }

    /// Append as much of `text` as the limit allows.
    pub fn push_str(&mut self, text: &str) {
        match self.remaining() {
            None => {
                self.buf.push_str(text);
                self.chars += text.chars().count();
            }
            Some(remaining) => {
                for c in text.chars().take(remaining) {
                    self.buf.push(c);
                    self.chars += 1;
                }
            }
        }
    }

    fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.saturating_sub(self.chars))
    }

    /// Whether the limit has been reached.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.limit.is_some_and(|limit| self.chars >= limit)
    }

    /// Number of characters held.
    #[must_use]
    pub fn char_count(&self) -> usize {
        self.chars
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.buf
    }
}

/// True iff the accumulator is non-empty and ends in a plain space.
#[must_use]
pub fn last_char_is_whitespace(accum: &TextAccumulator) -> bool {
    accum.as_str().ends_with(' ')
}

/// Whitespace as far as collapsing goes: space, tab, LF, FF, CR and NBSP.
#[must_use]
pub fn is_actually_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r' | '\u{A0}')
}

/// Zero-width space and soft hyphen, which are dropped from normalized text.
#[must_use]
pub fn is_invisible_char(c: char) -> bool {
    matches!(c, '\u{200B}' | '\u{AD}')
}

/// Append `text` with every whitespace run collapsed to a single space.
///
/// With `strip_leading`, whitespace before the first visible character is
/// dropped instead of collapsed.
pub fn append_normalised_whitespace(accum: &mut TextAccumulator, text: &str, strip_leading: bool) {
    let mut last_was_white = false;
    let mut reached_non_white = false;

    for c in text.chars() {
        if accum.is_full() {
            return;
        }
        if is_actually_whitespace(c) {
            if (strip_leading && !reached_non_white) || last_was_white {
                continue;
            }
            accum.push(' ');
            last_was_white = true;
        } else if !is_invisible_char(c) {
            accum.push(c);
            last_was_white = false;
            reached_non_white = true;
        }
    }
}

/// Strip leading and trailing characters up to U+0020 (controls and space).
/// Non-breaking spaces and other Unicode whitespace are kept.
#[must_use]
pub fn trim_edges(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}

/// Normalize a standalone string. Normalizing the output again returns it
/// unchanged.
#[must_use]
pub fn normalise(text: &str) -> String {
    let mut accum = TextAccumulator::new();
    append_normalised_whitespace(&mut accum, text, false);
    accum.into_string()
}

/// Whether text below `node` must keep its whitespace, looking at `node` and
/// its element ancestors up to [`PRESERVE_WHITESPACE_DEPTH`] levels.
#[must_use]
pub fn preserves_whitespace(doc: &Document, node: Option<NodeId>) -> bool {
    preserves_whitespace_within(doc, node, PRESERVE_WHITESPACE_DEPTH)
}

/// [`preserves_whitespace`] with an explicit level bound.
#[must_use]
pub fn preserves_whitespace_within(doc: &Document, node: Option<NodeId>, depth: usize) -> bool {
    let mut current = node;
    for _ in 0..depth {
        let Some(element) = current.and_then(|id| doc.element(id)) else {
            return false;
        };
        if element.tag().preserves_whitespace() {
            return true;
        }
        current = current.and_then(|id| doc.parent(id));
    }
    false
}

/// Append a Text or CData node's content. Other nodes are ignored.
pub fn append_text(doc: &Document, accum: &mut TextAccumulator, node: NodeId) {
    match doc.data(node) {
        Some(NodeData::CData(text)) => accum.push_str(text),
        Some(NodeData::Text(text)) => {
            if preserves_whitespace(doc, doc.parent(node)) {
                accum.push_str(text);
            } else {
                let strip_leading = last_char_is_whitespace(accum);
                append_normalised_whitespace(accum, text, strip_leading);
            }
        }
        _ => {}
    }
}
