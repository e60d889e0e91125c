//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate used by the splitter, the image
//! rewriter, and the label extractor. Parsing never fails: the HTML5 parser
//! repairs malformed markup, so an unparseable body simply yields a tree
//! without the elements the callers look for.
//!
//! Bodies are parsed as fragments in a `<body>` context, so head-only
//! elements (`<title>`, `<style>`, `<meta>`) stay where they were written
//! instead of being hoisted out of the content.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef};

use crate::patterns::WHITESPACE_NORMALIZE;

// === Parsing ===

/// Parse an HTML fragment into a document tree.
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::fragment(html)
}

/// Serialize a parsed fragment back to markup.
///
/// Fragment nodes hang off a synthetic `html` element; this returns only
/// its contents.
#[must_use]
pub fn fragment_html(doc: &Document) -> String {
    doc.html_root().inner_html().to_string()
}

// === Tag/Node Information ===

/// Check whether a node is an element with the given (lowercase) tag name.
#[must_use]
pub fn is_tag(node: &NodeRef, tag: &str) -> bool {
    node.is_element() && node.node_name().is_some_and(|t| &*t == tag)
}

// === Text Content ===

/// Get all text content of a node and its descendants.
#[inline]
#[must_use]
pub fn text_content(node: &NodeRef) -> String {
    node.text().to_string()
}

/// Get the outer HTML of a node.
#[inline]
#[must_use]
pub fn outer_html(node: &NodeRef) -> String {
    node.html().to_string()
}

/// Collapse every whitespace run (line breaks included) to one space and
/// trim the ends, giving single-line text.
///
/// ```
/// use pai_apps::dom::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace(" Bear\n    ：Markdown  notes "), "Bear ：Markdown notes");
/// ```
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text.trim(), " ").into_owned()
}

// === Tree Navigation ===

/// Iterate the element siblings that follow `node`, in document order.
///
/// Text and comment siblings are skipped.
pub fn following_element_siblings<'a>(node: &NodeRef<'a>) -> impl Iterator<Item = NodeRef<'a>> {
    std::iter::successors(node.next_sibling(), NodeRef::next_sibling).filter(NodeRef::is_element)
}
