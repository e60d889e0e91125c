//! Labeled list extraction.
//!
//! App write-ups end with an info list such as
//!
//! ```html
//! <ul>
//!   <li>平台：iOS / Android</li>
//!   <li>关键词：笔记、效率</li>
//! </ul>
//! ```
//!
//! The first list item carrying a label directly followed by a colon is
//! split into its values. Labels are matched literally. No match yields an
//! empty list.

use crate::dom::{self, Document};
use crate::patterns::{COLONS, LIST_SEPARATOR};

/// Extracts the platform list using the given label (e.g. `平台`).
#[must_use]
pub fn extract_platforms(doc: &Document, label: &str) -> Vec<String> {
    extract_labeled(doc, label)
}

/// Extracts the keyword list using the given label (e.g. `关键词`).
#[must_use]
pub fn extract_keywords(doc: &Document, label: &str) -> Vec<String> {
    extract_labeled(doc, label)
}

/// Scans `<li>` elements in document order and splits the value of the
/// first one labeled `label`. Later matching items are ignored.
#[must_use]
pub fn extract_labeled(doc: &Document, label: &str) -> Vec<String> {
    if label.is_empty() {
        return Vec::new();
    }
    doc.select("li")
        .nodes()
        .iter()
        .find_map(|li| labeled_value(&dom::text_content(li), label).map(split_values))
        .unwrap_or_default()
}

/// Returns the rest of the line after the first `label` + colon occurrence.
fn labeled_value<'t>(text: &'t str, label: &str) -> Option<&'t str> {
    text.match_indices(label).find_map(|(at, _)| {
        let after = &text[at + label.len()..];
        let value = after.strip_prefix(COLONS)?;
        let value = value.trim_start();
        Some(value.split('\n').next().unwrap_or(value))
    })
}

fn split_values(value: &str) -> Vec<String> {
    LIST_SEPARATOR
        .split(value)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
