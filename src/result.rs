//! Result types for parsing output.
//!
//! One [`ParsedArticle`] per input payload, holding zero or more
//! [`AppRecord`]s that share the article's metadata.

use std::sync::Arc;

use crate::article::ArticleMetadata;
use crate::diagnostics::Diagnostic;
use crate::splitter::PayloadShape;

/// One app write-up, ready to be persisted.
///
/// Every URL in `images` corresponds to one `images/<filename>` reference in
/// `content`, in the same order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRecord {
    /// Owning article, shared with sibling records.
    pub article: Arc<ArticleMetadata>,

    /// Filesystem-safe title (may be empty).
    pub file_title: String,

    /// Original section title.
    pub title: String,

    /// Platforms listed in the section.
    pub platforms: Vec<String>,

    /// Keywords listed in the section.
    pub keywords: Vec<String>,

    /// Image download URLs, in document order, duplicates kept.
    pub images: Vec<String>,

    /// Rendered markdown document.
    pub content: String,
}

/// Result of parsing one article payload.
#[derive(Debug, Clone, Default)]
pub struct ParsedArticle {
    /// Article metadata, `None` when there was no payload.
    pub article: Option<Arc<ArticleMetadata>>,

    /// Records in section order.
    pub records: Vec<AppRecord>,

    /// Layout the records were split from, `None` when nothing was found.
    pub strategy: Option<PayloadShape>,

    /// Non-fatal notes gathered while parsing.
    pub diagnostics: Vec<Diagnostic>,
}

impl ParsedArticle {
    /// Whether no app was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of app records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl IntoIterator for ParsedArticle {
    type Item = AppRecord;
    type IntoIter = std::vec::IntoIter<AppRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}
