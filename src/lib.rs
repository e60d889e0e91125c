//! # pai-apps
//!
//! Splits sspai "派评 | 近期值得关注的 App" roundup articles into one
//! self-contained markdown document per app.
//!
//! Each app document carries a frontmatter block (app name, article
//! reference, platforms, keywords, release time), the app heading, and the
//! write-up converted to markdown with image references rewritten to local
//! `images/` paths. The original image URLs are collected so a saver can
//! download them next to the document.
//!
//! ## Quick Start
//!
//! ```rust
//! use pai_apps::parse_article;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "id": 86000,
//!     "title": "派评 | 近期值得关注的 App",
//!     "body": "<h2>App 速览</h2>\
//!              <h3>Bear：Markdown 笔记</h3>\
//!              <p>A note app.</p>\
//!              <ul><li>平台：iOS / macOS</li></ul>"
//! });
//!
//! let parsed = parse_article(&payload)?;
//! assert_eq!(parsed.len(), 1);
//! assert_eq!(parsed.records[0].platforms, vec!["iOS", "macOS"]);
//! assert!(parsed.records[0].content.starts_with("---\napp_name: Bear\n"));
//! # Ok::<(), pai_apps::Error>(())
//! ```
//!
//! ## Layouts
//!
//! Two API payload layouts are supported; see [`splitter`]. Articles with no
//! recognizable app sections produce an empty result, not an error.
//!
//! ## Features
//!
//! - `cli` (default): the `pai-apps` binary and the HTTP client in [`fetch`].

mod error;
mod options;
mod patterns;
mod result;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Input payload shape.
pub mod payload;

/// Article-level metadata.
pub mod article;

/// Section splitting for both payload layouts.
pub mod splitter;

/// Image reference rewriting.
pub mod images;

/// Platform and keyword extraction from labeled list items.
pub mod labels;

/// Frontmatter and markdown rendering.
pub mod render;

/// Filename sanitization.
pub mod filename;

/// Diagnostics returned alongside parse results.
pub mod diagnostics;

/// Article parsing pipeline.
pub mod parser;

/// Persistence of app records.
pub mod saver;

/// Crawl window selection.
pub mod range;

/// Feed crawling.
pub mod crawl;

/// HTTP client for the sspai API.
#[cfg(feature = "cli")]
pub mod fetch;

// Public API - re-exports
pub use article::ArticleMetadata;
pub use diagnostics::{Diagnostic, Level};
pub use error::{Error, Result};
pub use options::Options;
pub use parser::ArticleParser;
pub use payload::{ArticlePayload, BodyBlock};
pub use result::{AppRecord, ParsedArticle};
pub use splitter::PayloadShape;

/// Parses an article detail payload using default options.
///
/// A JSON `null` yields an empty result.
///
/// # Errors
///
/// Returns [`Error::MalformedPayload`] when the payload lacks `id` or
/// `title`, or has fields of the wrong type.
pub fn parse_article(payload: &serde_json::Value) -> Result<ParsedArticle> {
    parse_article_with_options(payload, &Options::default())
}

/// Parses an article detail payload with custom options.
///
/// # Errors
///
/// Returns [`Error::MalformedPayload`] when the payload lacks `id` or
/// `title`, or has fields of the wrong type.
///
/// # Example
///
/// ```rust
/// use pai_apps::{parse_article_with_options, Options};
/// use serde_json::json;
///
/// let options = Options {
///     utc_offset_secs: 0,
///     ..Options::default()
/// };
/// let parsed = parse_article_with_options(&json!({"id": 1, "title": "t", "released_time": 0}), &options)?;
/// assert!(parsed.is_empty());
/// let article = parsed.article.as_ref().map(|a| a.released_date.as_str());
/// assert_eq!(article, Some("1970-01-01"));
/// # Ok::<(), pai_apps::Error>(())
/// ```
pub fn parse_article_with_options(payload: &serde_json::Value, options: &Options) -> Result<ParsedArticle> {
    ArticleParser::new(options.clone()).parse(Some(payload))
}
