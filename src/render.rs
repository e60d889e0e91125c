//! Document rendering.
//!
//! An app document is a frontmatter block, a level-1 heading with the full
//! app title, and the markdown conversion of the (already rewritten) app
//! fragment:
//!
//! ```text
//! ---
//! app_name: Bear
//! title: Bear：Markdown notes
//! article_id: 86000
//! article_title: 派评 | 近期值得关注的 App
//! article_url: https://sspai.com/post/86000
//! platforms: iOS,macOS
//! keywords: 笔记
//! release_time: 2024-03-02 00:30:00
//! ---
//!
//! # Bear：Markdown notes
//!
//! ...
//! ```

use quick_html2md::{html_to_markdown_with_options, MarkdownOptions};

use crate::article::ArticleMetadata;
use crate::dom;
use crate::options::Options;
use crate::patterns::{COLONS, MULTIPLE_NEWLINES};

/// Frontmatter fields of one app document, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFrontmatter {
    /// Short app name: the title up to the first colon.
    pub app_name: String,
    /// Full section title.
    pub title: String,
    /// Owning article id.
    pub article_id: i64,
    /// Owning article title.
    pub article_title: String,
    /// Owning article URL.
    pub article_url: String,
    /// Platforms listed in the section.
    pub platforms: Vec<String>,
    /// Keywords listed in the section.
    pub keywords: Vec<String>,
    /// Article release date-time.
    pub release_time: String,
}

impl AppFrontmatter {
    /// Builds the frontmatter of a section.
    ///
    /// Titles are collapsed to a single line so every field stays on its
    /// own `key: value` line.
    #[must_use]
    pub fn new(
        title: &str,
        article: &ArticleMetadata,
        platforms: Vec<String>,
        keywords: Vec<String>,
    ) -> Self {
        let title = dom::collapse_whitespace(title);
        Self {
            app_name: app_name(&title).to_string(),
            article_id: article.id,
            article_title: dom::collapse_whitespace(&article.title),
            article_url: article.url.clone(),
            platforms,
            keywords,
            release_time: article.released_time.clone(),
            title,
        }
    }

    /// Serializes the block, delimiters included, ending with a newline.
    #[must_use]
    pub fn render(&self) -> String {
        let fields = [
            ("app_name", self.app_name.clone()),
            ("title", self.title.clone()),
            ("article_id", self.article_id.to_string()),
            ("article_title", self.article_title.clone()),
            ("article_url", self.article_url.clone()),
            ("platforms", self.platforms.join(",")),
            ("keywords", self.keywords.join(",")),
            ("release_time", self.release_time.clone()),
        ];

        let mut out = String::from("---\n");
        for (key, value) in fields {
            out.push_str(key);
            out.push_str(": ");
            out.push_str(&value);
            out.push('\n');
        }
        out.push_str("---\n");
        out
    }
}

/// Short app name of a title: the text before the first colon, trimmed.
///
/// Falls back to the whole (trimmed) title when there is no colon or
/// nothing precedes it.
///
/// ```
/// use pai_apps::render::app_name;
///
/// assert_eq!(app_name("Bear：Markdown notes"), "Bear");
/// assert_eq!(app_name("Things 3: tasks"), "Things 3");
/// assert_eq!(app_name("Reeder"), "Reeder");
/// ```
#[must_use]
pub fn app_name(title: &str) -> &str {
    match title.split_once(COLONS) {
        Some((name, _)) if !name.trim().is_empty() => name.trim(),
        _ => title.trim(),
    }
}

/// Converts an HTML fragment to markdown with ATX headings, then collapses
/// runs of blank lines and trims the result.
#[must_use]
pub fn html_to_markdown(fragment_html: &str, options: &Options) -> String {
    let md_options = MarkdownOptions::new()
        .include_links(options.include_links)
        .include_images(true)
        .preserve_tables(options.include_tables);

    let raw = html_to_markdown_with_options(fragment_html, &md_options);
    MULTIPLE_NEWLINES.replace_all(&raw, "\n\n").trim().to_string()
}

/// Renders the full app document.
#[must_use]
pub fn render_document(frontmatter: &AppFrontmatter, fragment_html: &str, options: &Options) -> String {
    let body = html_to_markdown(fragment_html, options);

    let mut doc = frontmatter.render();
    doc.push('\n');
    doc.push_str("# ");
    doc.push_str(&frontmatter.title);
    doc.push_str("\n\n");
    if !body.is_empty() {
        doc.push_str(&body);
        doc.push('\n');
    }
    doc
}
