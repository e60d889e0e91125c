//! Article parsing pipeline.
//!
//! For each article: build the shared metadata, split the payload into
//! sections, then for every section, in order:
//!
//! 1. join the captured markup into one fragment and parse it,
//! 2. read the platform and keyword lists,
//! 3. rewrite image sources (this only touches `<img>`, after step 2),
//! 4. render the frontmatter and markdown document,
//! 5. derive the filesystem-safe title.

use std::sync::Arc;

use serde_json::Value;

use crate::article::ArticleMetadata;
use crate::diagnostics::Diagnostic;
use crate::dom;
use crate::error::Result;
use crate::filename::clean_filename;
use crate::images;
use crate::labels;
use crate::options::Options;
use crate::payload::ArticlePayload;
use crate::render::{render_document, AppFrontmatter};
use crate::result::{AppRecord, ParsedArticle};
use crate::splitter::{self, RawSection};

/// Splits roundup articles into app records.
///
/// Holds only configuration; one parser can be shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ArticleParser {
    options: Options,
}

impl ArticleParser {
    /// Creates a parser with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    /// Parser configuration.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Parses a JSON article payload.
    ///
    /// A missing payload (`None` or JSON `null`) yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MalformedPayload`] when the payload lacks
    /// `id` or `title`, or has fields of the wrong type.
    pub fn parse(&self, payload: Option<&Value>) -> Result<ParsedArticle> {
        match payload {
            None | Some(Value::Null) => Ok(ParsedArticle::default()),
            Some(value) => Ok(self.parse_payload(&ArticlePayload::from_value(value)?)),
        }
    }

    /// Parses an already decoded payload.
    #[must_use]
    pub fn parse_payload(&self, payload: &ArticlePayload) -> ParsedArticle {
        let article = Arc::new(ArticleMetadata::from_payload(payload, &self.options));
        let split = splitter::split(payload);
        let mut diagnostics = split.diagnostics;

        let records = split
            .sections
            .into_iter()
            .map(|section| self.finalize(section, &article, &mut diagnostics))
            .collect();

        ParsedArticle {
            article: Some(article),
            records,
            strategy: split.strategy,
            diagnostics,
        }
    }

    fn finalize(
        &self,
        section: RawSection,
        article: &Arc<ArticleMetadata>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> AppRecord {
        let RawSection { title, body } = section;
        let doc = dom::parse(&body.into_html());

        let platforms = labels::extract_platforms(&doc, &self.options.platform_label);
        let keywords = labels::extract_keywords(&doc, &self.options.keyword_label);

        let images = images::rewrite_images(&doc);
        for url in &images {
            diagnostics.push(Diagnostic::debug(format!("image url: {url}")));
        }
        let fragment = dom::fragment_html(&doc);

        let frontmatter = AppFrontmatter::new(&title, article, platforms, keywords);
        let content = render_document(&frontmatter, &fragment, &self.options);

        let file_title = clean_filename(&title);
        if file_title.is_empty() {
            diagnostics.push(Diagnostic::warning(format!(
                "article {}: section title {title:?} is empty after sanitizing",
                article.id
            )));
        }

        let AppFrontmatter {
            platforms, keywords, ..
        } = frontmatter;

        AppRecord {
            article: Arc::clone(article),
            file_title,
            title,
            platforms,
            keywords,
            images,
            content,
        }
    }
}
