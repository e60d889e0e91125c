//! Feed crawling.
//!
//! Walks the article feed page by page, newest first, picks out the app
//! roundup articles, parses them, and saves every app record. The walk ends
//! at the first article released outside the crawl window or at an empty
//! page.

use std::thread;
use std::time::Duration;

use chrono::DateTime;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::parser::ArticleParser;
use crate::range::TimeRange;
use crate::saver::{AppSaver, ImageSource};

/// Title markers of the app roundup series ("派评 | 近期值得关注的 App").
const ROUNDUP_MARKERS: [&str; 2] = ["派评", "近期值得关注"];

/// Default number of feed entries requested per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Whether a feed title belongs to the app roundup series.
///
/// ```
/// use pai_apps::crawl::is_roundup_title;
///
/// assert!(is_roundup_title("派评 | 近期值得关注的 App"));
/// assert!(!is_roundup_title("派评 | 本周值得一读"));
/// ```
#[must_use]
pub fn is_roundup_title(title: &str) -> bool {
    ROUNDUP_MARKERS.iter().all(|marker| title.contains(marker))
}

/// Source of feed pages and article details.
pub trait ArticleSource {
    /// Fetches one page of the article feed, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error when the page cannot be retrieved.
    fn feed_page(&self, limit: usize, offset: usize) -> Result<Vec<Value>>;

    /// Fetches the detail payload of one article, `None` when the article is
    /// not available.
    ///
    /// # Errors
    ///
    /// Returns an error when the request fails.
    fn article_detail(&self, id: i64) -> Result<Option<Value>>;
}

/// The feed fields the crawler reads.
#[derive(Debug, Deserialize)]
struct FeedEntry {
    id: i64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    released_time: i64,
}

/// Counters of one crawl.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Feed pages fetched.
    pub pages: usize,
    /// Roundup articles parsed.
    pub articles: usize,
    /// App records saved.
    pub apps: usize,
    /// Articles or records that could not be fetched, parsed, or saved.
    pub failures: usize,
}

/// Drives a crawl over an [`ArticleSource`].
pub struct Crawler<'a> {
    source: &'a dyn ArticleSource,
    images: &'a dyn ImageSource,
    parser: ArticleParser,
    saver: AppSaver,
    range: TimeRange,
    page_size: usize,
    pause: Duration,
}

impl<'a> Crawler<'a> {
    /// Creates a crawler with the default page size and no pause.
    #[must_use]
    pub fn new(
        source: &'a dyn ArticleSource,
        images: &'a dyn ImageSource,
        parser: ArticleParser,
        saver: AppSaver,
        range: TimeRange,
    ) -> Self {
        Self {
            source,
            images,
            parser,
            saver,
            range,
            page_size: DEFAULT_PAGE_SIZE,
            pause: Duration::ZERO,
        }
    }

    /// Sets the number of feed entries requested per page.
    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the pause between requests.
    #[must_use]
    pub fn pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Runs the crawl to completion.
    ///
    /// Failures on individual articles or records are logged and counted;
    /// only feed-level failures abort the crawl.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for a zero page size, or the source's
    /// error when a feed page cannot be fetched.
    pub fn run(&self) -> Result<CrawlStats> {
        if self.page_size == 0 {
            return Err(Error::InvalidConfig("page size must be positive".to_string()));
        }

        let mut stats = CrawlStats::default();
        let mut offset = 0;
        loop {
            let page = self.source.feed_page(self.page_size, offset)?;
            stats.pages += 1;
            if page.is_empty() {
                info!("feed exhausted at offset {offset}");
                return Ok(stats);
            }

            for raw in &page {
                let entry = match FeedEntry::deserialize(raw) {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!("skipping malformed feed entry: {e}");
                        continue;
                    }
                };

                let released = self.local_time(entry.released_time);
                if !released.is_some_and(|at| self.range.contains(at)) {
                    info!(
                        "article {} released {released:?} is outside the crawl window, stopping",
                        entry.id
                    );
                    return Ok(stats);
                }

                let title = entry.title.unwrap_or_default();
                if is_roundup_title(&title) {
                    info!("crawling roundup {} {title}", entry.id);
                    self.crawl_article(entry.id, &mut stats);
                    thread::sleep(self.pause);
                }
            }

            offset += self.page_size;
            thread::sleep(self.pause);
        }
    }

    fn crawl_article(&self, id: i64, stats: &mut CrawlStats) {
        let detail = match self.source.article_detail(id) {
            Ok(detail) => detail,
            Err(e) => {
                error!("failed to fetch article {id}: {e}");
                stats.failures += 1;
                return;
            }
        };

        let parsed = match self.parser.parse(detail.as_ref()) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("failed to parse article {id}: {e}");
                stats.failures += 1;
                return;
            }
        };
        for diagnostic in &parsed.diagnostics {
            diagnostic.emit();
        }

        stats.articles += 1;
        let found = parsed.len();
        for record in parsed {
            match self.saver.save(&record, self.images) {
                Ok(_) => stats.apps += 1,
                Err(e) => {
                    error!("failed to save {:?} from article {id}: {e}", record.title);
                    stats.failures += 1;
                }
            }
        }
        info!("article {id}: {found} app(s) found");
    }

    fn local_time(&self, timestamp: i64) -> Option<chrono::NaiveDateTime> {
        DateTime::from_timestamp(timestamp, 0)
            .map(|utc| utc.with_timezone(&self.parser.options().offset()).naive_local())
    }
}
