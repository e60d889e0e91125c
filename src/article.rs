//! Article-level metadata shared by every app record of one article.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::dom;
use crate::options::Options;
use crate::payload::ArticlePayload;

/// Date used when an article carries no release timestamp.
pub const PLACEHOLDER_DATE: &str = "1970-01-01";

/// Date-time used when an article carries no release timestamp.
pub const PLACEHOLDER_DATETIME: &str = "1970-01-01 00:00:00";

/// Identity and release information of one roundup article.
///
/// Built once per article and shared (read-only) by all of its records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleMetadata {
    /// Article identifier.
    pub id: i64,
    /// Article title, on a single line.
    pub title: String,
    /// Canonical article URL, derived from the identifier.
    pub url: String,
    /// Release date (`YYYY-MM-DD`), also the output directory name.
    pub released_date: String,
    /// Release date-time (`YYYY-MM-DD HH:MM:SS`).
    pub released_time: String,
}

impl ArticleMetadata {
    /// Builds the metadata of a payload.
    ///
    /// Timestamps are rendered in the offset configured by `options`; a
    /// missing or unrepresentable timestamp yields the 1970 placeholders.
    #[must_use]
    pub fn from_payload(payload: &ArticlePayload, options: &Options) -> Self {
        let (released_date, released_time) = payload
            .released_time
            .and_then(|ts| DateTime::from_timestamp(ts, 0))
            .map(|utc| utc.with_timezone(&options.offset()))
            .map_or_else(
                || (PLACEHOLDER_DATE.to_string(), PLACEHOLDER_DATETIME.to_string()),
                |local| {
                    (
                        local.format("%Y-%m-%d").to_string(),
                        local.format("%Y-%m-%d %H:%M:%S").to_string(),
                    )
                },
            );

        Self {
            id: payload.id,
            title: dom::collapse_whitespace(&payload.title),
            url: format!("{}{}", options.article_url_base, payload.id),
            released_date,
            released_time,
        }
    }
}
