//! Configuration options for article parsing.
//!
//! The `Options` struct controls how articles are dated, how their canonical
//! URLs are built, which list labels are treated as metadata, and how
//! fragments are converted to markdown.

use chrono::{FixedOffset, Offset, Utc};

/// Seconds east of UTC for China Standard Time, where sspai publishes.
const CST_OFFSET_SECS: i32 = 8 * 3600;

/// Configuration options for article parsing.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use pai_apps::Options;
///
/// // Use defaults
/// let options = Options::default();
///
/// // Render release times in UTC instead of China Standard Time
/// let options = Options {
///     utc_offset_secs: 0,
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Offset (seconds east of UTC) used to turn release timestamps into
    /// calendar dates and date-times.
    ///
    /// Default: `28800` (UTC+08:00)
    pub utc_offset_secs: i32,

    /// Prefix joined with the article id to form the canonical article URL.
    ///
    /// Default: `"https://sspai.com/post/"`
    pub article_url_base: String,

    /// List-item label that introduces the platform list.
    ///
    /// Matched as a literal substring, immediately followed by a colon.
    ///
    /// Default: `"平台"`
    pub platform_label: String,

    /// List-item label that introduces the keyword list.
    ///
    /// Default: `"关键词"`
    pub keyword_label: String,

    /// Keep hyperlinks in the markdown body.
    ///
    /// Default: `true`
    pub include_links: bool,

    /// Render HTML tables as markdown tables.
    ///
    /// Default: `true`
    pub include_tables: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            utc_offset_secs: CST_OFFSET_SECS,
            article_url_base: "https://sspai.com/post/".to_string(),
            platform_label: "平台".to_string(),
            keyword_label: "关键词".to_string(),
            include_links: true,
            include_tables: true,
        }
    }
}

impl Options {
    /// Returns the configured offset, falling back to UTC when the
    /// configured value is out of range.
    #[must_use]
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }
}
