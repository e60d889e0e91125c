//! Filename sanitization.
//!
//! Only the title used to name output files goes through here; frontmatter
//! and headings keep the original title.

use crate::patterns::{COLONS, ILLEGAL_FILENAME_CHARS};

/// Makes a title safe to use as a filename stem.
///
/// Colons (both glyphs) become `-`, then `\ / * ? " < > |` and control
/// characters (line breaks, tabs) are removed and the result is trimmed. The
/// result may be empty.
///
/// ```
/// use pai_apps::filename::clean_filename;
///
/// assert_eq!(clean_filename("App：Pro Edition"), "App-Pro Edition");
/// assert_eq!(clean_filename("A/B*C?"), "ABC");
/// ```
#[must_use]
pub fn clean_filename(text: &str) -> String {
    let dashed = text.replace(COLONS, "-");
    ILLEGAL_FILENAME_CHARS
        .replace_all(&dashed, "")
        .replace(char::is_control, "")
        .trim()
        .to_string()
}

/// Name of the markdown file a record is saved under:
/// `"{file_title}-[{platforms joined by ','}].md"`, with any `/` or `\`
/// (possible inside platform names) replaced by `-`.
///
/// ```
/// use pai_apps::filename::record_filename;
///
/// let platforms = vec!["iOS".to_string(), "macOS".to_string()];
/// assert_eq!(record_filename("Bear-notes", &platforms), "Bear-notes-[iOS,macOS].md");
/// ```
#[must_use]
pub fn record_filename(file_title: &str, platforms: &[String]) -> String {
    format!("{file_title}-[{}].md", platforms.join(","))
        .replace(['/', '\\'], "-")
}
