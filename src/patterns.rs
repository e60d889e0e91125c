//! Compiled regex patterns and fixed glyph tables.
//!
//! All patterns are compiled once on first use using `LazyLock`. They are
//! immutable, so sharing them between threads parsing different articles
//! is safe.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Glyph Tables
// =============================================================================

/// Colon glyphs accepted as a label/value or name/subtitle separator
/// (full-width first, as it is the common form in roundup titles).
pub const COLONS: [char; 2] = ['：', ':'];

/// Raster suffixes that trigger a request for the transcoded webp variant.
///
/// The check is case-sensitive; mixed-case suffixes such as `.Png` are left
/// untouched.
pub const RASTER_SUFFIXES: [&str; 6] = [".png", ".jpg", ".jpeg", ".PNG", ".JPG", ".JPEG"];

/// Segment appended to raster image URLs to request a webp rendition.
pub const TRANSCODE_SUFFIX: &str = "/format/webp";

/// Relative directory that rewritten image sources point into.
pub const IMAGE_DIR: &str = "images";

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Runs of whitespace, line breaks included.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

// =============================================================================
// Metadata Extraction Patterns
// =============================================================================

/// Separators between items of a labeled list value:
/// comma, full-width comma, slash, ideographic enumeration comma.
pub static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,，/、]").expect("LIST_SEPARATOR regex"));

// =============================================================================
// Filename Patterns
// =============================================================================

/// Characters that are not allowed in output filenames.
pub static ILLEGAL_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?"<>|]"#).expect("ILLEGAL_FILENAME_CHARS regex"));

/// Directory names produced by the saver (`YYYY-MM-DD`).
pub static DATE_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("DATE_DIR regex"));

// =============================================================================
// Markdown Cleanup Patterns
// =============================================================================

/// Three or more consecutive newlines (optionally with trailing spaces).
pub static MULTIPLE_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").expect("MULTIPLE_NEWLINES regex"));
