//! Image reference rewriting.
//!
//! Every `<img>` in an app fragment is pointed at a local copy under
//! `images/`, and the remote URL to download that copy from is collected.
//! The local filename is derived from the download URL with
//! [`image_filename`], which the saver uses as well, so the two always agree.
//!
//! Rewriting is only stable on sources without a raster suffix: a second
//! pass leaves `images/a.gif` alone but turns `images/b.png` into
//! `images/webp`, since the suffix check asks for the webp rendition again.
//! Fragments are rewritten once, straight from the payload.

use crate::dom::{self, Document};
use crate::patterns::{IMAGE_DIR, RASTER_SUFFIXES, TRANSCODE_SUFFIX};

/// Result of rewriting one fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewrittenFragment {
    /// Download URLs in document order, duplicates included.
    pub urls: Vec<String>,
    /// Fragment markup with every image source pointing under `images/`.
    pub html: String,
}

/// Strips the query string (everything from the first `?`).
fn strip_query(url: &str) -> &str {
    url.split_once('?').map_or(url, |(path, _)| path)
}

/// Returns the URL to download an image from.
///
/// Raster images (by path suffix, query ignored) are requested in their webp
/// rendition by appending `/format/webp` to the full source.
///
/// ```
/// use pai_apps::images::download_url;
///
/// assert_eq!(
///     download_url("https://cdn.example.com/a.png?imageView2/2/w/1120"),
///     "https://cdn.example.com/a.png?imageView2/2/w/1120/format/webp"
/// );
/// assert_eq!(download_url("https://cdn.example.com/a.gif"), "https://cdn.example.com/a.gif");
/// ```
#[must_use]
pub fn download_url(src: &str) -> String {
    let path = strip_query(src);
    if RASTER_SUFFIXES.iter().any(|suffix| path.ends_with(suffix)) {
        format!("{src}{TRANSCODE_SUFFIX}")
    } else {
        src.to_string()
    }
}

/// Derives the local filename of a download URL: the last path segment with
/// the query string stripped.
///
/// ```
/// use pai_apps::images::image_filename;
///
/// assert_eq!(image_filename("https://cdn.example.com/x/a.png?v=1/format/webp"), "a.png");
/// assert_eq!(image_filename("https://cdn.example.com/x/a.gif"), "a.gif");
/// ```
#[must_use]
pub fn image_filename(url: &str) -> &str {
    strip_query(url).rsplit('/').next().unwrap_or_default()
}

/// Relative path an image source is rewritten to.
#[must_use]
pub fn local_path(url: &str) -> String {
    format!("{IMAGE_DIR}/{}", image_filename(url))
}

/// Rewrites all image sources in `doc` in place and returns the download
/// URLs, in document order.
///
/// Images without a `src`, or with an empty one, are left untouched and not
/// reported.
pub fn rewrite_images(doc: &Document) -> Vec<String> {
    let mut urls = Vec::new();
    for img in doc.select("img").iter() {
        let Some(src) = img.attr("src") else {
            continue;
        };
        if src.is_empty() {
            continue;
        }
        let url = download_url(&src);
        img.set_attr("src", &local_path(&url));
        urls.push(url);
    }
    urls
}

/// Parses a fragment, rewrites its images, and serializes it again.
#[must_use]
pub fn rewrite(fragment_html: &str) -> RewrittenFragment {
    let doc = dom::parse(fragment_html);
    let urls = rewrite_images(&doc);
    RewrittenFragment {
        urls,
        html: dom::fragment_html(&doc),
    }
}
