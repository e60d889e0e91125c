//! Persistence of app records.
//!
//! Layout under the output directory:
//!
//! ```text
//! <output>/<released_date>/<file_title>-[<platforms>].md
//! <output>/<released_date>/images/<image filename>
//! ```
//!
//! Image filenames use [`image_filename`], the same rule the rewriter used
//! to build the `images/...` references inside the markdown.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::filename::record_filename;
use crate::images::image_filename;
use crate::patterns::{DATE_DIR, IMAGE_DIR};
use crate::result::AppRecord;

/// Resolves image URLs to bytes.
pub trait ImageSource {
    /// Downloads one image.
    ///
    /// # Errors
    ///
    /// Returns an error when the image cannot be retrieved.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

impl<F> ImageSource for F
where
    F: Fn(&str) -> Result<Vec<u8>>,
{
    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        self(url)
    }
}

/// What happened while saving one record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveReport {
    /// Path of the markdown file written.
    pub path: PathBuf,
    /// Images downloaded and written.
    pub images_written: usize,
    /// Images already present on disk.
    pub images_skipped: usize,
    /// Images that could not be downloaded or written.
    pub images_failed: usize,
}

/// Writes app records and their images below an output directory.
#[derive(Debug, Clone)]
pub struct AppSaver {
    output_dir: PathBuf,
}

impl AppSaver {
    /// Creates a saver, creating `output_dir` if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the directory cannot be created.
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        create_dir(&output_dir)?;
        Ok(Self { output_dir })
    }

    /// Root output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Saves one record: images first, then the markdown file.
    ///
    /// Images that already exist are not downloaded again. A failing image
    /// is logged and counted, it does not abort the save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the dated directories or the markdown file
    /// cannot be written.
    pub fn save(&self, record: &AppRecord, images: &dyn ImageSource) -> Result<SaveReport> {
        let date_dir = self.output_dir.join(&record.article.released_date);
        let image_dir = date_dir.join(IMAGE_DIR);
        create_dir(&image_dir)?;

        let mut report = SaveReport::default();
        for url in &record.images {
            save_image(url, &image_dir, images, &mut report);
        }

        let filename = record_filename(&record.file_title, &record.platforms);
        let path = date_dir.join(&filename);
        fs::write(&path, &record.content).map_err(|e| Error::io(&path, e))?;
        info!("saved {filename}");

        report.path = path;
        Ok(report)
    }
}

/// Date of the newest `YYYY-MM-DD` directory under `output_dir`.
///
/// Returns `Ok(None)` when the directory does not exist or holds no dated
/// subdirectory. Entries that are not dates are ignored.
///
/// # Errors
///
/// Returns [`Error::Io`] when the directory exists but cannot be read.
pub fn latest_local_date(output_dir: &Path) -> Result<Option<NaiveDate>> {
    if !output_dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(output_dir).map_err(|e| Error::io(output_dir, e))?;
    let mut latest = None;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(output_dir, e))?;
        if !entry.path().is_dir() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str().filter(|n| DATE_DIR.is_match(n)) else {
            continue;
        };
        if let Ok(date) = NaiveDate::parse_from_str(name, "%Y-%m-%d") {
            latest = latest.max(Some(date));
        }
    }
    Ok(latest)
}

fn save_image(url: &str, image_dir: &Path, images: &dyn ImageSource, report: &mut SaveReport) {
    let filename = image_filename(url);
    if filename.is_empty() {
        warn!("image url has no filename, skipping: {url}");
        report.images_failed += 1;
        return;
    }

    let path = image_dir.join(filename);
    if path.exists() {
        info!("image exists, skipping {filename}");
        report.images_skipped += 1;
        return;
    }

    match images.fetch(url) {
        Ok(bytes) => match fs::write(&path, bytes) {
            Ok(()) => {
                info!("downloaded image {url}");
                report.images_written += 1;
            }
            Err(e) => {
                error!("failed to write image {}: {e}", path.display());
                report.images_failed += 1;
            }
        },
        Err(e) => {
            error!("failed to download image {url}: {e}");
            report.images_failed += 1;
        }
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}
