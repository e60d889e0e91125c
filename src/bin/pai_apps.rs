//! CLI binary for pai-apps.
//!
//! A thin shim over the library crate: `crawl` walks the sspai feed and
//! saves every app of every roundup in the crawl window; `parse` splits a
//! saved article detail payload offline.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use pai_apps::crawl::{Crawler, DEFAULT_PAGE_SIZE};
use pai_apps::fetch::SspaiClient;
use pai_apps::range::TimeRange;
use pai_apps::saver::{latest_local_date, AppSaver, ImageSource};
use pai_apps::{ArticleParser, Error, Options};
use serde_json::Value;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "pai-apps", version, about = "Split sspai app roundups into per-app markdown")]
struct Cli {
    /// Also write logs to this file
    #[arg(long, global = true, env = "PAI_APPS_LOG_FILE")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Crawl the feed and save every app of the roundups in the crawl window
    Crawl {
        /// Look back this many 30-day months
        #[arg(short, long, default_value_t = 0)]
        months: u32,

        /// Only fetch articles newer than the newest saved one
        #[arg(short, long)]
        update: bool,

        /// Output directory
        #[arg(short, long, default_value = "data")]
        output_dir: PathBuf,

        /// Feed entries requested per page
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
        page_size: usize,

        /// Seconds to pause between requests
        #[arg(long, default_value_t = 1)]
        sleep: u64,
    },
    /// Parse a saved article detail payload (raw or wrapped in the API envelope)
    Parse {
        /// JSON file holding the payload
        payload: PathBuf,

        /// Save records here instead of printing them
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Do not download images when saving
        #[arg(long)]
        no_images: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    match cli.command {
        Commands::Crawl {
            months,
            update,
            output_dir,
            page_size,
            sleep,
        } => crawl(months, update, &output_dir, page_size, Duration::from_secs(sleep)),
        Commands::Parse {
            payload,
            output_dir,
            no_images,
        } => parse(&payload, output_dir.as_deref(), no_images),
    }
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}

fn crawl(months: u32, update: bool, output_dir: &Path, page_size: usize, pause: Duration) -> Result<()> {
    let options = Options::default();
    let now = Utc::now().with_timezone(&options.offset()).naive_local();
    let latest = latest_local_date(output_dir)?;

    let (range, diagnostics) = TimeRange::compute(months, update, latest, now)?;
    for diagnostic in &diagnostics {
        diagnostic.emit();
    }
    info!(
        "crawling {} .. {} into {} (page size {page_size}, pause {pause:?})",
        range.start,
        range.end,
        output_dir.display()
    );

    let client = SspaiClient::new()?;
    let saver = AppSaver::new(output_dir)?;
    let stats = Crawler::new(&client, &client, ArticleParser::new(options), saver, range)
        .page_size(page_size)
        .pause(pause)
        .run()?;

    info!(
        "done: {} app(s) from {} article(s), {} failure(s)",
        stats.apps, stats.articles, stats.failures
    );
    Ok(())
}

fn parse(payload: &Path, output_dir: Option<&Path>, no_images: bool) -> Result<()> {
    let text = fs::read_to_string(payload)
        .with_context(|| format!("cannot read {}", payload.display()))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not JSON", payload.display()))?;

    // Accept the API envelope as well as the bare detail object.
    let detail = match (value.get("error"), value.get("data")) {
        (Some(_), Some(data)) => data,
        _ => &value,
    };

    let parsed = ArticleParser::default().parse(Some(detail))?;
    for diagnostic in &parsed.diagnostics {
        diagnostic.emit();
    }

    let Some(output_dir) = output_dir else {
        for record in &parsed.records {
            println!("{}", record.content);
        }
        return Ok(());
    };

    let skip = |url: &str| -> pai_apps::Result<Vec<u8>> {
        Err(Error::Http(format!("image download disabled: {url}")))
    };
    let client;
    let images: &dyn ImageSource = if no_images {
        &skip
    } else {
        client = SspaiClient::new()?;
        &client
    };

    let saver = AppSaver::new(output_dir)?;
    for record in &parsed.records {
        let report = saver.save(record, images)?;
        info!(
            "wrote {} ({} image(s) written, {} skipped, {} failed)",
            report.path.display(),
            report.images_written,
            report.images_skipped,
            report.images_failed
        );
    }
    Ok(())
}
