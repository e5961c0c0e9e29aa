//! Command-line host for the feed normalization pipeline.
//!
//! Fetches a spreadsheet-exported CSV feed (or reads a local export), runs it
//! through [`sheet_news::normalize_feed`], and writes the articles as a JSON
//! API file plus, optionally, a Markdown page of article cards.
//!
//! ## Usage
//!
//! ```sh
//! sheet_news --url https://docs.example.com/feed.csv -j ./json -m ./markdown
//! ```
//!
//! ## Flow
//!
//! 1. **Settings**: merge `--config` YAML with CLI flags and env vars
//! 2. **Fetching**: download the document with retry/backoff, or read the file
//! 3. **Normalizing**: turn the document into articles, logging skipped rows
//! 4. **Output**: write the JSON file and the Markdown cards

use chrono::Local;
use clap::Parser;
use sheet_news::cli::{Cli, FEED_URL_ENV};
use sheet_news::config::{load_config, FileConfig, Settings};
use sheet_news::fetch::fetch_document;
use sheet_news::outputs::{json, markdown};
use sheet_news::utils::ensure_writable_dir;
use sheet_news::{normalize_feed, FeedPage, TracingSink};
use std::error::Error;
use std::fmt::Display;
use std::process::ExitCode;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

/// Shown to the user when the feed cannot be used; details go to the log.
const USER_FACING_ERROR: &str = "Could not load news data. Please try again later.";

/// Log why the feed could not be used and show only the generic message.
fn feed_failure(location: &dyn Display, error: &dyn Display, what: &str) -> ExitCode {
    error!(%location, %error, "{what}");
    eprintln!("{USER_FACING_ERROR}");
    ExitCode::FAILURE
}

#[tokio::main]
#[instrument]
async fn main() -> Result<ExitCode, Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("sheet_news starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let file_config = match args.config.as_deref() {
        Some(path) => load_config(path).await?,
        None => FileConfig::default(),
    };
    let env_url = std::env::var(FEED_URL_ENV).ok();
    let settings = Settings::resolve(args, env_url, file_config)?;
    info!(
        location = %settings.location,
        category = %settings.category,
        json_output_dir = %settings.json_output_dir,
        "Resolved settings"
    );

    // Early check: ensure JSON output dir is writable
    if let Err(e) = ensure_writable_dir(&settings.json_output_dir).await {
        error!(
            path = %settings.json_output_dir,
            error = %e,
            "JSON output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Fetch ----
    let document = match fetch_document(
        &settings.location,
        settings.max_retries,
        settings.base_delay,
    )
    .await
    {
        Ok(document) => document,
        Err(e) => {
            return Ok(feed_failure(
                &settings.location,
                &e,
                "Failed to retrieve feed document",
            ));
        }
    };

    // ---- Normalize ----
    let articles = match normalize_feed(&document, &settings.category, &TracingSink) {
        Ok(articles) => articles,
        Err(e) => {
            return Ok(feed_failure(&settings.location, &e, "Feed document rejected"));
        }
    };
    info!(count = articles.len(), "Normalized feed articles");

    let now = Local::now();
    let feed_page = FeedPage {
        category: settings.category.clone(),
        origin: settings.location.to_string(),
        local_date: now.date_naive().to_string(),
        local_time: now.time().to_string(),
        articles,
    };

    // ---- Output ----
    json::write_feed_page(&feed_page, &settings.json_output_dir).await?;

    if let Some(markdown_output_dir) = settings.markdown_output_dir.as_deref() {
        if let Err(e) = markdown::write_feed_markdown(&feed_page, markdown_output_dir).await {
            error!(path = %markdown_output_dir, error = %e, "Failed writing Markdown");
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = feed_page.articles.len(),
        "Execution complete"
    );

    Ok(ExitCode::SUCCESS)
}
