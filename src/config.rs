//! Run settings, merged from an optional YAML file and the command line.
//!
//! A config file holds the same settings as the CLI flags:
//!
//! ```yaml
//! url: https://docs.example.com/feed.csv
//! category: general
//! json_output_dir: ./json
//! markdown_output_dir: ./markdown
//! max_retries: 3
//! base_delay_ms: 1000
//! ```
//!
//! Values given on the command line (or through their environment
//! variables) override the file. For the feed location the order is
//! `--url`/`--input`, then `FEED_URL`, then the file's `url`/`input`.

use crate::cli::Cli;
use crate::fetch::{FeedLocation, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;
use tracing::{info, instrument};

/// Category used when neither the file nor the CLI names one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Contents of a YAML config file. Every key is optional.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub url: Option<String>,
    pub input: Option<String>,
    pub category: Option<String>,
    pub json_output_dir: Option<String>,
    pub markdown_output_dir: Option<String>,
    pub max_retries: Option<usize>,
    pub base_delay_ms: Option<u64>,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub location: FeedLocation,
    pub category: String,
    pub json_output_dir: String,
    pub markdown_output_dir: Option<String>,
    pub max_retries: usize,
    pub base_delay: Duration,
}

/// Parse a YAML config document.
pub fn parse_config(yaml: &str) -> Result<FileConfig, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

/// Load and parse the YAML config file at `path`.
#[instrument(level = "info")]
pub async fn load_config(path: &str) -> Result<FileConfig, Box<dyn Error>> {
    let yaml = tokio::fs::read_to_string(path).await?;
    let config = parse_config(&yaml)?;
    info!(path, "Loaded configuration");
    Ok(config)
}

impl Settings {
    /// Merge CLI arguments over file settings.
    ///
    /// `env_url` is the value of [`crate::cli::FEED_URL_ENV`], if set.
    ///
    /// # Errors
    ///
    /// Fails when no feed location or no JSON output directory results, or
    /// when both a URL and an input file are given.
    pub fn resolve(
        cli: Cli,
        env_url: Option<String>,
        file: FileConfig,
    ) -> Result<Settings, Box<dyn Error>> {
        // A location on the command line replaces the file's, whichever kind it is.
        let (url, input) = if cli.url.is_some() || cli.input.is_some() {
            (cli.url, cli.input)
        } else if let Some(url) = env_url.filter(|url| !url.trim().is_empty()) {
            (Some(url), None)
        } else {
            (file.url, file.input)
        };
        let location = match (url, input) {
            (Some(url), None) => FeedLocation::Url(url),
            (None, Some(path)) => FeedLocation::File(path),
            (Some(_), Some(_)) => return Err("set either a feed url or an input file, not both".into()),
            (None, None) => return Err("no feed url or input file configured".into()),
        };

        let json_output_dir = cli
            .json_output_dir
            .or(file.json_output_dir)
            .ok_or("no JSON output directory configured")?;

        Ok(Settings {
            location,
            category: cli
                .category
                .or(file.category)
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
            json_output_dir,
            markdown_output_dir: cli.markdown_output_dir.or(file.markdown_output_dir),
            max_retries: cli
                .max_retries
                .or(file.max_retries)
                .unwrap_or(DEFAULT_MAX_RETRIES),
            base_delay: file
                .base_delay_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_BASE_DELAY),
        })
    }
}
