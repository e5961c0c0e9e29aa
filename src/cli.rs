//! Command-line interface definitions for Sheet News.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most arguments can be provided via command-line flags or environment
//! variables, and any of them can also come from a YAML file passed with
//! `--config` (see [`crate::config`]).
//!
//! The feed URL variable, [`FEED_URL_ENV`], is not bound to `--url`;
//! [`crate::config::Settings::resolve`] ranks it below `--url` and `--input`.

use clap::Parser;

/// Environment variable holding the feed URL.
pub const FEED_URL_ENV: &str = "FEED_URL";

/// Command-line arguments for the Sheet News binary.
///
/// # Examples
///
/// ```sh
/// # Normalize a published spreadsheet feed
/// sheet_news --url https://docs.example.com/feed.csv -j ./json
///
/// # Normalize a local export and render Markdown cards as well
/// sheet_news --input ./feed.csv -j ./json -m ./markdown --category technology
///
/// # Everything from a config file
/// sheet_news --config ./sheet_news.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// URL of the published CSV feed
    #[arg(short, long, conflicts_with = "input")]
    pub url: Option<String>,

    /// Path to a local CSV export instead of a URL
    #[arg(short, long)]
    pub input: Option<String>,

    /// Category hint passed through with the feed (not used for filtering)
    #[arg(long, env = "FEED_CATEGORY")]
    pub category: Option<String>,

    /// Output directory for the JSON API file
    #[arg(short, long, env = "FEED_JSON_DIR")]
    pub json_output_dir: Option<String>,

    /// Output directory for the Markdown file
    #[arg(short, long, env = "FEED_MARKDOWN_DIR")]
    pub markdown_output_dir: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Retries for a failed HTTP fetch
    #[arg(long)]
    pub max_retries: Option<usize>,
}
