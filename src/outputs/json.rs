//! JSON output generation for the API.
//!
//! Files are organized by date, one per category:
//! ```text
//! json_output_dir/
//! └── 2024-07-28/
//!     └── general.json
//! ```
//!
//! A later run on the same day for the same category replaces the file.

use crate::models::FeedPage;
use crate::utils::slugify_title;
use std::error::Error;
use std::path::PathBuf;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`FeedPage`] to `{json_output_dir}/{date}/{category}.json`.
///
/// Creates the date directory as needed and returns the path written.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_feed_page(
    feed_page: &FeedPage,
    json_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(feed_page)?;

    let full_json_dir = PathBuf::from(json_output_dir).join(&feed_page.local_date);
    info!(full_json_dir = %full_json_dir.display(), "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(full_json_dir = %full_json_dir.display(), error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = full_json_dir.join(format!("{}.json", file_stem(&feed_page.category)));
    info!(path = %output_json_filename.display(), "Writing JSON");
    fs::write(&output_json_filename, json).await?;
    info!(
        path = %output_json_filename.display(),
        articles = feed_page.articles.len(),
        "Wrote JSON API file"
    );

    Ok(output_json_filename)
}

/// Category names become file names, so keep them to slug characters.
pub(crate) fn file_stem(category: &str) -> String {
    match slugify_title(category.trim()) {
        stem if stem.is_empty() => "general".to_string(),
        stem => stem,
    }
}
