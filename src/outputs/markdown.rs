//! Markdown rendering of a feed page as a list of article cards.
//!
//! Each card shows the linked headline, the publication date (left out when
//! the article fell back to the epoch sentinel), the lead image if any, the
//! summary, and the source with the link's host:
//!
//! ```text
//! <a id="breaking-news"></a>
//! ### [Breaking News](https://example.com/a)
//!
//! *Jul 28, 2024*
//!
//! ![Breaking News](https://example.com/a.jpg)
//!
//! A city event.
//!
//! `City Times` <small>example.com</small>
//! ```

use crate::models::{Article, FeedPage};
use crate::outputs::json::file_stem;
use crate::utils::{slugify_title, upcase};
use std::error::Error;
use std::fmt::Write;
use std::path::PathBuf;
use tokio::fs;
use tracing::{info, instrument};

/// Render the whole page.
pub fn feed_page_to_markdown(feed_page: &FeedPage) -> String {
    let mut md = String::new();
    let _ = writeln!(
        md,
        "# {} News - {}\n",
        upcase(&feed_page.category),
        feed_page.local_date
    );

    if feed_page.articles.is_empty() {
        md.push_str("_No articles found._\n");
        return md;
    }

    for article in &feed_page.articles {
        md.push_str(&article_to_markdown(article));
        md.push('\n');
    }
    md
}

/// Render a single card.
pub fn article_to_markdown(article: &Article) -> String {
    let mut md = String::new();
    let _ = writeln!(md, "<a id=\"{}\"></a>", slugify_title(&article.title));
    let _ = writeln!(md, "### [{}]({})\n", escape(&article.title), article.url);

    if !article.has_unknown_date() {
        let _ = writeln!(md, "*{}*\n", article.published_at.format("%b %-d, %Y"));
    }

    if let Some(image_url) = &article.image_url {
        let _ = writeln!(md, "![{}]({})\n", escape(&article.title), image_url);
    }

    if article.description.is_empty() {
        md.push_str("_No description available._\n\n");
    } else {
        let _ = writeln!(md, "{}\n", article.description);
    }

    let host = article
        .link_host()
        .map(|host| format!(" <small>{}</small>", host))
        .unwrap_or_default();
    let _ = writeln!(md, "`{}`{}", article.source, host);
    md
}

/// Write the rendered page to `{markdown_output_dir}/{date}_{category}.md`.
#[instrument(level = "info", skip_all, fields(%markdown_output_dir))]
pub async fn write_feed_markdown(
    feed_page: &FeedPage,
    markdown_output_dir: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    fs::create_dir_all(markdown_output_dir).await?;
    let path = PathBuf::from(markdown_output_dir).join(format!(
        "{}_{}.md",
        feed_page.local_date,
        file_stem(&feed_page.category)
    ));

    fs::write(&path, feed_page_to_markdown(feed_page)).await?;
    info!(path = %path.display(), "Wrote feed Markdown");
    Ok(path)
}

/// Keep titles from breaking out of link text.
fn escape(text: &str) -> String {
    text.replace('[', "\\[").replace(']', "\\]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::fallback_instant;
    use chrono::{TimeZone, Utc};

    fn article() -> Article {
        Article {
            title: "Breaking News".to_string(),
            url: "https://example.com/a".to_string(),
            source: "City Times".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 7, 28, 10, 30, 0).unwrap(),
            description: "A city event.".to_string(),
            image_url: Some("https://example.com/a.jpg".to_string()),
        }
    }

    #[test]
    fn test_article_card() {
        let md = article_to_markdown(&article());
        assert!(md.contains("<a id=\"breaking-news\"></a>"));
        assert!(md.contains("### [Breaking News](https://example.com/a)"));
        assert!(md.contains("*Jul 28, 2024*"));
        assert!(md.contains("![Breaking News](https://example.com/a.jpg)"));
        assert!(md.contains("A city event."));
        assert!(md.contains("`City Times` <small>example.com</small>"));
    }

    #[test]
    fn test_card_without_date_or_description() {
        let mut a = article();
        a.published_at = fallback_instant();
        a.description.clear();
        a.image_url = None;
        a.title = "[Update] Road closed".to_string();

        let md = article_to_markdown(&a);
        assert!(!md.contains("1970"));
        assert!(!md.contains("!["));
        assert!(md.contains("_No description available._"));
        assert!(md.contains("### [\\[Update\\] Road closed](https://example.com/a)"));
    }

    #[test]
    fn test_feed_page_markdown() {
        let page = FeedPage {
            category: "technology".to_string(),
            origin: "feed.csv".to_string(),
            local_date: "2024-07-28".to_string(),
            local_time: "10:30:00".to_string(),
            articles: vec![article()],
        };
        let md = feed_page_to_markdown(&page);
        assert!(md.starts_with("# Technology News - 2024-07-28\n"));
        assert!(md.contains("### [Breaking News]"));

        let empty = FeedPage {
            articles: vec![],
            ..page
        };
        assert!(feed_page_to_markdown(&empty).contains("_No articles found._"));
    }

    #[tokio::test]
    async fn test_write_feed_markdown() {
        let dir = std::env::temp_dir().join(format!("sheet_news_md_{}", std::process::id()));
        let page = FeedPage {
            category: "general".to_string(),
            origin: "feed.csv".to_string(),
            local_date: "2024-07-28".to_string(),
            local_time: "10:30:00".to_string(),
            articles: vec![article()],
        };

        let path = write_feed_markdown(&page, &dir.to_string_lossy()).await.unwrap();
        assert_eq!(path, dir.join("2024-07-28_general.md"));
        assert!(std::fs::read_to_string(&path).unwrap().contains("Breaking News"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
