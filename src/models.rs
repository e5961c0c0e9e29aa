//! Data models for normalized feed articles and their host-side envelope.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`RawRow`]: One tokenized line of the source document
//! - [`Field`]: The semantic columns a feed header can name
//! - [`Article`]: A validated record produced by the normalization pipeline
//! - [`FeedPage`]: Collection of articles written out by the host binary
//!
//! Articles serialize with camelCase field names so the JSON matches what the
//! presentation layer reads (`publishedAt`, `imageUrl`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One tokenized line of input, one string per column.
pub type RawRow = Vec<String>;

/// Value substituted when a row's source cell is empty.
pub const UNKNOWN_SOURCE: &str = "Unknown Source";

/// Link value spreadsheet authors use for "no real link yet".
pub const PLACEHOLDER_URL: &str = "#";

/// A semantic column of the feed.
///
/// Each field is matched against a header cell by its [`Field::header_name`]
/// after the cell has been trimmed and lower-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Title,
    Date,
    ImageUrl,
    Summary,
    Url,
    Source,
}

impl Field {
    /// Every field, in the column order spreadsheet exports use.
    pub const ALL: [Field; 6] = [
        Field::Title,
        Field::Date,
        Field::ImageUrl,
        Field::Summary,
        Field::Url,
        Field::Source,
    ];

    /// Normalized header text that selects this field.
    pub fn header_name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Date => "date",
            Field::ImageUrl => "image url",
            Field::Summary => "article summary/content",
            Field::Url => "article url",
            Field::Source => "source",
        }
    }

    /// Whether a document lacking this column must be rejected.
    pub fn is_required(self) -> bool {
        matches!(self, Field::Title | Field::Date | Field::Url | Field::Source)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "title",
            Field::Date => "date",
            Field::ImageUrl => "imageUrl",
            Field::Summary => "summary",
            Field::Url => "url",
            Field::Source => "source",
        };
        f.write_str(name)
    }
}

/// A validated news article ready for display.
///
/// # Invariants
///
/// * `title` and `url` are non-empty and `url` is never [`PLACEHOLDER_URL`]
/// * `published_at` is always a real instant; rows without a usable date carry
///   the Unix epoch instead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// Link to the full article.
    pub url: String,
    /// Publication name, or [`UNKNOWN_SOURCE`].
    pub source: String,
    /// Publication instant in UTC.
    #[serde(with = "iso_millis")]
    pub published_at: DateTime<Utc>,
    /// Short summary of the article; empty when the feed has none.
    pub description: String,
    /// Optional lead image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Article {
    /// `publishedAt` in the canonical wire form, e.g. `2024-07-28T00:00:00.000Z`.
    pub fn published_at_iso(&self) -> String {
        iso_millis::format(&self.published_at)
    }

    /// True when the publication date fell back to the epoch sentinel.
    pub fn has_unknown_date(&self) -> bool {
        self.published_at.timestamp_millis() == 0
    }

    /// Extract the host of the article link.
    /// For example: "https://www.example.com/a" -> "www.example.com"
    pub fn link_host(&self) -> Option<String> {
        url::Url::parse(&self.url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_string))
    }
}

/// The articles from a single feed run, as written by the host binary.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedPage {
    /// The category hint the feed was requested with.
    pub category: String,
    /// Where the raw document came from (URL or file path).
    pub origin: String,
    /// The local date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time of the run.
    pub local_time: String,
    /// Articles in feed order.
    pub articles: Vec<Article>,
}

/// Serde adapter writing instants as RFC 3339 with milliseconds and `Z`.
pub mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(instant: &DateTime<Utc>) -> String {
        instant.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format(instant))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_article() -> Article {
        Article {
            title: "Breaking News".to_string(),
            url: "https://www.example.com/a".to_string(),
            source: "City Times".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 7, 28, 10, 30, 0).unwrap(),
            description: "A city event.".to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_article_serializes_camel_case_with_millis() {
        let json = serde_json::to_string(&sample_article()).unwrap();
        assert!(json.contains(r#""publishedAt":"2024-07-28T10:30:00.000Z""#));
        assert!(json.contains(r#""description":"A city event.""#));
        assert!(!json.contains("imageUrl"));
    }

    #[test]
    fn test_article_with_image_deserializes() {
        let json = r#"{
            "title": "Tech Giant Announces Device",
            "url": "https://example.com/tech",
            "source": "Tech Today",
            "publishedAt": "2024-07-28T09:00:00.000Z",
            "description": "",
            "imageUrl": "https://picsum.photos/400"
        }"#;

        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.image_url.as_deref(), Some("https://picsum.photos/400"));
        assert_eq!(article.published_at_iso(), "2024-07-28T09:00:00.000Z");
    }

    #[test]
    fn test_has_unknown_date() {
        let mut article = sample_article();
        assert!(!article.has_unknown_date());
        article.published_at = DateTime::default();
        assert!(article.has_unknown_date());
    }

    #[test]
    fn test_link_host() {
        assert_eq!(sample_article().link_host(), Some("www.example.com".to_string()));

        let mut article = sample_article();
        article.url = "not a url".to_string();
        assert_eq!(article.link_host(), None);
    }

    #[test]
    fn test_field_header_names() {
        assert_eq!(Field::ImageUrl.header_name(), "image url");
        assert_eq!(Field::Summary.header_name(), "article summary/content");
        assert_eq!(Field::Url.header_name(), "article url");
        let required: Vec<Field> = Field::ALL.into_iter().filter(|f| f.is_required()).collect();
        assert_eq!(required, vec![Field::Title, Field::Date, Field::Url, Field::Source]);
    }

    #[test]
    fn test_feed_page_serialization() {
        let page = FeedPage {
            category: "general".to_string(),
            origin: "feed.csv".to_string(),
            local_date: "2024-07-28".to_string(),
            local_time: "10:30:00".to_string(),
            articles: vec![sample_article()],
        };

        let json = serde_json::to_string(&page).unwrap();
        assert!(json.contains(r#""localDate":"2024-07-28""#));
        assert!(json.contains("Breaking News"));
    }
}
