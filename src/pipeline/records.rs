//! Builds one [`Article`] from one data row, or says why the row is skipped.

use crate::diagnostics::DiagnosticsSink;
use crate::error::SkipReason;
use crate::models::{Article, Field, PLACEHOLDER_URL, UNKNOWN_SOURCE};
use crate::pipeline::dates::normalize_date;
use crate::pipeline::headers::HeaderMap;

/// Materialize the data row at 1-based position `row`.
///
/// A missing title or url, or a placeholder url, skips the row. A bad date
/// never does; it degrades to the epoch sentinel and is reported to `sink`.
pub fn materialize(
    raw: &[String],
    row: usize,
    headers: &HeaderMap,
    sink: &dyn DiagnosticsSink,
) -> Result<Article, SkipReason> {
    let text = |field: Field| headers.cell(raw, field).unwrap_or("");

    let title = text(Field::Title);
    if title.is_empty() {
        return Err(SkipReason::MissingRequiredField(Field::Title));
    }
    let url = text(Field::Url);
    if url.is_empty() {
        return Err(SkipReason::MissingRequiredField(Field::Url));
    }
    if url == PLACEHOLDER_URL {
        return Err(SkipReason::PlaceholderUrl);
    }

    let published_at = normalize_date(text(Field::Date), row, sink);

    let source = match text(Field::Source) {
        "" => UNKNOWN_SOURCE,
        source => source,
    };
    let image_url = Some(text(Field::ImageUrl))
        .filter(|image| !image.is_empty())
        .map(str::to_string);

    Ok(Article {
        title: title.to_string(),
        url: url.to_string(),
        source: source.to_string(),
        published_at,
        description: text(Field::Summary).to_string(),
        image_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingSink, Diagnostic};
    use crate::pipeline::headers::resolve_headers;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn full_headers() -> HeaderMap {
        resolve_headers(&row(&[
            "Title",
            "Date",
            "Image URL",
            "Article Summary/Content",
            "Article URL",
            "Source",
        ]))
        .unwrap()
    }

    #[test]
    fn test_materializes_complete_row() {
        let sink = CollectingSink::new();
        let data = row(&[
            "Breaking News",
            "7/28/2024",
            "https://picsum.photos/400",
            "A city event.",
            "https://example.com/a",
            "City Times",
        ]);

        let article = materialize(&data, 2, &full_headers(), &sink).unwrap();
        assert_eq!(article.title, "Breaking News");
        assert_eq!(article.url, "https://example.com/a");
        assert_eq!(article.source, "City Times");
        assert_eq!(article.description, "A city event.");
        assert_eq!(article.image_url.as_deref(), Some("https://picsum.photos/400"));
        assert_eq!(article.published_at_iso(), "2024-07-28T00:00:00.000Z");
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_missing_title_or_url_skips() {
        let sink = CollectingSink::new();
        let headers = full_headers();

        let no_title = row(&["", "7/28/2024", "", "", "https://example.com/a", "X"]);
        assert_eq!(
            materialize(&no_title, 2, &headers, &sink),
            Err(SkipReason::MissingRequiredField(Field::Title))
        );

        let no_url = row(&["Hello", "7/28/2024", "", "", "   ", "X"]);
        assert_eq!(
            materialize(&no_url, 3, &headers, &sink),
            Err(SkipReason::MissingRequiredField(Field::Url))
        );
    }

    #[test]
    fn test_placeholder_url_skips() {
        let sink = CollectingSink::new();
        let data = row(&["Hello", "7/28/2024", "", "", "#", "X"]);
        assert_eq!(
            materialize(&data, 2, &full_headers(), &sink),
            Err(SkipReason::PlaceholderUrl)
        );
    }

    #[test]
    fn test_defaults_for_empty_optional_cells() {
        let sink = CollectingSink::new();
        let data = row(&["Hello", "", "", "", "https://example.com/a", ""]);

        let article = materialize(&data, 4, &full_headers(), &sink).unwrap();
        assert_eq!(article.source, UNKNOWN_SOURCE);
        assert_eq!(article.description, "");
        assert_eq!(article.image_url, None);
        assert!(article.has_unknown_date());
        assert_eq!(sink.events(), vec![Diagnostic::MissingDate { row: 4 }]);
    }

    #[test]
    fn test_absent_optional_columns() {
        let sink = CollectingSink::new();
        let headers = resolve_headers(&row(&["Title", "Date", "Article URL", "Source"])).unwrap();
        let data = row(&["Hello", "2024-07-28", "https://example.com/a", "Wire"]);

        let article = materialize(&data, 2, &headers, &sink).unwrap();
        assert_eq!(article.description, "");
        assert_eq!(article.image_url, None);
        assert_eq!(article.source, "Wire");
    }

    #[test]
    fn test_bad_date_does_not_skip() {
        let sink = CollectingSink::new();
        let data = row(&["Hello", "someday", "", "", "https://example.com/a", "X"]);

        let article = materialize(&data, 5, &full_headers(), &sink).unwrap();
        assert!(article.has_unknown_date());
        assert_eq!(
            sink.events(),
            vec![Diagnostic::UnparseableDate {
                row: 5,
                raw: "someday".to_string()
            }]
        );
    }
}
