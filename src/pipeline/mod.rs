//! The feed normalization pipeline.
//!
//! Turns the raw text of a spreadsheet-exported CSV feed into an ordered list
//! of validated [`Article`]s. The stages run in sequence over an in-memory
//! string and share no state between calls:
//!
//! 1. [`tokenizer`]: raw text into rows of trimmed fields
//! 2. [`headers`]: first row into a column map (the only fatal step)
//! 3. [`dates`]: date cells into UTC instants, falling back to the epoch
//! 4. [`records`]: each data row into an article, or a skip
//!
//! # Failure Policy
//!
//! | Problem | Outcome |
//! |---------|---------|
//! | Empty document, or header only | `Ok` with no articles |
//! | Required header column missing | `Err(FeedError::MissingColumns)` |
//! | Empty title or url, `#` url | Row dropped, [`Diagnostic::RowSkipped`] |
//! | Missing or unreadable date | Epoch sentinel, date diagnostic |

pub mod dates;
pub mod headers;
pub mod records;
pub mod tokenizer;

use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use crate::error::FeedError;
use crate::models::Article;

pub use dates::{fallback_instant, normalize_date, parse_date};
pub use headers::{resolve_headers, HeaderMap};
pub use records::materialize;
pub use tokenizer::tokenize;

/// Normalize a whole feed document.
///
/// The category is the hint the document was requested with. It is accepted so
/// callers can pass it through, but no filtering is applied.
///
/// Articles come back in the order their rows appear in the document. Row
/// positions in diagnostics are 1-based over the tokenized rows, so the
/// header is row 1.
///
/// # Errors
///
/// [`FeedError::MissingColumns`] when the header row lacks title, date,
/// url or source. Every other problem is absorbed and reported to `sink`.
pub fn normalize_feed(
    document: &str,
    _category: &str,
    sink: &dyn DiagnosticsSink,
) -> Result<Vec<Article>, FeedError> {
    if document.trim_start_matches(tokenizer::BYTE_ORDER_MARK).trim().is_empty() {
        sink.emit(Diagnostic::EmptyDocument);
        return Ok(Vec::new());
    }

    let rows = tokenize(document);
    if rows.len() < 2 {
        sink.emit(Diagnostic::NoDataRows { rows: rows.len() });
        return Ok(Vec::new());
    }
    let (header_row, data_rows) = (&rows[0], &rows[1..]);

    let headers = match resolve_headers(header_row) {
        Ok(headers) => headers,
        Err(err) => {
            let FeedError::MissingColumns { missing } = &err;
            sink.emit(Diagnostic::MissingColumns {
                missing: missing.clone(),
            });
            return Err(err);
        }
    };

    let mut articles = Vec::with_capacity(data_rows.len());
    let mut skipped = 0usize;
    for (i, raw) in data_rows.iter().enumerate() {
        let row = i + 2;
        match records::materialize(raw, row, &headers, sink) {
            Ok(article) => articles.push(article),
            Err(reason) => {
                skipped += 1;
                sink.emit(Diagnostic::RowSkipped { row, reason });
            }
        }
    }

    sink.emit(Diagnostic::Normalized {
        articles: articles.len(),
        skipped,
    });
    Ok(articles)
}
