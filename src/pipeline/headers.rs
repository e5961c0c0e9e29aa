//! Resolves the header row into column positions for each [`Field`].

use crate::error::FeedError;
use crate::models::Field;

/// Column index of each semantic field within a row.
///
/// Required fields always resolve; [`Field::ImageUrl`] and [`Field::Summary`]
/// may be unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderMap {
    title: usize,
    date: usize,
    image_url: Option<usize>,
    summary: Option<usize>,
    url: usize,
    source: usize,
}

impl HeaderMap {
    /// Column index for `field`, if the document has that column.
    pub fn index(&self, field: Field) -> Option<usize> {
        match field {
            Field::Title => Some(self.title),
            Field::Date => Some(self.date),
            Field::ImageUrl => self.image_url,
            Field::Summary => self.summary,
            Field::Url => Some(self.url),
            Field::Source => Some(self.source),
        }
    }

    /// The trimmed cell for `field` in `row`.
    ///
    /// Returns `None` when the column is absent from the document. A row
    /// shorter than the header reads as an empty cell.
    pub fn cell<'a>(&self, row: &'a [String], field: Field) -> Option<&'a str> {
        self.index(field)
            .map(|idx| row.get(idx).map(|cell| cell.trim()).unwrap_or(""))
    }
}

/// Build a [`HeaderMap`] from the first row of a document.
///
/// Header cells are trimmed and lower-cased, then matched exactly against
/// [`Field::header_name`]. The first matching column wins.
///
/// # Errors
///
/// [`FeedError::MissingColumns`] naming every required field that has no column.
pub fn resolve_headers(header_row: &[String]) -> Result<HeaderMap, FeedError> {
    let normalized: Vec<String> = header_row
        .iter()
        .map(|cell| cell.trim().to_lowercase())
        .collect();
    let find = |field: Field| normalized.iter().position(|cell| cell == field.header_name());

    match (
        find(Field::Title),
        find(Field::Date),
        find(Field::Url),
        find(Field::Source),
    ) {
        (Some(title), Some(date), Some(url), Some(source)) => Ok(HeaderMap {
            title,
            date,
            image_url: find(Field::ImageUrl),
            summary: find(Field::Summary),
            url,
            source,
        }),
        _ => Err(FeedError::MissingColumns {
            missing: Field::ALL
                .into_iter()
                .filter(|field| field.is_required() && find(*field).is_none())
                .collect(),
        }),
    }
}
