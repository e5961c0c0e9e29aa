//! Error types for the normalization pipeline.
//!
//! There are two tiers:
//! - [`FeedError`]: document-level failures that make the whole feed unusable
//! - [`SkipReason`]: row-level problems that drop a single row and are only
//!   ever reported as diagnostics

use crate::models::Field;
use thiserror::Error;

/// A failure that rejects the whole document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedError {
    /// The header row lacks one or more required columns.
    #[error("missing required columns: {}", join_fields(.missing))]
    MissingColumns { missing: Vec<Field> },
}

/// Why a data row was left out of the output.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    #[error("missing required field: {0}")]
    MissingRequiredField(Field),

    #[error("placeholder url")]
    PlaceholderUrl,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
