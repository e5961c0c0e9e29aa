//! Structured diagnostics emitted by the normalization pipeline.
//!
//! The pipeline never writes to a fixed output channel. Every warning or
//! failure it wants to report is handed to a [`DiagnosticsSink`] supplied by
//! the caller:
//!
//! - [`TracingSink`] forwards events to `tracing` (used by the binary)
//! - [`CollectingSink`] keeps events in memory so tests can assert on them
//! - [`NullSink`] discards everything

use crate::error::SkipReason;
use crate::models::Field;
use crate::utils::truncate_for_log;
use std::sync::Mutex;
use tracing::{debug, error, info, warn};

/// A single event reported while normalizing a document.
///
/// Row positions are 1-based over the tokenized rows, so the header is row 1
/// and the first data row is row 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The document was empty or whitespace only.
    EmptyDocument,
    /// The document had a header but no data rows (or nothing at all).
    NoDataRows { rows: usize },
    /// The header row lacks required columns; the document is rejected.
    MissingColumns { missing: Vec<Field> },
    /// A row had no date; the epoch sentinel was used.
    MissingDate { row: usize },
    /// A row's date matched no known format; the epoch sentinel was used.
    UnparseableDate { row: usize, raw: String },
    /// A row was left out of the output.
    RowSkipped { row: usize, reason: SkipReason },
    /// Closing summary of a successful run.
    Normalized { articles: usize, skipped: usize },
}

/// Receiver for pipeline diagnostics.
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, event: Diagnostic);
}

/// Forwards diagnostics to the `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn emit(&self, event: Diagnostic) {
        match event {
            Diagnostic::EmptyDocument => {
                info!("Feed document is empty; no articles")
            }
            Diagnostic::NoDataRows { rows } => {
                warn!(rows, "Feed document has no data rows; skipping")
            }
            Diagnostic::MissingColumns { missing } => {
                let missing = missing.iter().map(|f| f.to_string()).collect::<Vec<_>>();
                error!(?missing, "Feed header is missing required columns")
            }
            Diagnostic::MissingDate { row } => {
                warn!(row, "Row has no date; using epoch fallback")
            }
            Diagnostic::UnparseableDate { row, raw } => {
                warn!(
                    row,
                    raw = %truncate_for_log(&raw, 80),
                    "Could not parse date; using epoch fallback"
                )
            }
            Diagnostic::RowSkipped { row, reason } => {
                warn!(row, %reason, "Skipping row")
            }
            Diagnostic::Normalized { articles, skipped } => {
                debug!(articles, skipped, "Feed normalized")
            }
        }
    }
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events received so far.
    pub fn events(&self) -> Vec<Diagnostic> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl DiagnosticsSink for CollectingSink {
    fn emit(&self, event: Diagnostic) {
        match self.events.lock() {
            Ok(mut events) => events.push(event),
            Err(poisoned) => poisoned.into_inner().push(event),
        }
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn emit(&self, _event: Diagnostic) {}
}
