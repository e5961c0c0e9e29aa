//! # Sheet News
//!
//! Normalizes the loosely structured CSV that spreadsheet tools export for a
//! hand-maintained news feed into clean, typed [`Article`] records.
//!
//! Spreadsheet feeds are edited by people: commas inside quoted cells, stray
//! blank lines, mixed date formats, rows without links. The pipeline tolerates
//! all of that without panicking and without letting a broken row through.
//!
//! ## Usage
//!
//! ```
//! use sheet_news::{normalize_feed, TracingSink};
//!
//! let csv = "Title,Date,Image URL,Article Summary/Content,Article URL,Source\n\
//!            Breaking News,7/28/2024,,A city event.,https://example.com/a,City Times";
//!
//! let articles = normalize_feed(csv, "general", &TracingSink).unwrap();
//! assert_eq!(articles[0].published_at_iso(), "2024-07-28T00:00:00.000Z");
//! ```
//!
//! ## Architecture
//!
//! - [`pipeline`]: tokenizer, header resolver, date normalizer, record
//!   materializer and the [`normalize_feed`] orchestrator
//! - [`diagnostics`]: the injected sink that receives every warning
//! - [`fetch`], [`config`], [`cli`], [`outputs`]: the host side used by the
//!   `sheet_news` binary to obtain documents and write results

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod pipeline;
pub mod utils;

pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticsSink, NullSink, TracingSink};
pub use error::{FeedError, SkipReason};
pub use models::{Article, FeedPage, Field};
pub use pipeline::normalize_feed;
