//! Normalizes the hand-typed dates found in spreadsheet feeds.
//!
//! Every input ends up as a UTC instant. Inputs are tried against an ordered
//! list of formats and the first one that parses wins, so the order is also
//! the tie-break between ambiguous layouts: a numeric `7/4/2024` is read as
//! month/day/year (July 4th), never day/month/year.
//!
//! # Formats, in priority order
//!
//! | Layout | Example |
//! |--------|---------|
//! | `M/d/yyyy` | `7/28/2024` |
//! | `M/d/yy` | `7/28/24` |
//! | `M-d-yyyy` | `7-28-2024` |
//! | `M.d.yyyy` | `7.28.2024` |
//! | ISO calendar date | `2024-07-28` |
//! | ISO date-time with offset | `2024-07-28T10:30:00.250Z`, `2024-07-28T12:30:00+02:00` |
//! | ISO date-time, compact offset | `2024-07-28T10:30:00+0000` |
//! | ISO date-time, no offset | `2024-07-28T10:30:00`, `2024-07-28T10:30` |
//! | SQL style | `2024-07-28 10:30:00` |
//! | Compact | `20240728` |
//! | Long form | `July 28, 2024`, `Jul 28, 2024 3:30 PM`, `July 28, 2024 15:30` |
//!
//! When none of these match, a single free-form pass strips weekday names,
//! ordinal suffixes and filler words and then tries RFC 2822 and a few loose
//! layouts, including spreadsheet date-times such as `7/28/2024 10:30` and
//! `2024-07-28 10:30`. Inputs without an offset are taken to be UTC.
//!
//! Anything still unparsed, and any empty input, becomes the epoch sentinel
//! and is reported to the [`DiagnosticsSink`].

use crate::diagnostics::{Diagnostic, DiagnosticsSink};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// A single layout the normalizer knows how to read.
#[derive(Debug, Clone, Copy)]
enum DateFormat {
    /// Numeric month/day/year with a fixed separator and an exact year width.
    MonthDayYear { separator: char, year_digits: usize },
    /// A calendar date with no time, read as midnight UTC.
    Date(&'static str),
    /// A date and time without an offset, read as UTC.
    DateTime(&'static str),
    /// A date and time carrying an explicit offset in `chrono` syntax.
    OffsetDateTime(&'static str),
    /// RFC 3339, accepting `Z` or `±hh:mm` and an optional fraction.
    Rfc3339,
}

const CANDIDATES: &[DateFormat] = &[
    DateFormat::MonthDayYear { separator: '/', year_digits: 4 },
    DateFormat::MonthDayYear { separator: '/', year_digits: 2 },
    DateFormat::MonthDayYear { separator: '-', year_digits: 4 },
    DateFormat::MonthDayYear { separator: '.', year_digits: 4 },
    DateFormat::Date("%Y-%m-%d"),
    DateFormat::Rfc3339,
    DateFormat::OffsetDateTime("%Y-%m-%dT%H:%M:%S%.f%z"),
    // %.f also accepts a missing fraction
    DateFormat::DateTime("%Y-%m-%dT%H:%M:%S%.f"),
    DateFormat::DateTime("%Y-%m-%dT%H:%M"),
    DateFormat::DateTime("%Y-%m-%d %H:%M:%S%.f"),
    DateFormat::Date("%Y%m%d"),
    DateFormat::Date("%B %d, %Y"),
    DateFormat::DateTime("%B %d, %Y %I:%M %p"),
    DateFormat::DateTime("%B %d, %Y %H:%M"),
];

/// Layouts tried against the cleaned-up text in the free-form pass.
const FREE_FORM_LAYOUTS: &[DateFormat] = &[
    DateFormat::Date("%B %d %Y"),
    DateFormat::Date("%d %B %Y"),
    DateFormat::Date("%d-%B-%Y"),
    DateFormat::Date("%Y/%m/%d"),
    DateFormat::DateTime("%B %d %Y %I:%M %p"),
    DateFormat::DateTime("%B %d %Y %H:%M"),
    DateFormat::DateTime("%B %d %Y %H:%M:%S"),
    DateFormat::DateTime("%d %B %Y %I:%M %p"),
    DateFormat::DateTime("%d %B %Y %H:%M"),
    DateFormat::DateTime("%d %B %Y %H:%M:%S"),
    DateFormat::DateTime("%Y/%m/%d %H:%M"),
    DateFormat::DateTime("%Y/%m/%d %H:%M:%S"),
    // Google Sheets date-time cells
    DateFormat::DateTime("%m/%d/%Y %H:%M"),
    DateFormat::DateTime("%m/%d/%Y %H:%M:%S"),
    DateFormat::DateTime("%m/%d/%Y %I:%M %p"),
    DateFormat::DateTime("%m/%d/%Y %I:%M:%S %p"),
    DateFormat::DateTime("%Y-%m-%d %H:%M"),
];

static WEEKDAY_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(mon|tue|wed|thu|fri|sat|sun)[a-z]*\.?,?\s+").unwrap()
});
static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(st|nd|rd|th)\b").unwrap());
static FILLER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\s+at\s+|,").unwrap());
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

impl DateFormat {
    /// Try this layout against `input`, which is already trimmed.
    fn attempt(self, input: &str) -> Option<DateTime<Utc>> {
        match self {
            DateFormat::MonthDayYear {
                separator,
                year_digits,
            } => month_day_year(input, separator, year_digits).map(at_midnight),
            DateFormat::Date(fmt) => NaiveDate::parse_from_str(input, fmt).ok().map(at_midnight),
            DateFormat::DateTime(fmt) => NaiveDateTime::parse_from_str(input, fmt)
                .ok()
                .map(|naive| naive.and_utc()),
            DateFormat::OffsetDateTime(fmt) => DateTime::parse_from_str(input, fmt)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
            DateFormat::Rfc3339 => DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// The instant substituted for missing or unreadable dates.
pub fn fallback_instant() -> DateTime<Utc> {
    // The default UTC instant is the Unix epoch.
    DateTime::default()
}

/// Normalize the date cell of row `row`, never failing.
///
/// Empty input and unparseable input both yield [`fallback_instant`]; each
/// case is reported to `sink` with the row position.
pub fn normalize_date(raw: &str, row: usize, sink: &dyn DiagnosticsSink) -> DateTime<Utc> {
    let input = raw.trim();
    if input.is_empty() {
        sink.emit(Diagnostic::MissingDate { row });
        return fallback_instant();
    }

    match parse_date(input) {
        Some(instant) => instant,
        None => {
            sink.emit(Diagnostic::UnparseableDate {
                row,
                raw: input.to_string(),
            });
            fallback_instant()
        }
    }
}

/// Parse `input` with the ordered candidates, then the free-form pass.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    CANDIDATES
        .iter()
        .find_map(|format| format.attempt(input))
        .or_else(|| parse_free_form(input))
}

fn parse_free_form(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }

    let cleaned = clean_free_form(input);
    FREE_FORM_LAYOUTS
        .iter()
        .find_map(|format| format.attempt(&cleaned))
}

/// "Sunday, July 28th, 2024 at 3:30 PM" -> "July 28 2024 3:30 PM"
fn clean_free_form(input: &str) -> String {
    let text = WEEKDAY_PREFIX.replace(input, "");
    let text = ORDINAL_SUFFIX.replace_all(&text, "$1");
    let text = FILLER.replace_all(&text, " ");
    WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

fn month_day_year(input: &str, separator: char, year_digits: usize) -> Option<NaiveDate> {
    let mut parts = input.split(separator);
    let (month, day, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some()
        || !is_digits(month, 1, 2)
        || !is_digits(day, 1, 2)
        || !is_digits(year, year_digits, year_digits)
    {
        return None;
    }

    let mut year: i32 = year.parse().ok()?;
    if year_digits == 2 {
        // Same pivot as chrono's %y.
        year += if year < 70 { 2000 } else { 1900 };
    }
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn is_digits(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit())
}

fn at_midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
