//! Splits raw feed text into rows of string fields.
//!
//! The accepted dialect is the one spreadsheet exports produce:
//! - one record per physical line (fields never span lines)
//! - `,` separates fields outside a quoted span
//! - `"` opens and closes a quoted span, and `""` inside one is a literal `"`
//! - `\r` is dropped and every field is trimmed
//!
//! A leading UTF-8 byte order mark (as written by Excel's "CSV UTF-8") is
//! dropped before the first line is read.
//!
//! Blank lines, and lines whose fields are all empty, produce no row.
//! An unterminated quote is closed implicitly at the end of its line, so any
//! commas after it belong to the open field.

use crate::models::RawRow;

/// U+FEFF, which `str::trim` leaves in place.
pub const BYTE_ORDER_MARK: char = '\u{feff}';

/// Tokenize a whole document into rows, dropping blank ones.
pub fn tokenize(text: &str) -> Vec<RawRow> {
    text.strip_prefix(BYTE_ORDER_MARK)
        .unwrap_or(text)
        .split('\n')
        .map(tokenize_line)
        .filter(|row| row.iter().any(|field| !field.is_empty()))
        .collect()
}

/// Tokenize a single physical line into trimmed fields.
pub fn tokenize_line(line: &str) -> RawRow {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                chars.next();
                current.push('"');
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            '\r' => {}
            other => current.push(other),
        }
    }
    fields.push(current.trim().to_string());

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Quote a value the way a spreadsheet export would.
    fn quote(value: &str) -> String {
        format!("\"{}\"", value.replace('"', "\"\""))
    }

    #[test]
    fn test_simple_line() {
        assert_eq!(
            tokenize_line("Title,Date,Source"),
            vec!["Title", "Date", "Source"]
        );
    }

    #[test]
    fn test_fields_are_trimmed_and_cr_stripped() {
        assert_eq!(
            tokenize_line("  Breaking News , 7/28/2024 ,City Times\r"),
            vec!["Breaking News", "7/28/2024", "City Times"]
        );
    }

    #[test]
    fn test_quoted_values_survive_tokenization() {
        let values = [
            "Markets, again",
            r#"He said "hi""#,
            r#""Quoted", with comma"#,
            r#"a""b"#,
            "plain",
        ];
        for value in values {
            let line = format!("{},after", quote(value));
            assert_eq!(tokenize_line(&line), vec![value, "after"], "value {value:?}");
        }
    }

    #[test]
    fn test_empty_fields_are_kept() {
        assert_eq!(tokenize_line("a,,c,"), vec!["a", "", "c", ""]);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest_of_line() {
        assert_eq!(
            tokenize_line(r#"title,"open, never closed,last"#),
            vec!["title", "open, never closed,last"]
        );
    }

    #[test]
    fn test_blank_and_empty_rows_are_dropped() {
        let rows = tokenize("a,b\n\n   \n,,\r\n \" \" , \nc,d\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_crlf_document() {
        let rows = tokenize("Title,Source\r\nHello,World\r\n");
        assert_eq!(rows, vec![vec!["Title", "Source"], vec!["Hello", "World"]]);
    }

    #[test]
    fn test_leading_byte_order_mark_is_dropped() {
        let rows = tokenize("\u{feff}Title,Source\r\nHello,World\r\n");
        assert_eq!(rows, vec![vec!["Title", "Source"], vec!["Hello", "World"]]);
        assert!(tokenize("\u{feff}").is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("\n\n").is_empty());
    }
}
