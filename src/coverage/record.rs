//! Line parser for fixed-column coverage rows.
//!
//! Each non-blank line of a dump has the shape
//!
//! ```text
//! <overall> <line> <condition> <toggle> <fsm> <branch> <name...>
//! ```
//!
//! with arbitrary leading indentation. Malformed rows are never fatal: they
//! are reported as a [`LineOutcome`] variant and dropped by the caller, so a
//! partially broken dump still produces a best-effort tree.

use super::types::{CoverageMetrics, CoverageRecord, ParseOptions};

/// Minimum number of whitespace-separated tokens on a usable row.
pub const MIN_TOKENS: usize = CoverageMetrics::COLUMNS + 1;

/// Result of looking at a single input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// A well-formed row
    Record(CoverageRecord),
    /// Empty or whitespace-only line
    Blank,
    /// Fewer than [`MIN_TOKENS`] tokens
    TooFewFields { found: usize },
    /// One of the six metric columns is not a finite decimal number
    InvalidNumber { column: usize, token: String },
}

impl LineOutcome {
    pub fn into_record(self) -> Option<CoverageRecord> {
        match self {
            LineOutcome::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Parse one line into a record, dropping anything malformed.
///
/// # Example
///
/// ```ignore
/// use covmap::coverage::record::parse_record_line;
/// use covmap::coverage::ParseOptions;
///
/// let record = parse_record_line("  60.0 70 80 90 100 50 core", &ParseOptions::default())
///     .unwrap();
/// assert_eq!(record.indent_depth, 2);
/// assert_eq!(record.name, "core");
/// ```
pub fn parse_record_line(line: &str, options: &ParseOptions) -> Option<CoverageRecord> {
    classify_line(line, options).into_record()
}

/// Parse one line and report why it was dropped, if it was.
pub fn classify_line(line: &str, options: &ParseOptions) -> LineOutcome {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() < MIN_TOKENS {
        return LineOutcome::TooFewFields {
            found: tokens.len(),
        };
    }

    let mut columns = [0.0; CoverageMetrics::COLUMNS];
    for (column, token) in tokens.iter().take(CoverageMetrics::COLUMNS).enumerate() {
        match parse_metric(token) {
            Some(value) => columns[column] = value,
            None => {
                return LineOutcome::InvalidNumber {
                    column,
                    token: (*token).to_string(),
                }
            }
        }
    }

    let metrics = CoverageMetrics::from_columns(columns);
    LineOutcome::Record(CoverageRecord {
        name: tokens[CoverageMetrics::COLUMNS..].join(" "),
        indent_depth: indent_depth(line, options.tab_width),
        lines_covered: scaled_lines(metrics.line, options.lines_scale),
        total_lines: options.total_lines,
        metrics,
    })
}

/// Count leading indentation columns.
///
/// Spaces count one column each; tabs count `tab_width` columns, and a
/// `tab_width` of zero ends the indentation run at the first tab.
pub fn indent_depth(line: &str, tab_width: usize) -> usize {
    let mut depth = 0;
    for ch in line.chars() {
        match ch {
            ' ' => depth += 1,
            '\t' if tab_width > 0 => depth += tab_width,
            _ => break,
        }
    }
    depth
}

/// Locale-invariant decimal parse. Only `.` is accepted as the separator and
/// non-finite spellings (`NaN`, `inf`) are rejected.
fn parse_metric(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|value| value.is_finite())
}

// Float-to-int `as` saturates: negatives land on 0.
fn scaled_lines(line_metric: f64, scale: f64) -> u64 {
    (line_metric * scale).floor() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn test_parses_top_level_row() {
        let record =
            parse_record_line("75.23 82.15 68.90 91.45 88.20 79.60 top", &options()).unwrap();

        assert_eq!(record.name, "top");
        assert_eq!(record.indent_depth, 0);
        assert_eq!(record.metrics.overall, 75.23);
        assert_eq!(record.metrics.branch, 79.60);
        assert_eq!(record.total_lines, 10_000);
    }

    #[test]
    fn test_indent_counts_leading_spaces() {
        let record = parse_record_line("    1 2 3 4 5 6 leaf", &options()).unwrap();
        assert_eq!(record.indent_depth, 4);
    }

    #[test]
    fn test_multiple_separators_between_fields() {
        let record = parse_record_line("1   2  3 4     5 6   name", &options()).unwrap();
        assert_eq!(record.metrics.fsm, 5.0);
        assert_eq!(record.name, "name");
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        assert_eq!(classify_line("", &options()), LineOutcome::Blank);
        assert_eq!(classify_line("   \t  ", &options()), LineOutcome::Blank);
    }

    #[test]
    fn test_too_few_fields_dropped() {
        assert_eq!(
            classify_line("1 2 3 4 5", &options()),
            LineOutcome::TooFewFields { found: 5 }
        );
        assert!(parse_record_line("1 2 3 4 5 6", &options()).is_none());
    }

    #[test]
    fn test_invalid_number_reports_column() {
        assert_eq!(
            classify_line("1 2 x 4 5 6 name", &options()),
            LineOutcome::InvalidNumber {
                column: 2,
                token: "x".to_string()
            }
        );
    }

    #[test]
    fn test_comma_decimal_separator_is_rejected() {
        assert!(parse_record_line("1,5 2 3 4 5 6 name", &options()).is_none());
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        assert!(parse_record_line("NaN 2 3 4 5 6 name", &options()).is_none());
        assert!(parse_record_line("1 inf 3 4 5 6 name", &options()).is_none());
    }

    #[test]
    fn test_trailing_tokens_joined_into_name() {
        let record = parse_record_line("1 2 3 4 5 6 my block name", &options()).unwrap();
        assert_eq!(record.name, "my block name");
    }

    #[test]
    fn test_lines_covered_scaled_from_line_metric() {
        let record = parse_record_line("0 82.5 0 0 0 0 n", &options()).unwrap();
        assert_eq!(record.lines_covered, 82_500);
        assert_eq!(record.total_lines, 10_000);
    }

    #[test]
    fn test_negative_line_metric_saturates_to_zero() {
        let record = parse_record_line("0 -3 0 0 0 0 n", &options()).unwrap();
        assert_eq!(record.lines_covered, 0);
    }

    #[test]
    fn test_custom_scale_and_total() {
        let options = ParseOptions {
            lines_scale: 10.0,
            total_lines: 1000,
            ..ParseOptions::default()
        };
        let record = parse_record_line("0 50 0 0 0 0 n", &options).unwrap();
        assert_eq!(record.lines_covered, 500);
        assert_eq!(record.total_lines, 1000);
    }

    #[test]
    fn test_tabs_expand_to_tab_width() {
        assert_eq!(indent_depth("\t\tx", 2), 4);
        assert_eq!(indent_depth(" \tx", 4), 5);
    }

    #[test]
    fn test_zero_tab_width_stops_at_tab() {
        assert_eq!(indent_depth("  \t  x", 0), 2);
    }
}
