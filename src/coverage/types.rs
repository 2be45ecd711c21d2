//! Core data types for indented coverage dumps.
//!
//! Pure data definitions shared by the record parser, the hierarchy
//! resolver and the tree builder. Nothing in here performs I/O.
//!
//! # Types
//!
//! - [`CoverageMetrics`] - The six fixed-order metric columns of a row
//! - [`CoverageRecord`] - One parsed input line
//! - [`ResolvedRecord`] - A record paired with its dotted hierarchy path
//! - [`ParseOptions`] - Knobs for line parsing (tab width, line scaling)

use serde::{Deserialize, Serialize};

/// Default multiplier applied to the line metric to derive `lines_covered`.
pub const DEFAULT_LINES_SCALE: f64 = 1000.0;

/// Default denominator reported as `total_lines` for every record.
pub const DEFAULT_TOTAL_LINES: u64 = 10_000;

/// Default number of spaces a leading tab expands to.
pub const DEFAULT_TAB_WIDTH: usize = 2;

/// The six metric columns of a coverage row, in file order.
///
/// All values are percentages and are expected to fall in `[0, 100]`.
/// Values outside that range are kept as written; the severity classifier
/// clamps at display time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageMetrics {
    /// Overall score (column 1)
    pub overall: f64,
    /// Line coverage (column 2)
    pub line: f64,
    /// Condition coverage (column 3)
    pub condition: f64,
    /// Toggle coverage (column 4)
    pub toggle: f64,
    /// FSM coverage (column 5)
    pub fsm: f64,
    /// Branch coverage (column 6)
    pub branch: f64,
}

impl CoverageMetrics {
    /// Number of numeric columns preceding the name on every row.
    pub const COLUMNS: usize = 6;

    /// Build metrics from the six columns in file order.
    pub fn from_columns(columns: [f64; Self::COLUMNS]) -> Self {
        let [overall, line, condition, toggle, fsm, branch] = columns;
        Self {
            overall,
            line,
            condition,
            toggle,
            fsm,
            branch,
        }
    }
}

/// One parsed input line.
///
/// Records are transient: they exist between parsing and tree building and
/// their order is significant for both parent inference and child order.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRecord {
    /// Trailing name token(s) of the line
    pub name: String,
    /// Count of leading indentation columns (tabs expanded, see [`ParseOptions`])
    pub indent_depth: usize,
    /// Metric columns
    pub metrics: CoverageMetrics,
    /// `floor(line * lines_scale)`
    pub lines_covered: u64,
    /// Constant denominator from [`ParseOptions::total_lines`]
    pub total_lines: u64,
}

impl CoverageRecord {
    /// The overall percentage; the value nodes are coloured by.
    pub fn coverage_percentage(&self) -> f64 {
        self.metrics.overall
    }
}

/// A record together with the dotted path assigned by the resolver.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRecord {
    pub record: CoverageRecord,
    /// Dot-joined ancestor-inclusive path. Never empty: `""` is the root's.
    pub path: String,
    /// Path of the parent the resolver picked; `None` for unindented rows
    /// and for indented rows with no candidate parent.
    pub parent: Option<String>,
}

/// Options controlling how individual lines become records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Columns a leading tab counts for when measuring indentation.
    /// `0` means tabs terminate the indentation run and count for nothing.
    pub tab_width: usize,
    /// Multiplier applied to the line metric to derive `lines_covered`
    pub lines_scale: f64,
    /// Value reported as `total_lines` for every record
    pub total_lines: u64,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            lines_scale: DEFAULT_LINES_SCALE,
            total_lines: DEFAULT_TOTAL_LINES,
        }
    }
}
