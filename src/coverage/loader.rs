//! Parse-resolve-build pipeline and its file I/O boundary.
//!
//! [`build_hierarchy`] is pure: text in, finished tree out. The tree is only
//! returned once building has completed, so callers that run the pipeline on
//! a background thread never observe a partial hierarchy.
//! [`load_hierarchy_file`] is the single function here that touches the
//! filesystem.

use super::record::{classify_line, LineOutcome};
use super::resolver::resolve_paths;
use super::tree::{HierarchyNode, TreeBuilder, TreeOptions};
use super::types::{CoverageRecord, ParseOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, info_span, trace};

const UTF8_BOM: &str = "\u{feff}";

/// Options for one load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadOptions {
    #[serde(default)]
    pub parse: ParseOptions,
    #[serde(default)]
    pub tree: TreeOptions,
}

/// Summary of what happened to the input lines of one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadStats {
    pub lines: usize,
    pub records: usize,
    pub blank: usize,
    pub too_few_fields: usize,
    pub invalid_number: usize,
    /// Records attached to the root because their parent path was unknown
    pub attached_to_root: usize,
    pub path_collisions: usize,
}

impl LoadStats {
    /// Non-blank lines that did not become records.
    pub fn dropped(&self) -> usize {
        self.too_few_fields + self.invalid_number
    }
}

/// A finished hierarchy plus the statistics of the load that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageTree {
    pub root: HierarchyNode,
    pub stats: LoadStats,
}

/// Parse every line into records, counting the ones that are dropped.
pub fn parse_records(text: &str, options: &ParseOptions) -> (Vec<CoverageRecord>, LoadStats) {
    let mut stats = LoadStats::default();
    let mut records = Vec::new();

    for (index, line) in text.lines().enumerate() {
        stats.lines += 1;
        match classify_line(line, options) {
            LineOutcome::Record(record) => records.push(record),
            LineOutcome::Blank => stats.blank += 1,
            LineOutcome::TooFewFields { found } => {
                trace!(line = index + 1, found, "dropping row with too few fields");
                stats.too_few_fields += 1;
            }
            LineOutcome::InvalidNumber { column, token } => {
                trace!(line = index + 1, column, token = %token, "dropping row with invalid number");
                stats.invalid_number += 1;
            }
        }
    }

    stats.records = records.len();
    (records, stats)
}

/// Run the whole pipeline over already-decoded text.
pub fn build_hierarchy(text: &str, options: &LoadOptions) -> CoverageTree {
    let _span = info_span!("build_hierarchy").entered();

    let text = text.strip_prefix(UTF8_BOM).unwrap_or(text);
    let (records, mut stats) = parse_records(text, &options.parse);

    let (root, build_stats) =
        TreeBuilder::build_with_options(resolve_paths(records), &options.tree);

    stats.attached_to_root = build_stats.attached_to_root;
    stats.path_collisions = build_stats.path_collisions;

    info!(
        lines = stats.lines,
        records = stats.records,
        dropped = stats.dropped(),
        attached_to_root = stats.attached_to_root,
        "coverage hierarchy built"
    );

    CoverageTree { root, stats }
}

/// Run the pipeline over a raw byte stream (e.g. a downloaded report).
///
/// Invalid UTF-8 sequences are replaced rather than rejected; the affected
/// rows will usually fail number parsing and be dropped like any other
/// malformed row.
pub fn build_hierarchy_from_bytes(bytes: &[u8], options: &LoadOptions) -> CoverageTree {
    build_hierarchy(&String::from_utf8_lossy(bytes), options)
}

/// Read a dump from disk and build its hierarchy.
pub fn load_hierarchy_file(path: &Path, options: &LoadOptions) -> Result<CoverageTree> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read coverage file: {}", path.display()))?;
    Ok(build_hierarchy_from_bytes(&bytes, options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_stats_account_for_every_line() {
        let text = indoc! {"
            50 50 50 50 50 50 top

            1 2 3 4 5 short
              60 x 0 0 0 0 broken
              60 60 60 60 60 60 core
        "};

        let tree = build_hierarchy(text, &LoadOptions::default());
        assert_eq!(
            tree.stats,
            LoadStats {
                lines: 5,
                records: 2,
                blank: 1,
                too_few_fields: 1,
                invalid_number: 1,
                attached_to_root: 0,
                path_collisions: 0,
            }
        );
        assert_eq!(tree.stats.dropped(), 2);
    }

    #[test]
    fn test_bom_is_stripped() {
        let tree = build_hierarchy("\u{feff}1 1 1 1 1 1 top\n", &LoadOptions::default());
        assert_eq!(tree.root.children[0].name, "top");
        assert_eq!(tree.root.children[0].full_path, "top");
    }

    #[test]
    fn test_crlf_line_endings() {
        let tree = build_hierarchy(
            "1 1 1 1 1 1 top\r\n  2 2 2 2 2 2 core\r\n",
            &LoadOptions::default(),
        );
        assert!(tree.root.find("top.core").is_some());
    }

    #[test]
    fn test_invalid_utf8_bytes_do_not_abort() {
        let mut bytes = b"1 1 1 1 1 1 top\n".to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe, b'\n']);
        bytes.extend_from_slice(b"  2 2 2 2 2 2 core\n");

        let tree = build_hierarchy_from_bytes(&bytes, &LoadOptions::default());
        assert_eq!(tree.stats.records, 2);
        assert!(tree.root.find("top.core").is_some());
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_hierarchy_file(
            Path::new("/definitely/not/here.txt"),
            &LoadOptions::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
