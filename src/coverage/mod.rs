//! Indented coverage dumps to hierarchy trees.
//!
//! A dump is a flat text listing, one row per design unit, where nesting is
//! expressed only by leading indentation:
//!
//! ```text
//! 75.23 82.15 68.90 91.45 88.20 79.60 top
//!   60.00 70.00 55.00 80.00 90.00 65.00 core
//!     40.00 45.00 30.00 60.00 70.00 50.00 alu
//! ```
//!
//! # Module Structure
//!
//! - [`types`] - Records, metrics and parse options (pure data)
//! - [`record`] - Single-line parser (pure)
//! - [`resolver`] - Indentation to dotted path inference (pure)
//! - [`tree`] - Arena-backed tree assembly (pure)
//! - [`loader`] - Pipeline composition and the file I/O boundary
//!
//! ```text
//!   text ──> record ──> resolver ──> tree ──> HierarchyNode
//!                                      ↑
//!                                   loader (composition, I/O)
//! ```
//!
//! Nothing in this module returns an error for malformed input. Bad rows are
//! dropped and counted, unresolvable parents fall back to the root.
//!
//! # Quick Start
//!
//! ```ignore
//! use covmap::coverage::{build_hierarchy, LoadOptions};
//!
//! let tree = build_hierarchy(&text, &LoadOptions::default());
//! for (depth, node) in tree.root.walk() {
//!     println!("{:indent$}{} {:.1}%", "", node.name, node.coverage_percentage, indent = depth * 2);
//! }
//! ```

pub mod loader;
pub mod record;
pub mod resolver;
pub mod tree;
pub mod types;

pub use loader::{
    build_hierarchy, build_hierarchy_from_bytes, load_hierarchy_file, parse_records,
    CoverageTree, LoadOptions, LoadStats,
};
pub use record::{classify_line, parse_record_line, LineOutcome};
pub use resolver::{resolve_paths, HierarchyResolver};
pub use tree::{BuildStats, HierarchyNode, TreeBuilder, TreeOptions};
pub use types::{CoverageMetrics, CoverageRecord, ParseOptions, ResolvedRecord};
