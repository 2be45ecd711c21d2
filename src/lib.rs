// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod coverage;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod severity;

// Re-export commonly used types
pub use crate::coverage::{
    build_hierarchy, build_hierarchy_from_bytes, load_hierarchy_file, CoverageMetrics,
    CoverageRecord, CoverageTree, HierarchyNode, LoadOptions, LoadStats,
};

pub use crate::severity::{
    classify, percentage_to_style_index, Rgb, SeverityBucket, SEVERITY_PALETTE,
};

pub use crate::config::CovmapConfig;
pub use crate::errors::{Error, Result};
