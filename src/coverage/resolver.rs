//! Indentation-based parent inference.
//!
//! A record nested `INDENT_STEP` columns deeper than another is considered
//! its child. The parent is the *most recently seen* record at exactly
//! `indent_depth - INDENT_STEP`, regardless of what was seen in between.
//! This is a last-match rule, not a scope stack: a deeper sibling subtree
//! is not closed when indentation decreases, so unusual indentation can
//! attach a child to a node from an earlier subtree. That behavior is part
//! of the format and is kept as-is.
//!
//! Records with no candidate parent fall back to a top-level path.
//!
//! The chosen parent travels with the record as its own field. Names may
//! contain the path separator (`u_core.u_alu` is a common instance name),
//! so a parent can never be recovered by splitting a path.

use super::types::{CoverageRecord, ResolvedRecord};
use std::collections::HashMap;

/// Columns of indentation per nesting level.
pub const INDENT_STEP: usize = 2;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Assigns dotted paths to records in file order.
///
/// Instead of rescanning history for every record, the resolver keeps the
/// path of the last record seen at each depth. Overwriting that slot on
/// every record gives the same answer as a reverse scan for the latest
/// record at the wanted depth.
#[derive(Debug, Default)]
pub struct HierarchyResolver {
    last_path_at_depth: HashMap<usize, String>,
}

impl HierarchyResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the path and parent for the next record and remember it.
    pub fn resolve(&mut self, record: CoverageRecord) -> ResolvedRecord {
        let parent = self.parent_path(record.indent_depth).map(str::to_owned);
        let path = match parent.as_deref() {
            Some(parent) => join_path(parent, &record.name),
            None => record.name.clone(),
        };
        self.last_path_at_depth
            .insert(record.indent_depth, path.clone());
        ResolvedRecord {
            record,
            path,
            parent,
        }
    }

    fn parent_path(&self, indent_depth: usize) -> Option<&str> {
        if indent_depth == 0 {
            return None;
        }
        let parent_depth = indent_depth.checked_sub(INDENT_STEP)?;
        self.last_path_at_depth
            .get(&parent_depth)
            .map(String::as_str)
    }
}

/// Resolve paths for an ordered batch of records.
pub fn resolve_paths(records: Vec<CoverageRecord>) -> Vec<ResolvedRecord> {
    let mut resolver = HierarchyResolver::new();
    records
        .into_iter()
        .map(|record| resolver.resolve(record))
        .collect()
}

pub fn join_path(parent: &str, name: &str) -> String {
    let mut path = String::with_capacity(parent.len() + 1 + name.len());
    path.push_str(parent);
    path.push(PATH_SEPARATOR);
    path.push_str(name);
    path
}
