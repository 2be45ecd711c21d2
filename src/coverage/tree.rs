//! Assembly of resolved records into an owned hierarchy.
//!
//! The builder works on an arena: every node lives in a `Vec` slot and
//! children are referenced by [`NodeId`]. A path-to-id map (seeded with the
//! root at `""`) links each new node to its parent. Once all records are in,
//! [`TreeBuilder::finish`] turns the arena into plain owned
//! [`HierarchyNode`] values and the map is dropped.
//!
//! Each node is linked to the parent path the resolver chose for it. Linking
//! is lenient: an indented record without a parent, or one whose parent path
//! was never registered, is attached directly under the root rather than
//! discarded.

use super::types::{CoverageMetrics, ResolvedRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Default display name of the synthetic root.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// One node of the coverage hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyNode {
    pub name: String,
    /// Dotted path; empty for the root only
    pub full_path: String,
    /// Opaque reference the renderer may resolve (e.g. a report URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_hint: Option<String>,
    pub coverage_percentage: f64,
    pub lines_covered: u64,
    pub total_lines: u64,
    pub metrics: CoverageMetrics,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    /// An empty root with zeroed metrics.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_path: String::new(),
            link_hint: None,
            coverage_percentage: 0.0,
            lines_covered: 0,
            total_lines: 0,
            metrics: CoverageMetrics::default(),
            children: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.full_path.is_empty()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Height of the subtree: a leaf has depth 0.
    pub fn depth(&self) -> usize {
        self.walk().map(|(depth, _)| depth).max().unwrap_or(0)
    }

    /// Find a descendant (or `self`) by full path.
    pub fn find(&self, path: &str) -> Option<&HierarchyNode> {
        self.walk()
            .map(|(_, node)| node)
            .find(|node| node.full_path == path)
    }

    /// Pre-order traversal yielding `(depth relative to self, node)`.
    pub fn walk(&self) -> Walk<'_> {
        Walk {
            stack: vec![(0, self)],
        }
    }
}

/// Pre-order iterator over a [`HierarchyNode`] subtree.
pub struct Walk<'a> {
    stack: Vec<(usize, &'a HierarchyNode)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, &'a HierarchyNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Options for tree assembly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeOptions {
    pub root_name: String,
    /// Template for per-node link hints; `{path}` and `{name}` are
    /// substituted. No hints are produced when unset.
    pub link_template: Option<String>,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            link_template: None,
        }
    }
}

/// Counters describing how records were linked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Nodes appended under the parent their path named (root included)
    pub linked: usize,
    /// Nodes with no parent, or an unknown parent path, attached to the root
    pub attached_to_root: usize,
    /// Registrations that replaced an earlier node with the same path
    pub path_collisions: usize,
}

/// Index of a node slot inside a [`TreeBuilder`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

struct NodeSlot {
    node: HierarchyNode,
    children: Vec<NodeId>,
}

/// Incremental tree builder.
///
/// Every call to [`TreeBuilder::build_with_options`] or [`TreeBuilder::new`]
/// owns a fresh arena and lookup map, so independent loads never share state.
pub struct TreeBuilder {
    slots: Vec<NodeSlot>,
    by_path: HashMap<String, NodeId>,
    link_template: Option<String>,
    stats: BuildStats,
}

impl TreeBuilder {
    pub fn new(options: &TreeOptions) -> Self {
        let mut by_path = HashMap::new();
        by_path.insert(String::new(), NodeId::ROOT);
        Self {
            slots: vec![NodeSlot {
                node: HierarchyNode::root(options.root_name.clone()),
                children: Vec::new(),
            }],
            by_path,
            link_template: options.link_template.clone(),
            stats: BuildStats::default(),
        }
    }

    /// Build a complete tree from resolved records in file order.
    pub fn build_with_options(
        records: Vec<ResolvedRecord>,
        options: &TreeOptions,
    ) -> (HierarchyNode, BuildStats) {
        let mut builder = Self::new(options);
        for record in records {
            builder.insert(record);
        }
        builder.finish()
    }

    /// Build with default options, discarding statistics.
    pub fn build(records: Vec<ResolvedRecord>) -> HierarchyNode {
        Self::build_with_options(records, &TreeOptions::default()).0
    }

    /// Add one record as the last child of its parent (or of the root when
    /// it has none, or the parent path is unknown).
    pub fn insert(&mut self, resolved: ResolvedRecord) -> NodeId {
        let ResolvedRecord {
            record,
            path,
            parent,
        } = resolved;

        let parent = match parent.as_deref() {
            None if record.indent_depth == 0 => {
                self.stats.linked += 1;
                NodeId::ROOT
            }
            None => {
                debug!(
                    path = %path,
                    indent = record.indent_depth,
                    "no record at parent depth, attaching to root"
                );
                self.stats.attached_to_root += 1;
                NodeId::ROOT
            }
            Some(parent_path) => match self.by_path.get(parent_path) {
                Some(&id) => {
                    self.stats.linked += 1;
                    id
                }
                None => {
                    debug!(
                        path = %path,
                        parent = %parent_path,
                        "parent not found, attaching to root"
                    );
                    self.stats.attached_to_root += 1;
                    NodeId::ROOT
                }
            },
        };

        let node = HierarchyNode {
            link_hint: self.link_hint(&path, &record.name),
            coverage_percentage: record.coverage_percentage(),
            lines_covered: record.lines_covered,
            total_lines: record.total_lines,
            metrics: record.metrics,
            name: record.name,
            full_path: path.clone(),
            children: Vec::new(),
        };

        let id = NodeId(self.slots.len());
        self.slots.push(NodeSlot {
            node,
            children: Vec::new(),
        });
        self.slots[parent.0].children.push(id);

        if self.by_path.insert(path, id).is_some() {
            self.stats.path_collisions += 1;
        }
        id
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }

    /// Convert the arena into an owned tree.
    ///
    /// A parent is always registered before any of its children, so every
    /// child id is greater than its parent's. Folding slots from the back
    /// therefore completes each subtree before its parent claims it.
    pub fn finish(self) -> (HierarchyNode, BuildStats) {
        let stats = self.stats;
        let mut built: Vec<Option<HierarchyNode>> = Vec::with_capacity(self.slots.len());
        let mut child_lists = Vec::with_capacity(self.slots.len());
        for slot in self.slots {
            built.push(Some(slot.node));
            child_lists.push(slot.children);
        }

        for index in (0..built.len()).rev() {
            let children: Vec<HierarchyNode> = child_lists[index]
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            if let Some(node) = built[index].as_mut() {
                node.children = children;
            }
        }

        let root = built
            .swap_remove(NodeId::ROOT.0)
            .unwrap_or_else(|| HierarchyNode::root(DEFAULT_ROOT_NAME));
        (root, stats)
    }

    fn link_hint(&self, path: &str, name: &str) -> Option<String> {
        self.link_template
            .as_ref()
            .map(|template| template.replace("{path}", path).replace("{name}", name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::types::CoverageRecord;
    use pretty_assertions::assert_eq;

    /// A record whose parent is everything before the last `.` of `path`.
    fn resolved(name: &str, path: &str, overall: f64) -> ResolvedRecord {
        let parent = path.rsplit_once('.').map(|(parent, _)| parent);
        resolved_under(name, path, parent, overall)
    }

    fn resolved_under(
        name: &str,
        path: &str,
        parent: Option<&str>,
        overall: f64,
    ) -> ResolvedRecord {
        ResolvedRecord {
            record: CoverageRecord {
                name: name.to_string(),
                indent_depth: if parent.is_some() { 2 } else { 0 },
                metrics: CoverageMetrics {
                    overall,
                    ..CoverageMetrics::default()
                },
                lines_covered: 0,
                total_lines: 10_000,
            },
            path: path.to_string(),
            parent: parent.map(str::to_string),
        }
    }

    fn child_names(node: &HierarchyNode) -> Vec<&str> {
        node.children.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input_yields_bare_root() {
        let root = TreeBuilder::build(Vec::new());
        assert!(root.is_root());
        assert_eq!(root.name, "root");
        assert!(root.children.is_empty());
    }

    #[test]
    fn test_children_keep_insertion_order() {
        let root = TreeBuilder::build(vec![
            resolved("top", "top", 50.0),
            resolved("z", "top.z", 1.0),
            resolved("a", "top.a", 2.0),
            resolved("m", "top.m", 3.0),
        ]);

        assert_eq!(child_names(&root), vec!["top"]);
        assert_eq!(child_names(&root.children[0]), vec!["z", "a", "m"]);
    }

    #[test]
    fn test_unknown_parent_attaches_to_root() {
        let (root, stats) = TreeBuilder::build_with_options(
            vec![
                resolved("top", "top", 50.0),
                resolved("lost", "missing.lost", 10.0),
            ],
            &TreeOptions::default(),
        );

        assert_eq!(child_names(&root), vec!["top", "lost"]);
        assert_eq!(root.children[1].full_path, "missing.lost");
        assert_eq!(stats.linked, 1);
        assert_eq!(stats.attached_to_root, 1);
    }

    #[test]
    fn test_fallback_node_can_still_parent_later_records() {
        let root = TreeBuilder::build(vec![
            resolved("lost", "missing.lost", 10.0),
            resolved("kid", "missing.lost.kid", 20.0),
        ]);

        let lost = root.find("missing.lost").unwrap();
        assert_eq!(child_names(lost), vec!["kid"]);
    }

    #[test]
    fn test_path_collision_overwrites_lookup() {
        let (root, stats) = TreeBuilder::build_with_options(
            vec![
                resolved("a", "a", 1.0),
                resolved("a", "a", 2.0),
                resolved("kid", "a.kid", 3.0),
            ],
            &TreeOptions::default(),
        );

        assert_eq!(stats.path_collisions, 1);
        assert_eq!(root.children.len(), 2);
        assert!(root.children[0].children.is_empty());
        assert_eq!(child_names(&root.children[1]), vec!["kid"]);
    }

    #[test]
    fn test_node_copies_record_fields() {
        let root = TreeBuilder::build(vec![resolved("top", "top", 75.5)]);
        let top = &root.children[0];
        assert_eq!(top.full_path, "top");
        assert_eq!(top.coverage_percentage, 75.5);
        assert_eq!(top.total_lines, 10_000);
        assert_eq!(top.link_hint, None);
    }

    #[test]
    fn test_link_template_substitution() {
        let options = TreeOptions {
            root_name: "design".to_string(),
            link_template: Some("report/{path}.html#{name}".to_string()),
        };
        let (root, _) = TreeBuilder::build_with_options(
            vec![resolved("top", "top", 1.0), resolved("core", "top.core", 1.0)],
            &options,
        );

        assert_eq!(root.name, "design");
        assert_eq!(root.link_hint, None);
        assert_eq!(
            root.find("top.core").unwrap().link_hint.as_deref(),
            Some("report/top.core.html#core")
        );
    }

    #[test]
    fn test_walk_is_preorder_with_depths() {
        let root = TreeBuilder::build(vec![
            resolved("a", "a", 1.0),
            resolved("a1", "a.a1", 1.0),
            resolved("b", "b", 1.0),
        ]);

        let visited: Vec<(usize, &str)> = root
            .walk()
            .map(|(depth, node)| (depth, node.name.as_str()))
            .collect();
        assert_eq!(visited, vec![(0, "root"), (1, "a"), (2, "a1"), (1, "b")]);
        assert_eq!(root.node_count(), 4);
        assert_eq!(root.depth(), 2);
    }

    #[test]
    fn test_dotted_top_level_name_stays_under_root() {
        let (root, stats) = TreeBuilder::build_with_options(
            vec![
                resolved_under("top", "top", None, 50.0),
                resolved_under("top.x", "top.x", None, 40.0),
            ],
            &TreeOptions::default(),
        );

        assert_eq!(child_names(&root), vec!["top", "top.x"]);
        assert!(root.children[0].children.is_empty());
        assert_eq!(stats.attached_to_root, 0);
    }

    #[test]
    fn test_dotted_child_name_links_to_chosen_parent() {
        let (root, stats) = TreeBuilder::build_with_options(
            vec![
                resolved_under("top", "top", None, 50.0),
                resolved_under("u_core.u_alu", "top.u_core.u_alu", Some("top"), 40.0),
            ],
            &TreeOptions::default(),
        );

        assert_eq!(child_names(&root), vec!["top"]);
        assert_eq!(child_names(&root.children[0]), vec!["u_core.u_alu"]);
        assert_eq!(stats.attached_to_root, 0);
    }

    #[test]
    fn test_indented_record_without_parent_counts_as_fallback() {
        let (root, stats) = TreeBuilder::build_with_options(
            vec![resolved_under("stray", "stray", None, 10.0)],
            &TreeOptions::default(),
        );
        let mut stray = resolved_under("stray", "stray", None, 10.0);
        stray.record.indent_depth = 4;
        let (_, indented) = TreeBuilder::build_with_options(vec![stray], &TreeOptions::default());

        assert_eq!(child_names(&root), vec!["stray"]);
        assert_eq!(stats.attached_to_root, 0);
        assert_eq!(indented.attached_to_root, 1);
    }
}
