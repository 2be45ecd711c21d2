use crate::config::DisplayConfig;
use crate::coverage::{CoverageMetrics, CoverageTree, HierarchyNode, LoadStats};
use crate::formatting::OutputFormatter;
use crate::severity::{classify, percentage_to_style_index};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

pub trait OutputWriter {
    fn write_tree(&mut self, tree: &CoverageTree) -> anyhow::Result<()>;
}

/// JSON view of a node, with the severity bucket the renderer would use.
#[derive(Debug, Serialize)]
struct NodeReport<'a> {
    name: &'a str,
    full_path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    link_hint: Option<&'a str>,
    coverage_percentage: f64,
    severity: usize,
    lines_covered: u64,
    total_lines: u64,
    metrics: &'a CoverageMetrics,
    children: Vec<NodeReport<'a>>,
}

impl<'a> NodeReport<'a> {
    fn from_node(node: &'a HierarchyNode) -> Self {
        Self {
            name: &node.name,
            full_path: &node.full_path,
            link_hint: node.link_hint.as_deref(),
            coverage_percentage: node.coverage_percentage,
            severity: percentage_to_style_index(node.coverage_percentage),
            lines_covered: node.lines_covered,
            total_lines: node.total_lines,
            metrics: &node.metrics,
            children: node.children.iter().map(NodeReport::from_node).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TreeReport<'a> {
    stats: &'a LoadStats,
    root: NodeReport<'a>,
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_tree(&mut self, tree: &CoverageTree) -> anyhow::Result<()> {
        let report = TreeReport {
            stats: &tree.stats,
            root: NodeReport::from_node(&tree.root),
        };
        serde_json::to_writer_pretty(&mut self.writer, &report)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    display: DisplayConfig,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatter: Box<dyn OutputFormatter>, display: DisplayConfig) -> Self {
        Self {
            writer,
            formatter,
            display,
        }
    }

    fn write_node(&mut self, node: &HierarchyNode, prefix: &str, depth: usize) -> anyhow::Result<()> {
        if self.display.max_depth.is_some_and(|max| depth >= max) {
            return Ok(());
        }

        let count = node.children.len();
        for (index, child) in node.children.iter().enumerate() {
            let last = index + 1 == count;
            let branch = if last { "└─ " } else { "├─ " };
            let line = format!(
                "{}{}{}",
                self.formatter.dim(prefix),
                self.formatter.dim(branch),
                self.node_label(child)
            );
            writeln!(self.writer, "{}", line)?;

            let child_prefix = format!("{}{}", prefix, if last { "   " } else { "│  " });
            self.write_node(child, &child_prefix, depth + 1)?;
        }
        Ok(())
    }

    fn node_label(&self, node: &HierarchyNode) -> String {
        let percentage = format!("{:>6.2}%", node.coverage_percentage);
        let mut label = format!(
            "{} {}",
            self.formatter
                .severity(&percentage, classify(node.coverage_percentage)),
            node.name
        );
        if self.display.show_metrics {
            let m = &node.metrics;
            label.push_str(&self.formatter.dim(&format!(
                "  line {:.2} cond {:.2} toggle {:.2} fsm {:.2} branch {:.2}",
                m.line, m.condition, m.toggle, m.fsm, m.branch
            )));
        }
        label
    }

    fn write_summary(&mut self, stats: &LoadStats, root: &HierarchyNode) -> anyhow::Result<()> {
        // The root itself is synthetic and not counted.
        let nodes = root.node_count() - 1;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "{}",
            self.formatter.dim(&format!(
                "{} nodes, {} levels deep, from {} lines",
                nodes,
                root.depth(),
                stats.lines
            ))
        )?;
        if stats.dropped() > 0 {
            writeln!(
                self.writer,
                "{}",
                self.formatter.warning(&format!(
                    "{} malformed rows skipped ({} too short, {} with invalid numbers)",
                    stats.dropped(),
                    stats.too_few_fields,
                    stats.invalid_number
                ))
            )?;
        }
        if stats.attached_to_root > 0 {
            writeln!(
                self.writer,
                "{}",
                self.formatter.warning(&format!(
                    "{} rows had no resolvable parent and were attached to the root",
                    stats.attached_to_root
                ))
            )?;
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_tree(&mut self, tree: &CoverageTree) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header(&tree.root.name))?;
        self.write_node(&tree.root, "", 0)?;
        self.write_summary(&tree.stats, &tree.root)?;
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    display: DisplayConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatter, display)),
    }
}
