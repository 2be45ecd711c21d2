use crate::config::CovmapConfig;
use crate::coverage::{build_hierarchy_from_bytes, load_hierarchy_file, CoverageTree};
use crate::formatting::{formatter_for, ColorMode};
use crate::io::{create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Options for `covmap tree`, merged over the loaded configuration.
#[derive(Debug, Clone)]
pub struct TreeCommand {
    pub file: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub color: Option<ColorMode>,
    pub max_depth: Option<usize>,
    pub show_metrics: bool,
    pub tab_width: Option<usize>,
    pub link_template: Option<String>,
}

impl TreeCommand {
    /// Command-line flags win over file configuration.
    pub fn apply_overrides(&self, mut config: CovmapConfig) -> CovmapConfig {
        if let Some(color) = self.color {
            config.display.color = color;
        }
        if self.max_depth.is_some() {
            config.display.max_depth = self.max_depth;
        }
        if self.show_metrics {
            config.display.show_metrics = true;
        }
        if let Some(tab_width) = self.tab_width {
            config.parse.tab_width = tab_width;
        }
        if self.link_template.is_some() {
            config.tree.link_template = self.link_template.clone();
        }
        config
    }
}

pub fn run_tree(command: TreeCommand, config: CovmapConfig) -> Result<()> {
    let config = command.apply_overrides(config);
    config
        .validate()
        .map_err(|problems| anyhow::anyhow!("Invalid options: {}", problems.join("; ")))?;

    let tree = load_input(&command.file, &config)?;
    debug!(nodes = tree.root.node_count(), "tree ready for output");

    // Files never get ANSI escapes unless asked for explicitly.
    let color = match (&command.output, command.color) {
        (Some(_), None) => ColorMode::Never,
        _ => config.display.color,
    };

    let sink: Box<dyn Write> = match &command.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file: {}", path.display())
        })?)),
        None => Box::new(BufWriter::new(std::io::stdout().lock())),
    };

    let mut writer = create_writer(command.format, sink, formatter_for(color), config.display);
    writer.write_tree(&tree)
}

fn load_input(file: &Path, config: &CovmapConfig) -> Result<CoverageTree> {
    let options = config.load_options();
    if file == Path::new("-") {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read coverage dump from stdin")?;
        Ok(build_hierarchy_from_bytes(&bytes, &options))
    } else {
        load_hierarchy_file(file, &options)
    }
}
