use serde::{Deserialize, Serialize};

use crate::coverage::{LoadOptions, ParseOptions, TreeOptions};
use crate::formatting::ColorMode;

/// Upper bound accepted for `parse.tab_width`.
pub const MAX_TAB_WIDTH: usize = 16;

/// Root configuration structure for covmap
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CovmapConfig {
    /// How rows are parsed
    #[serde(default)]
    pub parse: ParseOptions,

    /// How the tree is assembled
    #[serde(default)]
    pub tree: TreeOptions,

    /// Terminal rendering
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Display configuration for terminal output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: ColorMode,
    /// Deepest level printed; `None` prints everything
    pub max_depth: Option<usize>,
    /// Print the five sub-metrics next to the overall percentage
    pub show_metrics: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            max_depth: None,
            show_metrics: false,
        }
    }
}

impl CovmapConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            parse: self.parse,
            tree: self.tree.clone(),
        }
    }

    /// Check value ranges. Returns one message per problem.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        if self.parse.tab_width > MAX_TAB_WIDTH {
            problems.push(format!(
                "parse.tab_width must be at most {}, got {}",
                MAX_TAB_WIDTH, self.parse.tab_width
            ));
        }
        if !self.parse.lines_scale.is_finite() || self.parse.lines_scale < 0.0 {
            problems.push(format!(
                "parse.lines_scale must be a non-negative number, got {}",
                self.parse.lines_scale
            ));
        }
        if self.tree.root_name.trim().is_empty() {
            problems.push("tree.root_name must not be empty".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

/// Contents written by `covmap init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# covmap configuration

[parse]
# Columns a leading tab counts for (0: tabs end the indentation)
tab_width = 2
# lines_covered = floor(line_metric * lines_scale)
lines_scale = 1000.0
total_lines = 10000

[tree]
root_name = "root"
# link_template = "report/{path}.html"

[display]
color = "auto"
show_metrics = false
# max_depth = 3
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_template_parses_to_defaults() {
        let config: CovmapConfig = toml::from_str(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config, CovmapConfig::default());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: CovmapConfig = toml::from_str("[parse]\ntab_width = 4\n").unwrap();
        assert_eq!(config.parse.tab_width, 4);
        assert_eq!(config.parse.total_lines, 10_000);
        assert_eq!(config.tree.root_name, "root");
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut config = CovmapConfig::default();
        config.parse.tab_width = 99;
        config.parse.lines_scale = -1.0;
        config.tree.root_name = " ".to_string();

        let problems = config.validate().unwrap_err();
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn test_load_options_mirror_config() {
        let mut config = CovmapConfig::default();
        config.tree.link_template = Some("{path}".to_string());
        let options = config.load_options();
        assert_eq!(options.tree.link_template.as_deref(), Some("{path}"));
        assert_eq!(options.parse, config.parse);
    }
}
