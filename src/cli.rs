use crate::formatting::ColorMode;
use crate::io::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "covmap")]
#[command(about = "Hierarchical coverage tree viewer for indented coverage dumps", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to the nearest .covmap.toml)
    #[arg(long, global = true, env = "COVMAP_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build and print the coverage hierarchy of a dump
    Tree {
        /// Coverage dump to read ("-" for stdin)
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Colour mode for terminal output
        #[arg(long, value_enum)]
        color: Option<ColorMode>,

        /// Print only this many levels below the root
        #[arg(long = "max-depth")]
        max_depth: Option<usize>,

        /// Show line/condition/toggle/fsm/branch columns
        #[arg(long = "show-metrics")]
        show_metrics: bool,

        /// Columns a leading tab counts for
        #[arg(long = "tab-width")]
        tab_width: Option<usize>,

        /// Template for per-node link hints ({path}, {name})
        #[arg(long = "link-template")]
        link_template: Option<String>,
    },

    /// Show the severity bucket for one or more percentages
    Classify {
        /// Percentages to classify
        #[arg(required = true, allow_negative_numbers = true)]
        percentages: Vec<f64>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Write a default .covmap.toml into the current directory
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
