use crate::severity::SeverityBucket;
use colored::*;
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    /// Apply `NO_COLOR`, `CLICOLOR` and `CLICOLOR_FORCE` on top of `self`.
    /// Only `Auto` is overridden; an explicit choice wins.
    pub fn with_env_overrides(self) -> Self {
        if self != Self::Auto {
            return self;
        }

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            return Self::Never;
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                return Self::Always;
            }
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                return Self::Never;
            }
        }

        self
    }
}

pub trait OutputFormatter {
    /// Paint text with a severity bucket's colours
    fn severity(&self, text: &str, bucket: &SeverityBucket) -> String;
    fn warning(&self, text: &str) -> String;
    fn header(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
}

pub struct ColoredFormatter;

impl ColoredFormatter {
    pub fn new() -> Self {
        colored::control::set_override(true);
        Self
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for ColoredFormatter {
    fn severity(&self, text: &str, bucket: &SeverityBucket) -> String {
        let fg = bucket.foreground;
        let bg = bucket.background;
        text.truecolor(fg.r, fg.g, fg.b)
            .on_truecolor(bg.r, bg.g, bg.b)
            .to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.yellow().to_string()
    }

    fn header(&self, text: &str) -> String {
        text.blue().bold().to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.dimmed().to_string()
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn severity(&self, text: &str, _bucket: &SeverityBucket) -> String {
        text.to_string()
    }

    fn warning(&self, text: &str) -> String {
        text.to_string()
    }

    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Pick a formatter for the resolved colour mode.
pub fn formatter_for(mode: ColorMode) -> Box<dyn OutputFormatter> {
    if mode.with_env_overrides().should_use_color() {
        Box::new(ColoredFormatter::new())
    } else {
        Box::new(PlainFormatter)
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Check if stdout is a TTY
    std::io::stdout().is_terminal()
}
