use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::core::CovmapConfig;
use crate::errors::{Error, Result};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".covmap.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<CovmapConfig> {
    let config = toml::from_str::<CovmapConfig>(contents)?;
    config
        .validate()
        .map_err(|problems| Error::Configuration(problems.join("; ")))?;
    Ok(config)
}

/// Load an explicitly named config file. Unlike discovery, every failure
/// here is reported to the caller.
pub fn load_config_file(path: &Path) -> Result<CovmapConfig> {
    let contents = fs::read_to_string(path)
        .map_err(|e| Error::io_at("Failed to read config file", path, e))?;
    parse_and_validate_config(&contents)
}

/// Try loading config from a specific path; `None` when absent or invalid
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<CovmapConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            warn!("Ignoring {}: {}. Using defaults.", config_path.display(), e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file
pub fn load_config_from(start: PathBuf) -> CovmapConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            CovmapConfig::default()
        })
}

/// Discover configuration starting from the current directory
pub fn load_config() -> CovmapConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            CovmapConfig::default()
        }
    }
}

/// Write the default config file into `dir`
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        return Err(Error::file_system(
            "Configuration file already exists. Use --force to overwrite.",
            config_path,
        ));
    }

    fs::write(&config_path, super::core::DEFAULT_CONFIG_TOML)
        .map_err(|e| Error::io_at("Failed to write config file", &config_path, e))?;
    Ok(config_path)
}
