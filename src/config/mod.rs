//! Configuration loading for covmap.
//!
//! Settings live in `.covmap.toml`, discovered by walking up from the
//! working directory. A discovered file that fails to parse or validate is
//! ignored with a warning; a file named explicitly on the command line must
//! be valid.

mod core;
mod loader;

pub use self::core::{CovmapConfig, DisplayConfig, DEFAULT_CONFIG_TOML, MAX_TAB_WIDTH};
pub use self::loader::{
    directory_ancestors, load_config, load_config_file, load_config_from,
    parse_and_validate_config, write_default_config, CONFIG_FILE_NAME,
};
