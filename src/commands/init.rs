use crate::config::write_default_config;
use anyhow::Result;
use std::path::Path;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let path = write_default_config(dir, force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}
