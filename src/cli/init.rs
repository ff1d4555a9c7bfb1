//! Init command implementation

use anyhow::{Result, bail};

use super::Paths;
use ccopen::config::{DEFAULT_CONFIG, write_atomic};

/// Write the default config file
pub fn init_command(paths: &Paths, force: bool) -> Result<()> {
    let config_path = &paths.config;

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    write_atomic(config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
