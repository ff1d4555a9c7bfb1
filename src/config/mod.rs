//! Configuration loading and management

mod io;
mod settings;

pub use io::write_atomic;
pub use settings::LaunchSettings;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::terminal::{AdapterOptions, DeferredCleanup, ShellScriptWriter, user_shell};

/// Default configuration written by `ccopen init`
pub const DEFAULT_CONFIG: &str = r#"# ccopen configuration
# ====================
#
# Favorites live next to this file in favorites.json.

[launch]
# Path to the Claude Code binary. A leading ~/ is expanded to your home directory.
claude_binary_path = "~/.claude/local/claude"

# Terminal to open: "Terminal" (Terminal.app) or "Alacritty"
terminal_app = "Terminal"

# Terminal.app only: how long to wait after starting Terminal before
# running the command in its first window.
activation_delay_ms = 500

# Alacritty only: seconds before the temporary init script is deleted.
cleanup_delay_secs = 5

# Directory for temporary launch scripts (defaults to the system temp dir)
# script_dir = "/tmp"
"#;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Launch settings
    #[serde(default)]
    pub launch: LaunchSettings,
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Adapter options derived from these settings and the environment.
    pub fn adapter_options(&self) -> AdapterOptions {
        let writer = match &self.launch.script_dir {
            Some(dir) => ShellScriptWriter::new(dir),
            None => ShellScriptWriter::system(),
        };

        AdapterOptions {
            writer,
            shell: user_shell(),
            activation_delay: self.launch.activation_delay(),
            cleanup: DeferredCleanup::new(self.launch.cleanup_delay()),
        }
    }
}
