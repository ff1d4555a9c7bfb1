//! Launch settings

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for opening terminals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchSettings {
    /// Path to the Claude Code binary (may start with `~/`)
    #[serde(default = "default_claude_binary_path")]
    pub claude_binary_path: String,

    /// Terminal to open: "Terminal" or "Alacritty"
    #[serde(default = "default_terminal_app")]
    pub terminal_app: String,

    /// Wait after activating a Terminal.app that was not running yet
    #[serde(default = "default_activation_delay_ms")]
    pub activation_delay_ms: u64,

    /// Delay before Alacritty init scripts are deleted
    /// The new instance reads the script after `open` returns, so this
    /// must leave it enough time to start.
    #[serde(default = "default_cleanup_delay_secs")]
    pub cleanup_delay_secs: u64,

    /// Directory for launch scripts (defaults to the system temp directory)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_dir: Option<PathBuf>,
}

fn default_claude_binary_path() -> String {
    "~/.claude/local/claude".to_string()
}

fn default_terminal_app() -> String {
    "Terminal".to_string()
}

fn default_activation_delay_ms() -> u64 {
    500
}

fn default_cleanup_delay_secs() -> u64 {
    5
}

impl LaunchSettings {
    pub fn activation_delay(&self) -> Duration {
        Duration::from_millis(self.activation_delay_ms)
    }

    pub fn cleanup_delay(&self) -> Duration {
        Duration::from_secs(self.cleanup_delay_secs)
    }
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            claude_binary_path: default_claude_binary_path(),
            terminal_app: default_terminal_app(),
            activation_delay_ms: default_activation_delay_ms(),
            cleanup_delay_secs: default_cleanup_delay_secs(),
            script_dir: None,
        }
    }
}
