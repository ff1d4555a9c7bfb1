//! Alacritty adapter.
//!
//! Alacritty has no scripting interface, but `open -n` always starts a fresh
//! instance, so there is no state to inspect: every launch gets its own
//! window running the user's login shell with the init script.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use super::adapter::{TerminalAdapter, TerminalKind};
use super::command::CommandRunner;
use super::error::LaunchError;
use super::helpers::shell_escape;
use super::script::{DeferredCleanup, ShellScriptWriter, TempScript};

/// File name prefix for Alacritty init scripts.
pub const SCRIPT_PREFIX: &str = "claude-init";

/// Program used to start a new application instance.
const OPEN_PROGRAM: &str = "open";

/// Adapter for Alacritty.
pub struct AlacrittyAdapter {
    runner: Arc<dyn CommandRunner>,
    writer: ShellScriptWriter,
    shell: String,
    cleanup: DeferredCleanup,
}

impl AlacrittyAdapter {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        writer: ShellScriptWriter,
        shell: impl Into<String>,
        cleanup: DeferredCleanup,
    ) -> Self {
        Self {
            runner,
            writer,
            shell: shell.into(),
            cleanup,
        }
    }
}

/// Arguments for `open` that start a new Alacritty running `script`.
pub fn open_args(shell: &str, script: &TempScript) -> Vec<String> {
    let path = shell_escape(&script.path_str());
    vec![
        "-n".to_string(),
        "-a".to_string(),
        "Alacritty".to_string(),
        "--args".to_string(),
        "-e".to_string(),
        shell.to_string(),
        "-l".to_string(),
        "-c".to_string(),
        format!("{}; rm -f {}", path, path),
    ]
}

#[async_trait]
impl TerminalAdapter for AlacrittyAdapter {
    async fn open(&self, directory: &Path, binary: &Path) -> Result<(), LaunchError> {
        let script = self
            .writer
            .write_init_script(
                SCRIPT_PREFIX,
                &directory.display().to_string(),
                &binary.display().to_string(),
                &self.shell,
            )
            .await?;

        let args = open_args(&self.shell, &script);
        debug!(script = %script.path.display(), shell = %self.shell, "Opening Alacritty");

        let output = match self.runner.run(OPEN_PROGRAM, &args).await {
            Ok(output) if output.success => output,
            Ok(output) => {
                script.discard().await;
                return Err(LaunchError::spawn("Alacritty", output.failure_reason()));
            }
            Err(e) => {
                script.discard().await;
                return Err(e);
            }
        };

        // The new instance reads the script asynchronously; delete it later.
        self.cleanup.schedule(script.path);

        info!(directory = %directory.display(), "Opened Alacritty");
        Ok(())
    }

    fn kind(&self) -> TerminalKind {
        TerminalKind::Alacritty
    }
}
