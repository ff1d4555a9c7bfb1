//! Terminal.app adapter.
//!
//! Terminal.app is driven through AppleScript. Before opening anything the
//! adapter probes the application's state so it can reuse an idle front tab
//! instead of always piling up new windows, and never types into a tab that
//! is already busy.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::adapter::{TerminalAdapter, TerminalKind};
use super::command::CommandRunner;
use super::error::LaunchError;
use super::helpers::{applescript_escape, shell_escape};
use super::probe::{TerminalState, probe};
use super::script::{ShellScriptWriter, TempScript};

/// File name prefix for Terminal.app launch scripts.
pub const SCRIPT_PREFIX: &str = "terminal-cmd";

/// Terminal not running: launch it, give it time to open its first window,
/// then reuse that window.
const LAUNCH_AND_REUSE_SCRIPT: &str = r#"tell application "Terminal"
	activate
	delay {delay}
	do script "{command}" in front window
end tell"#;

/// Run in the existing front window.
const REUSE_FRONT_WINDOW_SCRIPT: &str = r#"tell application "Terminal"
	do script "{command}" in front window
	activate
end tell"#;

/// `do script` without a target opens a new window.
const NEW_WINDOW_SCRIPT: &str = r#"tell application "Terminal"
	do script "{command}"
	activate
end tell"#;

/// Adapter for macOS Terminal.app.
pub struct TerminalAppAdapter {
    runner: Arc<dyn CommandRunner>,
    writer: ShellScriptWriter,
    /// Login shell the script hands over to after the binary exits
    shell: String,
    /// How long to wait after activating a freshly launched Terminal
    activation_delay: Duration,
}

impl TerminalAppAdapter {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        writer: ShellScriptWriter,
        shell: impl Into<String>,
        activation_delay: Duration,
    ) -> Self {
        Self {
            runner,
            writer,
            shell: shell.into(),
            activation_delay,
        }
    }

    /// Run the AppleScript, removing the script again if it never ran.
    async fn run_applescript(
        &self,
        applescript: &str,
        script: &TempScript,
    ) -> Result<(), LaunchError> {
        let args = vec!["-e".to_string(), applescript.to_string()];
        let result = match self.runner.run("osascript", &args).await {
            Ok(output) if output.success => Ok(()),
            Ok(output) => Err(LaunchError::automation(output.failure_reason())),
            Err(e) => Err(e),
        };

        if result.is_err() {
            script.discard().await;
        }
        result
    }
}

/// Shell command typed into the terminal to run `script`.
pub fn launch_command(script: &TempScript) -> String {
    let path = shell_escape(&script.path_str());
    format!("/bin/sh {}; rm -f {}", path, path)
}

/// Pick and fill the AppleScript template for `state`.
pub fn build_open_script(
    state: TerminalState,
    command: &str,
    activation_delay: Duration,
) -> String {
    let template = match state {
        TerminalState::NotRunning => LAUNCH_AND_REUSE_SCRIPT,
        TerminalState::RunningSingleIdleTab { .. } => REUSE_FRONT_WINDOW_SCRIPT,
        TerminalState::RunningNoWindows | TerminalState::RunningBusyOrMultiTab { .. } => {
            NEW_WINDOW_SCRIPT
        }
    };

    template
        .replace("{delay}", &activation_delay.as_secs_f64().to_string())
        .replace("{command}", &applescript_escape(command))
}

#[async_trait]
impl TerminalAdapter for TerminalAppAdapter {
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

        let report = match probe(self.runner.as_ref()).await {
            Ok(report) => report,
            Err(e) => {
                warn!(error = %e, "Terminal.app probe failed");
                script.discard().await;
                return Err(e);
            }
        };
        let state = TerminalState::classify(&report);

        let applescript = build_open_script(state, &launch_command(&script), self.activation_delay);
        debug!(%state, script = %script.path.display(), "Opening Terminal.app");

        self.run_applescript(&applescript, &script).await?;

        info!(%state, directory = %directory.display(), "Opened Terminal.app");
        Ok(())
    }

    fn kind(&self) -> TerminalKind {
        TerminalKind::TerminalApp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn script_at(path: &str) -> TempScript {
        TempScript {
            path: PathBuf::from(path),
            contents: String::new(),
            mode: 0o755,
        }
    }

    #[test]
    fn test_launch_command_removes_script() {
        let cmd = launch_command(&script_at("/tmp/terminal-cmd-1-0.sh"));
        assert_eq!(
            cmd,
            "/bin/sh '/tmp/terminal-cmd-1-0.sh'; rm -f '/tmp/terminal-cmd-1-0.sh'"
        );
    }

    #[test]
    fn test_not_running_activates_then_reuses_front_window() {
        let script =
            build_open_script(TerminalState::NotRunning, "echo hi", Duration::from_millis(500));
        let activate = script.find("activate").unwrap();
        let delay = script.find("delay 0.5").unwrap();
        let do_script = script.find("do script \"echo hi\" in front window").unwrap();
        assert!(activate < delay && delay < do_script);
    }

    #[test]
    fn test_no_windows_opens_new_window() {
        let script = build_open_script(TerminalState::RunningNoWindows, "echo hi", Duration::ZERO);
        assert!(script.contains("do script \"echo hi\"\n"));
        assert!(!script.contains("in front window"));
        assert!(!script.contains("delay"));
    }

    #[test]
    fn test_idle_tab_is_reused() {
        let state = TerminalState::RunningSingleIdleTab {
            window_count: 1,
            tab_count: 1,
        };
        let script = build_open_script(state, "echo hi", Duration::ZERO);
        let do_script = script.find("do script \"echo hi\" in front window").unwrap();
        assert!(do_script < script.find("activate").unwrap());
    }

    #[test]
    fn test_busy_tab_gets_new_window() {
        let state = TerminalState::RunningBusyOrMultiTab {
            window_count: 1,
            tab_count: 2,
        };
        let script = build_open_script(state, "echo hi", Duration::ZERO);
        assert!(!script.contains("in front window"));
        assert!(script.contains("do script \"echo hi\"\n"));
    }

    #[test]
    fn test_command_is_applescript_escaped() {
        let cmd = launch_command(&script_at("/tmp/dir \"quoted\"/x.sh"));
        let script = build_open_script(TerminalState::RunningNoWindows, &cmd, Duration::ZERO);
        assert!(script.contains(r#"/tmp/dir \"quoted\"/x.sh"#));
    }
}
