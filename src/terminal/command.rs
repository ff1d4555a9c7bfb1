//! External process boundary.
//!
//! Every subprocess the adapters start (`osascript`, `open`) goes through a
//! [`CommandRunner`], so tests can replace the real process table with a
//! recording stub.

use async_trait::async_trait;
use tracing::debug;

use super::error::LaunchError;

/// Captured result of a finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0
    pub success: bool,
    /// Exit code, if the process was not killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    /// A successful run with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// A failed run with the given exit code and stderr.
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    /// Best human-readable reason for a failure.
    pub fn failure_reason(&self) -> String {
        let stderr = self.stderr.trim();
        if !stderr.is_empty() {
            return stderr.to_string();
        }
        match self.code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

/// Runs external programs.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` to completion and capture its output.
    ///
    /// Returns `Err` only when the process could not be started; a non-zero
    /// exit is reported through [`CommandOutput::success`].
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, LaunchError>;
}

/// [`CommandRunner`] backed by `tokio::process`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

#[async_trait]
impl CommandRunner for SystemCommandRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, LaunchError> {
        debug!(program, arg_count = args.len(), "Running external command");

        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(std::process::Stdio::null())
            .output()
            .await
            .map_err(|e| LaunchError::spawn(program, e.to_string()))?;

        Ok(CommandOutput {
            success: output.status.success(),
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_reason_prefers_stderr() {
        let output = CommandOutput::failed(1, "  execution error: Terminal got an error (-1743)\n");
        assert_eq!(
            output.failure_reason(),
            "execution error: Terminal got an error (-1743)"
        );
    }

    #[test]
    fn test_failure_reason_falls_back_to_status() {
        let output = CommandOutput::failed(2, "");
        assert_eq!(output.failure_reason(), "exited with status 2");

        let killed = CommandOutput {
            success: false,
            code: None,
            ..Default::default()
        };
        assert_eq!(killed.failure_reason(), "terminated by signal");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_system_runner_captures_stdout() {
        let runner = SystemCommandRunner;
        let output = runner
            .run("sh", &["-c".to_string(), "printf hello".to_string()])
            .await
            .expect("sh should start");
        assert!(output.success);
        assert_eq!(output.stdout, "hello");
    }

    #[tokio::test]
    async fn test_system_runner_reports_missing_program() {
        let runner = SystemCommandRunner;
        let err = runner
            .run("ccopen-definitely-not-a-real-program", &[])
            .await
            .unwrap_err();
        assert!(matches!(err, LaunchError::ProcessSpawn { .. }));
    }
}
