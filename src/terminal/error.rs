//! Launch error types

use std::path::PathBuf;

/// Title shown to the user when a launch fails.
pub const FAILURE_TITLE: &str = "Failed to open terminal";

/// Error type for terminal launches
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    #[error("Unsupported terminal: {0}")]
    UnsupportedTerminal(String),

    #[error("Failed to write launch script {}: {source}", path.display())]
    ScriptWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("AppleScript failed: {message}")]
    Automation { message: String },

    #[error("Failed to launch {program}: {message}")]
    ProcessSpawn { program: String, message: String },
}

impl LaunchError {
    pub(crate) fn automation(message: impl Into<String>) -> Self {
        Self::Automation {
            message: message.into(),
        }
    }

    pub(crate) fn spawn(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ProcessSpawn {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Build the user-facing notification for this error.
    pub fn notice(&self) -> FailureNotice {
        FailureNotice {
            title: FAILURE_TITLE.to_string(),
            message: self.to_string(),
        }
    }
}

/// Failure notification suitable for display (toast, stderr line, etc.)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureNotice {
    pub title: String,
    pub message: String,
}

impl std::fmt::Display for FailureNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_carries_underlying_message() {
        let err = LaunchError::automation("Not authorized to send Apple events to Terminal.");
        let notice = err.notice();
        assert_eq!(notice.title, FAILURE_TITLE);
        assert!(notice.message.contains("Not authorized"));
    }

    #[test]
    fn test_unsupported_terminal_message() {
        let err = LaunchError::UnsupportedTerminal("iTerm".to_string());
        assert_eq!(err.to_string(), "Unsupported terminal: iTerm");
    }

    #[test]
    fn test_script_write_message_includes_path() {
        let err = LaunchError::ScriptWrite {
            path: PathBuf::from("/nope/terminal-cmd-1.sh"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such directory"),
        };
        assert!(err.to_string().contains("/nope/terminal-cmd-1.sh"));
    }
}
