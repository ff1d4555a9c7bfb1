//! Shared test utilities for launch integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use ccopen::terminal::{
    AdapterOptions, AdapterRegistry, CommandOutput, CommandRunner, DeferredCleanup, LaunchError,
    ShellScriptWriter,
};
use tempfile::TempDir;

/// One recorded subprocess invocation
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub program: String,
    pub args: Vec<String>,
}

/// [`CommandRunner`] that records every call and replays canned results.
///
/// When the queue is empty every call succeeds with empty stdout.
#[derive(Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<RecordedCall>>,
    responses: Mutex<VecDeque<Result<CommandOutput, LaunchError>>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next call.
    pub fn push(&self, response: Result<CommandOutput, LaunchError>) -> &Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn push_ok(&self, stdout: &str) -> &Self {
        self.push(Ok(CommandOutput::ok(stdout)))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, LaunchError> {
        self.calls.lock().unwrap().push(RecordedCall {
            program: program.to_string(),
            args: args.to_vec(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::ok("")))
    }
}

/// Registry with the default adapters wired to `runner`, writing scripts
/// into `script_dir`.
pub fn test_registry(runner: Arc<RecordingRunner>, script_dir: &Path) -> AdapterRegistry {
    let options = AdapterOptions {
        writer: ShellScriptWriter::new(script_dir),
        shell: "/bin/zsh".to_string(),
        activation_delay: Duration::from_millis(500),
        // Long enough that scripts are still on disk when assertions run
        cleanup: DeferredCleanup::new(Duration::from_secs(60)),
    };
    AdapterRegistry::with_defaults(runner, options)
}

/// Creates an empty directory for launch scripts
pub fn script_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// Files currently in `dir`
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .expect("Failed to read script dir")
        .map(|entry| entry.expect("Failed to read dir entry").path())
        .collect();
    files.sort();
    files
}
