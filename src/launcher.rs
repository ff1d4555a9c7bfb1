//! Launch orchestration.
//!
//! [`Launcher`] is the single entry point used by the CLI: it resolves the
//! configured terminal, expands `~` in both paths, asks the adapter to open
//! the window and reports the outcome.

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::terminal::{AdapterRegistry, LaunchError, expand_tilde};
use crate::LaunchRequest;

/// Opens terminals through the adapters of a registry.
pub struct Launcher<'a> {
    registry: &'a AdapterRegistry,
    home: PathBuf,
}

impl<'a> Launcher<'a> {
    /// Create a launcher expanding `~` against `home`.
    pub fn new(registry: &'a AdapterRegistry, home: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            home: home.into(),
        }
    }

    /// Launch `request`, calling `on_success` once if the terminal opened.
    ///
    /// An unknown terminal fails before anything is written or spawned.
    /// Errors are returned as-is; use [`LaunchError::notice`] to present them.
    pub async fn launch<F>(&self, request: &LaunchRequest, on_success: F) -> Result<(), LaunchError>
    where
        F: FnOnce(),
    {
        let adapter = match self.registry.lookup(&request.terminal_name) {
            Ok(adapter) => adapter,
            Err(e) => {
                warn!(terminal = %request.terminal_name, "Unsupported terminal");
                return Err(e);
            }
        };

        let directory = expand_tilde(&request.directory, &self.home);
        let binary = expand_tilde(&request.binary_path, &self.home);
        debug!(
            terminal = %adapter.kind(),
            directory = %directory.display(),
            binary = %binary.display(),
            "Launching"
        );

        match adapter.open(&directory, &binary).await {
            Ok(()) => {
                info!(
                    terminal = %adapter.kind(),
                    directory = %directory.display(),
                    "Launch succeeded"
                );
                on_success();
                Ok(())
            }
            Err(e) => {
                warn!(terminal = %adapter.kind(), error = %e, "Launch failed");
                Err(e)
            }
        }
    }
}
