//! Terminal adapter registry.
//!
//! Maps configured terminal names to their [`TerminalAdapter`]. The registry
//! is built once at start-up and handed to the [`Launcher`](crate::Launcher);
//! there is no global adapter table.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ccopen::terminal::{AdapterRegistry, AdapterOptions, SystemCommandRunner};
//!
//! let registry = AdapterRegistry::with_defaults(
//!     Arc::new(SystemCommandRunner),
//!     AdapterOptions::default(),
//! );
//! let adapter = registry.lookup("Alacritty")?;
//! adapter.open(Path::new("/tmp"), Path::new("/usr/local/bin/claude")).await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use super::adapter::{TerminalAdapter, TerminalKind};
use super::alacritty::AlacrittyAdapter;
use super::command::CommandRunner;
use super::error::LaunchError;
use super::helpers::user_shell;
use super::script::{DeferredCleanup, ShellScriptWriter};
use super::terminal_app::TerminalAppAdapter;

/// Settings shared by the default adapters.
#[derive(Debug, Clone)]
pub struct AdapterOptions {
    /// Where launch scripts are written
    pub writer: ShellScriptWriter,
    /// Login shell started after the binary exits
    pub shell: String,
    /// Wait after activating a Terminal.app that was not running
    pub activation_delay: Duration,
    /// Deferred deletion of Alacritty init scripts
    pub cleanup: DeferredCleanup,
}

impl Default for AdapterOptions {
    fn default() -> Self {
        Self {
            writer: ShellScriptWriter::system(),
            shell: user_shell(),
            activation_delay: Duration::from_millis(500),
            cleanup: DeferredCleanup::default(),
        }
    }
}

/// Registry of terminal adapters keyed by [`TerminalKind`].
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    adapters: HashMap<TerminalKind, Arc<dyn TerminalAdapter>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            adapters: HashMap::new(),
        }
    }

    /// Creates a registry with Terminal.app and Alacritty registered.
    pub fn with_defaults(runner: Arc<dyn CommandRunner>, options: AdapterOptions) -> Self {
        let mut registry = Self::new();

        registry.register(Arc::new(TerminalAppAdapter::new(
            runner.clone(),
            options.writer.clone(),
            options.shell.clone(),
            options.activation_delay,
        )));
        registry.register(Arc::new(AlacrittyAdapter::new(
            runner,
            options.writer,
            options.shell,
            options.cleanup,
        )));

        registry
    }

    /// Registers an adapter under its own [`TerminalKind`], replacing any
    /// previous one.
    pub fn register(&mut self, adapter: Arc<dyn TerminalAdapter>) {
        self.adapters.insert(adapter.kind(), adapter);
    }

    /// Looks up the adapter for a configured terminal name.
    pub fn lookup(&self, name: &str) -> Result<Arc<dyn TerminalAdapter>, LaunchError> {
        TerminalKind::from_name(name)
            .and_then(|kind| self.adapters.get(&kind).cloned())
            .ok_or_else(|| LaunchError::UnsupportedTerminal(name.to_string()))
    }

    /// Canonical names of the registered terminals, in display order.
    pub fn supported_terminals(&self) -> Vec<&'static str> {
        TerminalKind::ALL
            .iter()
            .filter(|kind| self.adapters.contains_key(kind))
            .map(|kind| kind.name())
            .collect()
    }
}
