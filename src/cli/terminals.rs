//! Terminals command implementation

use anyhow::Result;
use std::sync::Arc;

use super::Paths;
use ccopen::config::Config;
use ccopen::terminal::{AdapterRegistry, SystemCommandRunner, TerminalKind};

/// List the supported terminals and mark the configured one
pub fn terminals_command(paths: &Paths) -> Result<()> {
    let config = Config::load_from(&paths.config)?;
    let registry =
        AdapterRegistry::with_defaults(Arc::new(SystemCommandRunner), config.adapter_options());

    let configured = TerminalKind::from_name(&config.launch.terminal_app);
    for name in registry.supported_terminals() {
        let marker = if TerminalKind::from_name(name) == configured {
            "*"
        } else {
            " "
        };
        let bundle = TerminalKind::from_name(name)
            .map(|kind| kind.bundle_id())
            .unwrap_or_default();
        println!("{} {:<10} {}", marker, name, bundle);
    }

    if configured.is_none() {
        eprintln!(
            "Configured terminal '{}' is not supported",
            config.launch.terminal_app
        );
    }

    Ok(())
}
