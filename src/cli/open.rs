//! Open command implementation

use anyhow::{Result, bail};
use std::path::PathBuf;
use std::sync::Arc;

use super::Paths;
use ccopen::config::Config;
use ccopen::favorites::FavoritesStore;
use ccopen::terminal::{AdapterRegistry, SystemCommandRunner, expand_tilde};
use ccopen::{LaunchRequest, Launcher, directory_name};

/// Open `target` (a favorite or a directory) in a terminal
pub async fn open_command(
    paths: &Paths,
    target: &str,
    terminal: Option<String>,
    binary: Option<String>,
) -> Result<()> {
    let config = Config::load_from(&paths.config)?;
    let mut store = FavoritesStore::load(&paths.favorites)?;
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

    let (directory, display_name, favorite_id) = match store.lookup(target)? {
        Some(fav) => (fav.path.clone(), fav.display_name(), Some(fav.id)),
        None => {
            let expanded = expand_tilde(target, &home);
            if !expanded.is_dir() {
                match store.suggest(target) {
                    Some(hint) => bail!(
                        "'{}' is neither a favorite nor a directory. Did you mean '{}'?",
                        target,
                        hint
                    ),
                    None => bail!("'{}' is neither a favorite nor a directory", target),
                }
            }
            let path = expanded.display().to_string();
            let name = directory_name(&path);
            (path, name, None)
        }
    };

    let request = LaunchRequest::new(
        directory,
        binary.unwrap_or_else(|| config.launch.claude_binary_path.clone()),
        terminal.unwrap_or_else(|| config.launch.terminal_app.clone()),
    );

    let options = config.adapter_options();
    let cleanup = options.cleanup.clone();
    let registry = AdapterRegistry::with_defaults(Arc::new(SystemCommandRunner), options);
    let launcher = Launcher::new(&registry, home);

    let result = launcher
        .launch(&request, || {
            if let Some(id) = favorite_id {
                store.mark_opened(id);
            }
        })
        .await;

    if let Err(e) = result {
        // Scheduled deletions would be lost with the runtime
        cleanup.drain().await;
        bail!("{}", e.notice());
    }

    if favorite_id.is_some() {
        if let Err(e) = store.save() {
            tracing::warn!("Failed to record launch in favorites: {:#}", e);
        }
    }

    println!("Opened in {}: {}", request.terminal_name, display_name);

    // No need to wait for pending cleanups here: a launched script deletes
    // itself on its first line.
    Ok(())
}
