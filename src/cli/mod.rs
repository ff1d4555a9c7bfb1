//! CLI command implementations

pub mod favorites;
pub mod init;
pub mod open;
pub mod terminals;

use std::path::PathBuf;

use ccopen::config::Config;
use ccopen::favorites::FavoritesStore;

/// Files the commands operate on.
pub struct Paths {
    pub config: PathBuf,
    pub favorites: PathBuf,
}

impl Paths {
    /// Favorites live next to the config file.
    pub fn resolve(config_override: Option<PathBuf>) -> Self {
        match config_override {
            Some(config) => {
                let favorites = config
                    .parent()
                    .map(|dir| dir.join("favorites.json"))
                    .unwrap_or_else(|| PathBuf::from("favorites.json"));
                Self { config, favorites }
            }
            None => Self {
                config: Config::global_config_path(),
                favorites: FavoritesStore::default_path(),
            },
        }
    }
}
