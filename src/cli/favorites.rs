//! Favorites CRUD commands

use anyhow::Result;
use chrono::Utc;
use std::path::PathBuf;

use super::Paths;
use ccopen::favorites::{FavoritesStore, short_id};
use ccopen::relative_time;

/// List favorites, most relevant first
pub fn list_command(paths: &Paths, search: Option<&str>, json: bool) -> Result<()> {
    let store = FavoritesStore::load(&paths.favorites)?;
    let favorites = store.search(search.unwrap_or(""));

    if json {
        println!("{}", serde_json::to_string_pretty(&favorites)?);
        return Ok(());
    }

    if favorites.is_empty() {
        match search {
            Some(query) if !query.trim().is_empty() => {
                println!("No favorites matching \"{}\".", query);
            }
            _ => {
                println!("No favorites yet.");
                println!();
                println!("Add one with: ccopen add <path> [--name <name>]");
            }
        }
        return Ok(());
    }

    let now = Utc::now();
    println!("Favorites ({}):\n", favorites.len());
    for fav in favorites {
        println!(
            "  {}  {}  ({}, opened {}x)",
            short_id(fav),
            fav.display_name(),
            relative_time(fav.last_opened, now),
            fav.open_count
        );
        if fav.name.is_some() {
            println!("            {}", fav.path);
        }
    }

    Ok(())
}

/// Add a favorite directory
pub fn add_command(paths: &Paths, path: &str, name: Option<String>) -> Result<()> {
    let mut store = FavoritesStore::load(&paths.favorites)?;
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

    let fav = store.add(path, name, &home)?.clone();
    if !std::path::Path::new(&fav.path).is_dir() {
        tracing::warn!(path = %fav.path, "Favorite directory does not exist (yet)");
    }
    store.save()?;

    println!("Added favorite: {}", fav.display_name());
    Ok(())
}

/// Rename (or clear the name of) a favorite
pub fn rename_command(paths: &Paths, selector: &str, name: &str) -> Result<()> {
    let mut store = FavoritesStore::load(&paths.favorites)?;
    let display = store.rename(selector, name)?.display_name();
    store.save()?;

    println!("Updated favorite: {}", display);
    Ok(())
}

/// Remove a favorite
pub fn remove_command(paths: &Paths, selector: &str) -> Result<()> {
    let mut store = FavoritesStore::load(&paths.favorites)?;
    let removed = store.remove(selector)?;
    store.save()?;

    println!("Removed favorite: {}", removed.display_name());
    Ok(())
}
