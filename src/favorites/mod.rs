//! Favorite directories, persisted as JSON.
//!
//! The whole list is loaded, mutated in memory and written back atomically.
//! It feeds `(path, name)` pairs to the launcher and records "last opened"
//! bookkeeping after a successful launch.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::write_atomic;
use crate::terminal::expand_tilde;
use crate::Favorite;

/// Current on-disk format version.
pub const CURRENT_VERSION: u32 = 1;

/// On-disk representation
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FavoritesState {
    #[serde(default)]
    favorites: Vec<Favorite>,
    #[serde(default = "default_version")]
    version: u32,
}

fn default_version() -> u32 {
    CURRENT_VERSION
}

/// Favorites list bound to a file.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
    favorites: Vec<Favorite>,
}

impl FavoritesStore {
    /// Default location (~/.ccopen/favorites.json)
    pub fn default_path() -> PathBuf {
        crate::config::Config::global_config_dir().join("favorites.json")
    }

    /// Empty store bound to `path` (nothing is written until [`save`](Self::save)).
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            favorites: Vec::new(),
        }
    }

    /// Load the store; a missing file yields an empty list.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::empty(path));
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read favorites: {}", path.display()))?;
        let state: FavoritesState = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse favorites: {}", path.display()))?;

        if state.version > CURRENT_VERSION {
            tracing::warn!(
                version = state.version,
                "Favorites file was written by a newer version"
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            favorites: state.favorites,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Favorites in insertion order.
    pub fn favorites(&self) -> &[Favorite] {
        &self.favorites
    }

    /// Save with an exclusive lock and an atomic rename.
    pub fn save(&self) -> Result<()> {
        let state = FavoritesState {
            favorites: self.favorites.clone(),
            version: CURRENT_VERSION,
        };
        let content =
            serde_json::to_string_pretty(&state).context("Failed to serialize favorites")?;
        write_atomic(&self.path, &content)
            .with_context(|| format!("Failed to save favorites: {}", self.path.display()))
    }

    /// Add a directory. `~` is expanded against `home`; duplicates are rejected.
    pub fn add(&mut self, path: &str, name: Option<String>, home: &Path) -> Result<&Favorite> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            bail!("Directory path must not be empty");
        }

        let expanded = expand_tilde(trimmed, home).display().to_string();
        if let Some(existing) = self.favorites.iter().find(|f| f.path == expanded) {
            bail!(
                "{} is already a favorite ({})",
                expanded,
                existing.display_name()
            );
        }

        self.favorites.push(Favorite::new(expanded, name));
        Ok(&self.favorites[self.favorites.len() - 1])
    }

    /// Set or clear (empty string) the display name.
    pub fn rename(&mut self, selector: &str, name: &str) -> Result<&Favorite> {
        let index = self.resolve(selector)?;
        let name = name.trim();
        self.favorites[index].name = if name.is_empty() {
            None
        } else {
            Some(name.to_string())
        };
        Ok(&self.favorites[index])
    }

    /// Remove a favorite, returning it.
    pub fn remove(&mut self, selector: &str) -> Result<Favorite> {
        let index = self.resolve(selector)?;
        Ok(self.favorites.remove(index))
    }

    /// Record a successful launch of the favorite with `id`.
    pub fn mark_opened(&mut self, id: Uuid) -> bool {
        match self.favorites.iter_mut().find(|f| f.id == id) {
            Some(favorite) => {
                favorite.mark_opened(Utc::now());
                true
            }
            None => false,
        }
    }

    /// Find a favorite by id, unique id prefix, display name or path.
    ///
    /// Fails when the selector names more than one favorite (two
    /// directories with the same name, or a short id prefix).
    pub fn lookup(&self, selector: &str) -> Result<Option<&Favorite>> {
        Ok(self.lookup_index(selector)?.map(|index| &self.favorites[index]))
    }

    /// Like [`lookup`](Self::lookup), treating ambiguous selectors as no match.
    pub fn find(&self, selector: &str) -> Option<&Favorite> {
        self.lookup(selector).ok().flatten()
    }

    /// Closest display name to `selector`, for "did you mean" hints.
    pub fn suggest(&self, selector: &str) -> Option<String> {
        let selector = selector.to_lowercase();
        self.favorites
            .iter()
            .map(|f| {
                let name = f.display_name();
                let score = strsim::jaro_winkler(&selector, &name.to_lowercase());
                (name, score)
            })
            .filter(|(_, score)| *score >= 0.8)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
            .map(|(name, _)| name)
    }

    /// Favorites matching `query` (all when empty), most relevant first.
    pub fn search(&self, query: &str) -> Vec<&Favorite> {
        let query = query.trim();
        let mut matches: Vec<&Favorite> = self
            .favorites
            .iter()
            .filter(|f| query.is_empty() || f.matches(query))
            .collect();
        matches.sort_by(|a, b| compare_favorites(a, b));
        matches
    }

    /// All favorites, most relevant first.
    pub fn sorted(&self) -> Vec<&Favorite> {
        self.search("")
    }

    /// Index of the favorite matching `selector`, with a hint when none does.
    fn resolve(&self, selector: &str) -> Result<usize> {
        match self.lookup_index(selector)? {
            Some(index) => Ok(index),
            None => match self.suggest(selector) {
                Some(hint) => bail!("No favorite matches '{}'. Did you mean '{}'?", selector, hint),
                None => bail!("No favorite matches '{}'", selector),
            },
        }
    }

    fn lookup_index(&self, selector: &str) -> Result<Option<usize>> {
        let selector = selector.trim();
        if selector.is_empty() {
            return Ok(None);
        }

        if let Ok(id) = Uuid::parse_str(selector) {
            return Ok(self.favorites.iter().position(|f| f.id == id));
        }

        // Paths are unique, names and id prefixes are not
        if let Some(index) = self.favorites.iter().position(|f| f.path == selector) {
            return Ok(Some(index));
        }

        let by_name = self.positions(|f| f.display_name() == selector);
        if !by_name.is_empty() {
            return self.single(selector, by_name);
        }

        let by_prefix = self.positions(|f| f.id.to_string().starts_with(selector));
        self.single(selector, by_prefix)
    }

    fn positions(&self, predicate: impl Fn(&Favorite) -> bool) -> Vec<usize> {
        self.favorites
            .iter()
            .enumerate()
            .filter(|(_, f)| predicate(f))
            .map(|(index, _)| index)
            .collect()
    }

    fn single(&self, selector: &str, matches: Vec<usize>) -> Result<Option<usize>> {
        match matches.as_slice() {
            [] => Ok(None),
            [index] => Ok(Some(*index)),
            _ => {
                let candidates: Vec<String> = matches
                    .iter()
                    .map(|&index| {
                        let fav = &self.favorites[index];
                        format!("{} ({})", short_id(fav), fav.path)
                    })
                    .collect();
                bail!(
                    "'{}' is ambiguous, it matches: {}. Use the id or the full path.",
                    selector,
                    candidates.join(", ")
                )
            }
        }
    }
}

/// First eight characters of the id, as shown by `ccopen list`.
pub fn short_id(favorite: &Favorite) -> String {
    favorite.id.simple().to_string()[..8].to_string()
}

/// Recently opened first, then most opened, then by name.
fn compare_favorites(a: &Favorite, b: &Favorite) -> Ordering {
    match (a.last_opened, b.last_opened) {
        (Some(x), Some(y)) if x != y => return y.cmp(&x),
        (Some(_), None) => return Ordering::Less,
        (None, Some(_)) => return Ordering::Greater,
        _ => {}
    }

    b.open_count
        .cmp(&a.open_count)
        .then_with(|| a.display_name().to_lowercase().cmp(&b.display_name().to_lowercase()))
}
