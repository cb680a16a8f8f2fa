//! Name → executable overrides kept in `run.fav`.
//!
//! The file holds one favorite per line, the name, a single space, then the
//! full path. It is read once at startup and rewritten in full whenever a
//! favorite is saved or deleted. Concurrent writers are not coordinated; the
//! last rewrite wins.

use crate::{Error, Result};
use run_types::Favorite;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Characters that only make sense in a search pattern, never in a key
const WILDCARDS: [char; 2] = ['%', '*'];

/// Strip search wildcards so favorites are keyed on the literal name
#[must_use]
pub fn canonical_name(name: &str) -> String {
    name.chars().filter(|c| !WILDCARDS.contains(c)).collect()
}

/// Parse favorites file content.
///
/// A line without a space becomes a favorite with an empty path. Blank lines
/// are skipped.
#[must_use]
pub fn parse(content: &str) -> Vec<Favorite> {
    content
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(' ') {
            Some((name, path)) => Favorite::new(name, path),
            None => Favorite::new(line, ""),
        })
        .collect()
}

fn render(entries: &[Favorite]) -> String {
    entries
        .iter()
        .map(|fav| format!("{} {}\n", fav.name, fav.executable_path))
        .collect()
}

/// In-memory favorites bound to their file
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
    entries: Vec<Favorite>,
}

impl FavoritesStore {
    /// An empty store that will be written to `path`
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Vec::new(),
        }
    }

    /// Load favorites from `path`.
    ///
    /// A missing file is an empty store. A file that cannot be read is
    /// reported and also treated as empty, so lookups still work.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let mut store = Self::new(path);

        if !path.exists() {
            debug!("Favorites file not found at {}", path.display());
            return store;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => {
                store.entries = parse(&content);
                info!(
                    "Loaded {} favorites from {}",
                    store.entries.len(),
                    path.display()
                );
            }
            Err(e) => {
                warn!(
                    "Could not open favorites file '{}' for read - {e}",
                    path.display()
                );
            }
        }

        store
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored path for `name`, compared case-insensitively
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|fav| fav.name.eq_ignore_ascii_case(name))
            .map(|fav| fav.executable_path.as_str())
    }

    /// Favorites in file order
    #[must_use]
    pub fn list(&self) -> &[Favorite] {
        &self.entries
    }

    /// Remember `executable_path` for `name` and rewrite the file.
    ///
    /// Wildcards are stripped from the name first. An existing favorite keeps
    /// its position and gets the new path; a new one goes to the front.
    /// Returns the stored name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the file cannot be written; the
    /// in-memory store is left unchanged in that case.
    pub fn save(&mut self, name: &str, executable_path: &str) -> Result<String> {
        let name = canonical_name(name);
        let mut entries = self.entries.clone();

        if let Some(existing) = entries
            .iter_mut()
            .find(|fav| fav.name.eq_ignore_ascii_case(&name))
        {
            existing.executable_path = executable_path.to_string();
        } else {
            entries.insert(0, Favorite::new(name.clone(), executable_path));
        }

        self.persist(&entries)?;
        self.entries = entries;
        info!("Saved favorite '{name}' -> {executable_path}");
        Ok(name)
    }

    /// Forget `name` and rewrite the file.
    ///
    /// Returns the removed favorite, or `None` without touching the file when
    /// no favorite matches.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Persistence`] if the file cannot be written; the
    /// in-memory store is left unchanged in that case.
    pub fn delete(&mut self, name: &str) -> Result<Option<Favorite>> {
        let Some(removed) = self
            .entries
            .iter()
            .find(|fav| fav.name.eq_ignore_ascii_case(name))
            .cloned()
        else {
            return Ok(None);
        };

        let entries: Vec<Favorite> = self
            .entries
            .iter()
            .filter(|fav| !fav.name.eq_ignore_ascii_case(name))
            .cloned()
            .collect();

        self.persist(&entries)?;
        self.entries = entries;
        info!("Deleted favorite '{}'", removed.name);
        Ok(Some(removed))
    }

    fn persist(&self, entries: &[Favorite]) -> Result<()> {
        std::fs::write(&self.path, render(entries)).map_err(|source| Error::Persistence {
            path: self.path.clone(),
            source,
        })
    }
}
