//! Preference store — persists the last [`Selection`] in one scoped slot of a
//! key-value backend.
//!
//! [`PreferenceStore::load`] never fails: a missing slot, an unreadable
//! backend, or text that is not a valid saved selection all come back as
//! `None`, and the caller falls back to [`Selection::default`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::selection::{Choice, Selection, SortMode};

/// Default slot key.
pub const DEFAULT_KEY: &str = "flower-list-filters";

// ---------------------------------------------------------------------------
// Key-value backends
// ---------------------------------------------------------------------------

/// The storage collaborator: string values under string keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}

/// In-process store, used by tests and by `--no-save` runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.slots.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A single JSON object file mapping slot keys to string values.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<HashMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(text) => serde_json::from_str(&text)
                .map_err(|e| CatalogError::Storage(format!("{}: {e}", self.path.display()))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_slots()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut slots = self.read_slots().unwrap_or_else(|err| {
            tracing::warn!(%err, path = %self.path.display(), "discarding unreadable preference file");
            HashMap::new()
        });
        slots.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&slots)?)?;
        Ok(())
    }
}

/// Stands in when no storage backend is available. Every call fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStore;

impl KeyValueStore for NoStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Err(CatalogError::Storage("no storage backend".to_string()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<()> {
        Err(CatalogError::Storage("no storage backend".to_string()))
    }
}

// ---------------------------------------------------------------------------
// Persisted shape
// ---------------------------------------------------------------------------

/// The saved object. Every field is optional on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoredFilters {
    pub keyword: String,
    pub only_filled: bool,
    pub alias_only: bool,
    pub meaning_only: bool,
    pub season_only: bool,
    pub season_filter: String,
    pub group_value: String,
    pub tier_value: String,
    pub order: SortMode,
}

impl Default for StoredFilters {
    fn default() -> Self {
        Self::from(&Selection::default())
    }
}

impl From<&Selection> for StoredFilters {
    fn from(s: &Selection) -> Self {
        Self {
            keyword: s.keyword.clone(),
            only_filled: s.only_filled,
            alias_only: s.alias_only,
            meaning_only: s.meaning_only,
            season_only: s.season_only,
            season_filter: s.season.to_string(),
            group_value: s.group.to_string(),
            tier_value: s.tier.to_string(),
            order: s.sort,
        }
    }
}

impl From<StoredFilters> for Selection {
    fn from(f: StoredFilters) -> Self {
        Self {
            keyword: f.keyword,
            only_filled: f.only_filled,
            alias_only: f.alias_only,
            meaning_only: f.meaning_only,
            season_only: f.season_only,
            group: Choice::parse(&f.group_value),
            tier: Choice::parse(&f.tier_value),
            season: Choice::parse(&f.season_filter),
            sort: f.order,
        }
    }
}

// ---------------------------------------------------------------------------
// PreferenceStore
// ---------------------------------------------------------------------------

/// Saves and restores a [`Selection`] under one slot key.
#[derive(Debug, Clone)]
pub struct PreferenceStore<S> {
    backend: S,
    key: String,
}

impl<S: KeyValueStore> PreferenceStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_key(backend, DEFAULT_KEY)
    }

    pub fn with_key(backend: S, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn save(&mut self, selection: &Selection) -> Result<()> {
        let text = serde_json::to_string(&StoredFilters::from(selection))?;
        self.backend.set(&self.key, &text)?;
        tracing::debug!(key = %self.key, "preferences saved");
        Ok(())
    }

    /// The saved selection, or `None` if there is nothing usable.
    pub fn load(&self) -> Option<Selection> {
        let text = match self.backend.get(&self.key) {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::debug!(key = %self.key, "no saved preferences");
                return None;
            }
            Err(err) => {
                tracing::warn!(%err, "preference backend unavailable");
                return None;
            }
        };
        match serde_json::from_str::<StoredFilters>(&text) {
            Ok(stored) => Some(stored.into()),
            Err(err) => {
                tracing::warn!(%err, key = %self.key, "discarding malformed saved preferences");
                None
            }
        }
    }

    /// [`load`](Self::load), falling back to the default selection.
    pub fn load_or_default(&self) -> Selection {
        self.load().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
