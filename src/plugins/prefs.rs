//! Per-workspace preferences: favorites, last-opened timestamps, tags and the
//! chosen sort mode.
//!
//! Everything is keyed by workspace id and persisted as serialized values in a
//! small string key/value store. Entries are created lazily on first mutation
//! and are never cleaned up; metadata for an id that no longer has a history
//! entry is simply never surfaced.

use crate::core::db;
use crate::core::error::ShelfError;
use crate::core::time;
use crate::plugins::sort::SortMode;
use rusqlite::{Connection, OptionalExtension, params};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;
use std::sync::Mutex;

pub const FAVORITES_KEY: &str = "workspace-favorites";
pub const LAST_OPENED_KEY: &str = "workspace-last-opened";
pub const TAGS_KEY: &str = "workspace-tags";
pub const SORT_PREFERENCE_KEY: &str = "sort-preference";

pub const KV_SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
";

/// String-keyed persistence used by [`Preferences`].
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, ShelfError>;
    fn set(&self, key: &str, value: &str) -> Result<(), ShelfError>;
    fn remove(&self, key: &str) -> Result<(), ShelfError>;
}

/// SQLite-backed store living in the codeshelf data directory.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self, ShelfError> {
        Self::with_connection(db::db_connect(db_path)?)
    }

    pub fn in_memory() -> Result<Self, ShelfError> {
        Self::with_connection(db::memory_connect()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, ShelfError> {
        conn.execute(KV_SCHEMA, [])?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, ShelfError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ShelfError> {
        self.conn.execute(
            "INSERT INTO kv(key, value, updated_at) VALUES(?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at",
            params![key, value, time::now_epoch_z()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ShelfError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-process store, for tests and dry runs.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, ShelfError> {
        Ok(self.values().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ShelfError> {
        self.values().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ShelfError> {
        self.values().remove(key);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMetadata {
    pub is_favorite: bool,
    /// Unix epoch milliseconds
    pub last_opened: Option<u64>,
    pub tags: Vec<String>,
}

/// Metadata service over any [`KeyValueStore`].
pub struct Preferences<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, ShelfError> {
        let Some(raw) = self.store.get(key)? else {
            return Ok(T::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::debug!("ignoring corrupt preference {}: {}", key, e);
                Ok(T::default())
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ShelfError> {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)
    }

    // ----- favorites -----

    pub fn favorites(&self) -> Result<BTreeSet<String>, ShelfError> {
        self.read_json(FAVORITES_KEY)
    }

    /// Flip the favorite flag; returns the new state.
    pub fn toggle_favorite(&self, id: &str) -> Result<bool, ShelfError> {
        let mut favorites = self.favorites()?;
        let now_favorite = if favorites.remove(id) {
            false
        } else {
            favorites.insert(id.to_string());
            true
        };
        self.write_json(FAVORITES_KEY, &favorites)?;
        Ok(now_favorite)
    }

    pub fn is_favorite(&self, id: &str) -> Result<bool, ShelfError> {
        Ok(self.favorites()?.contains(id))
    }

    // ----- last opened -----

    pub fn last_opened_map(&self) -> Result<BTreeMap<String, u64>, ShelfError> {
        self.read_json(LAST_OPENED_KEY)
    }

    pub fn touch_last_opened(&self, id: &str) -> Result<u64, ShelfError> {
        self.record_last_opened(id, time::now_epoch_ms())
    }

    pub fn record_last_opened(&self, id: &str, timestamp_ms: u64) -> Result<u64, ShelfError> {
        let mut map = self.last_opened_map()?;
        map.insert(id.to_string(), timestamp_ms);
        self.write_json(LAST_OPENED_KEY, &map)?;
        Ok(timestamp_ms)
    }

    pub fn last_opened(&self, id: &str) -> Result<Option<u64>, ShelfError> {
        Ok(self.last_opened_map()?.get(id).copied())
    }

    // ----- tags -----

    pub fn tags_map(&self) -> Result<BTreeMap<String, Vec<String>>, ShelfError> {
        self.read_json(TAGS_KEY)
    }

    /// Replace the tags of `id`. Tags are trimmed; blanks and repeats are
    /// dropped, order is kept. An empty result removes the entry.
    pub fn set_tags(&self, id: &str, tags: &[String]) -> Result<Vec<String>, ShelfError> {
        let cleaned = clean_tags(tags);
        let mut map = self.tags_map()?;
        if cleaned.is_empty() {
            map.remove(id);
        } else {
            map.insert(id.to_string(), cleaned.clone());
        }
        self.write_json(TAGS_KEY, &map)?;
        Ok(cleaned)
    }

    pub fn tags(&self, id: &str) -> Result<Vec<String>, ShelfError> {
        Ok(self.tags_map()?.remove(id).unwrap_or_default())
    }

    // ----- sort -----

    /// Persisted sort mode, if one was ever chosen and is still recognised.
    pub fn stored_sort_mode(&self) -> Result<Option<SortMode>, ShelfError> {
        Ok(self
            .store
            .get(SORT_PREFERENCE_KEY)?
            .and_then(|raw| raw.parse().ok()))
    }

    pub fn sort_mode(&self) -> Result<SortMode, ShelfError> {
        Ok(self.stored_sort_mode()?.unwrap_or_default())
    }

    pub fn set_sort_mode(&self, mode: SortMode) -> Result<(), ShelfError> {
        self.store.set(SORT_PREFERENCE_KEY, mode.as_str())
    }

    // ----- aggregation -----

    pub fn metadata(&self, id: &str) -> Result<WorkspaceMetadata, ShelfError> {
        Ok(WorkspaceMetadata {
            is_favorite: self.is_favorite(id)?,
            last_opened: self.last_opened(id)?,
            tags: self.tags(id)?,
        })
    }

    /// Metadata for every id in `ids`, reading each preference key once.
    pub fn metadata_for<'a, I>(&self, ids: I) -> Result<HashMap<String, WorkspaceMetadata>, ShelfError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let favorites = self.favorites()?;
        let timestamps = self.last_opened_map()?;
        let mut tags = self.tags_map()?;

        Ok(ids
            .into_iter()
            .map(|id| {
                let meta = WorkspaceMetadata {
                    is_favorite: favorites.contains(id),
                    last_opened: timestamps.get(id).copied(),
                    tags: tags.remove(id).unwrap_or_default(),
                };
                (id.to_string(), meta)
            })
            .collect())
    }
}

fn clean_tags(tags: &[String]) -> Vec<String> {
    let mut seen = BTreeSet::new();
    tags.iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .filter(|t| seen.insert(t.to_string()))
        .map(str::to_string)
        .collect()
}
