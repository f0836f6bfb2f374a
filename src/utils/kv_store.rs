//! Local key-value persistence
//!
//! The app's whole durable state is a handful of keys (token, loved songs,
//! counters, playlist id). Values are stored as strings; structured ones are
//! JSON encoded by the caller.

use super::error_handling::safe_lock;
use super::errors::StoreError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    /// Write several keys as one unit
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// Read a JSON value, treating missing keys, read failures and corrupt values
/// alike as absent
pub fn get_json<T: serde::de::DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("[Store] Ignoring corrupt value for '{}': {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("[Store] Failed to read '{}': {}", key, e);
            None
        }
    }
}

pub fn to_json<T: serde::Serialize>(key: &str, value: &T) -> Result<String, StoreError> {
    serde_json::to_string(value).map_err(|e| StoreError::Serialization {
        key: key.to_string(),
        message: e.to_string(),
    })
}

/// SQLite-backed store: one `kv` table in the app data directory
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;

        log::info!("[Store] Opened state database at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// `<data_dir>/swipers/state.db`, or inside `data_dir` when given
    pub fn default_path(data_dir: Option<&Path>) -> Result<PathBuf, StoreError> {
        match data_dir {
            Some(dir) => Ok(dir.join("state.db")),
            None => dirs::data_dir()
                .map(|d| d.join("swipers").join("state.db"))
                .ok_or(StoreError::NoDataDir),
        }
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let conn = safe_lock(&self.conn, "Store");
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let conn = safe_lock(&self.conn, "Store");
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let conn = safe_lock(&self.conn, "Store");
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            )?;
            for (key, value) in entries {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let conn = safe_lock(&self.conn, "Store");
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory store. Writes can be switched off to mimic a full or blocked
/// storage backend.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    reject_writes: Mutex<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn set_reject_writes(&self, reject: bool) {
        *safe_lock(&self.reject_writes, "MemoryStore") = reject;
    }

    pub fn contains(&self, key: &str) -> bool {
        safe_lock(&self.entries, "MemoryStore").contains_key(key)
    }

    pub fn len(&self) -> usize {
        safe_lock(&self.entries, "MemoryStore").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_writable(&self, key: &str) -> Result<(), StoreError> {
        if *safe_lock(&self.reject_writes, "MemoryStore") {
            return Err(StoreError::Rejected(key.to_string()));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(safe_lock(&self.entries, "MemoryStore").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        safe_lock(&self.entries, "MemoryStore").insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        if let Some((first, _)) = entries.first() {
            self.check_writable(first)?;
        }
        let mut map = safe_lock(&self.entries, "MemoryStore");
        for (key, value) in entries {
            map.insert(key.to_string(), value.clone());
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable(key)?;
        safe_lock(&self.entries, "MemoryStore").remove(key);
        Ok(())
    }
}
