//! Key-value persistence.
//!
//! Values are JSON documents. Every read is validated; malformed data
//! degrades to an absent value rather than an error. Writes are best-effort:
//! a failed write is logged and swallowed so a full or disabled store never
//! blocks a phase transition.

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Errors from the persistent store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// A synchronous string key-value store. Shared across contexts with
/// last-write-wins consistency; no locking.
pub trait KvStore {
    /// Raw value for a key, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Set a key to a raw value.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove a key.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// SQLite-backed store: a single `kv` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: &Path) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.init()?;
        Ok(store)
    }

    fn init(&self) -> StoreResult<()> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(())
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Option<String> {
        self.conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .ok()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.map.remove(key);
        Ok(())
    }
}

/// Read and deserialize a stored value. Missing keys and malformed JSON both
/// come back as `None`; corruption is logged, never surfaced.
pub fn read_json<T: DeserializeOwned>(store: &impl KvStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("discarding malformed stored value at {key}: {err}");
            None
        }
    }
}

/// Serialize and write a value. Failures are logged and swallowed.
pub fn write_json<T: Serialize>(store: &mut impl KvStore, key: &str, value: &T) {
    let json = match serde_json::to_string(value) {
        Ok(json) => json,
        Err(err) => {
            warn!("failed to serialize value for {key}: {err}");
            return;
        }
    };
    if let Err(err) = store.set(key, &json) {
        warn!("storage write failed for {key}: {err}");
    }
}
