use std::collections::HashMap;
use std::path::Path;

use rusqlite::{Connection, OptionalExtension, Result as SqliteResult};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Error de la base de dades: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("No s'ha pogut preparar el directori de dades: {0}")]
    IoError(#[from] std::io::Error),
}

/// Flat string-to-string persistence surface. Every write replaces the
/// whole value stored under the key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let store = Self::new(Connection::open(path)?);
        store.initialize()?;
        tracing::info!("Opened agenda database at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self::new(Connection::open_in_memory()?);
        store.initialize()?;
        Ok(store)
    }

    pub fn initialize(&self) -> Result<(), StoreError> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        );
        result.unwrap_or(0) > 0
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            rusqlite::params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local store. Used in tests and when the database cannot be opened.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Opens the agenda database, falling back to a process-local store so the
/// agenda stays usable (without persistence) when the file cannot be opened.
pub fn open_store_or_memory(path: &Path) -> Box<dyn KeyValueStore> {
    match SqliteStore::open(path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::error!("Cannot open {}: {}; changes will not be saved", path.display(), e);
            Box::new(MemoryStore::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn creates_database_schema() {
        let conn = Connection::open_in_memory().unwrap();
        let store = SqliteStore::new(conn);

        store.initialize().unwrap();

        assert!(store.table_exists("kv"));
    }

    #[test]
    fn stores_value() {
        let mut store = create_test_store();

        store.set("opAgendaEvents", "{}").unwrap();

        assert_eq!(store.get("opAgendaEvents").unwrap(), Some("{}".to_string()));
    }

    #[test]
    fn missing_key_returns_none() {
        let store = create_test_store();

        assert_eq!(store.get("nonexistent").unwrap(), None);
    }

    #[test]
    fn set_overwrites_existing_value() {
        let mut store = create_test_store();
        store.set("k", "original").unwrap();

        store.set("k", "updated").unwrap();

        assert_eq!(store.get("k").unwrap().as_deref(), Some("updated"));
    }

    #[test]
    fn values_survive_reopening_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("agenda.db");

        {
            let mut store = SqliteStore::open(&path).unwrap();
            store.set("opAgendaCategories", "[]").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.get("opAgendaCategories").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new().with_value("a", "1");
        store.set("b", "2").unwrap();

        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }
}
