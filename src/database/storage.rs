//! Key/value storage backing the deck store.
//!
//! Persisted state lives under a handful of string keys, each holding a JSON document.
//! `SqliteStorage` keeps them in a single table on disk; `MemoryStorage` keeps them in
//! memory and is used by tests.

use crate::error::Result;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeMap;
use std::path::Path;

pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) the database file and its key/value table.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        log::info!("Opened storage at {}", path.display());
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS local_storage (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            (),
        )?;
        Ok(Self { conn })
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(storage: &mut dyn Storage) {
        assert_eq!(storage.get_item("flashcardDecks").unwrap(), None);

        storage.set_item("flashcardDecks", "[]").unwrap();
        assert_eq!(storage.get_item("flashcardDecks").unwrap().as_deref(), Some("[]"));

        storage.set_item("flashcardDecks", r#"[{"name":"x"}]"#).unwrap();
        assert_eq!(
            storage.get_item("flashcardDecks").unwrap().as_deref(),
            Some(r#"[{"name":"x"}]"#)
        );

        assert_eq!(storage.get_item("flashcards").unwrap(), None);
    }

    #[test]
    fn test_memory_storage() {
        exercise(&mut MemoryStorage::default());
    }

    #[test]
    fn test_sqlite_storage_in_memory() {
        exercise(&mut SqliteStorage::open_in_memory().unwrap());
    }

    #[test]
    fn test_sqlite_storage_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.sqlite3");

        {
            let mut storage = SqliteStorage::open(&path).unwrap();
            storage.set_item("flashcards", "[]").unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("flashcards").unwrap().as_deref(), Some("[]"));
    }
}
