//! # SQLite storage facility
//!
//! Durable key-value storage in `<data dir>/campsite.db`.
//!
//! ## Schema
//!
//! - **`meta`**: `key`/`value` pairs; records `schema_version`
//! - **`kv`**: `key` (primary key), `value`, `updated_at`
//!
//! Writes are single-statement upserts, so replacing the credential is atomic
//! from the caller's perspective. Connections use WAL with `synchronous=FULL`.
//! Statements run on tokio's blocking pool, never on a runtime worker.
//!
//! Values are stored as given. This backend does not encrypt; use
//! Windows Credential Manager where encryption at rest is required.

use crate::constants::{DB_FILE_NAME, SCHEMA_VERSION};
use crate::core::SecureStorage;
use crate::logger;
use crate::models::StorageKey;
use crate::utils::sync::lock;
use crate::utils::{DbError, StorageError};
use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

type SharedConn = Arc<Mutex<Connection>>;

pub struct SqliteStorage {
    conn: SharedConn,
}

impl SqliteStorage {
    /// Open (creating if needed) `campsite.db` inside `data_dir`.
    pub fn open_in(data_dir: &Path) -> Result<Self, DbError> {
        fs::create_dir_all(data_dir)?;
        Self::open(&data_dir.join(DB_FILE_NAME))
    }

    /// Open the database file at `path` and apply the schema.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        apply_pragmas(&conn)?;
        init_schema(&conn)?;
        logger::log_debug(&format!("Opened credential database at {}", path.display()));
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    #[cfg(test)]
    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        lock(&self.conn, "sqlite_storage")
    }

    /// Run a blocking statement on tokio's blocking pool.
    async fn run<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, DbError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let result = tokio::task::spawn_blocking(move || op(&*lock(&conn, "sqlite_storage")))
            .await
            .map_err(|e| StorageError::Unavailable(format!("SQLite task failed: {}", e)))?;
        Ok(result?)
    }
}

fn get_sync(conn: &Connection, key: &str) -> Result<Option<String>, DbError> {
    conn.query_row("SELECT value FROM kv WHERE key = ?1", [key], |row| {
        row.get(0)
    })
    .optional()
    .map_err(DbError::from)
}

fn set_sync(conn: &Connection, key: &str, value: &str) -> Result<(), DbError> {
    conn.execute(
        "
        INSERT INTO kv(key, value)
        VALUES(?1, ?2)
        ON CONFLICT(key)
        DO UPDATE SET value = excluded.value, updated_at = datetime('now')
        ",
        (key, value),
    )?;
    Ok(())
}

fn delete_sync(conn: &Connection, key: &str) -> Result<(), DbError> {
    let removed = conn.execute("DELETE FROM kv WHERE key = ?1", [key])?;
    logger::log_debug_verbose(&format!("kv delete '{}' removed {} row(s)", key, removed));
    Ok(())
}

#[async_trait]
impl SecureStorage for SqliteStorage {
    async fn get_item(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let key = key.as_str().to_string();
        self.run(move |conn| get_sync(conn, &key)).await
    }

    async fn set_item(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        let key = key.as_str().to_string();
        let value = value.to_string();
        self.run(move |conn| set_sync(conn, &key, &value)).await
    }

    async fn delete_item(&self, key: &StorageKey) -> Result<(), StorageError> {
        let key = key.as_str().to_string();
        self.run(move |conn| delete_sync(conn, &key)).await
    }
}

/// Creates tables if missing and records the schema version in `meta`.
fn init_schema(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS meta (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS kv (
            key        TEXT PRIMARY KEY,
            value      TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;

    conn.execute(
        "INSERT INTO meta(key, value) VALUES('schema_version', ?1)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

fn apply_pragmas(conn: &Connection) -> Result<(), DbError> {
    conn.busy_timeout(Duration::from_millis(5_000))?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    conn.pragma_update(None, "synchronous", "FULL")?;
    Ok(())
}
