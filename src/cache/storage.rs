//! Cache storage trait and the SQLite implementation.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// Errors from a storage backend. These never cross the cache layer
/// boundary; callers above it only ever observe a miss.
#[derive(Debug, Error)]
pub enum StorageError {
  #[error("cache database error: {0}")]
  Sqlite(#[from] rusqlite::Error),
  #[error("failed to create cache directory {path}: {source}")]
  CreateDir {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("could not determine a data directory for the cache database")]
  NoDataDir,
  #[error("cache lock poisoned")]
  LockPoisoned,
}

/// Byte-level key/value store backing the persistent cache.
///
/// Values are opaque to the backend; the layer above owns the JSON layout.
pub trait CacheStorage: Send + Sync {
  /// Fetch the value stored under `key`, if any.
  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

  /// Store `value` under `key`, replacing any previous value.
  fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError>;

  /// Delete the value under `key`. Deleting an absent key is not an error.
  fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage implementation that doesn't persist anything.
/// Used when caching is disabled - all operations are no-ops.
pub struct NoopStorage;

impl CacheStorage for NoopStorage {
  fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, StorageError> {
    Ok(None) // Always miss
  }

  fn put(&self, _key: &str, _value: &[u8]) -> Result<(), StorageError> {
    Ok(()) // Discard
  }

  fn remove(&self, _key: &str) -> Result<(), StorageError> {
    Ok(())
  }
}

/// SQLite-backed key/value storage.
pub struct SqliteStorage {
  conn: Mutex<Connection>,
}

/// Schema for the cache table.
const CACHE_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS list_cache (
    cache_key TEXT PRIMARY KEY,
    value BLOB NOT NULL,
    stored_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

impl SqliteStorage {
  /// Open or create the cache database at the default location.
  pub fn open() -> Result<Self, StorageError> {
    Self::open_at(&Self::default_path()?)
  }

  /// Open or create the cache database at `path`.
  pub fn open_at(path: &Path) -> Result<Self, StorageError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).map_err(|e| StorageError::CreateDir {
        path: parent.to_path_buf(),
        source: e,
      })?;
    }

    let conn = Connection::open(path)?;
    let storage = Self {
      conn: Mutex::new(conn),
    };
    storage.run_migrations()?;

    Ok(storage)
  }

  /// In-memory database, handy for tests and throwaway runs.
  pub fn in_memory() -> Result<Self, StorageError> {
    let storage = Self {
      conn: Mutex::new(Connection::open_in_memory()?),
    };
    storage.run_migrations()?;
    Ok(storage)
  }

  /// Get the default database path.
  fn default_path() -> Result<PathBuf, StorageError> {
    let data_dir = dirs::data_dir()
      .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
      .ok_or(StorageError::NoDataDir)?;

    Ok(data_dir.join("pressroom").join("cache.db"))
  }

  fn run_migrations(&self) -> Result<(), StorageError> {
    let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
    conn.execute_batch(CACHE_SCHEMA)?;
    Ok(())
  }
}

impl CacheStorage for SqliteStorage {
  fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
    let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;

    let value = conn
      .query_row(
        "SELECT value FROM list_cache WHERE cache_key = ?",
        params![key],
        |row| row.get::<_, Vec<u8>>(0),
      )
      .optional()?;

    Ok(value)
  }

  fn put(&self, key: &str, value: &[u8]) -> Result<(), StorageError> {
    let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;

    conn.execute(
      "INSERT OR REPLACE INTO list_cache (cache_key, value, stored_at)
       VALUES (?, ?, datetime('now'))",
      params![key, value],
    )?;

    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), StorageError> {
    let conn = self.conn.lock().map_err(|_| StorageError::LockPoisoned)?;
    conn.execute("DELETE FROM list_cache WHERE cache_key = ?", params![key])?;
    Ok(())
  }
}
