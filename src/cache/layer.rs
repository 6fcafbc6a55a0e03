//! Typed cache access over a storage backend.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::entry::CacheEntry;
use super::storage::CacheStorage;

/// Why a cache lookup produced nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMiss {
  /// No entry stored (or the stored bytes could not be decoded).
  Missing,
  /// An entry exists but is past the validity window.
  Expired,
}

/// Durable cache with a fixed validity window.
///
/// All failure modes of the underlying storage degrade to misses: a read
/// that fails is a miss, a write that fails changes nothing for the caller.
/// Both are logged so broken cache databases stay visible.
#[derive(Clone)]
pub struct PersistentCache {
  storage: Arc<dyn CacheStorage>,
  validity: Duration,
}

impl PersistentCache {
  pub fn new(storage: Arc<dyn CacheStorage>, validity: Duration) -> Self {
    Self { storage, validity }
  }

  pub fn validity(&self) -> Duration {
    self.validity
  }

  /// Read the entry stored under `key`, whatever its age.
  ///
  /// Returns `None` on absence, storage failure or an undecodable value.
  pub fn read<T: DeserializeOwned>(&self, key: &str) -> Option<CacheEntry<T>> {
    let raw = match self.storage.get(key) {
      Ok(Some(raw)) => raw,
      Ok(None) => return None,
      Err(e) => {
        warn!(key, error = %e, "cache read failed, treating as miss");
        return None;
      }
    };

    match serde_json::from_slice(&raw) {
      Ok(entry) => Some(entry),
      Err(e) => {
        warn!(key, error = %e, "discarding undecodable cache entry");
        None
      }
    }
  }

  /// Read the entry under `key` and require it to be inside the validity
  /// window at `now_ms`.
  pub fn read_fresh<T: DeserializeOwned>(
    &self,
    key: &str,
    now_ms: i64,
  ) -> Result<CacheEntry<T>, CacheMiss> {
    let entry = self.read(key).ok_or(CacheMiss::Missing)?;
    if entry.is_fresh_at(now_ms, self.validity) {
      Ok(entry)
    } else {
      debug!(key, stored_at_ms = entry.stored_at_ms, "cache entry expired");
      Err(CacheMiss::Expired)
    }
  }

  /// Store `entry` under `key`, replacing any previous entry.
  ///
  /// Serialization or storage failures are logged and swallowed.
  pub fn write<T: Serialize>(&self, key: &str, entry: &CacheEntry<T>) {
    let bytes = match serde_json::to_vec(entry) {
      Ok(bytes) => bytes,
      Err(e) => {
        warn!(key, error = %e, "failed to serialize cache entry, skipping write");
        return;
      }
    };

    if let Err(e) = self.storage.put(key, &bytes) {
      warn!(key, error = %e, "cache write failed");
    }
  }

  /// Drop the entry under `key`. Safe to call when nothing is cached.
  pub fn clear(&self, key: &str) {
    if let Err(e) = self.storage.remove(key) {
      warn!(key, error = %e, "cache clear failed");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cache::entry::DEFAULT_VALIDITY;
  use crate::cache::storage::SqliteStorage;
  use crate::envelope::ListEnvelope;

  fn cache() -> PersistentCache {
    PersistentCache::new(
      Arc::new(SqliteStorage::in_memory().unwrap()),
      DEFAULT_VALIDITY,
    )
  }

  #[test]
  fn test_write_then_read() {
    let cache = cache();
    let entry = CacheEntry::new(ListEnvelope::single_page(vec![1, 2, 3]), 1_000);
    cache.write("blogs_cache", &entry);

    let back: CacheEntry<i32> = cache.read("blogs_cache").unwrap();
    assert_eq!(back, entry);
  }

  #[test]
  fn test_read_absent_key() {
    let cache = cache();
    assert!(cache.read::<i32>("absent").is_none());
  }

  #[test]
  fn test_undecodable_entry_is_a_miss() {
    let storage = Arc::new(SqliteStorage::in_memory().unwrap());
    storage.put("blogs_cache", b"not json at all").unwrap();

    let cache = PersistentCache::new(storage, DEFAULT_VALIDITY);
    assert!(cache.read::<i32>("blogs_cache").is_none());
    assert_eq!(
      cache.read_fresh::<i32>("blogs_cache", 0).unwrap_err(),
      CacheMiss::Missing
    );
  }

  #[test]
  fn test_read_fresh_rejects_expired() {
    let cache = cache();
    let stored_at = 1_000_000;
    let entry = CacheEntry::new(ListEnvelope::single_page(vec![1]), stored_at);
    cache.write("k", &entry);

    let past_window = stored_at + DEFAULT_VALIDITY.as_millis() as i64 + 1;
    assert_eq!(
      cache.read_fresh::<i32>("k", past_window).unwrap_err(),
      CacheMiss::Expired
    );

    let inside_window = stored_at + 1;
    assert!(cache.read_fresh::<i32>("k", inside_window).is_ok());
  }

  #[test]
  fn test_clear_is_idempotent() {
    let cache = cache();
    let entry = CacheEntry::new(ListEnvelope::single_page(vec![1]), 0);
    cache.write("k", &entry);

    cache.clear("k");
    cache.clear("k");
    assert!(cache.read::<i32>("k").is_none());
  }
}
