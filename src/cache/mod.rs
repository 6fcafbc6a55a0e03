//! Durable cache for list responses.
//!
//! One cache entry per entity type, stored under the canonical key
//! `{entity}_cache` as a JSON-encoded envelope plus the time it was stored.
//! Entries are trusted for a fixed validity window and otherwise treated as
//! absent. Read/write failures never reach callers; they are logged and
//! degrade to cache misses.

mod entry;
mod layer;
mod storage;

pub use entry::{is_fresh_at, now_ms, CacheEntry, DEFAULT_VALIDITY};
pub use layer::{CacheMiss, PersistentCache};
pub use storage::{CacheStorage, NoopStorage, SqliteStorage, StorageError};
