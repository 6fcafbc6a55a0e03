//! The cache → network → cache → fixture fallback chain.

use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{now_ms, CacheEntry, CacheMiss, PersistentCache};
use crate::envelope::ListEnvelope;

use super::fixtures::FixtureSet;
use super::query::ListQuery;
use super::record::{cache_key, ContentRecord, DataSource, FetchOutcome};
use super::remote::{RemoteError, RemoteSource};

/// A by-key lookup found nothing, remotely or in fixtures.
///
/// This is the only fetch error consumers ever see; list queries always
/// resolve to an envelope.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{entity} {key:?} not found")]
pub struct NotFoundError {
  pub entity: &'static str,
  pub key: String,
}

/// Remote source wrapped with the persistent cache and fixture fallback.
///
/// One instance per entity type. List queries walk the tiers in a fixed
/// order and always produce an envelope:
///
/// 1. cache, if inside the validity window (skipped on forced refresh)
/// 2. network, persisting the full listing under the canonical key
/// 3. cache again, for the forced-refresh-then-offline case
/// 4. bundled fixtures
///
/// Featured and by-category results are derived from the full listing by
/// filtering, so every list query warms the same cache entry.
pub struct CachedSource<T: ContentRecord, R: RemoteSource<T>> {
  remote: R,
  cache: PersistentCache,
  cache_key: String,
  fixtures: FixtureSet<T>,
}

impl<T: ContentRecord, R: RemoteSource<T>> CachedSource<T, R> {
  pub fn new(remote: R, cache: PersistentCache, fixtures: FixtureSet<T>) -> Self {
    Self {
      remote,
      cache,
      cache_key: cache_key::<T>(),
      fixtures,
    }
  }

  pub fn remote(&self) -> &R {
    &self.remote
  }

  pub fn fixtures(&self) -> &FixtureSet<T> {
    &self.fixtures
  }

  /// Tier 1/3: the cached full listing, if still inside the window.
  fn try_cache(&self, at_ms: i64) -> Result<CacheEntry<T>, CacheMiss> {
    self.cache.read_fresh(&self.cache_key, at_ms)
  }

  /// Resolve a list query through the fallback chain. Never fails.
  pub async fn fetch_list(&self, query: &ListQuery, force_refresh: bool) -> FetchOutcome<T> {
    if !force_refresh {
      match self.try_cache(now_ms()) {
        Ok(entry) => {
          debug!(key = %self.cache_key, query = %query.describe(), "serving from cache");
          return FetchOutcome {
            envelope: query.derive(entry.payload),
            source: DataSource::CacheFresh,
          };
        }
        Err(miss) => {
          debug!(key = %self.cache_key, reason = ?miss, "cache unusable, trying network");
        }
      }
    }

    match self.remote.list_all().await {
      Ok(envelope) => {
        self
          .cache
          .write(&self.cache_key, &CacheEntry::new(envelope.clone(), now_ms()));
        return FetchOutcome {
          envelope: query.derive(envelope),
          source: DataSource::Network,
        };
      }
      Err(e) => {
        warn!(key = %self.cache_key, error = %e, "network fetch failed, falling back");
      }
    }

    // Covers the forced-refresh case where tier 1 was skipped.
    if let Ok(entry) = self.try_cache(now_ms()) {
      return FetchOutcome {
        envelope: query.derive(entry.payload),
        source: DataSource::CacheFallback,
      };
    }

    debug!(key = %self.cache_key, query = %query.describe(), "serving fixtures");
    FetchOutcome {
      envelope: self.fixtures.envelope_for(query),
      source: DataSource::Fixture,
    }
  }

  /// Resolve a single record by slug or id: network first, then published
  /// fixtures. The only query shape that can fail.
  pub async fn fetch_by_key(&self, key: &str) -> Result<T, NotFoundError> {
    match self.remote.get_by_key(key).await {
      Ok(record) => Ok(record),
      Err(e) => {
        warn!(entity = T::entity_type(), key, error = %e, "remote lookup failed, checking fixtures");
        self
          .fixtures
          .find_by_key(key)
          .cloned()
          .ok_or_else(|| NotFoundError {
            entity: T::entity_type(),
            key: key.to_string(),
          })
      }
    }
  }

  /// Drop the cached listing for this entity type.
  pub fn invalidate(&self) {
    self.cache.clear(&self.cache_key);
  }

  /// The cached full listing if it is still fresh, for synchronous
  /// hydration before any network round-trip.
  pub fn fresh_cached_entry(&self) -> Option<CacheEntry<T>> {
    self.try_cache(now_ms()).ok()
  }

  /// Direct cache read regardless of age, used by tests and diagnostics.
  pub fn cached_entry(&self) -> Option<CacheEntry<T>> {
    self.cache.read(&self.cache_key)
  }
}

/// Convenience for seeding a cache entry in tests and tooling.
impl<T: ContentRecord, R: RemoteSource<T>> CachedSource<T, R> {
  pub fn seed_cache(&self, envelope: ListEnvelope<T>, stored_at_ms: i64) {
    self
      .cache
      .write(&self.cache_key, &CacheEntry::new(envelope, stored_at_ms));
  }
}
