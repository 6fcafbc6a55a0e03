//! Consumer-facing store: the fetch chain glued to per-entity state.

use crate::cache::{now_ms, PersistentCache};
use crate::fetch::{
  CachedSource, ContentRecord, FetchOutcome, FixtureSet, ListQuery, NotFoundError, RemoteSource,
};
use crate::state::FetchState;

/// One store per entity type.
///
/// Holds the fallback chain and the fetch state, and keeps the two
/// consistent: list fetches materialize into state, local mutations that
/// diverge from the last fetch invalidate the persistent cache.
///
/// Stores are constructed explicitly from their collaborators - there are
/// no process-wide instances, and tests build isolated stores at will.
/// Dropping the store releases its storage handle.
pub struct ContentStore<T: ContentRecord, R: RemoteSource<T>> {
  source: CachedSource<T, R>,
  state: FetchState<T>,
}

impl<T: ContentRecord, R: RemoteSource<T>> ContentStore<T, R> {
  pub fn new(remote: R, cache: PersistentCache, fixtures: FixtureSet<T>) -> Self {
    Self {
      source: CachedSource::new(remote, cache, fixtures),
      state: FetchState::new(),
    }
  }

  pub fn state(&self) -> &FetchState<T> {
    &self.state
  }

  pub fn source(&self) -> &CachedSource<T, R> {
    &self.source
  }

  async fn fetch_list_query(&mut self, query: ListQuery, force_refresh: bool) -> FetchOutcome<T> {
    self.state.begin_fetch();
    let outcome = self.source.fetch_list(&query, force_refresh).await;
    self.state.fetch_succeeded(&outcome.envelope, now_ms());
    outcome
  }

  /// Fetch the full listing. Never fails; the envelope may come from the
  /// network, the cache or fixtures (see the outcome's source tag).
  pub async fn fetch_list(&mut self, force_refresh: bool) -> FetchOutcome<T> {
    self.fetch_list_query(ListQuery::All, force_refresh).await
  }

  /// Fetch featured records, derived from the full listing.
  pub async fn fetch_featured(&mut self, force_refresh: bool) -> FetchOutcome<T> {
    self
      .fetch_list_query(ListQuery::Featured, force_refresh)
      .await
  }

  /// Fetch records in a category, derived from the full listing.
  pub async fn fetch_by_category(&mut self, slug: &str) -> FetchOutcome<T> {
    self
      .fetch_list_query(ListQuery::Category(slug.to_string()), false)
      .await
  }

  /// Fetch one record by slug or id. The only fetch that can fail; a
  /// failure sets the error flag and leaves list state untouched.
  pub async fn fetch_by_key(&mut self, key: &str) -> Result<T, NotFoundError> {
    self.state.begin_fetch();
    match self.source.fetch_by_key(key).await {
      Ok(record) => {
        self.state.detail_succeeded(record.clone());
        Ok(record)
      }
      Err(e) => {
        self.state.fetch_failed(e.to_string());
        Err(e)
      }
    }
  }

  /// Replace the current detail record.
  pub fn set_current(&mut self, record: Option<T>) {
    self.state.set_current(record);
  }

  /// Apply a local edit to the record with `id` and invalidate the cached
  /// listing, which no longer mirrors the last fetch. Does not re-fetch.
  pub fn update_local(&mut self, id: &str, patch: &T::Patch) {
    self.state.update_local(id, patch);
    self.source.invalidate();
  }

  /// Remove the record with `id` from local state. The cache is left
  /// alone.
  pub fn remove_local(&mut self, id: &str) {
    self.state.remove_local(id);
  }

  /// Forget list state and drop the cached listing.
  pub fn clear_all(&mut self) {
    self.state.reset();
    self.source.invalidate();
  }

  /// Drop the cached listing without touching state.
  pub fn invalidate(&mut self) {
    self.source.invalidate();
  }

  /// Populate state from a still-fresh cache entry, synchronously, so the
  /// first render has data before any network round-trip. Returns whether
  /// anything was hydrated.
  pub fn hydrate_from_cache(&mut self) -> bool {
    match self.source.fresh_cached_entry() {
      Some(entry) => {
        self.state.hydrate(&entry.payload, entry.stored_at_ms);
        true
      }
      None => false,
    }
  }
}
