//! Bundled fallback data for one entity type.

use crate::envelope::ListEnvelope;

use super::query::ListQuery;
use super::record::ContentRecord;

/// Static records used as the last-resort data source.
///
/// Loaded once at startup and never mutated. Every accessor is a pure
/// filter; publication state is always respected, matching what the
/// production API would have served.
#[derive(Debug, Clone)]
pub struct FixtureSet<T> {
  records: Vec<T>,
}

impl<T: ContentRecord> FixtureSet<T> {
  pub fn new(records: Vec<T>) -> Self {
    Self { records }
  }

  pub fn all(&self) -> &[T] {
    &self.records
  }

  pub fn published(&self) -> impl Iterator<Item = &T> {
    self.records.iter().filter(|r| r.is_published())
  }

  /// Answer a list query from fixtures: published records matching the
  /// query, as a single unpaginated page.
  pub fn envelope_for(&self, query: &ListQuery) -> ListEnvelope<T> {
    let data: Vec<T> = self
      .published()
      .filter(|r| query.matches(*r))
      .cloned()
      .collect();
    ListEnvelope::single_page(data)
  }

  /// Find a published record by slug or id.
  pub fn find_by_key(&self, key: &str) -> Option<&T> {
    self.published().find(|r| r.matches_key(key))
  }
}
