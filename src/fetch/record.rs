//! Core trait implemented by cacheable content types, plus result tagging.

use serde::{de::DeserializeOwned, Serialize};

use crate::envelope::ListEnvelope;

/// Trait for content records that flow through the fetch chain.
///
/// Implementors expose the identity and filter fields the chain needs;
/// everything else about the record is opaque to it.
pub trait ContentRecord: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
  /// Typed partial update applied by local optimistic edits.
  type Patch: Clone + Send + Sync;

  /// Unique identifier within a list.
  fn id(&self) -> &str;

  /// Stable lookup key used in URLs (the slug).
  fn key(&self) -> &str;

  /// Entity type name, used as the API path segment and to derive the
  /// canonical cache key (e.g. "blogs" -> "blogs_cache").
  fn entity_type() -> &'static str;

  fn is_published(&self) -> bool;

  fn is_featured(&self) -> bool;

  fn category(&self) -> Option<&str>;

  /// Merge the populated fields of `patch` into this record.
  fn apply_patch(&mut self, patch: &Self::Patch);

  /// By-key lookups accept either the slug or the id.
  fn matches_key(&self, key: &str) -> bool {
    self.key() == key || self.id() == key
  }
}

/// Canonical cache key for an entity type.
pub fn cache_key<T: ContentRecord>() -> String {
  format!("{}_cache", T::entity_type())
}

/// Where a fetch result actually came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
  /// Fresh data from the network.
  Network,
  /// Data from cache, inside the validity window.
  CacheFresh,
  /// Data from cache, served because the network call failed.
  CacheFallback,
  /// Bundled fixtures, the last resort.
  Fixture,
}

impl std::fmt::Display for DataSource {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let s = match self {
      DataSource::Network => "network",
      DataSource::CacheFresh => "cache",
      DataSource::CacheFallback => "cache (network unavailable)",
      DataSource::Fixture => "fixtures",
    };
    f.write_str(s)
  }
}

/// A list result plus the tier that produced it.
#[derive(Debug, Clone)]
pub struct FetchOutcome<T> {
  pub envelope: ListEnvelope<T>,
  pub source: DataSource,
}
