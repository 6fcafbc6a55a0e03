//! Generic fetch machinery shared by all content types.
//!
//! This module is entity-agnostic: it knows how to combine a remote source,
//! the persistent cache and a fixture set into one deterministic fallback
//! chain, and tags every result with where it actually came from.

mod cached_source;
mod fixtures;
mod query;
mod record;
mod remote;

pub use cached_source::{CachedSource, NotFoundError};
pub use fixtures::FixtureSet;
pub use query::ListQuery;
pub use record::{cache_key, ContentRecord, DataSource, FetchOutcome};
pub use remote::{RemoteError, RemoteSource};
