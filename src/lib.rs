//! Offline-first content client for the Pressroom site.
//!
//! List data is fetched through a fixed fallback chain - network, then a
//! durable cache with a validity window, then bundled fixtures - so list
//! views always have something to render. Detail lookups are the only
//! queries that can fail. A per-entity [`store::ContentStore`] keeps fetch
//! results and local optimistic edits in one place.

pub mod cache;
pub mod config;
pub mod content;
pub mod envelope;
pub mod fetch;
pub mod state;
pub mod store;
