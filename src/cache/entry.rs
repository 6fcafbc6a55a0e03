//! Cache entry layout and the validity window.

use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::envelope::ListEnvelope;

/// How long a stored entry is trusted before it stops short-circuiting
/// network fetches.
pub const DEFAULT_VALIDITY: Duration = Duration::from_secs(10 * 60);

/// A stored list response plus the moment it was written.
///
/// Serialized as `{"data": <envelope>, "timestamp": <epoch-ms>}`, the layout
/// the dashboard's local storage used, so entries stay inspectable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry<T> {
  #[serde(rename = "data")]
  pub payload: ListEnvelope<T>,
  #[serde(rename = "timestamp")]
  pub stored_at_ms: i64,
}

impl<T> CacheEntry<T> {
  pub fn new(payload: ListEnvelope<T>, stored_at_ms: i64) -> Self {
    Self {
      payload,
      stored_at_ms,
    }
  }

  /// Whether this entry is still inside the validity window at `now_ms`.
  pub fn is_fresh_at(&self, now_ms: i64, validity: Duration) -> bool {
    is_fresh_at(self.stored_at_ms, now_ms, validity)
  }
}

/// Pure validity check: an entry is fresh while strictly less than the
/// window has elapsed since it was stored.
pub fn is_fresh_at(stored_at_ms: i64, now_ms: i64, validity: Duration) -> bool {
  now_ms - stored_at_ms < validity.as_millis() as i64
}

/// Current wall-clock time as epoch milliseconds.
pub fn now_ms() -> i64 {
  Utc::now().timestamp_millis()
}
