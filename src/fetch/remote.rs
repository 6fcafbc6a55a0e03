//! Remote source seam and its error taxonomy.

use async_trait::async_trait;
use thiserror::Error;

use crate::envelope::ListEnvelope;

/// Failures from the remote source.
///
/// The adapter does not retry and does not swallow: every failure carries
/// enough context (URL, status) for the fallback chain to decide what to do.
#[derive(Debug, Error)]
pub enum RemoteError {
  #[error("GET {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("GET {url} timed out")]
  Timeout { url: String },
  #[error("GET {url} returned status {status}")]
  Status { url: String, status: u16 },
  #[error("{entity} {key:?} not found")]
  NotFound { entity: &'static str, key: String },
  #[error("GET {url}: could not decode response body: {source}")]
  Decode {
    url: String,
    #[source]
    source: reqwest::Error,
  },
  #[error("invalid API base url {url:?}: {reason}")]
  BadBaseUrl { url: String, reason: String },
  #[error("failed to build HTTP client: {source}")]
  ClientBuild {
    #[source]
    source: reqwest::Error,
  },
}

/// The four read operations the content API exposes per entity.
///
/// Implemented by the production HTTP client and by test doubles.
#[async_trait]
pub trait RemoteSource<T>: Send + Sync {
  async fn list_all(&self) -> Result<ListEnvelope<T>, RemoteError>;

  /// Look up a single record by slug or id.
  async fn get_by_key(&self, key: &str) -> Result<T, RemoteError>;

  async fn list_featured(&self) -> Result<ListEnvelope<T>, RemoteError>;

  async fn list_by_category(&self, slug: &str) -> Result<ListEnvelope<T>, RemoteError>;
}
