//! HTTP client for the content API.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::config::{ApiConfig, Config};
use crate::envelope::ListEnvelope;
use crate::fetch::{ContentRecord, RemoteError, RemoteSource};

/// Health probes answer fast or not at all.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Response of `GET /health`.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
  pub status: String,
  #[serde(default)]
  pub database: Option<String>,
}

impl HealthStatus {
  pub fn is_healthy(&self) -> bool {
    matches!(self.status.as_str(), "healthy" | "ok")
  }
}

/// Thin client over the content API.
///
/// One instance serves every entity type; the path segment comes from the
/// record's entity type. No retries and no fallback live here - failures
/// propagate to the fetch chain, which decides what to do next.
#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: Url,
  token: Option<String>,
}

impl ApiClient {
  pub fn new(config: &ApiConfig) -> Result<Self, RemoteError> {
    let base_url = Url::parse(&config.base_url).map_err(|e| RemoteError::BadBaseUrl {
      url: config.base_url.clone(),
      reason: e.to_string(),
    })?;
    if base_url.cannot_be_a_base() {
      return Err(RemoteError::BadBaseUrl {
        url: config.base_url.clone(),
        reason: "URL cannot serve as a base".to_string(),
      });
    }

    let http = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .connect_timeout(CONNECT_TIMEOUT)
      .build()
      .map_err(|e| RemoteError::ClientBuild { source: e })?;

    Ok(Self {
      http,
      base_url,
      token: Config::api_token(),
    })
  }

  /// Build `{base}/api/v1/{segments...}`.
  fn endpoint(&self, segments: &[&str]) -> Url {
    self.path(&["api", "v1"], segments)
  }

  fn path(&self, prefix: &[&str], segments: &[&str]) -> Url {
    let mut url = self.base_url.clone();
    // Guarded in `new`: the base URL can always carry path segments.
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty();
      path.extend(prefix);
      path.extend(segments);
    }
    url
  }

  async fn get_json<D: DeserializeOwned>(
    &self,
    url: Url,
    timeout: Option<Duration>,
  ) -> Result<D, RemoteError> {
    debug!(%url, "GET");
    let mut request = self.http.get(url.clone());
    if let Some(timeout) = timeout {
      request = request.timeout(timeout);
    }
    if let Some(token) = &self.token {
      request = request.bearer_auth(token);
    }

    let response = request.send().await.map_err(|e| {
      if e.is_timeout() {
        RemoteError::Timeout {
          url: url.to_string(),
        }
      } else {
        RemoteError::Transport {
          url: url.to_string(),
          source: e,
        }
      }
    })?;

    let status = response.status();
    if !status.is_success() {
      return Err(RemoteError::Status {
        url: url.to_string(),
        status: status.as_u16(),
      });
    }

    response.json::<D>().await.map_err(|e| RemoteError::Decode {
      url: url.to_string(),
      source: e,
    })
  }

  /// Probe `GET /health` with its own short timeout.
  pub async fn health(&self) -> Result<HealthStatus, RemoteError> {
    let url = self.path(&["health"], &[]);
    self.get_json(url, Some(HEALTH_TIMEOUT)).await
  }
}

#[async_trait]
impl<T: ContentRecord> RemoteSource<T> for ApiClient {
  async fn list_all(&self) -> Result<ListEnvelope<T>, RemoteError> {
    let url = self.endpoint(&[T::entity_type()]);
    self.get_json(url, None).await
  }

  async fn get_by_key(&self, key: &str) -> Result<T, RemoteError> {
    let url = self.endpoint(&[T::entity_type(), key]);
    match self.get_json(url, None).await {
      Err(RemoteError::Status { status: 404, .. }) => Err(RemoteError::NotFound {
        entity: T::entity_type(),
        key: key.to_string(),
      }),
      other => other,
    }
  }

  async fn list_featured(&self) -> Result<ListEnvelope<T>, RemoteError> {
    let url = self.endpoint(&[T::entity_type(), "featured"]);
    self.get_json(url, None).await
  }

  async fn list_by_category(&self, slug: &str) -> Result<ListEnvelope<T>, RemoteError> {
    let url = self.endpoint(&[T::entity_type(), "category", slug]);
    self.get_json(url, None).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn client(base: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
      base_url: base.to_string(),
      timeout_secs: 30,
    })
    .unwrap()
  }

  #[test]
  fn test_endpoint_paths() {
    let client = client("http://localhost:4000");
    assert_eq!(
      client.endpoint(&["blogs"]).as_str(),
      "http://localhost:4000/api/v1/blogs"
    );
    assert_eq!(
      client.endpoint(&["projects", "category", "web"]).as_str(),
      "http://localhost:4000/api/v1/projects/category/web"
    );
  }

  #[test]
  fn test_endpoint_with_trailing_slash_base() {
    let client = client("https://api.example.com/");
    assert_eq!(
      client.endpoint(&["blogs", "featured"]).as_str(),
      "https://api.example.com/api/v1/blogs/featured"
    );
  }

  #[test]
  fn test_health_path_skips_api_prefix() {
    let client = client("http://localhost:4000");
    assert_eq!(
      client.path(&["health"], &[]).as_str(),
      "http://localhost:4000/health"
    );
  }

  #[test]
  fn test_key_segments_are_percent_encoded() {
    let client = client("http://localhost:4000");
    let url = client.endpoint(&["blogs", "a b"]);
    assert_eq!(url.as_str(), "http://localhost:4000/api/v1/blogs/a%20b");
  }

  #[test]
  fn test_rejects_unusable_base_url() {
    let result = ApiClient::new(&ApiConfig {
      base_url: "not a url".to_string(),
      timeout_secs: 30,
    });
    assert!(matches!(result, Err(RemoteError::BadBaseUrl { .. })));
  }

  #[test]
  fn test_health_status_predicate() {
    let healthy = HealthStatus {
      status: "healthy".to_string(),
      database: Some("connected".to_string()),
    };
    assert!(healthy.is_healthy());

    let ok = HealthStatus {
      status: "ok".to_string(),
      database: None,
    };
    assert!(ok.is_healthy());

    let down = HealthStatus {
      status: "degraded".to_string(),
      database: None,
    };
    assert!(!down.is_healthy());
  }
}
