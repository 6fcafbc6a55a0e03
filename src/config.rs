use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
  #[serde(default)]
  pub api: ApiConfig,
  #[serde(default)]
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
  /// Base URL of the content API.
  #[serde(default = "default_base_url")]
  pub base_url: String,
  /// Per-request timeout for list and detail calls.
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: default_base_url(),
      timeout_secs: default_timeout_secs(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
  /// How long a cached listing is trusted, in minutes.
  #[serde(default = "default_ttl_minutes")]
  pub ttl_minutes: u64,
  /// Cache database location (defaults to the platform data directory).
  pub path: Option<PathBuf>,
  /// Disable the durable cache entirely.
  #[serde(default)]
  pub disabled: bool,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      ttl_minutes: default_ttl_minutes(),
      path: None,
      disabled: false,
    }
  }
}

impl CacheConfig {
  pub fn validity(&self) -> Duration {
    Duration::from_secs(self.ttl_minutes * 60)
  }
}

fn default_base_url() -> String {
  "http://localhost:4000".to_string()
}

fn default_timeout_secs() -> u64 {
  30
}

fn default_ttl_minutes() -> u64 {
  10
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./pressroom.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/pressroom/config.yaml
  ///
  /// With no file anywhere, defaults apply (local API, 10 minute cache).
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Ok(Self::default()),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("pressroom.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("pressroom").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config: Config = serde_yaml::from_str(&contents)
      .map_err(|e| eyre!("Failed to parse config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Bearer token for the content API, if the environment provides one.
  pub fn api_token() -> Option<String> {
    std::env::var("PRESSROOM_API_TOKEN").ok()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults_when_sections_missing() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.api.base_url, "http://localhost:4000");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.cache.ttl_minutes, 10);
    assert!(!config.cache.disabled);
  }

  #[test]
  fn test_parse_full_config() {
    let yaml = r#"
api:
  base_url: https://api.pressroom.example.com
  timeout_secs: 10
cache:
  ttl_minutes: 2
  disabled: true
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.api.base_url, "https://api.pressroom.example.com");
    assert_eq!(config.api.timeout_secs, 10);
    assert_eq!(config.cache.validity(), Duration::from_secs(120));
    assert!(config.cache.disabled);
  }

  #[test]
  fn test_explicit_missing_path_is_an_error() {
    let result = Config::load(Some(Path::new("/definitely/not/here.yaml")));
    assert!(result.is_err());
  }
}
