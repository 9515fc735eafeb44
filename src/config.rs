use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Public demo backend; override via config file, `SHOPLY_API_URL`, or
/// the `--base-url` flag.
pub const DEFAULT_BASE_URL: &str = "https://agentic-ecommerce.onrender.com";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
  pub api: ApiConfig,
  /// Custom title for the header (defaults to the backend domain if not set)
  pub title: Option<String>,
  pub slides: SlidesConfig,
  pub cache: CacheConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
  pub base_url: String,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SlidesConfig {
  /// Directory holding SLIDES.md / GOOGLE_SLIDES_CONTENT.md
  pub dir: PathBuf,
}

impl Default for SlidesConfig {
  fn default() -> Self {
    Self {
      dir: PathBuf::from("slides"),
    }
  }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
  /// Seconds before cached query data is considered stale
  pub stale_secs: u64,
  /// Seconds an unsubscribed cache entry survives before eviction
  pub gc_secs: u64,
  /// Cart polling interval in seconds
  pub cart_refetch_secs: u64,
}

impl Default for CacheConfig {
  fn default() -> Self {
    Self {
      stale_secs: 30,
      gc_secs: 300,
      cart_refetch_secs: 30,
    }
  }
}

impl CacheConfig {
  pub fn stale_time(&self) -> Duration {
    Duration::from_secs(self.stale_secs)
  }

  pub fn gc_time(&self) -> Duration {
    Duration::from_secs(self.gc_secs)
  }

  pub fn cart_refetch_interval(&self) -> Duration {
    Duration::from_secs(self.cart_refetch_secs)
  }
}

impl Config {
  /// Load configuration.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./shoply.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/shoply/config.yaml
  ///
  /// With no file found, defaults apply (the public demo backend).
  /// `SHOPLY_API_URL` overrides the base URL from any source.
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

    let mut config = match path {
      Some(p) => Self::load_from_path(&p)?,
      None => Config::default(),
    };

    if let Ok(url) = std::env::var("SHOPLY_API_URL") {
      if !url.is_empty() {
        config.api.base_url = url;
      }
    }

    Ok(config)
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("shoply.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("shoply").join("config.yaml");
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
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.cache.stale_time(), Duration::from_secs(30));
    assert_eq!(config.slides.dir, PathBuf::from("slides"));
  }

  #[test]
  fn test_parse_partial_yaml() {
    let config: Config =
      serde_yaml::from_str("api:\n  base_url: http://localhost:8000\ncache:\n  stale_secs: 5\n")
        .unwrap();
    assert_eq!(config.api.base_url, "http://localhost:8000");
    assert_eq!(config.cache.stale_secs, 5);
    // Unspecified sections keep their defaults
    assert_eq!(config.cache.gc_secs, 300);
    assert_eq!(config.slides.dir, PathBuf::from("slides"));
  }
}
