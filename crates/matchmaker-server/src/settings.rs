//! Runtime server configuration, deserialised from `config.toml` with
//! `MATCHMAKER_*` environment overrides layered on top.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  /// How long a resolved token is trusted before the store is asked again.
  #[serde(default = "default_token_cache_ttl_secs")]
  pub token_cache_ttl_secs: u64,
}

fn default_host() -> String { "127.0.0.1".to_owned() }
fn default_port() -> u16 { 8000 }
fn default_store_path() -> PathBuf { PathBuf::from("matchmaker.db") }
fn default_token_cache_ttl_secs() -> u64 { 300 }

impl ServerConfig {
  /// Layer the optional file at `path` and the environment.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("MATCHMAKER"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn token_ttl(&self) -> Duration { Duration::from_secs(self.token_cache_ttl_secs) }

  /// The store path with a leading `~` expanded.
  pub fn store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/matchmaker.toml")).unwrap();
    assert_eq!(cfg.port, 8000);
    assert_eq!(cfg.store_path, PathBuf::from("matchmaker.db"));
    assert_eq!(cfg.token_ttl(), Duration::from_secs(300));
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg: ServerConfig = config::Config::builder()
      .add_source(config::File::from_str(
        "host = \"0.0.0.0\"\nport = 9090\ntoken_cache_ttl_secs = 5",
        config::FileFormat::Toml,
      ))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:9090");
    assert_eq!(cfg.token_ttl(), Duration::from_secs(5));
  }

  #[test]
  fn tilde_is_expanded_against_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/m.db")), PathBuf::from(home).join("m.db"));
    assert_eq!(expand_tilde(Path::new("/tmp/m.db")), PathBuf::from("/tmp/m.db"));
  }
}
