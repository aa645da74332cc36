//! Runtime configuration, layered from built-in defaults, an optional TOML
//! file, and `TRALA_*` environment variables (highest precedence).

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Load configuration, reading `path` if it exists.
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    Self::from_sources(File::from(path).required(false), Environment::with_prefix("TRALA"))
  }

  fn from_sources<S>(file: S, env: Environment) -> Result<Self, ConfigError>
  where
    S: config::Source + Send + Sync + 'static,
  {
    Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8080)?
      .set_default("store_path", "contacts.db")?
      .add_source(file)
      .add_source(env)
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// The store path with a leading `~/` expanded to the user's home.
  pub fn resolved_store_path(&self) -> PathBuf {
    if let Ok(rest) = self.store_path.strip_prefix("~")
      && let Some(home) = std::env::var_os("HOME")
    {
      return PathBuf::from(home).join(rest);
    }
    self.store_path.clone()
  }
}
