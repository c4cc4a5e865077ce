//! Server configuration, read from `config.toml` and `PETCLINIC_*`
//! environment variables.

use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
  /// Path to the SQLite database file.
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,

  #[serde(default = "default_host")]
  pub host: String,

  #[serde(default = "default_port")]
  pub port: u16,
}

fn default_store_path() -> PathBuf {
  PathBuf::from("petclinic.db")
}

fn default_host() -> String {
  "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
  8080
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      store_path: default_store_path(),
      host:       default_host(),
      port:       default_port(),
    }
  }
}
