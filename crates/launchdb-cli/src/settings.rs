//! Runtime configuration.
//!
//! Layered, lowest precedence first: built-in defaults, an optional TOML file
//! (`launchdb.toml` in the working directory, or the path given with
//! `--config`), then `LAUNCHDB_*` environment variables.

use std::{path::{Path, PathBuf}, time::Duration};

use launchdb_client::{ClientConfig, RetryPolicy};
use serde::Deserialize;

use crate::Result;

pub const DEFAULT_API_BASE_URL: &str = "https://api.spacexdata.com/v4";
pub const ENV_PREFIX: &str = "LAUNCHDB";
pub const DEFAULT_USER_AGENT: &str = concat!("launchdb/", env!("CARGO_PKG_VERSION"));

/// Everything a command needs to know about its environment.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
  pub api_base_url:       String,
  pub store_path:         PathBuf,
  /// Raw page snapshots, one file per requested count.
  pub cache_dir:          PathBuf,
  /// Sample fetch and query output.
  pub output_dir:         PathBuf,
  pub max_attempts:       u32,
  pub default_retry_secs: u64,
  pub timeout_secs:       u64,
  pub user_agent:         String,
}

impl Settings {
  /// Load settings. An explicit `path` must exist; the implicit
  /// `launchdb.toml` is optional.
  pub fn load(path: Option<&Path>) -> Result<Self> {
    Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
  }

  /// As [`Settings::load`], with the environment layer supplied by the caller.
  pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
    let file = match path {
      Some(p) => config::File::from(p.to_path_buf()).required(true),
      None => config::File::with_name("launchdb").required(false),
    };

    let settings = config::Config::builder()
      .set_default("api_base_url", DEFAULT_API_BASE_URL)?
      .set_default("store_path", "spacex.db")?
      .set_default("cache_dir", "cache")?
      .set_default("output_dir", "outputs")?
      .set_default("max_attempts", 5_i64)?
      .set_default("default_retry_secs", 1_i64)?
      .set_default("timeout_secs", 30_i64)?
      .set_default("user_agent", DEFAULT_USER_AGENT)?
      .add_source(file)
      .add_source(env)
      .build()?;

    let settings: Self = settings.try_deserialize()?;
    if settings.max_attempts == 0 {
      return Err(
        config::ConfigError::Message("max_attempts must be at least 1".into()).into(),
      );
    }
    Ok(settings)
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      base_url:   self.api_base_url.clone(),
      user_agent: self.user_agent.clone(),
      timeout:    Duration::from_secs(self.timeout_secs),
      retry:      RetryPolicy {
        max_attempts: self.max_attempts,
        default_wait: Duration::from_secs(self.default_retry_secs),
      },
    }
  }
}
