//! Error type for the launchdb orchestration layer.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Normalisation or filter parsing failed.
  #[error(transparent)]
  Record(#[from] launchdb_core::Error),

  #[error(transparent)]
  Retrieval(#[from] launchdb_client::Error),

  #[error(transparent)]
  Store(#[from] launchdb_store_sqlite::Error),

  #[error("failed to write {}: {source}", path.display())]
  Artifact {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
