//! Error type for `launchdb-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A query could not be executed, e.g. because it named an unknown column.
  #[error("query execution failed: {0}")]
  QueryExecution(String),

  /// A stored value could not be mapped back onto a launch record.
  #[error("decode error: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
