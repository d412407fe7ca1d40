//! Error types for `launchdb-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A payload element lacks a required field or carries the wrong type.
  #[error("malformed launch record (id: {id:?}): {reason}")]
  MalformedRecord {
    id:     Option<String>,
    reason: String,
  },

  /// `rocket` / `launchpad` was neither a named object nor an identifier.
  #[error("unsupported shape for `{field}`: expected an object with `name` or a string")]
  UnknownReference { field: &'static str },

  #[error("invalid filter clause {0:?}: expected `key:value`")]
  InvalidFilter(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
