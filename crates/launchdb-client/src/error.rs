//! Error type for `launchdb-client`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Transport failure (connect, timeout, TLS, ...).
  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),

  /// The API answered with a non-success status other than 429.
  #[error("API error ({status}): {message}")]
  Api { status: u16, message: String },

  /// The response body was not a `{"docs": [...]}` page.
  #[error("could not decode page: {0}")]
  Decode(#[from] serde_json::Error),

  /// A single attempt was rate limited. Handled inside the retry loop.
  #[error("rate limited (retry after {retry_after_secs:?}s)")]
  RateLimited { retry_after_secs: Option<u64> },

  /// Every attempt was rate limited.
  #[error("unable to fetch page after {attempts} attempts")]
  RetrievalExhausted { attempts: u32 },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
