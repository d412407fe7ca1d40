//! JSON snapshots written alongside the store.
//!
//! Layout:
//!
//! ```text
//! <cache_dir>/launches_raw_<count>.json   raw page of the last fetch of <count>
//! <output_dir>/sample_fetch.json          first element of the last fetch
//! <output_dir>/sample_query.json          results of the last query
//! ```

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::{Error, Result};

pub const FETCH_SAMPLE_FILE: &str = "sample_fetch.json";
pub const QUERY_OUTPUT_FILE: &str = "sample_query.json";

/// Handle on the artifact directories. Both exist once [`Artifacts::init`]
/// returns.
#[derive(Debug, Clone)]
pub struct Artifacts {
  cache_dir:  PathBuf,
  output_dir: PathBuf,
}

impl Artifacts {
  pub async fn init(cache_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Result<Self> {
    let artifacts = Self {
      cache_dir:  cache_dir.into(),
      output_dir: output_dir.into(),
    };
    create_dir(&artifacts.cache_dir).await?;
    create_dir(&artifacts.output_dir).await?;
    Ok(artifacts)
  }

  pub fn raw_page_path(&self, count: usize) -> PathBuf {
    self.cache_dir.join(format!("launches_raw_{count}.json"))
  }

  pub fn fetch_sample_path(&self) -> PathBuf { self.output_dir.join(FETCH_SAMPLE_FILE) }

  pub fn query_output_path(&self) -> PathBuf { self.output_dir.join(QUERY_OUTPUT_FILE) }

  /// Snapshot the unmodified page returned for a fetch of `count`.
  pub async fn write_raw_page(&self, count: usize, docs: &[Value]) -> Result<PathBuf> {
    let path = self.raw_page_path(count);
    write_json(&path, &docs).await?;
    Ok(path)
  }

  /// Keep the first document of the page (as a one-element array).
  pub async fn write_fetch_sample(&self, docs: &[Value]) -> Result<PathBuf> {
    let path = self.fetch_sample_path();
    write_json(&path, &&docs[..docs.len().min(1)]).await?;
    Ok(path)
  }

  /// Persist an already-serialised query result.
  pub async fn write_query_output(&self, json: &str) -> Result<PathBuf> {
    let path = self.query_output_path();
    write_file(&path, json).await?;
    Ok(path)
  }
}

async fn create_dir(path: &Path) -> Result<()> {
  tokio::fs::create_dir_all(path)
    .await
    .map_err(|source| Error::Artifact { path: path.to_path_buf(), source })
}

async fn write_json(path: &Path, value: &impl Serialize) -> Result<()> {
  let json = serde_json::to_string_pretty(value)?;
  write_file(path, &json).await
}

async fn write_file(path: &Path, contents: &str) -> Result<()> {
  tracing::debug!(path = %path.display(), bytes = contents.len(), "writing artifact");
  tokio::fs::write(path, contents)
    .await
    .map_err(|source| Error::Artifact { path: path.to_path_buf(), source })
}
