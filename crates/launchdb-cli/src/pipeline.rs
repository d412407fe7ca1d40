//! The `fetch` and `query` pipelines.
//!
//! Each run is strictly sequential. The store is opened at the start of a
//! run and closed when the run returns.

use launchdb_client::LaunchClient;
use launchdb_core::{
  filter::parse_filter,
  launch::{LaunchRecord, normalize},
  store::{LaunchQuery, LaunchStore},
};
use launchdb_store_sqlite::SqliteStore;

use crate::{Result, Settings, artifacts::Artifacts};

/// Outcome of a successful fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchReport {
  /// Documents received and normalised.
  pub processed: usize,
  /// Rows that were not already stored.
  pub inserted:  usize,
}

/// Outcome of a successful query.
#[derive(Debug, Clone)]
pub struct QueryOutput {
  pub records: Vec<LaunchRecord>,
  /// Pretty-printed JSON array of `records`.
  pub json:    String,
}

/// Shared context for both commands.
pub struct Pipeline {
  settings:  Settings,
  client:    LaunchClient,
  artifacts: Artifacts,
}

impl Pipeline {
  /// Build the HTTP client and create the artifact directories.
  pub async fn init(settings: Settings) -> Result<Self> {
    let client = LaunchClient::new(settings.client_config())?;
    let artifacts = Artifacts::init(&settings.cache_dir, &settings.output_dir).await?;
    Ok(Self { settings, client, artifacts })
  }

  pub fn artifacts(&self) -> &Artifacts { &self.artifacts }

  async fn open_store(&self) -> Result<SqliteStore> {
    Ok(SqliteStore::open(&self.settings.store_path).await?)
  }

  /// Fetch one page of `count` launches at `offset`, cache it, and store the
  /// normalised records.
  ///
  /// Every document is normalised before anything is written, so one
  /// malformed document aborts the run with no artifacts or rows produced.
  pub async fn run_fetch(&self, count: usize, offset: usize) -> Result<FetchReport> {
    tracing::info!(count, offset, "fetching launches");
    let docs = self.client.fetch_page(count, offset).await?;

    let records = docs
      .iter()
      .map(normalize)
      .collect::<Result<Vec<_>, _>>()?;

    let raw_path = self.artifacts.write_raw_page(count, &docs).await?;
    self.artifacts.write_fetch_sample(&docs).await?;
    tracing::info!(path = %raw_path.display(), docs = docs.len(), "cached raw page");

    let store = self.open_store().await?;
    let inserted = store.upsert_batch(&records).await?;
    let total = store.count().await?;
    tracing::info!(processed = records.len(), inserted, total, "stored launches");

    Ok(FetchReport { processed: records.len(), inserted })
  }

  /// Run a `key:value,...` filter against the store and save the result.
  pub async fn run_query(&self, filter: &str, limit: usize) -> Result<QueryOutput> {
    let query = LaunchQuery { filters: parse_filter(filter)?, limit };
    tracing::info!(filters = ?query.filters, limit, "querying launches");

    let store = self.open_store().await?;
    let records = store.query(&query).await?;

    let json = serde_json::to_string_pretty(&records)?;
    let path = self.artifacts.write_query_output(&json).await?;
    tracing::info!(hits = records.len(), path = %path.display(), "query complete");

    Ok(QueryOutput { records, json })
  }
}
