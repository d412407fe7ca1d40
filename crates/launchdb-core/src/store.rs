//! The `LaunchStore` trait and supporting query types.
//!
//! Implemented by storage backends (e.g. `launchdb-store-sqlite`).

use std::{collections::BTreeMap, future::Future};

use crate::launch::LaunchRecord;

/// Field names accepted as filter keys; identical to the stored column names.
pub const FILTER_FIELDS: &[&str] = &[
  "id",
  "flight_number",
  "name",
  "date_utc",
  "success",
  "details",
  "rocket",
  "launchpad",
];

// ─── Query type ──────────────────────────────────────────────────────────────

/// Right-hand side of an equality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
  Bool(bool),
  Text(String),
}

impl From<bool> for FilterValue {
  fn from(b: bool) -> Self { Self::Bool(b) }
}

impl From<&str> for FilterValue {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

/// Parameters for [`LaunchStore::query`].
#[derive(Debug, Clone)]
pub struct LaunchQuery {
  /// Conjunction of `field = value` clauses. Empty matches everything.
  pub filters: BTreeMap<String, FilterValue>,
  pub limit:   usize,
}

impl LaunchQuery {
  pub fn new(limit: usize) -> Self {
    Self { filters: BTreeMap::new(), limit }
  }

  pub fn with_filter(mut self, field: &str, value: impl Into<FilterValue>) -> Self {
    self.filters.insert(field.to_owned(), value.into());
    self
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a launch store backend.
///
/// Rows are insert-if-absent: once a launch `id` is stored, later inserts of
/// the same `id` are ignored and the existing row is never overwritten.
pub trait LaunchStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert every record whose `id` is not yet present. Returns the number of
  /// rows actually inserted.
  ///
  /// Only a conflict on `id` is ignored. A record with a new `id` that reuses
  /// a stored `flight_number` fails the call, unlike a blanket
  /// `INSERT OR IGNORE`, which would drop that row without notice.
  ///
  /// Each row is applied independently; a failure part-way leaves earlier rows
  /// in place, and re-running the batch converges.
  fn upsert_batch<'a>(
    &'a self,
    records: &'a [LaunchRecord],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  /// Return records matching every filter, newest flight number first, at most
  /// `query.limit` of them.
  fn query<'a>(
    &'a self,
    query: &'a LaunchQuery,
  ) -> impl Future<Output = Result<Vec<LaunchRecord>, Self::Error>> + Send + 'a;

  /// Number of stored launches.
  fn count(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
