//! [`SqliteStore`] — the SQLite implementation of [`LaunchStore`].

use std::path::Path;

use launchdb_core::{
  launch::LaunchRecord,
  store::{FILTER_FIELDS, LaunchQuery, LaunchStore},
};

use crate::{
  Error, Result,
  encode::{RawLaunchRow, encode_bool, encode_filter_value},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A launch store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. The
/// connection closes when the last clone is dropped.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    tracing::debug!(path = %path.as_ref().display(), "opening launch store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Map a caller-supplied field name onto its column, or fail the query.
fn resolve_column(field: &str) -> Result<&'static str> {
  FILTER_FIELDS
    .iter()
    .copied()
    .find(|col| *col == field)
    .ok_or_else(|| Error::QueryExecution(format!("no such column: {field}")))
}

// ─── LaunchStore impl ────────────────────────────────────────────────────────

impl LaunchStore for SqliteStore {
  type Error = Error;

  async fn upsert_batch(&self, records: &[LaunchRecord]) -> Result<usize> {
    let records = records.to_vec();
    let total = records.len();

    // Autocommit: every row is its own transaction.
    let inserted: usize = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare_cached(
          "INSERT INTO launches (
             id, flight_number, name, date_utc, success, details, rocket, launchpad
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
           ON CONFLICT(id) DO NOTHING",
        )?;

        let mut inserted = 0;
        for rec in &records {
          inserted += stmt.execute(rusqlite::params![
            rec.id,
            rec.flight_number,
            rec.name,
            rec.date_utc,
            rec.success.map(encode_bool),
            rec.details,
            rec.rocket,
            rec.launchpad,
          ])?;
        }
        Ok(inserted)
      })
      .await?;

    tracing::debug!(total, inserted, "upserted launch batch");
    Ok(inserted)
  }

  async fn query(&self, query: &LaunchQuery) -> Result<Vec<LaunchRecord>> {
    let mut conds  = Vec::with_capacity(query.filters.len());
    let mut params = Vec::with_capacity(query.filters.len() + 1);
    for (field, value) in &query.filters {
      let column = resolve_column(field)?;
      params.push(encode_filter_value(value));
      conds.push(format!("{column} = ?{}", params.len()));
    }
    params.push(rusqlite::types::Value::Integer(
      i64::try_from(query.limit).unwrap_or(i64::MAX),
    ));

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };

    let sql = format!(
      "SELECT {cols}
       FROM launches
       {where_clause}
       ORDER BY flight_number DESC
       LIMIT ?{limit_idx}",
      cols = RawLaunchRow::COLUMNS,
      limit_idx = params.len(),
    );
    tracing::debug!(%sql, "querying launches");

    let raws: Vec<RawLaunchRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawLaunchRow::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLaunchRow::into_record).collect()
  }

  async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM launches", [], |r| r.get(0))?)
      })
      .await?;
    usize::try_from(n).map_err(|e| Error::Decode(e.to_string()))
  }
}
