//! Encoding and decoding helpers between launch records and the values stored
//! in SQLite columns.
//!
//! SQLite has no native boolean: `success` is stored as `1` / `0`, with `NULL`
//! for an unknown outcome.

use launchdb_core::{launch::LaunchRecord, store::FilterValue};
use rusqlite::types::Value;

use crate::{Error, Result};

// ─── Booleans ────────────────────────────────────────────────────────────────

pub fn encode_bool(b: bool) -> i64 { i64::from(b) }

pub fn decode_bool(n: i64) -> Result<bool> {
  match n {
    0 => Ok(false),
    1 => Ok(true),
    other => Err(Error::Decode(format!("expected 0 or 1 for boolean, got {other}"))),
  }
}

// ─── Filter values ───────────────────────────────────────────────────────────

pub fn encode_filter_value(v: &FilterValue) -> Value {
  match v {
    FilterValue::Bool(b) => Value::Integer(encode_bool(*b)),
    FilterValue::Text(s) => Value::Text(s.clone()),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `launches` row.
pub struct RawLaunchRow {
  pub id:            String,
  pub flight_number: i64,
  pub name:          String,
  pub date_utc:      String,
  pub success:       Option<i64>,
  pub details:       Option<String>,
  pub rocket:        String,
  pub launchpad:     String,
}

impl RawLaunchRow {
  /// Column list matching the field order of [`RawLaunchRow::from_row`].
  pub const COLUMNS: &'static str =
    "id, flight_number, name, date_utc, success, details, rocket, launchpad";

  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      flight_number: row.get(1)?,
      name:          row.get(2)?,
      date_utc:      row.get(3)?,
      success:       row.get(4)?,
      details:       row.get(5)?,
      rocket:        row.get(6)?,
      launchpad:     row.get(7)?,
    })
  }

  pub fn into_record(self) -> Result<LaunchRecord> {
    Ok(LaunchRecord {
      id:            self.id,
      flight_number: self.flight_number,
      name:          self.name,
      date_utc:      self.date_utc,
      success:       self.success.map(decode_bool).transpose()?,
      details:       self.details,
      rocket:        self.rocket,
      launchpad:     self.launchpad,
    })
  }
}
