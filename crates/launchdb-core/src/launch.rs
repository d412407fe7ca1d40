//! Launch records — the single entity kept by launchdb.
//!
//! The remote API returns loosely-shaped documents: `rocket` and `launchpad`
//! are either identifier strings or, when the request asked for them to be
//! populated, nested objects. [`normalize`] flattens one such document into a
//! fixed-shape [`LaunchRecord`], resolving each reference to a single display
//! string at ingestion time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};

// ─── Record ──────────────────────────────────────────────────────────────────

/// One row per distinct launch. Never mutated after normalisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchRecord {
  pub id:            String,
  /// Unique; the default sort key (descending = most recent first).
  pub flight_number: i64,
  pub name:          String,
  /// ISO 8601 timestamp, stored and returned verbatim.
  pub date_utc:      String,
  /// `None` means the outcome is unknown, which is not the same as `false`.
  pub success:       Option<bool>,
  pub details:       Option<String>,
  pub rocket:        String,
  pub launchpad:     String,
}

// ─── References ──────────────────────────────────────────────────────────────

/// A related entity as it appears in a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
  /// A populated object; only its `name` is kept.
  Named(String),
  /// An unpopulated identifier.
  Raw(String),
}

impl Reference {
  /// Classify the raw JSON found under `field`.
  pub fn from_value(field: &'static str, value: &Value) -> Result<Self> {
    match value {
      Value::String(id) => Ok(Self::Raw(id.clone())),
      Value::Object(obj) => match obj.get("name") {
        Some(Value::String(name)) => Ok(Self::Named(name.clone())),
        _ => Err(Error::UnknownReference { field }),
      },
      _ => Err(Error::UnknownReference { field }),
    }
  }

  /// The denormalised string stored for this reference.
  pub fn into_display(self) -> String {
    match self {
      Self::Named(name) => name,
      Self::Raw(id) => id,
    }
  }
}

// ─── Normalisation ───────────────────────────────────────────────────────────

/// Wire shape of a launch document. Unknown keys are ignored.
#[derive(Deserialize)]
struct RawLaunch {
  id:            String,
  flight_number: i64,
  name:          String,
  date_utc:      String,
  success:       Option<bool>,
  details:       Option<String>,
  rocket:        Value,
  launchpad:     Value,
}

/// Normalise one element of the API's `docs` array.
///
/// Absent `success` / `details` keys map to `None`. A missing required field
/// yields [`Error::MalformedRecord`]; a `rocket` or `launchpad` that is neither
/// a string nor an object with a string `name` yields
/// [`Error::UnknownReference`].
pub fn normalize(raw: &Value) -> Result<LaunchRecord> {
  let parsed = RawLaunch::deserialize(raw).map_err(|e| Error::MalformedRecord {
    id:     raw.get("id").and_then(Value::as_str).map(str::to_owned),
    reason: e.to_string(),
  })?;

  let rocket = Reference::from_value("rocket", &parsed.rocket)?.into_display();
  let launchpad = Reference::from_value("launchpad", &parsed.launchpad)?.into_display();

  Ok(LaunchRecord {
    id: parsed.id,
    flight_number: parsed.flight_number,
    name: parsed.name,
    date_utc: parsed.date_utc,
    success: parsed.success,
    details: parsed.details,
    rocket,
    launchpad,
  })
}
