//! Parsing of the flat `key:value,key:value` filter syntax used by the CLI.

use std::collections::BTreeMap;

use crate::{Error, Result, store::FilterValue};

/// Parse a filter specification into equality clauses.
///
/// Values equal to `true` / `false` (any case) become booleans; everything
/// else stays a string. Keys are not checked against the schema here. Later
/// clauses for the same key replace earlier ones.
pub fn parse_filter(spec: &str) -> Result<BTreeMap<String, FilterValue>> {
  let mut filters = BTreeMap::new();

  for clause in spec.split(',').map(str::trim).filter(|c| !c.is_empty()) {
    let (key, value) = clause
      .split_once(':')
      .ok_or_else(|| Error::InvalidFilter(clause.to_owned()))?;

    let key = key.trim();
    if key.is_empty() {
      return Err(Error::InvalidFilter(clause.to_owned()));
    }

    let value = value.trim();
    let value = if value.eq_ignore_ascii_case("true") {
      FilterValue::Bool(true)
    } else if value.eq_ignore_ascii_case("false") {
      FilterValue::Bool(false)
    } else {
      FilterValue::Text(value.to_owned())
    };

    filters.insert(key.to_owned(), value);
  }

  Ok(filters)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn empty_spec_has_no_clauses() {
    assert!(parse_filter("").unwrap().is_empty());
    assert!(parse_filter("  ").unwrap().is_empty());
  }

  #[test]
  fn booleans_are_case_insensitive() {
    let f = parse_filter("success:TRUE").unwrap();
    assert_eq!(f["success"], FilterValue::Bool(true));
    let f = parse_filter("success:False").unwrap();
    assert_eq!(f["success"], FilterValue::Bool(false));
  }

  #[test]
  fn other_values_stay_strings() {
    let f = parse_filter("rocket:Falcon 9,flight_number:12").unwrap();
    assert_eq!(f.len(), 2);
    assert_eq!(f["rocket"], FilterValue::Text("Falcon 9".into()));
    assert_eq!(f["flight_number"], FilterValue::Text("12".into()));
  }

  #[test]
  fn only_first_colon_splits() {
    let f = parse_filter("date_utc:2020-06-04T01:25:00.000Z").unwrap();
    assert_eq!(
      f["date_utc"],
      FilterValue::Text("2020-06-04T01:25:00.000Z".into())
    );
  }

  #[test]
  fn later_clause_wins() {
    let f = parse_filter("success:true,success:false").unwrap();
    assert_eq!(f["success"], FilterValue::Bool(false));
  }

  #[test]
  fn clause_without_colon_is_rejected() {
    assert!(matches!(
      parse_filter("success"),
      Err(Error::InvalidFilter(c)) if c == "success"
    ));
  }

  #[test]
  fn empty_key_is_rejected() {
    assert!(matches!(parse_filter(":true"), Err(Error::InvalidFilter(_))));
  }
}
