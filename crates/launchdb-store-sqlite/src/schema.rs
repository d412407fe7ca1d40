//! SQL schema for the launchdb SQLite store.
//!
//! Executed at every connection open; every statement is idempotent.

/// Full schema DDL.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are insert-if-absent; no UPDATE or DELETE is ever issued.
-- rocket / launchpad hold the denormalised display name, not a reference.
CREATE TABLE IF NOT EXISTS launches (
    id            TEXT PRIMARY KEY,
    flight_number INTEGER NOT NULL UNIQUE,
    name          TEXT NOT NULL,
    date_utc      TEXT NOT NULL,   -- ISO 8601, stored verbatim
    success       BOOLEAN,         -- 1 | 0 | NULL (unknown)
    details       TEXT,
    rocket        TEXT NOT NULL,
    launchpad     TEXT NOT NULL,
    created_at    TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_launches_success ON launches(success);
CREATE INDEX IF NOT EXISTS idx_launches_rocket  ON launches(rocket);
CREATE INDEX IF NOT EXISTS idx_launches_date    ON launches(date_utc);
";
