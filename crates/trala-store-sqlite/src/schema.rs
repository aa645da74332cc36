//! SQL schema for the Trala SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `email` is unique across every row, active or not. The constraint backs
/// the service's duplicate check against concurrent writers.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS contacts (
    id             TEXT PRIMARY KEY,       -- hyphenated lowercase UUID
    email          TEXT NOT NULL UNIQUE,
    first_name     TEXT,
    middle_initial TEXT,
    last_name      TEXT,
    birth_date     TEXT,                   -- YYYY-MM-DD
    country_code   TEXT,
    phone_number   TEXT,
    is_active      INTEGER NOT NULL DEFAULT 1
);

PRAGMA user_version = 1;
";

/// Column list shared by every `SELECT` and `RETURNING` clause, in the order
/// [`RawContact::from_row`](crate::encode::RawContact::from_row) reads them.
pub const COLUMNS: &str = "id, email, first_name, middle_initial, last_name, \
                           birth_date, country_code, phone_number, is_active";
