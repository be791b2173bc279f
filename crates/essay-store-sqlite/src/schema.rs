//! SQL schema for the essay store.
//!
//! Executed at connection startup. Only the ingested columns are created
//! here; `full_text`, `summary` and `keywords` are added by augmentation.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// The default rollback journal is kept so a plain file copy of the database
/// is a complete backup.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS essays (
    id      INTEGER PRIMARY KEY,
    title   TEXT,
    content TEXT,
    year    INTEGER
);

PRAGMA user_version = 1;
";
