//! Error type for `essay-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] essay_core::Error),

  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("no such table: {0}")]
  UnknownTable(String),

  #[error("no column {column:?} in table {table:?}")]
  UnknownColumn { table: String, column: String },

  /// The engine refused a schema change, e.g. adding a column that exists.
  #[error("schema conflict: {0}")]
  SchemaConflict(String),

  #[error("decode error: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
