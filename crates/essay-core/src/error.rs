//! Error types for `essay-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A table or column name that is not a plain SQL identifier.
  #[error("invalid identifier: {0:?}")]
  InvalidIdentifier(String),

  #[error("row has {found} values but {expected} columns were given")]
  ArityMismatch { expected: usize, found: usize },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
