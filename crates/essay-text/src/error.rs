//! Error types for the text-processing crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// An entity recognizer backend failed on its input.
  #[error("entity recognition failed: {0}")]
  Recognizer(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
