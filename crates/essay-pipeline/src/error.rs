//! Error types for the pipelines.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A file an operation cannot start without is missing.
  #[error("not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("document error: {0}")]
  Docs(#[from] essay_docs::Error),

  #[error("text processing error: {0}")]
  Text(#[from] essay_text::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),
}

impl Error {
  /// Box a backend error from any [`RecordStore`](essay_core::store::RecordStore).
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
