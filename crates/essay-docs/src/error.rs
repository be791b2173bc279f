//! Error types for document reading.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("not a readable archive: {0}")]
  Zip(#[from] zip::result::ZipError),

  #[error("malformed document XML: {0}")]
  Xml(String),

  /// The archive lacks the part holding the document body.
  #[error("{} has no {part}", path.display())]
  MissingPart { path: PathBuf, part: &'static str },

  #[error("unsupported document type: {}", .0.display())]
  Unsupported(PathBuf),

  /// The file name cannot be turned into a title.
  #[error("no usable file name: {}", .0.display())]
  InvalidName(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
