//! Shared plumbing for zipped XML document formats.

use std::{fs::File, io::Read, path::Path};

use zip::{ZipArchive, result::ZipError};

use crate::{Error, Result};

/// Upper bound on the buffer reserved up front from a zip header's
/// declared size. Larger parts still read, growing as needed.
const MAX_PREALLOC: u64 = 16 * 1024 * 1024;

/// Read one member of the zip archive at `path`.
pub(crate) fn read_part(path: &Path, part: &'static str) -> Result<Vec<u8>> {
  let mut archive = ZipArchive::new(File::open(path)?)?;
  let mut entry = match archive.by_name(part) {
    Ok(entry) => entry,
    Err(ZipError::FileNotFound) => {
      return Err(Error::MissingPart { path: path.to_path_buf(), part });
    }
    Err(e) => return Err(e.into()),
  };

  let mut bytes = Vec::with_capacity(entry.size().min(MAX_PREALLOC) as usize);
  entry.read_to_end(&mut bytes)?;
  Ok(bytes)
}

/// Strip a `prefix:` from an XML name.
pub(crate) fn local_name(name: &[u8]) -> &[u8] {
  match name.iter().rposition(|&b| b == b':') {
    Some(pos) => &name[pos + 1..],
    None => name,
  }
}

pub(crate) fn xml_error(e: impl std::fmt::Display) -> Error { Error::Xml(e.to_string()) }
