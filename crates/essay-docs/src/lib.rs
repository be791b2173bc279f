//! Document Reader for essay sources.
//!
//! Scans a directory for word-processor documents (`.odt`, `.docx`) and turns
//! each into a [`SourceDocument`]: a title taken from the file name, a year
//! taken from the file's modification time (UTC), and the raw text of its
//! paragraphs joined by single spaces.
//!
//! ```no_run
//! use std::path::Path;
//!
//! for doc in essay_docs::read_dir(Path::new("essays")).unwrap() {
//!   println!("{} ({}): {} chars", doc.title, doc.year, doc.text.len());
//! }
//! ```

mod archive;
mod docx;
pub mod error;
mod odt;

use std::{
  fs,
  path::{Path, PathBuf},
};

use chrono::{DateTime, Datelike as _, Utc};
pub use error::{Error, Result};

// ─── Public types ────────────────────────────────────────────────────────────

/// The two recognised word-processor formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
  Odt,
  Docx,
}

impl DocumentFormat {
  /// Format implied by the file extension, compared case-insensitively.
  pub fn from_path(path: &Path) -> Option<Self> {
    let ext = path.extension()?.to_str()?;
    if ext.eq_ignore_ascii_case("odt") {
      Some(Self::Odt)
    } else if ext.eq_ignore_ascii_case("docx") {
      Some(Self::Docx)
    } else {
      None
    }
  }

  fn paragraphs(self, path: &Path) -> Result<Vec<String>> {
    match self {
      Self::Odt => odt::read(path),
      Self::Docx => docx::read(path),
    }
  }
}

/// One document read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
  /// File stem with underscores replaced by spaces.
  pub title: String,
  /// UTC calendar year of the last modification.
  pub year:  i32,
  /// Raw paragraph text, joined with single spaces.
  pub text:  String,
  pub path:  PathBuf,
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// `Some_Title.docx` → `Some Title`.
pub fn title_from_path(path: &Path) -> Option<String> {
  Some(path.file_stem()?.to_str()?.replace('_', " "))
}

/// UTC year of the file's last modification time.
pub fn modified_year(path: &Path) -> Result<i32> {
  let modified = fs::metadata(path)?.modified()?;
  Ok(DateTime::<Utc>::from(modified).year())
}

/// Read a single `.odt` or `.docx` file.
pub fn read_document(path: &Path) -> Result<SourceDocument> {
  let format =
    DocumentFormat::from_path(path).ok_or_else(|| Error::Unsupported(path.to_path_buf()))?;
  let title = title_from_path(path).ok_or_else(|| Error::InvalidName(path.to_path_buf()))?;
  let year = modified_year(path)?;
  let text = format.paragraphs(path)?.join(" ");

  Ok(SourceDocument { title, year, text, path: path.to_path_buf() })
}

/// Read every recognised document directly inside `dir`.
///
/// Files with other extensions are skipped silently. A document that cannot
/// be read is logged and skipped. Failing to list the directory is an error.
/// Results are sorted by path.
pub fn read_dir(dir: &Path) -> Result<Vec<SourceDocument>> {
  let mut paths = Vec::new();
  for entry in fs::read_dir(dir)? {
    let path = entry?.path();
    if path.is_file() && DocumentFormat::from_path(&path).is_some() {
      paths.push(path);
    }
  }
  paths.sort();

  let mut docs = Vec::with_capacity(paths.len());
  for path in paths {
    match read_document(&path) {
      Ok(doc) => docs.push(doc),
      Err(e) => {
        tracing::warn!(path = %path.display(), error = %e, "skipping unreadable document");
      }
    }
  }

  tracing::debug!(dir = %dir.display(), count = docs.len(), "read documents");
  Ok(docs)
}

// ─── Tests ───────────────────────────────────────────────────────────────────


// ─── Shared test helpers ─────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod test_helpers {
  use std::{fs::File, io::Write as _, path::Path, time::SystemTime};

  use zip::{ZipWriter, write::SimpleFileOptions};

  pub(crate) fn write_zip(path: &Path, parts: &[(&str, &str)]) {
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, body) in parts {
      zip.start_file(*name, SimpleFileOptions::default()).unwrap();
      zip.write_all(body.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
  }

  pub(crate) fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String =
      paragraphs.iter().map(|p| format!("<w:p><w:r><w:t>{p}</w:t></w:r></w:p>")).collect();
    let xml = format!(
      r#"<?xml version="1.0" encoding="UTF-8"?><w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}</w:body></w:document>"#
    );
    write_zip(path, &[("word/document.xml", xml.as_str())]);
  }

  pub(crate) fn write_odt(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs.iter().map(|p| format!("<text:p>{p}</text:p>")).collect();
    let xml = format!(
      r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:text>{body}</office:text></office:body></office:document-content>"#
    );
    write_zip(path, &[
      ("mimetype", "application/vnd.oasis.opendocument.text"),
      ("content.xml", xml.as_str()),
    ]);
  }

  pub(crate) fn set_mtime(path: &Path, time: SystemTime) {
    File::options().write(true).open(path).unwrap().set_modified(time).unwrap();
  }
}
