//! Gathering source documents into the dataset folder.

use std::{
  fs,
  path::{Path, PathBuf},
};

use essay_docs::DocumentFormat;

use crate::{oplog::OpLog, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
  pub copied:          Vec<PathBuf>,
  /// Source folders that did not exist or could not be listed.
  pub missing_sources: Vec<PathBuf>,
  pub failed:          Vec<PathBuf>,
}

/// Copy every `.odt` / `.docx` file directly inside each of `sources` into
/// `target`, overwriting files of the same name.
///
/// Only failing to create `target` is an error.
pub fn collect(sources: &[PathBuf], target: &Path, log: &OpLog) -> Result<CollectReport> {
  if !target.exists() {
    fs::create_dir_all(target)?;
    log.info(format!("Created target directory at: {}", target.display()));
  }

  let mut report = CollectReport::default();
  for source in sources {
    if !source.is_dir() {
      log.warn(format!("Folder {} not found, skipping...", source.display()));
      report.missing_sources.push(source.clone());
      continue;
    }

    let mut files: Vec<PathBuf> = match fs::read_dir(source) {
      Ok(entries) => entries
        .filter_map(|e| e.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && DocumentFormat::from_path(p).is_some())
        .collect(),
      Err(e) => {
        log.warn(format!("Failed to read folder {}, error: {e}", source.display()));
        report.missing_sources.push(source.clone());
        continue;
      }
    };
    files.sort();

    for file in files {
      let Some(name) = file.file_name() else { continue };
      let dest = target.join(name);
      match fs::copy(&file, &dest) {
        Ok(_) => {
          log.info(format!("Copied {} to {}", file.display(), dest.display()));
          report.copied.push(dest);
        }
        Err(e) => {
          log.warn(format!(
            "Failed to copy {} to {}, error: {e}",
            file.display(),
            dest.display()
          ));
          report.failed.push(file);
        }
      }
    }
  }

  Ok(report)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn copies_documents_and_skips_missing_folders() {
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a");
    let b = dir.path().join("b");
    fs::create_dir_all(&a).unwrap();
    fs::create_dir_all(&b).unwrap();
    fs::write(a.join("One.odt"), b"1").unwrap();
    fs::write(a.join("notes.txt"), b"no").unwrap();
    fs::write(b.join("Two.DOCX"), b"2").unwrap();
    let missing = dir.path().join("gone");

    let target = dir.path().join("dataset");
    let log_path = dir.path().join("log.txt");
    let report = collect(
      &[a, missing.clone(), b],
      &target,
      &OpLog::new(&log_path),
    )
    .unwrap();

    assert_eq!(report.copied, vec![target.join("One.odt"), target.join("Two.DOCX")]);
    assert_eq!(report.missing_sources, vec![missing]);
    assert!(report.failed.is_empty());
    assert!(!target.join("notes.txt").exists());

    let log = fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Created target directory at: "));
    assert!(log.contains("not found, skipping..."));
  }

  #[test]
  fn existing_files_are_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    let target = dir.path().join("dataset");
    fs::create_dir_all(&src).unwrap();
    fs::create_dir_all(&target).unwrap();
    fs::write(src.join("E.docx"), b"new").unwrap();
    fs::write(target.join("E.docx"), b"old").unwrap();

    collect(&[src], &target, &OpLog::disabled()).unwrap();
    assert_eq!(fs::read(target.join("E.docx")).unwrap(), b"new");
  }
}
