//! Deleting the database file.

use std::{fs, io, path::Path};

use crate::{confirm::Confirm, oplog::OpLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
  Removed,
  Declined,
  /// The file is read-only and was left alone.
  ReadOnly,
  /// There was nothing to delete.
  Absent,
  Failed,
}

/// Delete `database` once the operator confirms. Never returns an error;
/// every outcome is logged.
pub fn remove_database(database: &Path, confirm: &mut dyn Confirm, log: &OpLog) -> RemoveOutcome {
  if !database.is_file() {
    tracing::info!(path = %database.display(), "no database file to delete");
    return RemoveOutcome::Absent;
  }

  let prompt = format!(
    "Database file {} exists. Delete it? Action cannot be undone.",
    database.display()
  );
  if !confirm.confirm(&prompt) {
    log.info("Database file not deleted.");
    return RemoveOutcome::Declined;
  }

  let result = fs::metadata(database).and_then(|meta| {
    if meta.permissions().readonly() {
      return Ok(false);
    }
    fs::remove_file(database).map(|()| true)
  });

  match result {
    Ok(true) => {
      log.info(format!("Database file deleted: {}", database.display()));
      RemoveOutcome::Removed
    }
    Ok(false) => {
      log.warn(format!("File is not writable: {}", database.display()));
      RemoveOutcome::ReadOnly
    }
    Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
      log.warn("Permission denied while deleting database file.");
      RemoveOutcome::Failed
    }
    Err(e) => {
      log.warn(format!("Error while deleting database file: {e}"));
      RemoveOutcome::Failed
    }
  }
}
