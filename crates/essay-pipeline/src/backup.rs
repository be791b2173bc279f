//! File-level backup and restore of the database.
//!
//! Only a missing source propagates as an error. Every other failure after
//! that check is written to the operation log and returned as an outcome.

use std::{
  fmt,
  fs::{self, File},
  io,
  path::{Path, PathBuf},
};

use chrono::{DateTime, Local, TimeZone};
use sha2::{Digest, Sha256};

use crate::{confirm::Confirm, oplog::OpLog, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
  Created(PathBuf),
  /// The copy failed; the reason is in the operation log.
  Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RestoreOutcome {
  Restored { backup_deleted: bool },
  /// The operator refused to overwrite the existing database.
  Declined,
  Failed,
}

/// `<file name>_backup_<YYYYMMDDHHMMSS>.db`
pub fn backup_file_name<Tz>(database: &Path, at: &DateTime<Tz>) -> String
where
  Tz: TimeZone,
  Tz::Offset: fmt::Display,
{
  let name = database
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| "database".to_owned());
  format!("{name}_backup_{}.db", at.format("%Y%m%d%H%M%S"))
}

/// Hex SHA-256 of a file's contents.
pub fn sha256_file(path: &Path) -> io::Result<String> {
  let mut file = File::open(path)?;
  let mut hasher = Sha256::new();
  io::copy(&mut file, &mut hasher)?;
  Ok(hex::encode(hasher.finalize()))
}

/// Copy `from` to `to`, carry over the modification time, and check that
/// both files hash the same. Returns the digest.
fn copy_verified(from: &Path, to: &Path) -> io::Result<String> {
  fs::copy(from, to)?;
  let modified = fs::metadata(from)?.modified()?;
  File::options().write(true).open(to)?.set_modified(modified)?;

  let expected = sha256_file(from)?;
  let actual = sha256_file(to)?;
  if expected != actual {
    return Err(io::Error::new(
      io::ErrorKind::InvalidData,
      format!("checksum mismatch: {expected} != {actual}"),
    ));
  }
  Ok(actual)
}

/// Copy `database` into `backup_dir` under a timestamped name.
pub fn backup(database: &Path, backup_dir: &Path, log: &OpLog) -> Result<BackupOutcome> {
  if !database.is_file() {
    log.warn("Database file does not exist.");
    return Err(Error::NotFound(database.to_path_buf()));
  }

  if !backup_dir.exists() {
    fs::create_dir_all(backup_dir)?;
    log.info(format!("Backup directory created: {}", backup_dir.display()));
  }

  let target = backup_dir.join(backup_file_name(database, &Local::now()));
  match copy_verified(database, &target) {
    Ok(digest) => {
      log.info(format!("Backup created at {}", target.display()));
      tracing::debug!(sha256 = %digest, "backup verified");
      Ok(BackupOutcome::Created(target))
    }
    Err(e) => {
      log.warn(match e.kind() {
        io::ErrorKind::NotFound => "Backup directory does not exist.".to_owned(),
        io::ErrorKind::PermissionDenied => "Permission denied while creating backup.".to_owned(),
        _ => format!("Error creating backup: {e}"),
      });
      Ok(BackupOutcome::Failed)
    }
  }
}

/// Copy `backup_file` over `database`, asking first if `database` exists.
pub fn restore(
  backup_file: &Path,
  database: &Path,
  delete_backup: bool,
  confirm: &mut dyn Confirm,
  log: &OpLog,
) -> Result<RestoreOutcome> {
  if !backup_file.is_file() {
    log.warn("Backup file does not exist.");
    return Err(Error::NotFound(backup_file.to_path_buf()));
  }

  if database.exists() {
    let prompt = format!(
      "Database file {} already exists. Overwrite it with {}?",
      database.display(),
      backup_file.display()
    );
    if !confirm.confirm(&prompt) {
      log.info("Database file not overwritten.");
      return Ok(RestoreOutcome::Declined);
    }
  }

  if let Err(e) = copy_verified(backup_file, database) {
    log.warn(match e.kind() {
      io::ErrorKind::PermissionDenied => "Permission denied while restoring database.".to_owned(),
      _ => format!("Error while restoring database: {e}"),
    });
    return Ok(RestoreOutcome::Failed);
  }
  log.info(format!(
    "Database restored from {} to {}",
    backup_file.display(),
    database.display()
  ));

  let backup_deleted = delete_backup && delete_backup_file(backup_file, log);
  Ok(RestoreOutcome::Restored { backup_deleted })
}

/// Remove a backup once it has been restored. A failure leaves the restore
/// in place and is only logged.
fn delete_backup_file(backup_file: &Path, log: &OpLog) -> bool {
  match fs::remove_file(backup_file) {
    Ok(()) => {
      log.info(format!("Backup file deleted: {}", backup_file.display()));
      true
    }
    Err(e) => {
      log.warn(format!("Error while deleting backup file {}: {e}", backup_file.display()));
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;
  use crate::confirm::AssumeYes;

  struct Fixture {
    _dir:     tempfile::TempDir,
    database: PathBuf,
    backups:  PathBuf,
    log:      OpLog,
    log_path: PathBuf,
  }

  fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("essays.db");
    fs::write(&database, b"SQLite format 3\0rows").unwrap();
    let log_path = dir.path().join("logging/log.txt");
    Fixture {
      database,
      backups: dir.path().join("backups"),
      log: OpLog::new(&log_path),
      log_path,
      _dir: dir,
    }
  }

  fn log_text(f: &Fixture) -> String { fs::read_to_string(&f.log_path).unwrap_or_default() }

  #[test]
  fn file_name_is_timestamped() {
    let at = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
    assert_eq!(
      backup_file_name(Path::new("/data/essays.db"), &at),
      "essays.db_backup_20240309070501.db"
    );
  }

  #[test]
  fn backup_then_restore_round_trips() {
    let f = fixture();
    let original = fs::read(&f.database).unwrap();

    let BackupOutcome::Created(copy) = backup(&f.database, &f.backups, &f.log).unwrap() else {
      panic!("backup failed: {}", log_text(&f));
    };
    assert!(copy.starts_with(&f.backups));
    assert_eq!(
      fs::metadata(&copy).unwrap().modified().unwrap(),
      fs::metadata(&f.database).unwrap().modified().unwrap()
    );

    fs::write(&f.database, b"clobbered").unwrap();
    let outcome = restore(&copy, &f.database, false, &mut AssumeYes, &f.log).unwrap();
    assert_eq!(outcome, RestoreOutcome::Restored { backup_deleted: false });
    assert_eq!(fs::read(&f.database).unwrap(), original);
    assert!(copy.exists());

    let log = log_text(&f);
    assert!(log.contains("Backup directory created: "));
    assert!(log.contains("Backup created at "));
    assert!(log.contains("Database restored from "));
  }

  #[test]
  fn missing_database_is_an_error() {
    let f = fixture();
    fs::remove_file(&f.database).unwrap();
    assert!(matches!(backup(&f.database, &f.backups, &f.log), Err(Error::NotFound(_))));
    assert!(log_text(&f).contains("Database file does not exist."));
    assert!(!f.backups.exists());
  }

  #[test]
  fn missing_backup_is_an_error() {
    let f = fixture();
    let missing = f.backups.join("nope.db");
    assert!(matches!(
      restore(&missing, &f.database, false, &mut AssumeYes, &f.log),
      Err(Error::NotFound(_))
    ));
    assert!(log_text(&f).contains("Backup file does not exist."));
  }

  #[test]
  fn declined_restore_changes_nothing() {
    let f = fixture();
    let BackupOutcome::Created(copy) = backup(&f.database, &f.backups, &f.log).unwrap() else {
      panic!("backup failed");
    };
    fs::write(&f.database, b"newer").unwrap();

    let outcome = restore(&copy, &f.database, true, &mut |_: &str| false, &f.log).unwrap();
    assert_eq!(outcome, RestoreOutcome::Declined);
    assert_eq!(fs::read(&f.database).unwrap(), b"newer");
    assert!(copy.exists());
  }

  #[test]
  fn restore_can_delete_the_backup() {
    let f = fixture();
    let BackupOutcome::Created(copy) = backup(&f.database, &f.backups, &f.log).unwrap() else {
      panic!("backup failed");
    };
    fs::remove_file(&f.database).unwrap();

    // No existing database, so no prompt.
    let mut never = |_: &str| -> bool { panic!("unexpected prompt") };
    let outcome = restore(&copy, &f.database, true, &mut never, &f.log).unwrap();
    assert_eq!(outcome, RestoreOutcome::Restored { backup_deleted: true });
    assert!(f.database.exists());
    assert!(!copy.exists());
    assert!(log_text(&f).contains("Backup file deleted: "));
  }

  #[test]
  fn copy_failure_is_logged_not_raised() {
    let f = fixture();
    // Restoring onto a directory path cannot succeed.
    let BackupOutcome::Created(copy) = backup(&f.database, &f.backups, &f.log).unwrap() else {
      panic!("backup failed");
    };
    let outcome = restore(&copy, &f.backups, false, &mut AssumeYes, &f.log).unwrap();
    assert_eq!(outcome, RestoreOutcome::Failed);
    assert!(log_text(&f).contains("Error while restoring database: "));
  }

  #[test]
  fn copy_failure_during_backup_is_logged_not_raised() {
    let f = fixture();
    // An existing regular file where the backup folder should be: the
    // folder is not created and the copy into it fails.
    let blocker = f.database.with_file_name("not_a_dir");
    fs::write(&blocker, b"").unwrap();

    let outcome = backup(&f.database, &blocker, &f.log).unwrap();
    assert_eq!(outcome, BackupOutcome::Failed);
    let log = log_text(&f);
    assert!(log.contains("Error creating backup: "), "{log}");
    assert!(!log.contains("Backup created at "));
  }

  #[test]
  fn failed_backup_deletion_keeps_the_restore() {
    let f = fixture();
    let gone = f.backups.join("already_removed.db");
    assert!(!delete_backup_file(&gone, &f.log));
    assert!(log_text(&f).contains("Error while deleting backup file "));
  }

  #[test]
  fn digest_matches_known_value() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("abc");
    fs::write(&path, b"abc").unwrap();
    assert_eq!(
      sha256_file(&path).unwrap(),
      "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
  }
}
