//! Append-only operation log.
//!
//! Each message goes to `tracing` and is appended to the log file as one
//! line, prefixed with an RFC 3339 UTC timestamp.

use std::{
  fs::{self, OpenOptions},
  io::Write as _,
  path::{Path, PathBuf},
};

use chrono::{SecondsFormat, Utc};

#[derive(Debug, Clone)]
pub struct OpLog {
  path: Option<PathBuf>,
}

impl OpLog {
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: Some(path.into()) } }

  /// A log that only emits `tracing` events.
  pub fn disabled() -> Self { Self { path: None } }

  pub fn path(&self) -> Option<&Path> { self.path.as_deref() }

  pub fn info(&self, message: impl AsRef<str>) {
    let message = message.as_ref();
    tracing::info!("{message}");
    self.append(message);
  }

  pub fn warn(&self, message: impl AsRef<str>) {
    let message = message.as_ref();
    tracing::warn!("{message}");
    self.append(message);
  }

  /// Write failures are reported through `tracing` and otherwise ignored.
  fn append(&self, message: &str) {
    let Some(path) = &self.path else { return };
    let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    let result = (|| -> std::io::Result<()> {
      if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
      {
        fs::create_dir_all(parent)?;
      }
      let mut file = OpenOptions::new().create(true).append(true).open(path)?;
      writeln!(file, "{stamp} {message}")
    })();

    if let Err(e) = result {
      tracing::warn!(path = %path.display(), error = %e, "failed to write operation log");
    }
  }
}

#[cfg(test)]
mod tests {
  use chrono::DateTime;

  use super::*;

  #[test]
  fn lines_are_timestamped_and_appended() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logging/log.txt");
    let log = OpLog::new(&path);

    log.info("Backup created at /x");
    log.warn("Permission denied while creating backup.");

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);

    let (stamp, message) = lines[1].split_once(' ').unwrap();
    assert!(DateTime::parse_from_rfc3339(stamp).is_ok(), "{stamp}");
    assert_eq!(message, "Permission denied while creating backup.");
    assert!(lines[0].ends_with(" Backup created at /x"));
  }

  #[test]
  fn unwritable_log_does_not_panic() {
    let dir = tempfile::tempdir().unwrap();
    // The log path is a directory, so opening it for append fails.
    let log = OpLog::new(dir.path());
    log.info("still fine");
    assert_eq!(log.path(), Some(dir.path()));
  }

  #[test]
  fn disabled_log_writes_nothing() {
    let log = OpLog::disabled();
    log.warn("ignored");
    assert!(log.path().is_none());
  }
}
