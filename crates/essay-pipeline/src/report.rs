//! The database health report written by maintenance.

use std::{
  fmt,
  fs::{self, OpenOptions},
  io::{self, Write as _},
  path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};

use essay_core::{store::Duplicates, value::Value};

/// One step maintenance took, or chose not to take.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
  pub name:    String,
  pub details: String,
}

impl Action {
  pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
    Self { name: name.into(), details: details.into() }
  }
}

#[derive(Debug, Clone)]
pub struct HealthReport {
  pub table:         String,
  pub database:      PathBuf,
  pub generated_at:  DateTime<Utc>,
  /// Duplicate groups found before resolution.
  pub duplicates:    Duplicates,
  /// Columns with at least one empty or `NULL` cell.
  pub empty_or_null: Vec<String>,
  pub removed:       Vec<String>,
  /// Blank columns the operator chose to keep.
  pub skipped:       Vec<String>,
  pub actions:       Vec<Action>,
}

impl HealthReport {
  pub fn new(table: &str, database: &Path) -> Self {
    Self {
      table:         table.to_owned(),
      database:      database.to_path_buf(),
      generated_at:  Utc::now(),
      duplicates:    Duplicates::default(),
      empty_or_null: Vec::new(),
      removed:       Vec::new(),
      skipped:       Vec::new(),
      actions:       Vec::new(),
    }
  }

  pub fn action(&mut self, name: impl Into<String>, details: impl Into<String>) {
    self.actions.push(Action::new(name, details));
  }

  /// Append the rendered report, followed by a blank line, to `path`.
  pub fn append_to(&self, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{self}")
  }
}

fn key_text(key: &[Value]) -> String {
  key
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(" & ")
}

impl fmt::Display for HealthReport {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(
      f,
      "Database Health Report for '{}' in '{}':",
      self.table,
      self.database.display()
    )?;
    writeln!(f, "Generated: {}", self.generated_at.format("%Y-%m-%d %H:%M:%S UTC"))?;
    writeln!(f)?;

    writeln!(f, "1. Duplicates:")?;
    if self.duplicates.is_empty() {
      writeln!(f, "   - No duplicates found.")?;
    } else {
      for group in self.duplicates.iter() {
        let ids = group
          .ids
          .iter()
          .map(ToString::to_string)
          .collect::<Vec<_>>()
          .join(", ");
        writeln!(f, "   - Duplicate group: {} [ids {ids}]", key_text(&group.key))?;
      }
    }
    writeln!(f)?;

    writeln!(f, "2. Empty or Null Columns:")?;
    if self.empty_or_null.is_empty() {
      writeln!(f, "   - No empty or null columns found.")?;
    } else {
      writeln!(
        f,
        "   - Columns with empty or null values: {}",
        self.empty_or_null.join(", ")
      )?;
    }
    writeln!(f)?;

    writeln!(f, "3. Actions Taken:")?;
    if self.actions.is_empty() {
      writeln!(f, "   - None.")?;
    }
    for action in &self.actions {
      writeln!(f, "   - {}: {}", action.name, action.details)?;
    }
    writeln!(f)?;

    write!(f, "End of Report")
  }
}
