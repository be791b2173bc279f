//! Pipeline configuration.
//!
//! Read from an optional TOML file layered under `ESSAYS_*` environment
//! variables, e.g. `ESSAYS_DATABASE_PATH=~/essays/essays.db`.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use essay_core::essay::ESSAYS_TABLE;
use essay_text::SummaryOrder;

use crate::Result;

/// File name of the health report when no path is configured.
pub const HEALTH_REPORT_FILE: &str = "database_health_report.txt";

fn default_table() -> String { ESSAYS_TABLE.to_owned() }

fn default_summary_sentences() -> usize { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
  pub database_path:      PathBuf,
  pub backup_dir:         PathBuf,
  /// Append-only operation log.
  pub log_path:           PathBuf,
  /// Folder holding the `.odt` / `.docx` sources.
  pub dataset_dir:        PathBuf,
  #[serde(default)]
  pub health_report_path: Option<PathBuf>,
  #[serde(default = "default_table")]
  pub table:              String,
  #[serde(default = "default_summary_sentences")]
  pub summary_sentences:  usize,
  #[serde(default)]
  pub summary_order:      SummaryOrder,
  /// Folders `collect` copies documents from.
  #[serde(default)]
  pub source_dirs:        Vec<PathBuf>,
}

impl PipelineConfig {
  /// Load from `path` (if it exists) and the environment, then expand `~/`.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("ESSAYS")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("source_dirs"),
      )
      .build()?;

    let cfg: Self = settings.try_deserialize()?;
    Ok(cfg.expanded())
  }

  /// The same config with a leading `~/` expanded in every path.
  pub fn expanded(mut self) -> Self {
    self.database_path = expand_tilde(&self.database_path);
    self.backup_dir = expand_tilde(&self.backup_dir);
    self.log_path = expand_tilde(&self.log_path);
    self.dataset_dir = expand_tilde(&self.dataset_dir);
    self.health_report_path = self.health_report_path.as_deref().map(expand_tilde);
    for dir in &mut self.source_dirs {
      *dir = expand_tilde(dir);
    }
    self
  }

  /// Where maintenance appends its health report. Defaults to
  /// `database_health_report.txt` next to the database file.
  pub fn health_report_path(&self) -> PathBuf {
    match &self.health_report_path {
      Some(path) => path.clone(),
      None => self
        .database_path
        .parent()
        .unwrap_or(Path::new(""))
        .join(HEALTH_REPORT_FILE),
    }
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  const MINIMAL: &str = r#"
database_path = "/data/essays/essays.db"
backup_dir    = "/data/backups"
log_path      = "/data/logging/log.txt"
dataset_dir   = "/data/Essays"
"#;

  fn load_str(toml: &str) -> PipelineConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("essays.toml");
    std::fs::write(&path, toml).unwrap();
    PipelineConfig::load(&path).unwrap()
  }

  #[test]
  fn defaults_fill_optional_fields() {
    let cfg = load_str(MINIMAL);
    assert_eq!(cfg.database_path, PathBuf::from("/data/essays/essays.db"));
    assert_eq!(cfg.table, "essays");
    assert_eq!(cfg.summary_sentences, 5);
    assert_eq!(cfg.summary_order, SummaryOrder::Document);
    assert!(cfg.source_dirs.is_empty());
    assert_eq!(
      cfg.health_report_path(),
      PathBuf::from("/data/essays/database_health_report.txt")
    );
  }

  #[test]
  fn optional_fields_override() {
    let cfg = load_str(&format!(
      "{MINIMAL}\nsummary_sentences = 3\nsummary_order = \"score\"\n\
       health_report_path = \"/tmp/report.txt\"\nsource_dirs = [\"/a\", \"/b\"]\n"
    ));
    assert_eq!(cfg.summary_sentences, 3);
    assert_eq!(cfg.summary_order, SummaryOrder::Score);
    assert_eq!(cfg.health_report_path(), PathBuf::from("/tmp/report.txt"));
    assert_eq!(cfg.source_dirs, vec![PathBuf::from("/a"), PathBuf::from("/b")]);
  }

  #[test]
  fn missing_required_field_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("essays.toml");
    std::fs::write(&path, "backup_dir = \"/b\"\n").unwrap();
    assert!(PipelineConfig::load(&path).is_err());
  }

  #[test]
  fn tilde_expansion() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x/y.db")), PathBuf::from(home).join("x/y.db"));
    assert_eq!(expand_tilde(Path::new("/abs/y.db")), PathBuf::from("/abs/y.db"));
    assert_eq!(expand_tilde(Path::new("~user/y.db")), PathBuf::from("~user/y.db"));
  }
}
