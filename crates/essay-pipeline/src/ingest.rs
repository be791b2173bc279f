//! Initial population of the essays table from a folder of documents.

use std::path::Path;

use essay_core::{essay::EssayColumn, store::RecordStore, value::Value};
use essay_docs::SourceDocument;
use essay_text::Normalizer;

use crate::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
  /// Documents read from the dataset folder.
  pub read:     usize,
  pub inserted: usize,
  /// Rows that could not be inserted even one at a time.
  pub failed:   usize,
}

/// Read every document in `dataset_dir` and insert it into `table`.
///
/// Failing to list the folder is an error; unreadable documents and rows
/// that fail to insert are logged and skipped.
pub fn ingest<S: RecordStore>(
  store: &S,
  table: &str,
  dataset_dir: &Path,
  normalizer: &Normalizer,
) -> Result<IngestReport> {
  tracing::info!(dir = %dataset_dir.display(), "reading documents");
  let docs = essay_docs::read_dir(dataset_dir)?;
  Ok(populate(store, table, &docs, normalizer))
}

/// Insert `(title, normalised content, year)` for each document.
///
/// All rows go in as one batch. If the batch is rejected, rows are retried
/// one at a time so a single bad row costs only itself.
pub fn populate<S: RecordStore>(
  store: &S,
  table: &str,
  docs: &[SourceDocument],
  normalizer: &Normalizer,
) -> IngestReport {
  let columns = EssayColumn::names(&EssayColumn::INGESTED);
  let rows: Vec<Vec<Value>> = docs
    .iter()
    .map(|doc| {
      vec![
        Value::from(doc.title.as_str()),
        Value::from(normalizer.normalize(&doc.text)),
        Value::from(doc.year),
      ]
    })
    .collect();

  let mut report = IngestReport { read: docs.len(), ..Default::default() };
  if rows.is_empty() {
    return report;
  }

  match store.bulk_insert(table, &columns, &rows) {
    Ok(n) => report.inserted = n,
    Err(e) => {
      tracing::warn!(error = %e, "batch insert failed, retrying row by row");
      for (doc, row) in docs.iter().zip(&rows) {
        match store.bulk_insert(table, &columns, std::slice::from_ref(row)) {
          Ok(n) => report.inserted += n,
          Err(e) => {
            tracing::warn!(title = %doc.title, error = %e, "failed to insert document");
            report.failed += 1;
          }
        }
      }
    }
  }

  tracing::info!(inserted = report.inserted, failed = report.failed, "ingestion complete");
  report
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use essay_core::essay::{ESSAYS_TABLE, EssayRecord};
  use essay_store_sqlite::SqliteStore;

  use super::*;
  use crate::test_helpers::write_docx;

  fn doc(title: &str, year: i32, text: &str) -> SourceDocument {
    SourceDocument {
      title: title.to_owned(),
      year,
      text: text.to_owned(),
      path: PathBuf::from(format!("{title}.docx")),
    }
  }

  #[test]
  fn populates_normalised_rows() {
    let store = SqliteStore::open_in_memory().unwrap();
    let docs = [
      doc("First Essay", 2020, "The children were reading essays."),
      doc("Second Essay", 2021, "Wolves howl."),
    ];
    let report = populate(&store, ESSAYS_TABLE, &docs, &Normalizer::english());
    assert_eq!(report, IngestReport { read: 2, inserted: 2, failed: 0 });

    let records = EssayRecord::all_from_table(&store.retrieve_all(ESSAYS_TABLE).unwrap());
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].title.as_deref(), Some("First Essay"));
    assert_eq!(records[0].content.as_deref(), Some("child reading essay"));
    assert_eq!(records[0].year, Some(2020));
    assert_eq!(records[1].content.as_deref(), Some("wolf howl"));
  }

  #[test]
  fn failed_batch_falls_back_to_rows() {
    let store = SqliteStore::open_in_memory().unwrap();
    let docs = [doc("Only", 2020, "Text.")];
    let report = populate(&store, "missing_table", &docs, &Normalizer::english());
    assert_eq!(report, IngestReport { read: 1, inserted: 0, failed: 1 });
  }

  #[test]
  fn ingests_a_folder() {
    let dir = tempfile::tempdir().unwrap();
    write_docx(&dir.path().join("My_Essay.docx"), &["Rivers carve valleys."]);
    std::fs::write(dir.path().join("readme.txt"), "skip me").unwrap();

    let store = SqliteStore::open_in_memory().unwrap();
    let report = ingest(&store, ESSAYS_TABLE, dir.path(), &Normalizer::english()).unwrap();
    assert_eq!(report.inserted, 1);

    let table = store.retrieve_all(ESSAYS_TABLE).unwrap();
    assert_eq!(table.get(0, "title"), Some(&Value::from("My Essay")));
    assert_eq!(table.get(0, "content"), Some(&Value::from("river carve valley")));
  }

  #[test]
  fn missing_folder_is_an_error() {
    let store = SqliteStore::open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    assert!(ingest(&store, ESSAYS_TABLE, &missing, &Normalizer::english()).is_err());
  }
}
