//! Augmentation pipeline.
//!
//! Makes sure the derived columns exist, backfills `full_text` from the
//! source documents by title, then writes a summary and a keyword list for
//! every row that has text. Schema steps are fatal; a document or row that
//! fails is logged and left behind.

use std::path::Path;

use essay_core::{
  essay::{EssayColumn, EssayRecord, RowId},
  store::RecordStore,
  value::Value,
};
use essay_docs::SourceDocument;
use essay_text::{
  CapitalizedSpanRecognizer, EntityRecognizer, Language, SummaryOrder, Summarizer,
  format_keywords,
};

use crate::{config::PipelineConfig, Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AugmentReport {
  /// Derived columns created by this run.
  pub columns_added: Vec<String>,
  /// Rows whose `full_text` was filled from a document.
  pub backfilled:    usize,
  /// Titles of documents that matched no row.
  pub unmatched:     Vec<String>,
  /// Rows that received a summary and keywords.
  pub generated:     usize,
  /// Rows without `full_text`.
  pub skipped:       Vec<RowId>,
  pub failed:        Vec<RowId>,
}

pub struct Augmenter<R = CapitalizedSpanRecognizer> {
  summarizer: Summarizer,
  recognizer: R,
  sentences:  usize,
}

impl Augmenter {
  /// English summaries of `sentences` sentences and the built-in recognizer.
  pub fn new(order: SummaryOrder, sentences: usize) -> Self {
    Self::with_recognizer(
      Summarizer::new(Language::English, order),
      CapitalizedSpanRecognizer::new(),
      sentences,
    )
  }

  pub fn from_config(config: &PipelineConfig) -> Self {
    Self::new(config.summary_order, config.summary_sentences)
  }
}

impl<R: EntityRecognizer> Augmenter<R> {
  pub fn with_recognizer(summarizer: Summarizer, recognizer: R, sentences: usize) -> Self {
    Self { summarizer, recognizer, sentences }
  }

  /// Run every step against `table`, reading documents from `dataset_dir`
  /// only if some row still lacks `full_text`.
  pub fn run<S: RecordStore>(
    &self,
    store: &S,
    table: &str,
    dataset_dir: &Path,
  ) -> Result<AugmentReport> {
    let mut report = AugmentReport {
      columns_added: self.ensure_columns(store, table)?,
      ..Default::default()
    };

    let full_text = EssayColumn::FullText.name();
    if store.is_empty_or_null(table, full_text).map_err(Error::store)? {
      tracing::info!(dir = %dataset_dir.display(), "reading file content");
      let docs = essay_docs::read_dir(dataset_dir)?;
      self.backfill(store, table, &docs, &mut report);
    }

    self.generate(store, table, &mut report)?;
    tracing::info!(
      generated = report.generated,
      skipped = report.skipped.len(),
      failed = report.failed.len(),
      "augmentation complete"
    );
    Ok(report)
  }

  /// Add whichever derived columns are missing; returns their names.
  pub fn ensure_columns<S: RecordStore>(&self, store: &S, table: &str) -> Result<Vec<String>> {
    let mut added = Vec::new();
    for column in EssayColumn::DERIVED {
      let name = column.name();
      if !store.column_exists(table, name).map_err(Error::store)? {
        store.add_column(table, name).map_err(Error::store)?;
        tracing::info!(table, column = name, "added column");
        added.push(name.to_owned());
      }
    }
    Ok(added)
  }

  /// Store each document's raw text on the row with the same title.
  pub fn backfill<S: RecordStore>(
    &self,
    store: &S,
    table: &str,
    docs: &[SourceDocument],
    report: &mut AugmentReport,
  ) {
    let title = EssayColumn::Title.name();
    let full_text = EssayColumn::FullText.name();

    for doc in docs {
      let id = match store.lookup_id(table, title, &Value::from(doc.title.as_str())) {
        Ok(Some(id)) => id,
        Ok(None) => {
          tracing::info!("Skipping {}...", doc.title);
          report.unmatched.push(doc.title.clone());
          continue;
        }
        Err(e) => {
          tracing::warn!(title = %doc.title, error = %e, "title lookup failed");
          continue;
        }
      };

      match store.update_cell(table, id, full_text, &Value::from(doc.text.as_str())) {
        Ok(true) => report.backfilled += 1,
        Ok(false) => tracing::warn!(id, "row vanished before full_text could be written"),
        Err(e) => tracing::warn!(id, error = %e, "failed to write full_text"),
      }
    }
  }

  /// Summary and keyword list for one text.
  pub fn derive(&self, text: &str) -> Result<(String, String)> {
    let summary = self.summarizer.summarize(text, self.sentences);
    let keywords = format_keywords(&self.recognizer.recognize(text)?);
    Ok((summary, keywords))
  }

  /// Write summary and keywords for every row that has `full_text`.
  pub fn generate<S: RecordStore>(
    &self,
    store: &S,
    table: &str,
    report: &mut AugmentReport,
  ) -> Result<()> {
    let rows = store.retrieve_all(table).map_err(Error::store)?;

    for record in EssayRecord::all_from_table(&rows) {
      let Some(text) = record.full_text.as_deref() else {
        tracing::debug!(id = record.id, "no full_text, skipping");
        report.skipped.push(record.id);
        continue;
      };

      let written = self.derive(text).and_then(|(summary, keywords)| {
        store
          .update_cell(table, record.id, EssayColumn::Summary.name(), &Value::from(summary))
          .and_then(|_| {
            store.update_cell(table, record.id, EssayColumn::Keywords.name(), &Value::from(keywords))
          })
          .map_err(Error::store)
      });

      match written {
        Ok(_) => report.generated += 1,
        Err(e) => {
          tracing::warn!(id = record.id, error = %e, "failed to augment row");
          report.failed.push(record.id);
        }
      }
    }
    Ok(())
  }
}
