//! Maintenance pass: duplicate resolution, blank-column pruning and the
//! health report.
//!
//! `run` never fails. Whatever goes wrong along the way is recorded as an
//! action in the report, so an operator always gets one.

use std::path::Path;

use essay_core::{essay::EssayColumn, store::RecordStore, value::Value};

use crate::{confirm::Confirm, report::HealthReport};

/// Scan `table`, resolve what can be resolved, and describe it.
///
/// Duplicates on `(title, year)` are reduced to their lowest id. Columns
/// whose every value is empty are dropped if the operator confirms;
/// partially filled columns are only reported.
pub fn run<S: RecordStore>(
  store: &S,
  table: &str,
  database: &Path,
  confirm: &mut dyn Confirm,
) -> HealthReport {
  let mut report = HealthReport::new(table, database);
  tracing::info!(table, database = %database.display(), "starting maintenance");

  resolve_duplicates(store, table, &mut report);
  prune_columns(store, table, database, confirm, &mut report);

  tracing::info!(actions = report.actions.len(), "maintenance complete");
  report
}

fn resolve_duplicates<S: RecordStore>(store: &S, table: &str, report: &mut HealthReport) {
  let key = EssayColumn::names(&EssayColumn::DUPLICATE_KEY);
  let duplicates = match store.find_duplicates(table, &key) {
    Ok(d) => d,
    Err(e) => {
      tracing::warn!(error = %e, "duplicate scan failed");
      report.action("Duplicate scan failed", e.to_string());
      return;
    }
  };

  if duplicates.is_empty() {
    report.action("Resolve duplicates", "No duplicates found.");
    return;
  }

  for group in duplicates.iter() {
    let title = group.key.first().unwrap_or(&Value::Null);
    let year = group.key.get(1).unwrap_or(&Value::Null);
    for &id in group.redundant() {
      match store.delete_row(table, id) {
        Ok(_) => {
          let details = format!("Resolved duplicate for '{title}' ({year}) with row ID {id}");
          tracing::info!("{details}");
          report.action("Resolve duplicates", details);
        }
        Err(e) => {
          tracing::warn!(id, error = %e, "failed to delete duplicate row");
          report.action("Failed to resolve duplicate", format!("row ID {id}: {e}"));
        }
      }
    }
  }
  report.duplicates = duplicates;
}

fn prune_columns<S: RecordStore>(
  store: &S,
  table: &str,
  database: &Path,
  confirm: &mut dyn Confirm,
  report: &mut HealthReport,
) {
  let columns = match store.columns(table) {
    Ok(c) => c,
    Err(e) => {
      tracing::warn!(error = %e, "column scan failed");
      report.action("Column scan failed", e.to_string());
      return;
    }
  };

  for column in columns {
    let scanned = store
      .is_empty_or_null(table, &column)
      .and_then(|partial| Ok((partial, partial && store.is_blank(table, &column)?)));
    let blank = match scanned {
      Ok((false, _)) => continue,
      Ok((true, blank)) => blank,
      Err(e) => {
        tracing::warn!(column, error = %e, "column check failed");
        report.action("Column check failed", format!("{column}: {e}"));
        continue;
      }
    };
    report.empty_or_null.push(column.clone());

    if !blank {
      report.action("Keep partially filled column", column);
      continue;
    }

    let prompt = format!(
      "Column '{column}' in table '{table}' in database '{}' is empty or null. \
       Are you sure you want to remove it?",
      database.display()
    );
    if !confirm.confirm(&prompt) {
      tracing::info!(column, "keeping empty column");
      report.action(
        format!("Skip empty or null column: {column}"),
        format!("Skipping empty or null column: {column}"),
      );
      report.skipped.push(column);
      continue;
    }

    match store.drop_column(table, &column) {
      Ok(()) => {
        tracing::info!(column, "dropped empty column");
        report.action(
          format!("Remove empty or null column: {column}"),
          format!("ALTER TABLE {table} DROP COLUMN {column}"),
        );
        report.removed.push(column);
      }
      Err(e) => {
        tracing::warn!(column, error = %e, "failed to drop column");
        report.action(format!("Failed to remove column: {column}"), e.to_string());
      }
    }
  }
}
