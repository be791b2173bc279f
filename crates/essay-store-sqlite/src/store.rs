//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, types::Value as SqlValue};

use essay_core::{
  essay::RowId,
  store::{DuplicateGroup, Duplicates, RecordStore},
  value::{Table, Value},
};

use crate::{
  encode::{decode_id_list, decode_value, encode_value, quote_ident, schema_error},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An essay store backed by a single SQLite file.
pub struct SqliteStore {
  conn: rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = rusqlite::Connection::open(path)?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub fn open_in_memory() -> Result<Self> {
    let conn = rusqlite::Connection::open_in_memory()?;
    let store = Self { conn };
    store.init_schema()?;
    Ok(store)
  }

  fn init_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  #[cfg(test)]
  pub(crate) fn conn(&self) -> &rusqlite::Connection { &self.conn }

  /// Quoted name of `table`, which must exist.
  fn table(&self, table: &str) -> Result<String> {
    let quoted = quote_ident(table)?;
    let exists = self
      .conn
      .query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        rusqlite::params![table],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false);

    if exists {
      Ok(quoted)
    } else {
      Err(Error::UnknownTable(table.to_owned()))
    }
  }

  /// Column names of an existing table, in schema order.
  fn table_columns(&self, table: &str) -> Result<Vec<String>> {
    let mut stmt = self
      .conn
      .prepare("SELECT name FROM pragma_table_info(?1) ORDER BY cid")?;
    let names = stmt
      .query_map(rusqlite::params![table], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
  }

  /// Quoted name of `column`, which must exist in `table`.
  fn column(&self, table: &str, column: &str) -> Result<String> {
    let quoted = quote_ident(column)?;
    if self.table_columns(table)?.iter().any(|c| c == column) {
      Ok(quoted)
    } else {
      Err(Error::UnknownColumn {
        table:  table.to_owned(),
        column: column.to_owned(),
      })
    }
  }

  fn count(&self, sql: &str) -> Result<i64> {
    Ok(self.conn.query_row(sql, [], |row| row.get(0))?)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  // ── Schema inspection ─────────────────────────────────────────────────────

  fn column_exists(&self, table: &str, column: &str) -> Result<bool> {
    self.table(table)?;
    Ok(self.table_columns(table)?.iter().any(|c| c == column))
  }

  fn columns(&self, table: &str) -> Result<Vec<String>> {
    self.table(table)?;
    self.table_columns(table)
  }

  fn is_empty_or_null(&self, table: &str, column: &str) -> Result<bool> {
    let t = self.table(table)?;
    let c = self.column(table, column)?;
    let n = self.count(&format!(
      "SELECT COUNT(*) FROM {t} WHERE {c} IS NULL OR {c} = ''"
    ))?;
    Ok(n > 0)
  }

  fn is_blank(&self, table: &str, column: &str) -> Result<bool> {
    let t = self.table(table)?;
    let c = self.column(table, column)?;
    let n = self.count(&format!(
      "SELECT COUNT(*) FROM {t} WHERE {c} IS NOT NULL AND {c} <> ''"
    ))?;
    Ok(n == 0)
  }

  fn find_duplicates(&self, table: &str, columns: &[&str]) -> Result<Duplicates> {
    let t = self.table(table)?;
    if columns.is_empty() {
      return Err(essay_core::Error::InvalidIdentifier(String::new()).into());
    }
    let quoted = columns
      .iter()
      .map(|c| self.column(table, c))
      .collect::<Result<Vec<_>>>()?;
    let key_cols = quoted.join(", ");
    let width = columns.len();

    let sql = format!(
      "SELECT {key_cols}, COUNT(*), GROUP_CONCAT(id)
       FROM {t}
       GROUP BY {key_cols}
       HAVING COUNT(*) > 1
       ORDER BY {key_cols}"
    );

    let mut stmt = self.conn.prepare(&sql)?;
    let raws = stmt
      .query_map([], |row| {
        let key = (0..width)
          .map(|i| row.get::<_, SqlValue>(i))
          .collect::<rusqlite::Result<Vec<_>>>()?;
        let ids: String = row.get(width + 1)?;
        Ok((key, ids))
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    let groups = raws
      .into_iter()
      .map(|(key, ids)| {
        Ok(DuplicateGroup {
          key: key.into_iter().map(decode_value).collect(),
          ids: decode_id_list(&ids)?,
        })
      })
      .collect::<Result<Vec<_>>>()?;

    Ok(Duplicates {
      columns: columns.iter().map(|c| (*c).to_owned()).collect(),
      groups,
    })
  }

  // ── Schema mutation ───────────────────────────────────────────────────────

  fn add_column(&self, table: &str, column: &str) -> Result<()> {
    let t = self.table(table)?;
    let c = quote_ident(column)?;
    self
      .conn
      .execute(&format!("ALTER TABLE {t} ADD COLUMN {c} TEXT"), [])
      .map_err(schema_error)?;
    Ok(())
  }

  fn drop_column(&self, table: &str, column: &str) -> Result<()> {
    let t = self.table(table)?;
    let c = self.column(table, column)?;
    self
      .conn
      .execute(&format!("ALTER TABLE {t} DROP COLUMN {c}"), [])
      .map_err(schema_error)?;
    Ok(())
  }

  fn rename_column(&self, table: &str, old: &str, new: &str) -> Result<()> {
    let t = self.table(table)?;
    let from = self.column(table, old)?;
    let to = quote_ident(new)?;
    self
      .conn
      .execute(&format!("ALTER TABLE {t} RENAME COLUMN {from} TO {to}"), [])
      .map_err(schema_error)?;
    Ok(())
  }

  // ── Rows ──────────────────────────────────────────────────────────────────

  fn delete_row(&self, table: &str, id: RowId) -> Result<bool> {
    let t = self.table(table)?;
    let n = self
      .conn
      .execute(&format!("DELETE FROM {t} WHERE id = ?1"), rusqlite::params![id])?;
    Ok(n > 0)
  }

  fn update_cell(&self, table: &str, id: RowId, column: &str, value: &Value) -> Result<bool> {
    let t = self.table(table)?;
    let c = self.column(table, column)?;
    let n = self.conn.execute(
      &format!("UPDATE {t} SET {c} = ?1 WHERE id = ?2"),
      rusqlite::params![encode_value(value), id],
    )?;
    Ok(n > 0)
  }

  fn update_column(&self, table: &str, column: &str, value: &Value) -> Result<usize> {
    let t = self.table(table)?;
    let c = self.column(table, column)?;
    let n = self.conn.execute(
      &format!("UPDATE {t} SET {c} = ?1"),
      rusqlite::params![encode_value(value)],
    )?;
    Ok(n)
  }

  fn lookup_id(&self, table: &str, column: &str, value: &Value) -> Result<Option<RowId>> {
    let t = self.table(table)?;
    let c = self.column(table, column)?;
    let id = self
      .conn
      .query_row(
        &format!("SELECT id FROM {t} WHERE {c} = ?1 ORDER BY id LIMIT 1"),
        rusqlite::params![encode_value(value)],
        |row| row.get(0),
      )
      .optional()?;
    Ok(id)
  }

  fn bulk_insert(&self, table: &str, columns: &[&str], rows: &[Vec<Value>]) -> Result<usize> {
    let t = self.table(table)?;
    let quoted = columns
      .iter()
      .map(|c| self.column(table, c))
      .collect::<Result<Vec<_>>>()?;

    if let Some(bad) = rows.iter().find(|r| r.len() != columns.len()) {
      return Err(
        essay_core::Error::ArityMismatch { expected: columns.len(), found: bad.len() }.into(),
      );
    }
    if rows.is_empty() {
      return Ok(0);
    }

    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!("INSERT INTO {t} ({}) VALUES ({placeholders})", quoted.join(", "));

    let tx = self.conn.unchecked_transaction()?;
    {
      let mut stmt = tx.prepare(&sql)?;
      for row in rows {
        stmt.execute(rusqlite::params_from_iter(row.iter().map(encode_value)))?;
      }
    }
    tx.commit()?;
    Ok(rows.len())
  }

  fn retrieve_all(&self, table: &str) -> Result<Table> {
    let t = self.table(table)?;
    let mut stmt = self.conn.prepare(&format!("SELECT * FROM {t}"))?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_owned).collect();
    let width = columns.len();

    let rows = stmt
      .query_map([], |row| {
        (0..width)
          .map(|i| row.get::<_, SqlValue>(i).map(decode_value))
          .collect::<rusqlite::Result<Vec<_>>>()
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(Table { columns, rows })
  }
}
