//! The `RecordStore` trait and its supporting types.
//!
//! The trait is implemented by storage backends (e.g. `essay-store-sqlite`).
//! The pipelines depend on this abstraction, not on a concrete backend.

use crate::{
  essay::RowId,
  value::{Table, Value},
  Error, Result,
};

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Accept `name` only if it is a plain identifier (`[A-Za-z_][A-Za-z0-9_]*`).
///
/// Table and column names cannot be bound as parameters, so every name that
/// ends up inside SQL text passes through here first.
pub fn check_identifier(name: &str) -> Result<&str> {
  let mut chars = name.chars();
  let valid = match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' => {
      chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    }
    _ => false,
  };
  if valid {
    Ok(name)
  } else {
    Err(Error::InvalidIdentifier(name.to_owned()))
  }
}

// ─── Duplicates ──────────────────────────────────────────────────────────────

/// Rows sharing one composite key.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
  pub key: Vec<Value>,
  /// Always sorted ascending, at least two entries.
  pub ids: Vec<RowId>,
}

impl DuplicateGroup {
  /// The earliest-inserted row, which survives resolution.
  pub fn keeper(&self) -> Option<RowId> { self.ids.first().copied() }

  /// Every row except the keeper.
  pub fn redundant(&self) -> &[RowId] { self.ids.get(1..).unwrap_or_default() }
}

/// Result of [`RecordStore::find_duplicates`]: composite key → row ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Duplicates {
  pub columns: Vec<String>,
  pub groups:  Vec<DuplicateGroup>,
}

impl Duplicates {
  pub fn is_empty(&self) -> bool { self.groups.is_empty() }

  pub fn len(&self) -> usize { self.groups.len() }

  pub fn iter(&self) -> impl Iterator<Item = &DuplicateGroup> { self.groups.iter() }

  /// Row ids for the group whose key equals `key`.
  pub fn get(&self, key: &[Value]) -> Option<&[RowId]> {
    self
      .groups
      .iter()
      .find(|g| g.key == key)
      .map(|g| g.ids.as_slice())
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Atomic operations against tables of a single-file record database.
///
/// Every operation performs exactly one logical change or query and commits
/// on its own. There are no multi-statement transactions across calls.
/// Table and column names are validated against the live schema before they
/// reach SQL text; values are always bound.
pub trait RecordStore {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema inspection ─────────────────────────────────────────────────

  /// True iff `table` has a column named exactly `column`.
  fn column_exists(&self, table: &str, column: &str) -> Result<bool, Self::Error>;

  /// Column names of `table` in schema order.
  fn columns(&self, table: &str) -> Result<Vec<String>, Self::Error>;

  /// True iff at least one row holds `NULL` or `''` in `column`.
  fn is_empty_or_null(&self, table: &str, column: &str) -> Result<bool, Self::Error>;

  /// True iff no row holds a non-empty value in `column`.
  fn is_blank(&self, table: &str, column: &str) -> Result<bool, Self::Error>;

  /// Group rows by `columns` and return the groups with more than one row.
  fn find_duplicates(
    &self,
    table: &str,
    columns: &[&str],
  ) -> Result<Duplicates, Self::Error>;

  // ── Schema mutation ───────────────────────────────────────────────────

  /// Add a `TEXT` column. Not guarded: adding an existing column fails with
  /// the engine's error, so callers check [`Self::column_exists`] first.
  fn add_column(&self, table: &str, column: &str) -> Result<(), Self::Error>;

  /// Drop a column. Irreversible; confirming is the caller's job.
  fn drop_column(&self, table: &str, column: &str) -> Result<(), Self::Error>;

  fn rename_column(&self, table: &str, old: &str, new: &str) -> Result<(), Self::Error>;

  // ── Rows ──────────────────────────────────────────────────────────────

  /// Delete one row by id. Returns `false` if no such row existed.
  fn delete_row(&self, table: &str, id: RowId) -> Result<bool, Self::Error>;

  /// Set one cell. Returns `false` if no row has `id`.
  fn update_cell(
    &self,
    table: &str,
    id: RowId,
    column: &str,
    value: &Value,
  ) -> Result<bool, Self::Error>;

  /// Set `column` to `value` in **every** row of `table`. Not row-scoped.
  /// Returns the number of rows touched.
  fn update_column(
    &self,
    table: &str,
    column: &str,
    value: &Value,
  ) -> Result<usize, Self::Error>;

  /// Id of the first row whose `column` equals `value`, or `None`.
  fn lookup_id(
    &self,
    table: &str,
    column: &str,
    value: &Value,
  ) -> Result<Option<RowId>, Self::Error>;

  /// Insert `rows` in one batch. Each row must have one value per column.
  /// Returns the number of rows inserted.
  fn bulk_insert(
    &self,
    table: &str,
    columns: &[&str],
    rows: &[Vec<Value>],
  ) -> Result<usize, Self::Error>;

  /// Every row of `table` with its column names.
  fn retrieve_all(&self, table: &str) -> Result<Table, Self::Error>;
}
