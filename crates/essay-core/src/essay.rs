//! The essay record and the names of its columns.
//!
//! Rows start life with `id`, `title`, `content` and `year`. The derived
//! columns (`full_text`, `summary`, `keywords`) are added to the table later
//! and stay `NULL` until augmentation fills them in.

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

use crate::value::{Table, Value};

/// Stable handle of a row, assigned by the store on insertion.
pub type RowId = i64;

/// Default table name.
pub const ESSAYS_TABLE: &str = "essays";

/// Columns of the `essays` table.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum EssayColumn {
  Id,
  Title,
  Year,
  Content,
  FullText,
  Summary,
  Keywords,
}

impl EssayColumn {
  /// Columns added after initial ingestion.
  pub const DERIVED: [Self; 3] = [Self::FullText, Self::Summary, Self::Keywords];

  /// Rows sharing these values are duplicates of each other.
  pub const DUPLICATE_KEY: [Self; 2] = [Self::Title, Self::Year];

  /// Columns written by initial ingestion.
  pub const INGESTED: [Self; 3] = [Self::Title, Self::Content, Self::Year];

  pub fn name(self) -> &'static str { self.into() }

  /// Names of `columns`, in order.
  pub fn names(columns: &[Self]) -> Vec<&'static str> {
    columns.iter().map(|c| c.name()).collect()
  }
}

/// One row of the `essays` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EssayRecord {
  pub id:        RowId,
  pub title:     Option<String>,
  pub year:      Option<i64>,
  /// Normalised bag-of-words text.
  pub content:   Option<String>,
  /// Raw document text, matched back to the row by title.
  pub full_text: Option<String>,
  pub summary:   Option<String>,
  /// `entity (LABEL)` pairs joined with `", "`.
  pub keywords:  Option<String>,
}

impl EssayRecord {
  /// Decode row `row` of `table`. Columns the table does not have yet come
  /// back as `None`; returns `None` if the row has no integer `id`.
  pub fn from_table_row(table: &Table, row: usize) -> Option<Self> {
    let text = |col: EssayColumn| {
      table
        .get(row, col.as_ref())
        .and_then(Value::as_str)
        .map(str::to_owned)
    };

    Some(Self {
      id:        table.get(row, EssayColumn::Id.as_ref())?.as_i64()?,
      title:     text(EssayColumn::Title),
      year:      table
        .get(row, EssayColumn::Year.as_ref())
        .and_then(Value::as_i64),
      content:   text(EssayColumn::Content),
      full_text: text(EssayColumn::FullText),
      summary:   text(EssayColumn::Summary),
      keywords:  text(EssayColumn::Keywords),
    })
  }

  /// Decode every row of `table`, skipping rows without an id.
  pub fn all_from_table(table: &Table) -> Vec<Self> {
    (0..table.len())
      .filter_map(|row| Self::from_table_row(table, row))
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr as _;

  use super::*;

  #[test]
  fn column_names_are_snake_case() {
    assert_eq!(EssayColumn::FullText.as_ref(), "full_text");
    assert_eq!(EssayColumn::Keywords.to_string(), "keywords");
    assert_eq!(EssayColumn::from_str("summary").unwrap(), EssayColumn::Summary);
    assert_eq!(EssayColumn::names(&EssayColumn::DUPLICATE_KEY), vec!["title", "year"]);
  }

  #[test]
  fn record_from_partial_table() {
    let table = Table {
      columns: vec!["id".into(), "title".into(), "year".into(), "content".into()],
      rows:    vec![
        vec![
          Value::Integer(7),
          Value::from("On Walking"),
          Value::Integer(2019),
          Value::from("walk"),
        ],
        vec![Value::Null, Value::from("orphan"), Value::Null, Value::Null],
      ],
    };

    let rec = EssayRecord::from_table_row(&table, 0).unwrap();
    assert_eq!(rec.id, 7);
    assert_eq!(rec.title.as_deref(), Some("On Walking"));
    assert_eq!(rec.year, Some(2019));
    assert!(rec.full_text.is_none());

    assert!(EssayRecord::from_table_row(&table, 1).is_none());
    assert_eq!(EssayRecord::all_from_table(&table).len(), 1);
  }
}
