//! Dynamically typed cell values and the in-memory [`Table`] returned by a
//! full-table read.

use std::fmt;

use serde::Serialize;

use crate::Result;

// ─── Value ───────────────────────────────────────────────────────────────────

/// A single cell. Mirrors the storage classes of a dynamically typed SQL
/// column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
  Null,
  Integer(i64),
  Real(f64),
  Text(String),
  Blob(Vec<u8>),
}

impl Value {
  /// `NULL` or the empty string.
  pub fn is_blank(&self) -> bool {
    match self {
      Self::Null => true,
      Self::Text(s) => s.is_empty(),
      _ => false,
    }
  }

  pub fn as_i64(&self) -> Option<i64> {
    match self {
      Self::Integer(i) => Some(*i),
      _ => None,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Self::Text(s) => Some(s),
      _ => None,
    }
  }
}

impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Null => f.write_str("NULL"),
      Self::Integer(i) => write!(f, "{i}"),
      Self::Real(r) => write!(f, "{r}"),
      Self::Text(s) => f.write_str(s),
      Self::Blob(b) => write!(f, "<{} bytes>", b.len()),
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self { Self::Text(s.to_owned()) }
}

impl From<String> for Value {
  fn from(s: String) -> Self { Self::Text(s) }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self { Self::Integer(i) }
}

impl From<i32> for Value {
  fn from(i: i32) -> Self { Self::Integer(i64::from(i)) }
}

impl From<f64> for Value {
  fn from(r: f64) -> Self { Self::Real(r) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(v: Option<T>) -> Self { v.map_or(Self::Null, Into::into) }
}

// ─── Table ───────────────────────────────────────────────────────────────────

/// A fully materialised query result with named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
  pub columns: Vec<String>,
  pub rows:    Vec<Vec<Value>>,
}

/// Cells wider than this are cut when the table is rendered as text.
const MAX_CELL_WIDTH: usize = 40;

impl Table {
  pub fn new(columns: Vec<String>) -> Self { Self { columns, rows: Vec::new() } }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  pub fn column_index(&self, name: &str) -> Option<usize> {
    self.columns.iter().position(|c| c == name)
  }

  /// The cell at `row` in the column called `column`.
  pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
    let idx = self.column_index(column)?;
    self.rows.get(row)?.get(idx)
  }

  /// Render as a JSON array with one object per row.
  pub fn to_json(&self) -> Result<serde_json::Value> {
    let mut out = Vec::with_capacity(self.rows.len());
    for row in &self.rows {
      let mut obj = serde_json::Map::new();
      for (name, value) in self.columns.iter().zip(row) {
        obj.insert(name.clone(), serde_json::to_value(value)?);
      }
      out.push(serde_json::Value::Object(obj));
    }
    Ok(serde_json::Value::Array(out))
  }
}

fn clip(cell: String) -> String {
  let flat = cell.replace(['\n', '\r', '\t'], " ");
  if flat.chars().count() <= MAX_CELL_WIDTH {
    return flat;
  }
  let mut cut: String = flat.chars().take(MAX_CELL_WIDTH - 1).collect();
  cut.push('…');
  cut
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let cells: Vec<Vec<String>> = self
      .rows
      .iter()
      .map(|row| row.iter().map(|v| clip(v.to_string())).collect())
      .collect();

    let mut widths: Vec<usize> =
      self.columns.iter().map(|c| c.chars().count()).collect();
    for row in &cells {
      for (w, cell) in widths.iter_mut().zip(row) {
        *w = (*w).max(cell.chars().count());
      }
    }

    let header: Vec<String> = self
      .columns
      .iter()
      .zip(&widths)
      .map(|(c, w)| format!("{c:<w$}"))
      .collect();
    writeln!(f, "{}", header.join(" | "))?;

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(f, "{}", rule.join("-+-"))?;

    for row in &cells {
      let line: Vec<String> = row
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
      writeln!(f, "{}", line.join(" | "))?;
    }

    write!(f, "[{} rows x {} columns]", self.rows.len(), self.columns.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Table {
    Table {
      columns: vec!["id".into(), "title".into()],
      rows:    vec![
        vec![Value::Integer(1), Value::from("Alpha")],
        vec![Value::Integer(2), Value::Null],
      ],
    }
  }

  #[test]
  fn get_by_column_name() {
    let t = sample();
    assert_eq!(t.get(0, "title"), Some(&Value::from("Alpha")));
    assert_eq!(t.get(1, "title"), Some(&Value::Null));
    assert_eq!(t.get(0, "missing"), None);
    assert_eq!(t.get(5, "id"), None);
  }

  #[test]
  fn blank_values() {
    assert!(Value::Null.is_blank());
    assert!(Value::from("").is_blank());
    assert!(!Value::from(" ").is_blank());
    assert!(!Value::Integer(0).is_blank());
  }

  #[test]
  fn json_rows_are_objects() {
    let json = sample().to_json().unwrap();
    assert_eq!(json[0]["title"], "Alpha");
    assert_eq!(json[1]["id"], 2);
    assert!(json[1]["title"].is_null());
  }

  #[test]
  fn display_renders_header_and_shape() {
    let text = sample().to_string();
    let first = text.lines().next().unwrap();
    assert!(first.starts_with("id"));
    assert!(first.contains("title"));
    assert!(text.ends_with("[2 rows x 2 columns]"));
  }

  #[test]
  fn long_cells_are_clipped() {
    let t = Table {
      columns: vec!["body".into()],
      rows:    vec![vec![Value::from("x".repeat(100))]],
    };
    let line = t.to_string().lines().nth(2).unwrap().to_owned();
    assert_eq!(line.trim_end().chars().count(), MAX_CELL_WIDTH);
    assert!(line.contains('…'));
  }
}
