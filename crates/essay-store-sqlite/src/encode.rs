//! Encoding and decoding helpers between core types and what SQLite stores.
//!
//! Cell values map one-to-one onto SQLite storage classes. Identifiers are
//! validated and double-quoted before they are interpolated into SQL text.

use rusqlite::types::Value as SqlValue;

use essay_core::{essay::RowId, store::check_identifier, value::Value};

use crate::{Error, Result};

// ─── Values ──────────────────────────────────────────────────────────────────

pub fn encode_value(v: &Value) -> SqlValue {
  match v {
    Value::Null => SqlValue::Null,
    Value::Integer(i) => SqlValue::Integer(*i),
    Value::Real(r) => SqlValue::Real(*r),
    Value::Text(s) => SqlValue::Text(s.clone()),
    Value::Blob(b) => SqlValue::Blob(b.clone()),
  }
}

pub fn decode_value(v: SqlValue) -> Value {
  match v {
    SqlValue::Null => Value::Null,
    SqlValue::Integer(i) => Value::Integer(i),
    SqlValue::Real(r) => Value::Real(r),
    SqlValue::Text(s) => Value::Text(s),
    SqlValue::Blob(b) => Value::Blob(b),
  }
}

// ─── Identifiers ─────────────────────────────────────────────────────────────

/// Validate `name` and wrap it in double quotes.
pub fn quote_ident(name: &str) -> Result<String> {
  Ok(format!("\"{}\"", check_identifier(name)?))
}

// ─── GROUP_CONCAT id lists ───────────────────────────────────────────────────

/// Decode `"3,1,2"` into `[1, 2, 3]`.
pub fn decode_id_list(s: &str) -> Result<Vec<RowId>> {
  let mut ids = s
    .split(',')
    .map(|part| {
      part
        .trim()
        .parse::<RowId>()
        .map_err(|e| Error::Decode(format!("row id {part:?}: {e}")))
    })
    .collect::<Result<Vec<_>>>()?;
  ids.sort_unstable();
  Ok(ids)
}

// ─── Engine errors ───────────────────────────────────────────────────────────

/// Turn an engine failure during `ALTER TABLE` into [`Error::SchemaConflict`]
/// when SQLite rejected the change itself.
pub fn schema_error(e: rusqlite::Error) -> Error {
  match &e {
    rusqlite::Error::SqliteFailure(_, Some(msg))
      if msg.starts_with("duplicate column name")
        || msg.starts_with("cannot drop")
        || msg.starts_with("no such column") =>
    {
      Error::SchemaConflict(msg.clone())
    }
    _ => Error::Database(e),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn id_list_sorted() {
    assert_eq!(decode_id_list("3,1,2").unwrap(), vec![1, 2, 3]);
    assert_eq!(decode_id_list("42").unwrap(), vec![42]);
  }

  #[test]
  fn id_list_garbage() {
    assert!(matches!(decode_id_list("1,x"), Err(Error::Decode(_))));
  }

  #[test]
  fn quoting_rejects_injection() {
    assert_eq!(quote_ident("summary").unwrap(), "\"summary\"");
    assert!(quote_ident("x\" OR 1=1 --").is_err());
  }

  #[test]
  fn values_roundtrip_storage_classes() {
    for v in [
      Value::Null,
      Value::Integer(-3),
      Value::Real(1.5),
      Value::from("text"),
      Value::Blob(vec![0, 1]),
    ] {
      assert_eq!(decode_value(encode_value(&v)), v);
    }
  }
}
