//! Value coercion between in-memory values and SQLite storage classes
//!
//! Coercion rules:
//! - null → storage NULL
//! - boolean → INTEGER 0/1
//! - timestamp → ISO-8601 (RFC 3339) TEXT
//! - blob → BLOB unchanged
//! - structured JSON → serialized TEXT
//! - everything else passes through to its matching storage class
//!
//! The input side is a closed variant set so the mapping is total and
//! exhaustively testable.

use chrono::{DateTime, Utc};
use rusqlite::types::{ToSqlOutput, Value as SqliteValue};
use rusqlite::ToSql;
use serde_json::Value as Json;

/// An in-memory value accepted by the coercer
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent or explicit null
    Null,
    /// Boolean, stored as 0/1
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Real(f64),
    /// UTF-8 text
    Text(String),
    /// Raw bytes, passed through unchanged
    Blob(Vec<u8>),
    /// Point in time, stored as RFC 3339 text
    Timestamp(DateTime<Utc>),
    /// Structured value, stored as serialized JSON text
    Json(Json),
}

/// A value in one of SQLite's storage classes
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Coerces this value into its storage representation.
    ///
    /// Total over the variant set; never fails.
    pub fn coerce(&self) -> SqlValue {
        match self {
            Value::Null => SqlValue::Null,
            Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
            Value::Int(i) => SqlValue::Integer(*i),
            Value::Real(f) => SqlValue::Real(*f),
            Value::Text(s) => SqlValue::Text(s.clone()),
            Value::Blob(b) => SqlValue::Blob(b.clone()),
            Value::Timestamp(t) => SqlValue::Text(t.to_rfc3339()),
            Value::Json(j) => SqlValue::Text(j.to_string()),
        }
    }

    /// Classifies a JSON value into the closed variant set.
    ///
    /// Arrays and objects land in `Json`; numbers split into `Int`/`Real`.
    pub fn from_json(json: &Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Real(n.as_f64().unwrap_or(0.0))
                }
            }
            Json::String(s) => Value::Text(s.clone()),
            Json::Array(_) | Json::Object(_) => Value::Json(json.clone()),
        }
    }
}

impl SqlValue {
    /// Renders this value as a SQL literal, for `DEFAULT` clauses only.
    ///
    /// Runtime values always travel as bound parameters, never as literals.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(i) => i.to_string(),
            SqlValue::Real(f) => f.to_string(),
            SqlValue::Text(s) => format!("'{}'", s.replace('\'', "''")),
            SqlValue::Blob(b) => {
                let hex: String = b.iter().map(|byte| format!("{:02X}", byte)).collect();
                format!("X'{}'", hex)
            }
        }
    }
}

impl ToSql for SqlValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let v = match self {
            SqlValue::Null => SqliteValue::Null,
            SqlValue::Integer(i) => SqliteValue::Integer(*i),
            SqlValue::Real(f) => SqliteValue::Real(*f),
            SqlValue::Text(s) => SqliteValue::Text(s.clone()),
            SqlValue::Blob(b) => SqliteValue::Blob(b.clone()),
        };
        Ok(ToSqlOutput::Owned(v))
    }
}

impl From<SqliteValue> for SqlValue {
    fn from(v: SqliteValue) -> Self {
        match v {
            SqliteValue::Null => SqlValue::Null,
            SqliteValue::Integer(i) => SqlValue::Integer(i),
            SqliteValue::Real(f) => SqlValue::Real(f),
            SqliteValue::Text(s) => SqlValue::Text(s),
            SqliteValue::Blob(b) => SqlValue::Blob(b),
        }
    }
}
