//! Logical type to SQLite storage-class mapping
//!
//! A fixed lookup table; unknown logical type names are lookup failures,
//! never silently defaulted.

use crate::error::{Error, Result};
use crate::model::LogicalType;

/// Returns the storage-class keyword for a logical type.
pub fn storage_class(logical_type: LogicalType) -> &'static str {
    match logical_type {
        LogicalType::String | LogicalType::Text => "TEXT",
        LogicalType::Integer | LogicalType::Boolean => "INTEGER",
        LogicalType::Float => "REAL",
        LogicalType::Blob => "BLOB",
        LogicalType::Numeric | LogicalType::Decimal => "NUMERIC",
        LogicalType::Date | LogicalType::DateTime => "TEXT",
        LogicalType::Json => "TEXT",
    }
}

/// Parses a logical type from its name, case-insensitively.
///
/// # Errors
///
/// Returns `Error::Lookup` for names outside the fixed set.
pub fn parse_logical_type(name: &str) -> Result<LogicalType> {
    match name.to_ascii_lowercase().as_str() {
        "string" => Ok(LogicalType::String),
        "text" => Ok(LogicalType::Text),
        "integer" => Ok(LogicalType::Integer),
        "boolean" => Ok(LogicalType::Boolean),
        "float" => Ok(LogicalType::Float),
        "blob" => Ok(LogicalType::Blob),
        "numeric" => Ok(LogicalType::Numeric),
        "decimal" => Ok(LogicalType::Decimal),
        "date" => Ok(LogicalType::Date),
        "datetime" => Ok(LogicalType::DateTime),
        "json" => Ok(LogicalType::Json),
        other => Err(Error::lookup(format!("Unknown logical type '{}'", other))),
    }
}
