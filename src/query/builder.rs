//! CRUD statement builders
//!
//! Each builder is a pure compiler from a typed request plus resolved model
//! metadata into a `(sql, params)` pair. Values travel exclusively as bound
//! parameters; identifiers come only from validated model metadata.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as Json};

use crate::error::{Error, Result};
use crate::model::ResolvedModel;
use crate::value::{SqlValue, Value};

/// Sort direction for `ORDER BY` terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Returns the SQL keyword
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// A find-all request: equality filters, ordering, and paging
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindAll {
    /// Equality-only filters, one placeholder per key
    #[serde(default, rename = "where")]
    pub filters: Map<String, Json>,
    /// Order terms, preserved as given
    #[serde(default)]
    pub order: Vec<(String, SortOrder)>,
    /// Row cap; zero or absent emits no LIMIT
    #[serde(default)]
    pub limit: Option<u64>,
    /// Row skip; zero or absent emits no OFFSET
    #[serde(default)]
    pub offset: Option<u64>,
}

/// Builds `SELECT * FROM <table> [WHERE …] [ORDER BY …] [LIMIT n] [OFFSET n]`.
pub fn find_all(model: &ResolvedModel, request: &FindAll) -> (String, Vec<SqlValue>) {
    let mut sql = format!("SELECT * FROM {}", model.table);
    let mut params = Vec::new();

    if !request.filters.is_empty() {
        let (clause, values) = where_clause(&request.filters);
        sql.push_str(" WHERE ");
        sql.push_str(&clause);
        params.extend(values);
    }
    if !request.order.is_empty() {
        let terms: Vec<String> = request
            .order
            .iter()
            .map(|(column, dir)| format!("{} {}", column, dir.as_str()))
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&terms.join(", "));
    }
    let limit = request.limit.filter(|n| *n > 0);
    let offset = request.offset.filter(|n| *n > 0);
    if let Some(limit) = limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    } else if offset.is_some() {
        // SQLite rejects OFFSET without LIMIT; -1 means unbounded.
        sql.push_str(" LIMIT -1");
    }
    if let Some(offset) = offset {
        sql.push_str(&format!(" OFFSET {}", offset));
    }

    (sql, params)
}

/// Builds `SELECT * FROM <table> WHERE <pk> = ? LIMIT 1`.
///
/// The primary-key column was resolved once at registration; this builder
/// never re-derives it.
pub fn find_by_primary_key(model: &ResolvedModel, key: &Json) -> (String, Vec<SqlValue>) {
    let sql = format!(
        "SELECT * FROM {} WHERE {} = ? LIMIT 1",
        model.table, model.primary_key
    );
    (sql, vec![Value::from_json(key).coerce()])
}

/// Builds `INSERT INTO <table> (c, …) VALUES (?, …)` in given column order.
///
/// # Errors
///
/// Returns `Error::Validation` for an empty value set.
pub fn insert(model: &ResolvedModel, values: &Map<String, Json>) -> Result<(String, Vec<SqlValue>)> {
    if values.is_empty() {
        return Err(Error::validation("insert requires at least one value"));
    }
    let columns: Vec<&str> = values.keys().map(String::as_str).collect();
    let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        model.table,
        columns.join(", "),
        placeholders.join(", ")
    );
    let params = values.values().map(|v| Value::from_json(v).coerce()).collect();
    Ok((sql, params))
}

/// Builds `UPDATE <table> SET c = ?, … WHERE c = ? AND …`.
///
/// Parameter order is all SET values, then all WHERE values. An empty
/// where-set is rejected outright; an unconditional update is never compiled.
pub fn update(
    model: &ResolvedModel,
    values: &Map<String, Json>,
    filters: &Map<String, Json>,
) -> Result<(String, Vec<SqlValue>)> {
    if values.is_empty() {
        return Err(Error::validation("update requires at least one value"));
    }
    if filters.is_empty() {
        return Err(Error::validation(
            "update requires a non-empty where clause; use truncate for unconditional deletes",
        ));
    }

    let assignments: Vec<String> = values.keys().map(|c| format!("{} = ?", c)).collect();
    let (clause, where_values) = where_clause(filters);
    let sql = format!(
        "UPDATE {} SET {} WHERE {}",
        model.table,
        assignments.join(", "),
        clause
    );

    let mut params: Vec<SqlValue> = values.values().map(|v| Value::from_json(v).coerce()).collect();
    params.extend(where_values);
    Ok((sql, params))
}

/// Builds `DELETE FROM <table> WHERE c = ? AND …`.
///
/// Same where discipline as [`update`]: an empty filter set is an error.
pub fn delete(model: &ResolvedModel, filters: &Map<String, Json>) -> Result<(String, Vec<SqlValue>)> {
    if filters.is_empty() {
        return Err(Error::validation(
            "delete requires a non-empty where clause; use truncate to clear a table",
        ));
    }
    let (clause, params) = where_clause(filters);
    let sql = format!("DELETE FROM {} WHERE {}", model.table, clause);
    Ok((sql, params))
}

/// Builds the unconditional `DELETE FROM <table>`.
pub fn truncate(model: &ResolvedModel) -> (String, Vec<SqlValue>) {
    (format!("DELETE FROM {}", model.table), Vec::new())
}

/// Equality-only where clause: `c = ? AND …` in mapping iteration order.
fn where_clause(filters: &Map<String, Json>) -> (String, Vec<SqlValue>) {
    let terms: Vec<String> = filters.keys().map(|c| format!("{} = ?", c)).collect();
    let values = filters.values().map(|v| Value::from_json(v).coerce()).collect();
    (terms.join(" AND "), values)
}
