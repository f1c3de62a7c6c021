//! Driver collaborator
//!
//! The compilation layer never talks to SQLite directly; it emits SQL plus a
//! positional parameter list through this trait. Three execution shapes:
//! nothing back, one row back, all rows back, plus a DDL batch entry point.

use rusqlite::Connection;
use std::path::Path;

use crate::error::Result;
use crate::value::SqlValue;

/// One result row, as (column name, storage value) pairs in select order
pub type Row = Vec<(String, SqlValue)>;

/// Prepare-and-execute semantics over the embedded engine
pub trait Driver {
    /// Executes DDL or other statements with no interesting result.
    fn execute(&self, sql: &str) -> Result<()>;

    /// Runs a statement and returns the number of rows changed.
    fn run(&self, sql: &str, params: &[SqlValue]) -> Result<usize>;

    /// Runs a statement and returns the first row, if any.
    fn get(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>>;

    /// Runs a statement and returns every row.
    fn all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>>;
}

/// Driver backed by a rusqlite connection
pub struct SqliteDriver {
    conn: Connection,
}

impl SqliteDriver {
    /// Opens a database file, creating it if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            conn: Connection::open(path)?,
        })
    }

    /// Opens an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    fn query(&self, sql: &str, params: &[SqlValue], first_only: bool) -> Result<Vec<Row>> {
        let mut stmt = self.conn.prepare(sql)?;
        let names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.query(rusqlite::params_from_iter(params.iter()))?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = Row::with_capacity(names.len());
            for (i, name) in names.iter().enumerate() {
                let value: rusqlite::types::Value = row.get(i)?;
                record.push((name.clone(), SqlValue::from(value)));
            }
            out.push(record);
            if first_only {
                break;
            }
        }
        Ok(out)
    }
}

impl Driver for SqliteDriver {
    fn execute(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    fn run(&self, sql: &str, params: &[SqlValue]) -> Result<usize> {
        let mut stmt = self.conn.prepare(sql)?;
        let changed = stmt.execute(rusqlite::params_from_iter(params.iter()))?;
        Ok(changed)
    }

    fn get(&self, sql: &str, params: &[SqlValue]) -> Result<Option<Row>> {
        Ok(self.query(sql, params, true)?.into_iter().next())
    }

    fn all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>> {
        self.query(sql, params, false)
    }
}
