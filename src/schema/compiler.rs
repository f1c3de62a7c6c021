//! Schema compiler
//!
//! Compiles a model definition into ordered DDL: table, then indexes, then
//! triggers, then views. Constraints are inlined in the CREATE TABLE body
//! (SQLite has no separate constraint DDL).
//!
//! The compiler neither mutates nor persists the definition; its only output
//! is SQL text plus the resolved model metadata cached by the caller.

use crate::error::Result;
use crate::model::{ColumnDefinition, IndexDefinition, ModelDefinition, ResolvedModel};
use crate::value::Value;

use super::trigger;
use super::typemap;

/// Output of schema compilation: resolved metadata plus ordered DDL
#[derive(Debug, Clone)]
pub struct CompiledSchema {
    /// Resolved model metadata, cached for query building
    pub model: ResolvedModel,
    /// DDL statements in execution order
    pub ddl: Vec<String>,
}

/// Compiles a full model definition.
///
/// # Errors
///
/// Returns `Error::Validation` for invalid trigger timing/event values.
/// Absent optional fields produce no SQL fragment and no error.
pub fn compile(def: &ModelDefinition) -> Result<CompiledSchema> {
    let model = ResolvedModel::resolve(def);
    let mut ddl = Vec::new();

    ddl.push(build_create_table(def, &model));
    for index in &def.indexes {
        ddl.push(build_create_index(index, &model.table));
    }
    ddl.extend(trigger::generate(def, &model.table)?);
    ddl.extend(def.views.iter().cloned());

    Ok(CompiledSchema { model, ddl })
}

fn build_create_table(def: &ModelDefinition, model: &ResolvedModel) -> String {
    let mut body: Vec<String> = model
        .columns
        .iter()
        .map(|(name, col)| column_clause(name, col))
        .collect();

    for constraint in &def.constraints {
        match &constraint.name {
            Some(name) => body.push(format!("CONSTRAINT {} {}", name, constraint.expression)),
            None => body.push(constraint.expression.clone()),
        }
    }

    let mut sql = format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        model.table,
        body.join(", ")
    );

    let mut options = Vec::new();
    if def.without_rowid {
        options.push("WITHOUT ROWID");
    }
    if def.strict {
        options.push("STRICT");
    }
    if !options.is_empty() {
        sql.push(' ');
        sql.push_str(&options.join(", "));
    }
    sql
}

/// Builds one column clause. Modifiers follow a stable order: nullability,
/// primary key, uniqueness, default.
fn column_clause(name: &str, col: &ColumnDefinition) -> String {
    let mut clause = format!("{} {}", name, typemap::storage_class(col.logical_type));
    if !col.nullable {
        clause.push_str(" NOT NULL");
    }
    if col.primary_key {
        clause.push_str(" PRIMARY KEY");
    }
    if col.unique {
        clause.push_str(" UNIQUE");
    }
    if let Some(default) = &col.default_value {
        clause.push_str(" DEFAULT ");
        clause.push_str(&Value::from_json(default).coerce().to_literal());
    }
    clause
}

fn build_create_index(index: &IndexDefinition, table: &str) -> String {
    let mut sql = String::from("CREATE ");
    if index.unique {
        sql.push_str("UNIQUE ");
    }
    sql.push_str("INDEX ");
    if index.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&index.name);
    sql.push_str(" ON ");
    sql.push_str(table);
    sql.push_str(" (");
    sql.push_str(&index.columns.join(", "));
    sql.push(')');
    sql
}
