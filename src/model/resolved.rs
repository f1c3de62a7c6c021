//! One-shot resolution of model options
//!
//! Every derivable field of a definition (table name, primary key, synthetic
//! timestamp/soft-delete columns) is resolved exactly once, at registration
//! time, into a fully-populated record. Nothing is re-derived at query time.

use super::types::{ColumnDefinition, LogicalType, ModelDefinition};

/// A model definition with all options resolved to concrete values
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    /// Model name
    pub name: String,
    /// Concrete table name; never a template expression
    pub table: String,
    /// Primary-key column name
    pub primary_key: String,
    /// Effective column list: declared columns followed by synthetics
    pub columns: Vec<(String, ColumnDefinition)>,
}

impl ResolvedModel {
    /// Resolves a definition. Infallible: absent optional fields simply
    /// contribute nothing.
    pub fn resolve(def: &ModelDefinition) -> Self {
        let table = resolve_table_name(def);
        let mut columns = def.columns.clone();

        if def.timestamps {
            push_synthetic(
                &mut columns,
                column_name(&def.created_at_column, def.underscored, "createdAt", "created_at"),
                LogicalType::DateTime,
            );
            push_synthetic(
                &mut columns,
                column_name(&def.updated_at_column, def.underscored, "updatedAt", "updated_at"),
                LogicalType::DateTime,
            );
        }
        if def.soft_delete {
            push_synthetic(
                &mut columns,
                column_name(&def.deleted_at_column, def.underscored, "deletedAt", "deleted_at"),
                LogicalType::DateTime,
            );
        }
        if let Some(version) = &def.version_column {
            push_synthetic(&mut columns, version.clone(), LogicalType::Integer);
        }

        let primary_key = columns
            .iter()
            .find(|(_, col)| col.primary_key)
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| "id".to_string());

        Self {
            name: def.name.clone(),
            table,
            primary_key,
            columns,
        }
    }

    /// Column names in effective order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|(name, _)| name.as_str()).collect()
    }
}

/// Resolves the concrete table name.
///
/// An explicit table name or the pluralize flag appends the pluralizing
/// suffix to the given/derived base; otherwise the model name is used
/// unchanged. Evaluated once; callers must not re-apply it.
pub fn resolve_table_name(def: &ModelDefinition) -> String {
    if def.table_name.is_some() || def.pluralize_table_name {
        let base = def.table_name.as_deref().unwrap_or(&def.name);
        format!("{}s", base)
    } else {
        def.name.clone()
    }
}

fn column_name(
    override_name: &Option<String>,
    underscored: bool,
    camel: &str,
    snake: &str,
) -> String {
    match override_name {
        Some(name) => name.clone(),
        None if underscored => snake.to_string(),
        None => camel.to_string(),
    }
}

fn push_synthetic(columns: &mut Vec<(String, ColumnDefinition)>, name: String, ty: LogicalType) {
    // A user-declared column of the same name wins.
    if columns.iter().any(|(existing, _)| *existing == name) {
        return;
    }
    columns.push((name, ColumnDefinition::new(ty)));
}
