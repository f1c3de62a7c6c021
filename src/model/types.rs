//! Model definition types
//!
//! A model definition is the declarative description of one table's shape,
//! behavior, and lifecycle hooks, supplied as a plain structured literal at
//! registration time. Definitions are immutable once handed to the compiler;
//! all option resolution happens exactly once, in [`super::resolved`].

use serde::{Deserialize, Serialize};
use serde_json::Value as Json;
use std::fmt;
use std::sync::Arc;

/// Logical column types, resolved to storage classes by the type mapper.
///
/// Deserialization routes through the type mapper's fixed name table, so an
/// unknown type name in a definition surfaces the same lookup failure as a
/// direct [`crate::schema::typemap::parse_logical_type`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalType {
    /// UTF-8 string
    String,
    /// UTF-8 string (alias of `String` at the storage level)
    Text,
    /// 64-bit signed integer
    Integer,
    /// Boolean, stored as integer 0/1
    Boolean,
    /// 64-bit floating point
    Float,
    /// Raw bytes
    Blob,
    /// Arbitrary-precision numeric
    Numeric,
    /// Arbitrary-precision numeric (alias of `Numeric`)
    Decimal,
    /// Calendar date, stored as text
    Date,
    /// Point in time, stored as text
    DateTime,
    /// Structured value, stored as serialized text
    Json,
}

impl<'de> Deserialize<'de> for LogicalType {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        crate::schema::typemap::parse_logical_type(&name).map_err(serde::de::Error::custom)
    }
}

/// One column of a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Logical data type
    pub logical_type: LogicalType,
    /// Whether NULL is allowed (default true)
    #[serde(default = "default_true")]
    pub nullable: bool,
    /// Whether this column is the primary key
    #[serde(default)]
    pub primary_key: bool,
    /// Whether a UNIQUE constraint applies
    #[serde(default)]
    pub unique: bool,
    /// Default value, coerced to a SQL literal in the DDL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Json>,
}

impl ColumnDefinition {
    /// Create a nullable column of the given type
    pub fn new(logical_type: LogicalType) -> Self {
        Self {
            logical_type,
            nullable: true,
            primary_key: false,
            unique: false,
            default_value: None,
        }
    }

    /// Mark this column as the primary key
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Disallow NULL values
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Add a UNIQUE constraint
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Set the default value
    pub fn default_value(mut self, value: Json) -> Self {
        self.default_value = Some(value);
        self
    }
}

/// Supported association kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    HasOne,
    HasMany,
    BelongsTo,
    ManyToMany,
}

/// One association between two models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipDefinition {
    /// Association kind
    pub kind: RelationshipKind,
    /// Target model name
    pub target: String,
    /// Foreign-key column hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<String>,
    /// Join-table hint for many-to-many associations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub through: Option<String>,
}

/// A secondary index on a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexDefinition {
    /// Index name
    pub name: String,
    /// Indexed columns, in order
    pub columns: Vec<String>,
    /// Whether the index enforces uniqueness
    #[serde(default)]
    pub unique: bool,
    /// Emit `IF NOT EXISTS`
    #[serde(default)]
    pub if_not_exists: bool,
}

/// A table-level constraint, emitted inline in the CREATE TABLE body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDefinition {
    /// Optional constraint name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Raw constraint expression, e.g. `CHECK (age >= 0)`
    pub expression: String,
}

/// One trigger attached to a table.
///
/// Timing and event are accepted in any letter case and normalized to upper
/// case on emission. Entries missing a name, timing, event, or statements
/// list are treated as inactive declarations and skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerDefinition {
    /// Trigger name; empty skips the entry
    #[serde(default)]
    pub name: String,
    /// BEFORE, AFTER, or INSTEAD OF (case-insensitive)
    #[serde(default)]
    pub timing: String,
    /// INSERT, UPDATE, or DELETE (case-insensitive)
    #[serde(default)]
    pub event: String,
    /// Column list, valid only for UPDATE events
    #[serde(default)]
    pub columns: Vec<String>,
    /// Optional WHEN condition expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Statement bodies; `None` skips the entry, `Some(vec![])` emits an
    /// empty BEGIN END block
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statements: Option<Vec<String>>,
    /// Emit `IF NOT EXISTS`
    #[serde(default)]
    pub if_not_exists: bool,
}

/// A lifecycle callback. Receives the affected data by mutable reference;
/// an `Err` aborts the remaining hooks and the surrounding operation.
pub type Hook = Arc<dyn Fn(&mut Json) -> std::result::Result<(), String> + Send + Sync>;

/// The six lifecycle callback slots of a model
#[derive(Clone, Default)]
pub struct Hooks {
    pub before_insert: Vec<Hook>,
    pub after_insert: Vec<Hook>,
    pub before_update: Vec<Hook>,
    pub after_update: Vec<Hook>,
    pub before_delete: Vec<Hook>,
    pub after_delete: Vec<Hook>,
}

impl Hooks {
    /// True when no slot holds any callback
    pub fn is_empty(&self) -> bool {
        self.before_insert.is_empty()
            && self.after_insert.is_empty()
            && self.before_update.is_empty()
            && self.after_update.is_empty()
            && self.before_delete.is_empty()
            && self.after_delete.is_empty()
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("before_insert", &self.before_insert.len())
            .field("after_insert", &self.after_insert.len())
            .field("before_update", &self.before_update.len())
            .field("after_update", &self.after_update.len())
            .field("before_delete", &self.before_delete.len())
            .field("after_delete", &self.after_delete.len())
            .finish()
    }
}

/// Complete declarative model definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Unique model name
    pub name: String,
    /// Explicit table name; when absent the name is derived from `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
    /// Append a pluralizing suffix to the table name
    #[serde(default)]
    pub pluralize_table_name: bool,
    /// Ordered column definitions
    #[serde(default)]
    pub columns: Vec<(String, ColumnDefinition)>,
    /// Associations to other models
    #[serde(default)]
    pub relationships: Vec<RelationshipDefinition>,
    /// Secondary indexes, in declaration order
    #[serde(default)]
    pub indexes: Vec<IndexDefinition>,
    /// Table-level constraints, in declaration order
    #[serde(default)]
    pub constraints: Vec<ConstraintDefinition>,
    /// Triggers, in declaration order
    #[serde(default)]
    pub triggers: Vec<TriggerDefinition>,
    /// Raw `CREATE VIEW` statements, emitted verbatim after triggers
    #[serde(default)]
    pub views: Vec<String>,
    /// Append `WITHOUT ROWID` to the table
    #[serde(default)]
    pub without_rowid: bool,
    /// Append `STRICT` to the table
    #[serde(default)]
    pub strict: bool,
    /// Add a deleted-at column
    #[serde(default)]
    pub soft_delete: bool,
    /// Add created-at/updated-at columns (default true)
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Append an underscore-derived naming convention marker
    #[serde(default)]
    pub underscored: bool,
    /// Override for the created-at column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at_column: Option<String>,
    /// Override for the updated-at column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at_column: Option<String>,
    /// Override for the deleted-at column name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at_column: Option<String>,
    /// When set, adds an integer version column of that name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_column: Option<String>,
    /// Lifecycle callbacks; not part of the serialized shape
    #[serde(skip)]
    pub hooks: Hooks,
}

impl ModelDefinition {
    /// Create an empty definition for the given model name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table_name: None,
            pluralize_table_name: false,
            columns: Vec::new(),
            relationships: Vec::new(),
            indexes: Vec::new(),
            constraints: Vec::new(),
            triggers: Vec::new(),
            views: Vec::new(),
            without_rowid: false,
            strict: false,
            soft_delete: false,
            timestamps: true,
            underscored: false,
            created_at_column: None,
            updated_at_column: None,
            deleted_at_column: None,
            version_column: None,
            hooks: Hooks::default(),
        }
    }

    /// Append a column
    pub fn column(mut self, name: impl Into<String>, def: ColumnDefinition) -> Self {
        self.columns.push((name.into(), def));
        self
    }

    /// Set an explicit table name
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
        self
    }

    /// Append a relationship
    pub fn relationship(mut self, rel: RelationshipDefinition) -> Self {
        self.relationships.push(rel);
        self
    }

    /// Append an index
    pub fn index(mut self, index: IndexDefinition) -> Self {
        self.indexes.push(index);
        self
    }

    /// Append a trigger
    pub fn trigger(mut self, trigger: TriggerDefinition) -> Self {
        self.triggers.push(trigger);
        self
    }

    /// Disable the automatic created-at/updated-at columns
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }
}

fn default_true() -> bool {
    true
}
