//! Model definition subsystem
//!
//! Declarative model definitions and their one-shot resolution into
//! fully-populated records consumed by the schema compiler and query builder.

mod resolved;
mod types;

pub use resolved::{resolve_table_name, ResolvedModel};
pub use types::{
    ColumnDefinition, ConstraintDefinition, Hook, Hooks, IndexDefinition, LogicalType,
    ModelDefinition, RelationshipDefinition, RelationshipKind, TriggerDefinition,
};
