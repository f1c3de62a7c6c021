//! modelite - a declarative model and query compilation layer for SQLite
//!
//! Given a model definition (columns, relationships, indexes, constraints,
//! triggers, lifecycle options), modelite compiles injection-safe DDL and
//! exposes typed CRUD operations whose DML is built from cached model
//! metadata and executed through a small driver seam over rusqlite.

pub mod db;
pub mod driver;
pub mod error;
pub mod hooks;
pub mod model;
pub mod observability;
pub mod query;
pub mod registry;
pub mod schema;
pub mod value;

pub use db::Database;
pub use driver::{Driver, Row, SqliteDriver};
pub use error::{Error, Result};
pub use model::{
    ColumnDefinition, ConstraintDefinition, Hook, Hooks, IndexDefinition, LogicalType,
    ModelDefinition, RelationshipDefinition, RelationshipKind, ResolvedModel, TriggerDefinition,
};
pub use query::{FindAll, SortOrder};
pub use registry::RelationshipRegistry;
pub use schema::{compile, CompiledSchema};
pub use value::{SqlValue, Value};
