//! Schema compilation subsystem
//!
//! Translates a model definition into SQLite DDL:
//! - logical types map to storage classes through a fixed table
//! - triggers compile with timing/event validation
//! - full definitions compile into ordered DDL (table, indexes, triggers)

mod compiler;
pub mod trigger;
pub mod typemap;

pub use compiler::{compile, CompiledSchema};
