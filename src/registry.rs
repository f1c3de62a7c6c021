//! Relationship registry
//!
//! Append-only multimap from model name to relationship declarations. Owned
//! by a [`crate::db::Database`] instance, never process-global, so multiple
//! database instances stay independent.
//!
//! Registration concatenates in order and never deduplicates; lookup of an
//! unknown model yields an empty slice, never an error. No removal exists.

use std::collections::HashMap;

use crate::model::RelationshipDefinition;

/// Accumulated relationship metadata, keyed by defining model name
#[derive(Debug, Default)]
pub struct RelationshipRegistry {
    entries: HashMap<String, Vec<RelationshipDefinition>>,
}

impl RelationshipRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends relationships under the given model name, preserving order
    /// across calls.
    pub fn register(&mut self, model: impl Into<String>, relationships: Vec<RelationshipDefinition>) {
        self.entries
            .entry(model.into())
            .or_default()
            .extend(relationships);
    }

    /// Returns every relationship ever registered under the model name, in
    /// registration order. Unknown names yield an empty slice.
    pub fn lookup(&self, model: &str) -> &[RelationshipDefinition] {
        self.entries.get(model).map(Vec::as_slice).unwrap_or(&[])
    }
}
