//! Database facade
//!
//! Owns the driver, the relationship registry, and the cache of resolved
//! models. Model registration compiles and executes DDL once; every CRUD
//! call afterwards reads the cached metadata, builds parameterized DML, and
//! wraps the statement with the model's lifecycle hooks.

use std::collections::HashMap;
use std::path::Path;

use serde_json::{Map, Value as Json};

use crate::driver::{Driver, Row, SqliteDriver};
use crate::error::{Error, Result};
use crate::hooks;
use crate::model::{Hooks, ModelDefinition, RelationshipDefinition, ResolvedModel};
use crate::observability::Logger;
use crate::query::builder;
use crate::query::FindAll;
use crate::registry::RelationshipRegistry;
use crate::schema;
use crate::value::{SqlValue, Value};

struct RegisteredModel {
    resolved: ResolvedModel,
    hooks: Hooks,
}

/// A database instance: driver, registry, and registered models
pub struct Database {
    driver: Box<dyn Driver>,
    registry: RelationshipRegistry,
    models: HashMap<String, RegisteredModel>,
}

impl Database {
    /// Opens a database file, creating it if absent.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::with_driver(Box::new(SqliteDriver::open(path)?)))
    }

    /// Opens an in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::with_driver(Box::new(SqliteDriver::open_in_memory()?)))
    }

    /// Wraps an existing driver.
    pub fn with_driver(driver: Box<dyn Driver>) -> Self {
        Self {
            driver,
            registry: RelationshipRegistry::new(),
            models: HashMap::new(),
        }
    }

    /// Registers a model: compiles its DDL, executes it, records its
    /// relationships, and caches the resolved metadata.
    ///
    /// Relationship registration happens after table creation as an
    /// independent step; it is never rolled back by later failures.
    pub fn define(&mut self, def: ModelDefinition) -> Result<()> {
        let compiled = schema::compile(&def)?;

        for statement in &compiled.ddl {
            self.driver.execute(statement)?;
            Logger::info("DDL_EXECUTED", &[("table", compiled.model.table.as_str())]);
        }

        if !def.relationships.is_empty() {
            self.registry
                .register(def.name.clone(), def.relationships.clone());
        }

        Logger::info(
            "MODEL_REGISTERED",
            &[
                ("model", def.name.as_str()),
                ("table", compiled.model.table.as_str()),
            ],
        );
        self.models.insert(
            def.name.clone(),
            RegisteredModel {
                resolved: compiled.model,
                hooks: def.hooks,
            },
        );
        Ok(())
    }

    /// Relationships registered under the model name, in registration order.
    pub fn relationships(&self, model: &str) -> &[RelationshipDefinition] {
        self.registry.lookup(model)
    }

    /// Resolved metadata for a registered model.
    pub fn model(&self, name: &str) -> Result<&ResolvedModel> {
        Ok(&self.registered(name)?.resolved)
    }

    /// Returns all rows matching the request.
    pub fn find_all(&self, model: &str, request: &FindAll) -> Result<Vec<Row>> {
        let registered = self.registered(model)?;
        let (sql, params) = builder::find_all(&registered.resolved, request);
        self.driver.all(&sql, &params)
    }

    /// Returns the row with the given primary-key value, if any.
    pub fn find_by_primary_key(&self, model: &str, key: &Json) -> Result<Option<Row>> {
        let registered = self.registered(model)?;
        let (sql, params) = builder::find_by_primary_key(&registered.resolved, key);
        self.driver.get(&sql, &params)
    }

    /// Inserts one row. Before-hooks run on the live data ahead of the
    /// statement and may mutate it; after-hooks run once the row is stored.
    pub fn insert(&self, model: &str, mut data: Json) -> Result<usize> {
        let registered = self.registered(model)?;
        self.run_hooks(&registered.hooks.before_insert, &mut data)?;
        let (sql, params) = builder::insert(&registered.resolved, as_object(&data)?)?;
        let changed = self.driver.run(&sql, &params)?;
        self.run_hooks(&registered.hooks.after_insert, &mut data)?;
        Ok(changed)
    }

    /// Updates matching rows. An empty filter set is rejected; see
    /// [`builder::update`].
    pub fn update(&self, model: &str, mut values: Json, filters: &Json) -> Result<usize> {
        let registered = self.registered(model)?;
        self.run_hooks(&registered.hooks.before_update, &mut values)?;
        let (sql, params) = builder::update(
            &registered.resolved,
            as_object(&values)?,
            as_object(filters)?,
        )?;
        let changed = self.driver.run(&sql, &params)?;
        self.run_hooks(&registered.hooks.after_update, &mut values)?;
        Ok(changed)
    }

    /// Deletes matching rows. An empty filter set is rejected.
    pub fn delete(&self, model: &str, mut filters: Json) -> Result<usize> {
        let registered = self.registered(model)?;
        self.run_hooks(&registered.hooks.before_delete, &mut filters)?;
        let (sql, params) = builder::delete(&registered.resolved, as_object(&filters)?)?;
        let changed = self.driver.run(&sql, &params)?;
        self.run_hooks(&registered.hooks.after_delete, &mut filters)?;
        Ok(changed)
    }

    /// Deletes every row of the model's table.
    pub fn truncate(&self, model: &str) -> Result<usize> {
        let registered = self.registered(model)?;
        let (sql, params) = builder::truncate(&registered.resolved);
        self.driver.run(&sql, &params)
    }

    /// Runs raw SQL with bound parameters against the driver.
    pub fn raw(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>> {
        let coerced: Vec<SqlValue> = params.iter().map(Value::coerce).collect();
        self.driver.all(sql, &coerced)
    }

    fn registered(&self, name: &str) -> Result<&RegisteredModel> {
        self.models
            .get(name)
            .ok_or_else(|| Error::UnknownModel(name.to_string()))
    }

    fn run_hooks(&self, slot: &[crate::model::Hook], data: &mut Json) -> Result<()> {
        hooks::run(slot, data).map_err(|err| {
            let message = err.to_string();
            Logger::error("HOOK_FAILED", &[("error", message.as_str())]);
            err
        })
    }
}

fn as_object(value: &Json) -> Result<&Map<String, Json>> {
    value
        .as_object()
        .ok_or_else(|| Error::validation("expected a JSON object"))
}
