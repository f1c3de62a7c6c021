//! Schema Compilation Tests
//!
//! End-to-end properties of the schema compiler:
//! - table name resolution is deterministic and never re-applied
//! - trigger timing/event normalization and validation
//! - synthetic timestamp/soft-delete columns share the column clause path
//! - generated DDL executes against a real SQLite database

use modelite::{
    compile, ColumnDefinition, Database, IndexDefinition, LogicalType, ModelDefinition,
    TriggerDefinition,
};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

fn trigger(timing: &str, event: &str) -> TriggerDefinition {
    TriggerDefinition {
        name: "audit".to_string(),
        timing: timing.to_string(),
        event: event.to_string(),
        columns: Vec::new(),
        condition: None,
        statements: Some(vec!["INSERT INTO audit_log (note) VALUES ('hit')".to_string()]),
        if_not_exists: false,
    }
}

// =============================================================================
// Table Name Resolution
// =============================================================================

/// With no table name and no pluralize flag, the table is the model name.
#[test]
fn test_unset_table_name_uses_model_name() {
    let def = ModelDefinition::new("Account").without_timestamps();
    let compiled = compile(&def).unwrap();
    assert_eq!(compiled.model.table, "Account");
    assert!(compiled.ddl[0].contains("CREATE TABLE IF NOT EXISTS Account"));
}

/// pluralize_table_name appends the suffix to the model name.
#[test]
fn test_pluralize_appends_suffix_to_name() {
    let mut def = ModelDefinition::new("account").without_timestamps();
    def.pluralize_table_name = true;
    let compiled = compile(&def).unwrap();
    assert_eq!(compiled.model.table, "accounts");
}

/// pluralize_table_name uses an explicit table name as its base.
#[test]
fn test_pluralize_uses_explicit_base() {
    let mut def = ModelDefinition::new("Account").without_timestamps();
    def.table_name = Some("ledger".to_string());
    def.pluralize_table_name = true;
    let compiled = compile(&def).unwrap();
    assert_eq!(compiled.model.table, "ledgers");
}

/// Compiling twice never re-pluralizes.
#[test]
fn test_resolution_is_stable_across_compiles() {
    let mut def = ModelDefinition::new("account").without_timestamps();
    def.pluralize_table_name = true;
    let first = compile(&def).unwrap();
    let second = compile(&def).unwrap();
    assert_eq!(first.model.table, second.model.table);
}

// =============================================================================
// Trigger Generation
// =============================================================================

/// Timing and event are accepted in any case and emitted upper-cased.
#[test]
fn test_trigger_case_normalization() {
    let mut def = ModelDefinition::new("users").without_timestamps();
    def.triggers.push(trigger("bEfOrE", "iNsErT"));
    let compiled = compile(&def).unwrap();
    let sql = compiled.ddl.last().unwrap();
    assert!(sql.contains("BEFORE INSERT"));
}

/// An invalid timing must fail, never silently default.
#[test]
fn test_invalid_timing_fails_hard() {
    let mut def = ModelDefinition::new("users").without_timestamps();
    def.triggers.push(trigger("WHEN", "insert"));
    let err = compile(&def).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("WHEN"));
    assert!(!msg.contains("defaulted"));
}

/// An entry missing its statements list is skipped without error.
#[test]
fn test_trigger_missing_statements_skipped() {
    let mut def = ModelDefinition::new("users").without_timestamps();
    let mut t = trigger("before", "insert");
    t.statements = None;
    def.triggers.push(t);
    let compiled = compile(&def).unwrap();
    assert_eq!(compiled.ddl.len(), 1); // only the table
}

// =============================================================================
// Lifecycle Columns
// =============================================================================

/// Timestamps are on by default and produce ordinary column clauses.
#[test]
fn test_timestamp_columns_by_default() {
    let def = ModelDefinition::new("Session")
        .column("id", ColumnDefinition::new(LogicalType::Integer).primary_key());
    let compiled = compile(&def).unwrap();
    assert!(compiled.ddl[0].contains("createdAt TEXT"));
    assert!(compiled.ddl[0].contains("updatedAt TEXT"));
}

/// Soft delete adds a deleted-at column with the configured name.
#[test]
fn test_soft_delete_column_override() {
    let mut def = ModelDefinition::new("Session").without_timestamps();
    def.soft_delete = true;
    def.deleted_at_column = Some("removed_on".to_string());
    let compiled = compile(&def).unwrap();
    assert!(compiled.ddl[0].contains("removed_on TEXT"));
}

// =============================================================================
// Executable DDL
// =============================================================================

/// A full definition (table, index, trigger) executes against SQLite and the
/// trigger fires on insert.
#[test]
fn test_compiled_ddl_executes() {
    let mut db = Database::open_in_memory().unwrap();

    db.define(
        ModelDefinition::new("audit_log")
            .column("note", ColumnDefinition::new(LogicalType::String))
            .without_timestamps(),
    )
    .unwrap();

    let mut def = ModelDefinition::new("user")
        .column(
            "id",
            ColumnDefinition::new(LogicalType::Integer)
                .primary_key()
                .not_null(),
        )
        .column("email", ColumnDefinition::new(LogicalType::String))
        .index(IndexDefinition {
            name: "idx_user_email".to_string(),
            columns: vec!["email".to_string()],
            unique: true,
            if_not_exists: true,
        })
        .without_timestamps();
    def.pluralize_table_name = true;
    def.triggers.push(trigger("after", "insert"));
    db.define(def).unwrap();

    db.insert("user", json!({"id": 1, "email": "a@b.c"})).unwrap();

    let audit = db
        .find_all("audit_log", &modelite::FindAll::default())
        .unwrap();
    assert_eq!(audit.len(), 1);
}

/// STRICT and WITHOUT ROWID combine and still execute.
#[test]
fn test_table_options_execute() {
    let mut db = Database::open_in_memory().unwrap();
    let mut def = ModelDefinition::new("kv")
        .column(
            "k",
            ColumnDefinition::new(LogicalType::String)
                .primary_key()
                .not_null(),
        )
        .column("v", ColumnDefinition::new(LogicalType::Text))
        .without_timestamps();
    def.strict = true;
    def.without_rowid = true;
    db.define(def).unwrap();

    db.insert("kv", json!({"k": "a", "v": "1"})).unwrap();
    let rows = db.find_all("kv", &modelite::FindAll::default()).unwrap();
    assert_eq!(rows.len(), 1);
}
