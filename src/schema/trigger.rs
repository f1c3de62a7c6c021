//! CREATE TRIGGER statement generation
//!
//! Statement shape:
//! `CREATE TRIGGER [IF NOT EXISTS] <name> <TIMING> <EVENT> ON <table>
//!  [OF <columns>] [WHEN <condition>] BEGIN <statements> END`
//!
//! Entries missing a name, timing, event, or statements list are inactive
//! declarations and are skipped without error. An unrecognized timing or
//! event aborts generation for the whole definition.

use crate::error::{Error, Result};
use crate::model::{ModelDefinition, TriggerDefinition};

const TIMINGS: [&str; 3] = ["BEFORE", "AFTER", "INSTEAD OF"];
const EVENTS: [&str; 3] = ["INSERT", "UPDATE", "DELETE"];

/// Generates one `CREATE TRIGGER` statement per active trigger entry.
pub fn generate(def: &ModelDefinition, table: &str) -> Result<Vec<String>> {
    let mut statements = Vec::new();
    for trigger in &def.triggers {
        if let Some(sql) = build_trigger(trigger, table)? {
            statements.push(sql);
        }
    }
    Ok(statements)
}

fn build_trigger(trigger: &TriggerDefinition, table: &str) -> Result<Option<String>> {
    let bodies = match &trigger.statements {
        Some(bodies) => bodies,
        None => return Ok(None),
    };
    if trigger.name.is_empty() || trigger.timing.is_empty() || trigger.event.is_empty() {
        return Ok(None);
    }

    let timing = normalize(&trigger.timing, &TIMINGS, "timing")?;
    let event = normalize(&trigger.event, &EVENTS, "event")?;

    let mut sql = String::from("CREATE TRIGGER ");
    if trigger.if_not_exists {
        sql.push_str("IF NOT EXISTS ");
    }
    sql.push_str(&trigger.name);
    sql.push(' ');
    sql.push_str(&timing);
    sql.push(' ');
    sql.push_str(&event);
    sql.push_str(" ON ");
    sql.push_str(table);

    if event == "UPDATE" && !trigger.columns.is_empty() {
        sql.push_str(" OF ");
        sql.push_str(&trigger.columns.join(", "));
    }
    if let Some(condition) = &trigger.condition {
        sql.push_str(" WHEN ");
        sql.push_str(condition);
    }

    let body = bodies
        .iter()
        .map(|stmt| terminate(stmt))
        .collect::<Vec<_>>()
        .join(" ");
    if body.is_empty() {
        sql.push_str(" BEGIN END");
    } else {
        sql.push_str(" BEGIN ");
        sql.push_str(&body);
        sql.push_str(" END");
    }

    Ok(Some(sql))
}

/// Upper-cases a timing/event value and checks it against the allowed set.
fn normalize(value: &str, allowed: &[&str], field: &str) -> Result<String> {
    let upper = value.trim().to_ascii_uppercase();
    if allowed.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(Error::validation(format!(
            "Invalid trigger {} '{}', expected one of: {}",
            field,
            value,
            allowed.join(", ")
        )))
    }
}

/// Trims a statement body and guarantees a single trailing terminator.
fn terminate(stmt: &str) -> String {
    let trimmed = stmt.trim().trim_end_matches(';').trim_end();
    format!("{};", trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelDefinition;

    fn trigger(name: &str, timing: &str, event: &str, statements: Option<Vec<&str>>) -> TriggerDefinition {
        TriggerDefinition {
            name: name.to_string(),
            timing: timing.to_string(),
            event: event.to_string(),
            columns: Vec::new(),
            condition: None,
            statements: statements.map(|s| s.into_iter().map(String::from).collect()),
            if_not_exists: false,
        }
    }

    fn def_with(t: TriggerDefinition) -> ModelDefinition {
        let mut def = ModelDefinition::new("User");
        def.triggers.push(t);
        def
    }

    #[test]
    fn test_basic_trigger() {
        let def = def_with(trigger(
            "audit",
            "after",
            "insert",
            Some(vec!["INSERT INTO log VALUES (NEW.id)"]),
        ));
        let out = generate(&def, "users").unwrap();
        assert_eq!(
            out,
            vec!["CREATE TRIGGER audit AFTER INSERT ON users BEGIN INSERT INTO log VALUES (NEW.id); END"]
        );
    }

    #[test]
    fn test_timing_and_event_upper_cased() {
        let def = def_with(trigger("t", "Before", "Update", Some(vec!["SELECT 1"])));
        let out = generate(&def, "users").unwrap();
        assert!(out[0].contains("BEFORE UPDATE"));
    }

    #[test]
    fn test_invalid_timing_is_hard_failure() {
        let def = def_with(trigger("t", "WHEN", "insert", Some(vec!["SELECT 1"])));
        let err = generate(&def, "users").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let msg = err.to_string();
        assert!(msg.contains("WHEN"));
        assert!(msg.contains("BEFORE, AFTER, INSTEAD OF"));
    }

    #[test]
    fn test_invalid_event_aborts_whole_definition() {
        let mut def = def_with(trigger("ok", "before", "insert", Some(vec!["SELECT 1"])));
        def.triggers.push(trigger("bad", "after", "UPSERT", Some(vec!["SELECT 1"])));
        assert!(generate(&def, "users").is_err());
    }

    #[test]
    fn test_missing_statements_skips_entry() {
        let def = def_with(trigger("t", "before", "insert", None));
        assert!(generate(&def, "users").unwrap().is_empty());
    }

    #[test]
    fn test_missing_name_skips_entry() {
        let def = def_with(trigger("", "before", "insert", Some(vec!["SELECT 1"])));
        assert!(generate(&def, "users").unwrap().is_empty());
    }

    #[test]
    fn test_empty_statement_list_emits_empty_block() {
        let def = def_with(trigger("t", "before", "insert", Some(vec![])));
        let out = generate(&def, "users").unwrap();
        assert!(out[0].ends_with("BEGIN END"));
    }

    #[test]
    fn test_of_columns_only_for_update() {
        let mut t = trigger("t", "before", "update", Some(vec!["SELECT 1"]));
        t.columns = vec!["name".to_string(), "email".to_string()];
        let out = generate(&def_with(t), "users").unwrap();
        assert!(out[0].contains("ON users OF name, email"));

        let mut t = trigger("t", "before", "insert", Some(vec!["SELECT 1"]));
        t.columns = vec!["name".to_string()];
        let out = generate(&def_with(t), "users").unwrap();
        assert!(!out[0].contains(" OF "));
    }

    #[test]
    fn test_condition_and_if_not_exists() {
        let mut t = trigger("t", "before", "delete", Some(vec!["SELECT 1"]));
        t.condition = Some("OLD.locked = 1".to_string());
        t.if_not_exists = true;
        let out = generate(&def_with(t), "users").unwrap();
        assert_eq!(
            out[0],
            "CREATE TRIGGER IF NOT EXISTS t BEFORE DELETE ON users WHEN OLD.locked = 1 BEGIN SELECT 1; END"
        );
    }

    #[test]
    fn test_bodies_trimmed_and_single_terminator() {
        let def = def_with(trigger("t", "before", "insert", Some(vec!["  SELECT 1;; ", "SELECT 2"])));
        let out = generate(&def, "users").unwrap();
        assert!(out[0].contains("BEGIN SELECT 1; SELECT 2; END"));
    }
}
