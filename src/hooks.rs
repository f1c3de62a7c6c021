//! Lifecycle hook runner
//!
//! Hooks execute as an explicit ordered task list: one coordinator runs each
//! hook to completion before starting the next, with no interleaving. The
//! first failure wraps the hook's message and aborts the remainder.
//!
//! Hooks receive the live data by mutable reference. This is deliberate:
//! before-hooks exist to normalize and default fields ahead of statement
//! execution, so their mutations must be visible to the statement.

use serde_json::Value as Json;

use crate::error::{Error, Result};
use crate::model::Hook;

/// Runs `hooks` in order against `data`.
///
/// An empty list is a no-op. A hook returning `Err` stops the sequence; the
/// remaining hooks are never invoked.
pub fn run(hooks: &[Hook], data: &mut Json) -> Result<()> {
    for hook in hooks {
        hook(data).map_err(Error::hook)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_empty_list_is_noop() {
        let mut data = json!({"a": 1});
        run(&[], &mut data).unwrap();
        assert_eq!(data, json!({"a": 1}));
    }

    #[test]
    fn test_hooks_run_in_order() {
        let mut data = json!({"trail": ""});
        let hooks: Vec<Hook> = vec![
            Arc::new(|d| {
                d["trail"] = json!(format!("{}1", d["trail"].as_str().unwrap()));
                Ok(())
            }),
            Arc::new(|d| {
                d["trail"] = json!(format!("{}2", d["trail"].as_str().unwrap()));
                Ok(())
            }),
        ];
        run(&hooks, &mut data).unwrap();
        assert_eq!(data["trail"], "12");
    }

    #[test]
    fn test_failure_aborts_remaining_hooks() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c1 = calls.clone();
        let c3 = calls.clone();
        let hooks: Vec<Hook> = vec![
            Arc::new(move |_| {
                c1.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
            Arc::new(|_| Err("boom".to_string())),
            Arc::new(move |_| {
                c3.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }),
        ];

        let mut data = json!({});
        let err = run(&hooks, &mut data).unwrap_err();
        assert!(matches!(err, Error::Hook(_)));
        assert!(err.to_string().contains("boom"));
        // Hook 1 ran, hook 3 never did.
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_hooks_mutate_live_data() {
        let hooks: Vec<Hook> = vec![Arc::new(|d| {
            d["status"] = json!("active");
            Ok(())
        })];
        let mut data = json!({"name": "A"});
        run(&hooks, &mut data).unwrap();
        assert_eq!(data["status"], "active");
    }
}
