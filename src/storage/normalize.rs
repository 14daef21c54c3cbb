//! Schema normalization for persisted and imported documents
//!
//! The app has shipped several incompatible persisted shapes over its life:
//!
//! 1. bare array of strings: `["wash dishes"]`
//! 2. array of task objects: `[{"id":..,"text":..,"completed":..}]`
//! 3. array of task objects with `priority`
//! 4. multi-list object: `{"lists":[{"id","name","createdAt","tasks":[..]}]}`
//!
//! No version number was ever persisted, so shape sniffing is the only sound
//! recovery strategy. [`normalize`] is the single trust boundary between
//! untrusted bytes and the canonical model: it accepts any `serde_json::Value`
//! and always returns a structurally valid [`Collection`] without panicking.
//! Anything unrecognizable degrades to an empty collection.

use std::collections::HashSet;

use chrono::Utc;
use serde_json::Value;

use crate::domain::{Collection, ListId, Priority, Task, TaskId, TodoList};

/// Fallback name for lists persisted without a usable one
const UNTITLED_LIST_NAME: &str = "Untitled list";

/// Converts an arbitrary decoded value into the canonical collection.
///
/// Total over all inputs. Field repair policy:
/// - missing/foreign ids are regenerated; duplicate ids within the document
///   are replaced (first occurrence keeps its id), never merged;
/// - `done` accepts the legacy `completed` key and JS truthiness;
/// - non-finite or missing `createdAt` becomes the current time;
/// - unknown `priority` values coerce to `normal`;
/// - tasks whose text trims to empty are dropped, upholding the invariant
///   that text is never persisted empty.
pub fn normalize(raw: &Value) -> Collection {
    let mut task_ids = HashSet::new();
    let mut list_ids = HashSet::new();

    match raw {
        // Flat-array shapes (1-3): one default list holds everything.
        Value::Array(items) => {
            let tasks = normalize_tasks(items, &mut task_ids);
            Collection::single_list(tasks)
        }
        // Multi-list shape (4). An object without a `lists` array is
        // malformed as a whole and degrades to empty.
        Value::Object(map) => match map.get("lists") {
            Some(Value::Array(lists)) => Collection {
                lists: lists
                    .iter()
                    .filter_map(|v| normalize_list(v, &mut list_ids, &mut task_ids))
                    .collect(),
            },
            _ => Collection::default(),
        },
        _ => Collection::default(),
    }
}

fn normalize_list(
    raw: &Value,
    list_ids: &mut HashSet<String>,
    task_ids: &mut HashSet<String>,
) -> Option<TodoList> {
    let map = raw.as_object()?;

    let id = match map.get("id").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() && list_ids.insert(s.to_string()) => ListId::from_raw(s),
        _ => ListId::generate(),
    };

    let name = match map.get("name").and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => s.trim().to_string(),
        _ => UNTITLED_LIST_NAME.to_string(),
    };

    let tasks = match map.get("tasks") {
        Some(Value::Array(items)) => normalize_tasks(items, task_ids),
        _ => Vec::new(),
    };

    Some(TodoList {
        id,
        name,
        created_at: coerce_timestamp(map.get("createdAt")),
        tasks,
    })
}

fn normalize_tasks(items: &[Value], seen: &mut HashSet<String>) -> Vec<Task> {
    items.iter().filter_map(|v| normalize_task(v, seen)).collect()
}

fn normalize_task(raw: &Value, seen: &mut HashSet<String>) -> Option<Task> {
    match raw {
        // Oldest format: the string is the task text, everything else fresh.
        Value::String(text) => {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            let task = Task::new(text, Priority::Normal);
            seen.insert(task.id.as_str().to_string());
            Some(task)
        }
        Value::Object(map) => {
            let text = map
                .get("text")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string();
            if text.is_empty() {
                return None;
            }

            let id = match map.get("id").and_then(Value::as_str) {
                Some(s) if !s.trim().is_empty() && seen.insert(s.to_string()) => {
                    TaskId::from_raw(s)
                }
                _ => TaskId::generate(),
            };

            // `completed` is the pre-priority spelling of the done flag.
            let done = map
                .get("done")
                .or_else(|| map.get("completed"))
                .map(truthy)
                .unwrap_or(false);

            let priority = map
                .get("priority")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok())
                .unwrap_or_default();

            Some(Task {
                id,
                text,
                done,
                created_at: coerce_timestamp(map.get("createdAt")),
                priority,
            })
        }
        _ => None,
    }
}

/// Keeps a stored timestamp only when it is a finite number
fn coerce_timestamp(raw: Option<&Value>) -> i64 {
    raw.and_then(|v| {
        v.as_i64()
            .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
    })
    .unwrap_or_else(|| Utc::now().timestamp_millis())
}

/// JS-style truthiness, matching what earlier versions of the app stored
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_becomes_empty_collection() {
        assert_eq!(normalize(&Value::Null), Collection::default());
    }

    #[test]
    fn scalars_become_empty_collection() {
        assert_eq!(normalize(&json!(42)), Collection::default());
        assert_eq!(normalize(&json!("garbage")), Collection::default());
        assert_eq!(normalize(&json!(true)), Collection::default());
    }

    #[test]
    fn object_without_lists_becomes_empty_collection() {
        assert_eq!(normalize(&json!({"tasks": []})), Collection::default());
        assert_eq!(normalize(&json!({"lists": "nope"})), Collection::default());
    }

    #[test]
    fn legacy_string_array_migrates() {
        let collection = normalize(&json!(["wash dishes"]));

        assert_eq!(collection.lists.len(), 1);
        let task = &collection.lists[0].tasks[0];
        assert_eq!(task.text, "wash dishes");
        assert!(!task.done);
        assert_eq!(task.priority, Priority::Normal);
        assert!(task.id.as_str().starts_with("t-"));
    }

    #[test]
    fn legacy_string_array_drops_blank_entries() {
        let collection = normalize(&json!(["  ", "keep me"]));
        assert_eq!(collection.task_count(), 1);
        assert_eq!(collection.lists[0].tasks[0].text, "keep me");
    }

    #[test]
    fn task_object_array_keeps_fields() {
        let collection = normalize(&json!([
            {"id": "abc", "text": "Buy milk", "done": true, "createdAt": 1700000000000i64, "priority": "high"}
        ]));

        let task = &collection.lists[0].tasks[0];
        assert_eq!(task.id.as_str(), "abc");
        assert!(task.done);
        assert_eq!(task.created_at, 1_700_000_000_000);
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn legacy_completed_key_maps_to_done() {
        let collection = normalize(&json!([{"text": "x", "completed": true}]));
        assert!(collection.lists[0].tasks[0].done);
    }

    #[test]
    fn done_uses_truthiness() {
        let collection = normalize(&json!([
            {"text": "a", "done": 1},
            {"text": "b", "done": ""},
            {"text": "c", "done": "yes"},
        ]));
        let tasks = &collection.lists[0].tasks;
        assert!(tasks[0].done);
        assert!(!tasks[1].done);
        assert!(tasks[2].done);
    }

    #[test]
    fn unknown_priority_coerces_to_normal() {
        let collection = normalize(&json!([{"text": "x", "priority": "urgent"}]));
        assert_eq!(collection.lists[0].tasks[0].priority, Priority::Normal);
    }

    #[test]
    fn non_finite_or_missing_timestamp_substitutes_now() {
        let before = Utc::now().timestamp_millis();
        let collection = normalize(&json!([
            {"text": "a"},
            {"text": "b", "createdAt": "yesterday"},
        ]));
        for task in &collection.lists[0].tasks {
            assert!(task.created_at >= before);
        }
    }

    #[test]
    fn empty_text_tasks_are_dropped() {
        let collection = normalize(&json!([
            {"text": "   ", "done": false},
            {"done": true},
            {"text": "kept"},
        ]));
        assert_eq!(collection.task_count(), 1);
    }

    #[test]
    fn non_string_text_is_dropped() {
        let collection = normalize(&json!([{"text": 42}, {"text": null}]));
        assert_eq!(collection.task_count(), 0);
    }

    #[test]
    fn duplicate_task_ids_are_regenerated_not_merged() {
        let collection = normalize(&json!([
            {"id": "dup", "text": "first"},
            {"id": "dup", "text": "second"},
        ]));

        let tasks = &collection.lists[0].tasks;
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id.as_str(), "dup");
        assert_ne!(tasks[1].id.as_str(), "dup");
    }

    #[test]
    fn duplicate_ids_across_lists_are_regenerated() {
        let collection = normalize(&json!({"lists": [
            {"name": "A", "tasks": [{"id": "dup", "text": "x"}]},
            {"name": "B", "tasks": [{"id": "dup", "text": "y"}]},
        ]}));

        let first = collection.lists[0].tasks[0].id.as_str();
        let second = collection.lists[1].tasks[0].id.as_str();
        assert_eq!(first, "dup");
        assert_ne!(second, "dup");
    }

    #[test]
    fn multi_list_shape_normalizes_recursively() {
        let collection = normalize(&json!({"lists": [
            {"id": "l1", "name": "Groceries", "createdAt": 5, "tasks": ["eggs"]},
            {"name": "  ", "tasks": []},
            "not a list",
        ]}));

        assert_eq!(collection.lists.len(), 2);
        assert_eq!(collection.lists[0].name, "Groceries");
        assert_eq!(collection.lists[0].created_at, 5);
        assert_eq!(collection.lists[0].tasks[0].text, "eggs");
        assert_eq!(collection.lists[1].name, UNTITLED_LIST_NAME);
    }

    #[test]
    fn list_without_tasks_array_gets_empty_tasks() {
        let collection = normalize(&json!({"lists": [{"name": "X", "tasks": "oops"}]}));
        assert!(collection.lists[0].tasks.is_empty());
    }

    #[test]
    fn normalize_is_idempotent_through_serialization() {
        let raw = json!({"lists": [
            {"id": "l1", "name": "A", "createdAt": 1, "tasks": [
                {"id": "t1", "text": "one", "done": 1, "createdAt": 2, "priority": "bogus"},
                "two",
            ]},
        ]});

        let once = normalize(&raw);
        let reencoded = serde_json::to_value(&once).unwrap();
        let twice = normalize(&reencoded);
        assert_eq!(once, twice);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        /// Arbitrary JSON values, nested a few levels deep
        fn arb_json() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::from),
                any::<i64>().prop_map(Value::from),
                any::<f64>().prop_map(|f| serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)),
                "\\PC{0,20}".prop_map(Value::from),
            ];
            leaf.prop_recursive(4, 64, 8, |inner| {
                prop_oneof![
                    prop::collection::vec(inner.clone(), 0..8).prop_map(Value::from),
                    prop::collection::hash_map("[a-zA-Z]{1,10}", inner, 0..8)
                        .prop_map(|m| Value::Object(m.into_iter().collect())),
                ]
            })
        }

        proptest! {
            #[test]
            fn never_panics_and_yields_valid_collection(raw in arb_json()) {
                let collection = normalize(&raw);

                for list in &collection.lists {
                    prop_assert!(!list.name.trim().is_empty());
                    for task in &list.tasks {
                        prop_assert!(!task.text.trim().is_empty());
                    }
                }
            }

            #[test]
            fn task_ids_are_unique_across_the_collection(raw in arb_json()) {
                let collection = normalize(&raw);

                let mut seen = std::collections::HashSet::new();
                for list in &collection.lists {
                    for task in &list.tasks {
                        prop_assert!(seen.insert(task.id.as_str().to_string()));
                    }
                }
            }

            #[test]
            fn idempotent_through_reencode(raw in arb_json()) {
                let once = normalize(&raw);
                let reencoded = serde_json::to_value(&once).unwrap();
                prop_assert_eq!(normalize(&reencoded), once);
            }
        }
    }
}
