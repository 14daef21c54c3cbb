//! View projection: pure derivation of render-ready rows from the collection
//!
//! Nothing here mutates or performs I/O. Given the same collection, filter,
//! and sort inputs, projection returns identical output, which is what lets
//! the reconciler ([`diff`]) detect no-op recomputations.

mod diff;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use diff::{apply, diff, RowChange};

use crate::domain::{Collection, ListId, Priority, Task, TaskId, TodoList};

/// Which tasks a projection includes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    fn keeps(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.done,
            Filter::Completed => task.done,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(format!(
                "invalid filter '{}': expected all, active or completed",
                other
            )),
        }
    }
}

/// Render-ready representation of one task
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskRow {
    pub id: TaskId,
    pub text: String,
    pub done: bool,
    pub created_at: i64,
    pub priority: Priority,
}

impl From<&Task> for TaskRow {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            text: task.text.clone(),
            done: task.done,
            created_at: task.created_at,
            priority: task.priority,
        }
    }
}

/// Render-ready representation of one list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    pub id: ListId,
    pub name: String,
    pub created_at: i64,
    pub task_count: usize,
}

/// Projects a list's tasks through a filter into display order.
///
/// Order: open tasks before done ones, newest-created first within each
/// group. The sort is stable, so tasks created within the same millisecond
/// keep their insertion order across renders.
pub fn project_tasks(list: &TodoList, filter: Filter) -> Vec<TaskRow> {
    let mut rows: Vec<TaskRow> = list
        .tasks
        .iter()
        .filter(|t| filter.keeps(t))
        .map(TaskRow::from)
        .collect();

    rows.sort_by(|a, b| {
        a.done
            .cmp(&b.done)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
    rows
}

/// Projects the list grid, most recently created first
pub fn project_lists(collection: &Collection) -> Vec<ListRow> {
    let mut rows: Vec<ListRow> = collection
        .lists
        .iter()
        .map(|l| ListRow {
            id: l.id.clone(),
            name: l.name.clone(),
            created_at: l.created_at,
            task_count: l.tasks.len(),
        })
        .collect();

    rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    rows
}
