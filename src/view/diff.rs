//! Row reconciliation
//!
//! [`diff`] compares the previously rendered row sequence with a freshly
//! projected one and emits the minimal keyed changes a presentation layer
//! must perform to catch up. Changes are keyed by task id, so a mutation
//! touching one task surfaces as exactly one row change and a renderer can
//! leave every other row (including an in-progress edit widget) alone.
//!
//! Contract: `apply(prev, &diff(prev, next)) == next`, and `diff(x, x)` is
//! empty.

use serde::Serialize;

use super::TaskRow;
use crate::domain::TaskId;

/// One presentation-layer change
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase", tag = "op")]
pub enum RowChange {
    /// The row with this id disappeared
    Remove { id: TaskId },
    /// The row's content changed in place
    Update { row: TaskRow },
    /// A new row appears at `index`
    Insert { index: usize, row: TaskRow },
    /// An existing row moved to `index`
    Move { id: TaskId, index: usize },
}

/// Computes the change script turning `prev` into `next`
pub fn diff(prev: &[TaskRow], next: &[TaskRow]) -> Vec<RowChange> {
    let mut changes = Vec::new();

    // Removals first, working on a copy of the survivors
    let mut work: Vec<TaskRow> = Vec::new();
    for row in prev {
        if next.iter().any(|n| n.id == row.id) {
            work.push(row.clone());
        } else {
            changes.push(RowChange::Remove { id: row.id.clone() });
        }
    }

    // In-place content updates
    for row in next {
        if let Some(existing) = work.iter_mut().find(|w| w.id == row.id) {
            if *existing != *row {
                changes.push(RowChange::Update { row: row.clone() });
                *existing = row.clone();
            }
        }
    }

    // Insertions and moves, front to back; positions below `i` already match
    for (i, row) in next.iter().enumerate() {
        match work.iter().position(|w| w.id == row.id) {
            None => {
                changes.push(RowChange::Insert {
                    index: i,
                    row: row.clone(),
                });
                work.insert(i, row.clone());
            }
            Some(j) if j != i => {
                let moved = work.remove(j);
                work.insert(i, moved);
                changes.push(RowChange::Move {
                    id: row.id.clone(),
                    index: i,
                });
            }
            Some(_) => {}
        }
    }

    changes
}

/// Replays a change script against a rendered sequence
pub fn apply(prev: &[TaskRow], changes: &[RowChange]) -> Vec<TaskRow> {
    let mut rows = prev.to_vec();
    for change in changes {
        match change {
            RowChange::Remove { id } => rows.retain(|r| &r.id != id),
            RowChange::Update { row } => {
                if let Some(existing) = rows.iter_mut().find(|r| r.id == row.id) {
                    *existing = row.clone();
                }
            }
            RowChange::Insert { index, row } => {
                rows.insert((*index).min(rows.len()), row.clone());
            }
            RowChange::Move { id, index } => {
                if let Some(j) = rows.iter().position(|r| &r.id == id) {
                    let moved = rows.remove(j);
                    rows.insert((*index).min(rows.len()), moved);
                }
            }
        }
    }
    rows
}
