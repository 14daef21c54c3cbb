//! The store: exclusive owner of the canonical collection
//!
//! Every mutation persists the entire collection, and persists it *first*:
//! the next state is built on a copy, encoded and written through the medium,
//! and only swapped into memory once the write succeeded. Memory and durable
//! state therefore never diverge, even when the disk is full.
//!
//! Failure semantics follow a strict taxonomy: a failed write is the only
//! error surfaced to callers. Malformed persisted data is recovered silently
//! at load time, and mutations that reference a vanished id or would produce
//! empty text are no-ops reported through the `Option`/`bool` return value,
//! not errors.

use std::io;

use serde_json::Value;
use thiserror::Error;

use super::medium::Medium;
use super::normalize::normalize;
use crate::domain::{Collection, ListId, Priority, Task, TaskId, TodoList, DEFAULT_LIST_NAME};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read collection from storage")]
    Read {
        #[source]
        source: io::Error,
    },

    #[error("failed to persist collection")]
    Persist {
        #[source]
        source: io::Error,
    },

    #[error("failed to encode collection")]
    Encode(#[from] serde_json::Error),
}

/// Owner of the in-memory collection and its durable copy
pub struct Store<M: Medium> {
    medium: M,
    collection: Collection,
}

impl<M: Medium> Store<M> {
    /// Loads the persisted document, normalizes it, and installs the result.
    ///
    /// Undecodable content is treated identically to a missing document. An
    /// empty result is seeded with one default list so `add` always has a
    /// target; the seed is first persisted by the next mutation.
    pub fn open(medium: M) -> Result<Self, StoreError> {
        let raw = medium.read().map_err(|source| StoreError::Read { source })?;
        let decoded = raw
            .and_then(|text| serde_json::from_str(&text).ok())
            .unwrap_or(Value::Null);

        let mut collection = normalize(&decoded);
        if collection.is_empty() {
            collection.lists.push(TodoList::new(DEFAULT_LIST_NAME));
        }

        Ok(Self { medium, collection })
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> &Collection {
        &self.collection
    }

    /// The list new tasks land in when none is named (head list)
    pub fn default_list_id(&self) -> Option<ListId> {
        self.collection.lists.first().map(|l| l.id.clone())
    }

    /// Creates a task at the head of the given list.
    ///
    /// Returns `None` without persisting when the text trims to empty or the
    /// list does not exist.
    pub fn add_task(
        &mut self,
        list_id: &ListId,
        text: &str,
        priority: Priority,
    ) -> Result<Option<Task>, StoreError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let mut next = self.collection.clone();
        let Some(list) = next.find_list_mut(list_id) else {
            return Ok(None);
        };

        let task = Task::new(text, priority);
        list.tasks.insert(0, task.clone());
        self.commit(next)?;
        Ok(Some(task))
    }

    /// Flips a task's done flag; `false` when the id is not found
    pub fn toggle_done(&mut self, task_id: &TaskId) -> Result<bool, StoreError> {
        let mut next = self.collection.clone();
        let Some(task) = next.find_task_mut(task_id) else {
            return Ok(false);
        };

        task.toggle();
        self.commit(next)?;
        Ok(true)
    }

    /// Replaces a task's text with the trimmed value.
    ///
    /// An edit that trims to empty keeps the previous text and reports
    /// `false`, as does an unknown id.
    pub fn edit_text(&mut self, task_id: &TaskId, new_text: &str) -> Result<bool, StoreError> {
        let trimmed = new_text.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut next = self.collection.clone();
        let Some(task) = next.find_task_mut(task_id) else {
            return Ok(false);
        };

        task.text = trimmed.to_string();
        self.commit(next)?;
        Ok(true)
    }

    /// Changes a task's priority; `false` when the id is not found
    pub fn set_priority(
        &mut self,
        task_id: &TaskId,
        priority: Priority,
    ) -> Result<bool, StoreError> {
        let mut next = self.collection.clone();
        let Some(task) = next.find_task_mut(task_id) else {
            return Ok(false);
        };

        task.priority = priority;
        self.commit(next)?;
        Ok(true)
    }

    /// Removes a task; `false` when the id is not found
    pub fn delete_task(&mut self, task_id: &TaskId) -> Result<bool, StoreError> {
        let mut next = self.collection.clone();
        let before = next.task_count();
        for list in &mut next.lists {
            list.tasks.retain(|t| &t.id != task_id);
        }

        if next.task_count() == before {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Creates a list at the head of the collection; `None` on empty name
    pub fn add_list(&mut self, name: &str) -> Result<Option<TodoList>, StoreError> {
        if name.trim().is_empty() {
            return Ok(None);
        }

        let list = TodoList::new(name);
        let mut next = self.collection.clone();
        next.lists.insert(0, list.clone());
        self.commit(next)?;
        Ok(Some(list))
    }

    /// Renames a list; an empty trimmed name keeps the prior one (`false`)
    pub fn rename_list(&mut self, list_id: &ListId, new_name: &str) -> Result<bool, StoreError> {
        let trimmed = new_name.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut next = self.collection.clone();
        let Some(list) = next.find_list_mut(list_id) else {
            return Ok(false);
        };

        list.name = trimmed.to_string();
        self.commit(next)?;
        Ok(true)
    }

    /// Deletes a list and all its tasks atomically; `false` when not found
    pub fn delete_list(&mut self, list_id: &ListId) -> Result<bool, StoreError> {
        let mut next = self.collection.clone();
        let before = next.lists.len();
        next.lists.retain(|l| &l.id != list_id);

        if next.lists.len() == before {
            return Ok(false);
        }
        self.commit(next)?;
        Ok(true)
    }

    /// Normalizes `raw` and replaces the entire collection.
    ///
    /// Replace-not-merge is deliberate: merging would need a conflict policy
    /// the app never had. An import that normalizes to nothing is seeded the
    /// same way `open` seeds.
    pub fn import(&mut self, raw: &Value) -> Result<(), StoreError> {
        let mut next = normalize(raw);
        if next.is_empty() {
            next.lists.push(TodoList::new(DEFAULT_LIST_NAME));
        }
        self.commit(next)
    }

    /// Pretty-printed export in the exact shape `open`/`import` accept
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.collection)?)
    }

    /// Encodes and writes `next`, then swaps it into memory.
    ///
    /// On write failure the in-memory collection is left untouched.
    fn commit(&mut self, next: Collection) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(&next)?;
        self.medium
            .write(&encoded)
            .map_err(|source| StoreError::Persist { source })?;
        self.collection = next;
        Ok(())
    }
}
