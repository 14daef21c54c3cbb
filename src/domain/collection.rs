//! Canonical collection shape
//!
//! The whole persisted state is one [`Collection`]: an ordered set of named
//! lists, each owning an ordered set of tasks. This is the multi-list shape
//! of the persisted document (`{"lists":[...]}`); older flat-array documents
//! are coerced into it by the normalizer.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::id::{ListId, TaskId};
use super::task::Task;

/// Name given to the list that receives tasks migrated from flat-array
/// documents, and to the list seeded into an empty store.
pub const DEFAULT_LIST_NAME: &str = "Inbox";

/// A named, ordered group of tasks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodoList {
    /// Unique identifier, immutable after creation
    pub id: ListId,

    /// List name; never empty after trim
    pub name: String,

    /// Creation time in ms since epoch
    #[serde(rename = "createdAt")]
    pub created_at: i64,

    /// Tasks, newest-first at the data level
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl TodoList {
    /// Creates a new empty list with a fresh id and the current timestamp
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ListId::generate(),
            name: name.into().trim().to_string(),
            created_at: Utc::now().timestamp_millis(),
            tasks: Vec::new(),
        }
    }

    pub fn find_task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }
}

/// The root persisted object: every list the user owns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Collection {
    pub lists: Vec<TodoList>,
}

impl Collection {
    /// Wraps a flat task sequence in a single default-named list
    pub fn single_list(tasks: Vec<Task>) -> Self {
        let mut list = TodoList::new(DEFAULT_LIST_NAME);
        list.tasks = tasks;
        Self { lists: vec![list] }
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    pub fn find_list(&self, id: &ListId) -> Option<&TodoList> {
        self.lists.iter().find(|l| &l.id == id)
    }

    pub fn find_list_mut(&mut self, id: &ListId) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|l| &l.id == id)
    }

    /// Finds a task anywhere in the collection, with its owning list
    pub fn find_task(&self, id: &TaskId) -> Option<(&TodoList, &Task)> {
        self.lists
            .iter()
            .find_map(|l| l.find_task(id).map(|t| (l, t)))
    }

    /// Mutable lookup of a task anywhere in the collection
    pub fn find_task_mut(&mut self, id: &TaskId) -> Option<&mut Task> {
        self.lists
            .iter_mut()
            .find_map(|l| l.tasks.iter_mut().find(|t| &t.id == id))
    }

    /// Total number of tasks across all lists
    pub fn task_count(&self) -> usize {
        self.lists.iter().map(|l| l.tasks.len()).sum()
    }
}
