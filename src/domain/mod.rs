//! Domain models for taskdeck
//!
//! Contains the canonical data shapes without any I/O concerns.

mod collection;
mod id;
mod task;

pub use collection::{Collection, TodoList, DEFAULT_LIST_NAME};
pub use id::{ListId, TaskId};
pub use task::{Priority, Task};
