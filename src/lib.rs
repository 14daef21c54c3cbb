//! taskdeck - a local-first todo list manager
//!
//! The interesting part is not the todo list, it is surviving your own
//! history: the persisted document has gone through four incompatible shapes
//! over the app's life, and [`storage::normalize`] folds all of them (and
//! arbitrary corruption) into one canonical [`domain::Collection`] without
//! ever failing. [`storage::Store`] owns that collection, persisting the
//! whole document before each mutation commits; [`view`] derives the
//! displayed rows purely from state and reconciles them by key.

pub mod cli;
pub mod domain;
pub mod storage;
pub mod view;

pub use domain::{Collection, ListId, Priority, Task, TaskId, TodoList};
