//! # Storage Layer
//!
//! Persistence and migration for the task collection.
//!
//! ## Layout
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Collection | JSON (one document) | `<data-dir>/taskdeck.json` |
//! | Preferences | TOML | `prefs.toml` beside the document |
//!
//! ## Safety
//!
//! - [`JsonFile`] writes atomically (temp file + rename) under an exclusive
//!   `fs2` lock;
//! - [`normalize`] accepts every historical persisted shape and arbitrary
//!   garbage without failing;
//! - [`Store`] persists before committing to memory, so the durable copy and
//!   the in-memory collection never diverge.

mod medium;
mod normalize;
mod prefs;
mod store;

use std::path::PathBuf;

use directories::ProjectDirs;

pub use medium::{JsonFile, Medium};
pub use normalize::normalize;
pub use prefs::{Prefs, PrefsError, Theme};
pub use store::{Store, StoreError};

/// Default location of the collection document, platform data dir or a
/// local fallback when no home directory is available
pub fn default_data_path() -> PathBuf {
    ProjectDirs::from("", "", "taskdeck")
        .map(|dirs| dirs.data_dir().join("taskdeck.json"))
        .unwrap_or_else(|| PathBuf::from("taskdeck.json"))
}
