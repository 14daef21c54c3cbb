//! Task domain model
//!
//! Tasks are the leaf units of the collection: a line of text, a done flag,
//! a priority, and an immutable creation timestamp. Wire field names keep the
//! camelCase spelling of historically persisted documents so exports
//! round-trip with them.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::id::TaskId;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Normal => "normal",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "normal" => Ok(Priority::Normal),
            "high" => Ok(Priority::High),
            other => Err(format!(
                "invalid priority '{}': expected low, normal or high",
                other
            )),
        }
    }
}

/// A single todo item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable after creation
    pub id: TaskId,

    /// Task text; never empty after trim
    pub text: String,

    /// Completion flag
    pub done: bool,

    /// Creation time in ms since epoch, never altered by edits
    #[serde(rename = "createdAt")]
    pub created_at: i64,

    /// Priority, `normal` unless stated otherwise
    #[serde(default)]
    pub priority: Priority,
}

impl Task {
    /// Creates a new task with a fresh id and the current timestamp.
    ///
    /// Callers are responsible for rejecting empty text before calling this;
    /// the text is stored trimmed.
    pub fn new(text: impl Into<String>, priority: Priority) -> Self {
        Self {
            id: TaskId::generate(),
            text: text.into().trim().to_string(),
            done: false,
            created_at: Utc::now().timestamp_millis(),
            priority,
        }
    }

    /// Flips the done flag
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }
}
