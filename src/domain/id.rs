//! Identifiers for tasks and lists
//!
//! Generated IDs look like `t-3f9a01b2c4d5` (tasks) and `l-7e2b...` (lists):
//! a prefix plus 12 hex chars of a blake3 hash over a process-wide counter,
//! the current timestamp, and a per-process random seed. The counter makes
//! repeats within a session impossible; the seed and timestamp make
//! cross-session collisions vanishingly unlikely.
//!
//! Documents written by older versions of the app carry foreign ids (UUIDs,
//! base-36 fragments). Those are preserved verbatim, so both id types wrap an
//! arbitrary string rather than validating a fixed format.

use std::collections::hash_map::RandomState;
use std::fmt;
use std::hash::{BuildHasher, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Produces the hex body of a fresh id.
///
/// `RandomState` draws from a randomly seeded hasher, which works even when
/// no OS entropy source is available; the timestamp and counter are mixed in
/// so two processes started with the same seed still diverge.
fn fresh_hex() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let count = COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or(0);
    let seed = RandomState::new().build_hasher().finish();

    let mut hasher = blake3::Hasher::new();
    hasher.update(&count.to_le_bytes());
    hasher.update(&nanos.to_le_bytes());
    hasher.update(&seed.to_le_bytes());
    let hex = hasher.finalize().to_hex();
    hex[..12].to_string()
}

/// Task identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    /// Generates a fresh task id, unique within this process
    pub fn generate() -> Self {
        Self(format!("t-{}", fresh_hex()))
    }

    /// Wraps an id carried over from a persisted document
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// List identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ListId(String);

impl ListId {
    /// Generates a fresh list id, unique within this process
    pub fn generate() -> Self {
        Self(format!("l-{}", fresh_hex()))
    }

    /// Wraps an id carried over from a persisted document
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ListId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
