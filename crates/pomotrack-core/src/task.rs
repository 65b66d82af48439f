//! Task records and their completed-period history.

use serde::{Deserialize, Serialize};

use crate::timer::IntervalKind;

/// Name assigned when a session completes against a task left unnamed.
pub const DEFAULT_TASK_NAME: &str = "Some task";

/// A completed timed interval, recorded against a task.
///
/// Immutable once created. `time` is the wall-clock instant the interval
/// ended, in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    #[serde(rename = "type")]
    pub kind: IntervalKind,
    pub time: u64,
}

/// A tracked task: a display name plus its append-only period history.
///
/// Identity is the normalized name (trimmed, case-insensitive); the raw
/// string is kept for display. Periods are stored in insertion order, which
/// is also chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub periods: Vec<Period>,
}

impl Task {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            periods: Vec::new(),
        }
    }

    /// The identity key: trimmed and lowercased.
    pub fn normalized_name(&self) -> String {
        normalize_name(&self.name)
    }

    /// Case- and whitespace-insensitive name equality.
    pub fn matches_name(&self, candidate: &str) -> bool {
        self.normalized_name() == normalize_name(candidate)
    }
}

pub(crate) fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
