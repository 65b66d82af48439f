//! Persisted task history.
//!
//! The whole task list is one JSON collection stored under a fixed key and
//! rewritten after every mutation. A missing or malformed payload is not
//! fatal: it loads as an empty history.

use tracing::warn;

use super::database::Database;
use crate::error::StorageError;
use crate::task::{normalize_name, Period, Task};

/// Fixed key the serialized task list is stored under.
pub const TASKS_KEY: &str = "tasks";

/// In-memory task list backed by the kv database.
///
/// Ordering is most-recent-first: tasks are inserted at the front, and the
/// persisted order is the display order.
pub struct TaskStore {
    db: Database,
    tasks: Vec<Task>,
}

impl TaskStore {
    /// Load the persisted task list from `db`.
    ///
    /// A missing payload or one that fails to parse yields an empty history
    /// (warning-level, recoverable).
    pub fn open(db: Database) -> Self {
        let tasks = match db.get(TASKS_KEY) {
            Ok(Some(payload)) => match serde_json::from_str(&payload) {
                Ok(tasks) => tasks,
                Err(err) => {
                    warn!(key = TASKS_KEY, %err, "discarding malformed task history");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(key = TASKS_KEY, %err, "failed to read task history");
                Vec::new()
            }
        };
        Self { db, tasks }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Position of the first task whose normalized name equals the
    /// normalized candidate. Pure; no side effects.
    pub fn find_matching(&self, candidate_name: &str) -> Option<usize> {
        let normalized = normalize_name(candidate_name);
        self.tasks
            .iter()
            .position(|task| task.normalized_name() == normalized)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Insert a task at the front (most-recent-first display order).
    /// Call [`save`](Self::save) after the surrounding mutation batch.
    pub fn insert_front(&mut self, task: Task) {
        self.tasks.insert(0, task);
    }

    /// Append a period to the task at `index`.
    /// Call [`save`](Self::save) after the surrounding mutation batch.
    pub fn append_period(&mut self, index: usize, period: Period) {
        if let Some(task) = self.tasks.get_mut(index) {
            task.periods.push(period);
        }
    }

    /// Remove the task at `index` and persist immediately.
    ///
    /// The in-memory removal sticks even if persisting fails.
    pub fn remove(&mut self, index: usize) -> Result<Task, StorageError> {
        if index >= self.tasks.len() {
            return Err(StorageError::QueryFailed(format!(
                "no task at index {index}"
            )));
        }
        let removed = self.tasks.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Give the underlying database back, dropping the in-memory list.
    pub fn into_database(self) -> Database {
        self.db
    }

    /// Serialize the full list and overwrite the persisted state.
    pub fn save(&self) -> Result<(), StorageError> {
        let payload =
            serde_json::to_string(&self.tasks).map_err(|e| StorageError::MalformedPayload {
                key: TASKS_KEY.to_string(),
                message: e.to_string(),
            })?;
        self.db.set(TASKS_KEY, &payload)
    }
}
