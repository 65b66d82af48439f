use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::IntervalKind;

/// Every state change in the core produces an Event.
/// The presentation layer polls for events; collaborators are invoked from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        kind: IntervalKind,
        duration_ms: u64,
        at: DateTime<Utc>,
    },
    /// Periodic progress while a session is running. `remaining_ms` is
    /// rounded up to a whole second so the displayed second never skips.
    TimerProgress {
        kind: IntervalKind,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// The countdown reached zero. Fires exactly once per session.
    TimerCompleted {
        kind: IntervalKind,
        at: DateTime<Utc>,
    },
    TimerCancelled {
        kind: IntervalKind,
        remaining_ms: u64,
        at: DateTime<Utc>,
    },
    /// A completed session has been committed to the task history.
    SessionFinished {
        kind: IntervalKind,
        task_name: String,
        at: DateTime<Utc>,
    },
}
