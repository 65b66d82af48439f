//! # Pomotrack Core Library
//!
//! Core business logic for the Pomotrack Pomodoro timer: a countdown engine
//! paired with per-task time tracking and local persistence. The
//! presentation layer (windows, buttons, notification permission prompts,
//! audio playback) is a thin shell over this crate.
//!
//! ## Architecture
//!
//! - **Countdown Engine**: a wall-clock-based state machine that requires
//!   the caller to periodically invoke `tick()` for progress updates.
//!   Remaining time is recomputed from the clock on every tick, so
//!   throttled drivers cannot drift it.
//! - **Task history**: append-only periods recorded per task, persisted as
//!   one JSON collection in a SQLite kv table.
//! - **Session Coordinator**: resolves the working task when a session
//!   begins, commits a period on completion, and drives the
//!   notification/audio/display collaborators.
//!
//! ## Key Components
//!
//! - [`CountdownEngine`]: core timer state machine
//! - [`SessionCoordinator`]: session lifecycle and history commits
//! - [`TaskStore`]: persisted task list
//! - [`Clock`]: wall-clock abstraction (swap in [`ManualClock`] for tests)

pub mod clock;
pub mod error;
pub mod events;
pub mod session;
pub mod stats;
pub mod storage;
pub mod task;
pub mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use events::Event;
pub use session::{AlertSound, Notifier, ProgressDisplay, SessionCoordinator};
pub use storage::{Config, Database, TaskStore};
pub use task::{Period, Task, DEFAULT_TASK_NAME};
pub use timer::{CountdownEngine, Durations, IntervalKind, TimerState};
