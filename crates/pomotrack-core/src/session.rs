//! Session coordination: the glue between the countdown engine and the
//! task history.
//!
//! The coordinator is the authoritative entry point for "start a
//! pomodoro/break for task X". It resolves the working task when a session
//! begins, commits a period to the history when the engine completes, and
//! drives the notification/audio/display collaborators. Construct one per
//! running application and pass it to the presentation layer; there are no
//! ambient globals.

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, Result, ValidationError};
use crate::events::Event;
use crate::storage::TaskStore;
use crate::task::{Period, Task, DEFAULT_TASK_NAME};
use crate::timer::{CountdownEngine, Durations, IntervalKind, TimerState};

/// Desktop-notification collaborator. Fire-and-forget.
pub trait Notifier {
    fn notify(&self, kind: IntervalKind, task_name: &str);
}

/// Audible-alert collaborator. Fire-and-forget, independent of
/// notification permission state.
pub trait AlertSound {
    fn play_alert(&self);
}

/// Presentation collaborator for countdown progress.
pub trait ProgressDisplay {
    fn on_progress(&self, remaining_ms: u64, task_name: &str);
    fn on_idle(&self);
}

struct NoopCollaborators;

impl Notifier for NoopCollaborators {
    fn notify(&self, _kind: IntervalKind, _task_name: &str) {}
}

impl AlertSound for NoopCollaborators {
    fn play_alert(&self) {}
}

impl ProgressDisplay for NoopCollaborators {
    fn on_progress(&self, _remaining_ms: u64, _task_name: &str) {}
    fn on_idle(&self) {}
}

/// Owns the countdown engine, the task store, and the working task.
///
/// At most one session runs at a time; `begin` restarts the engine, so a
/// running session is dropped without a trace when a new one starts.
pub struct SessionCoordinator<C: Clock = SystemClock> {
    clock: C,
    durations: Durations,
    engine: CountdownEngine<C>,
    store: TaskStore,
    /// The task the next completed period will be recorded against. Always
    /// an unsaved copy; the persisted record is only touched at commit.
    current: Task,
    notifier: Box<dyn Notifier>,
    alert: Box<dyn AlertSound>,
    display: Box<dyn ProgressDisplay>,
}

impl SessionCoordinator<SystemClock> {
    pub fn new(durations: Durations, store: TaskStore) -> Self {
        Self::with_clock(durations, store, SystemClock)
    }
}

impl<C: Clock + Clone> SessionCoordinator<C> {
    pub fn with_clock(durations: Durations, store: TaskStore, clock: C) -> Self {
        Self {
            engine: CountdownEngine::with_clock(clock.clone()),
            clock,
            durations,
            store,
            current: Task::new(""),
            notifier: Box::new(NoopCollaborators),
            alert: Box::new(NoopCollaborators),
            display: Box::new(NoopCollaborators),
        }
    }
}

impl<C: Clock> SessionCoordinator<C> {
    pub fn set_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifier = notifier;
    }

    pub fn set_alert(&mut self, alert: Box<dyn AlertSound>) {
        self.alert = alert;
    }

    pub fn set_display(&mut self, display: Box<dyn ProgressDisplay>) {
        self.display = display;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_ticking(&self) -> bool {
        self.engine.is_running()
    }

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn remaining_ms(&self) -> u64 {
        self.engine.remaining_ms()
    }

    pub fn current_task_name(&self) -> &str {
        &self.current.name
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a session of `kind` for the named task, replacing any running
    /// session.
    ///
    /// The working task becomes the matching stored task's display name, or
    /// a fresh unsaved task when nothing matches. Nothing is persisted until
    /// the session completes.
    ///
    /// # Errors
    /// `ValidationError::InvalidDuration` when the configured duration for
    /// `kind` is zero; no session starts and no state changes.
    pub fn begin(&mut self, kind: IntervalKind, requested_task_name: &str) -> Result<Event> {
        let duration_ms = self.durations.duration_for(kind);
        if duration_ms == 0 {
            return Err(ValidationError::InvalidDuration {
                kind: kind.to_string(),
                duration_ms,
            }
            .into());
        }

        let name = match self.store.find_matching(requested_task_name) {
            Some(index) => self.store.tasks()[index].name.clone(),
            None => requested_task_name.to_string(),
        };
        self.current = Task::new(name);

        let event = match self.engine.restart(duration_ms, kind) {
            Some(event) => event,
            None => return Err(CoreError::Custom("countdown refused to start".into())),
        };
        self.display.on_progress(duration_ms, &self.current.name);
        debug!(%kind, task = %self.current.name, duration_ms, "session started");
        Ok(event)
    }

    /// `begin`, unless a session is already running (`Ok(None)`).
    ///
    /// Form-submit semantics: confirming a task name change must not
    /// restart a ticking countdown.
    pub fn begin_if_idle(
        &mut self,
        kind: IntervalKind,
        requested_task_name: &str,
    ) -> Result<Option<Event>> {
        if self.engine.is_running() {
            return Ok(None);
        }
        self.begin(kind, requested_task_name).map(Some)
    }

    /// Drive the countdown. Call periodically from the host's timer.
    ///
    /// Progress is forwarded to the display collaborator. On completion the
    /// period is committed to the history, the list is persisted, the
    /// notification and audio collaborators fire, and
    /// `Event::SessionFinished` is returned.
    ///
    /// # Errors
    /// A persistence failure is surfaced after every in-memory effect and
    /// collaborator call has been applied; the in-memory history is not
    /// rolled back.
    pub fn tick(&mut self) -> Result<Option<Event>> {
        match self.engine.tick() {
            Some(Event::TimerProgress {
                kind,
                remaining_ms,
                at,
            }) => {
                self.display.on_progress(remaining_ms, &self.current.name);
                Ok(Some(Event::TimerProgress {
                    kind,
                    remaining_ms,
                    at,
                }))
            }
            Some(Event::TimerCompleted { kind, at }) => {
                let task_name = self.commit_period(kind);
                let persisted = self.store.save();
                self.display.on_idle();
                self.notifier.notify(kind, &task_name);
                self.alert.play_alert();
                debug!(%kind, task = %task_name, "session committed");
                persisted?;
                Ok(Some(Event::SessionFinished {
                    kind,
                    task_name,
                    at,
                }))
            }
            Some(other) => Ok(Some(other)),
            None => Ok(None),
        }
    }

    /// Stop the running session without recording anything.
    pub fn cancel(&mut self) -> Option<Event> {
        let event = self.engine.cancel();
        if event.is_some() {
            self.display.on_idle();
        }
        event
    }

    /// Make a stored task the working task.
    ///
    /// Copies the name instead of aliasing the stored record, so display
    /// edits can never reach an already-persisted task.
    pub fn select_task(&mut self, index: usize) {
        if let Some(task) = self.store.tasks().get(index) {
            self.current = Task::new(task.name.clone());
        }
    }

    /// Remove a stored task and persist immediately.
    pub fn remove_task(&mut self, index: usize) -> Result<Task> {
        Ok(self.store.remove(index)?)
    }

    /// Apply a completed session to the in-memory history and return the
    /// task name it was recorded under.
    fn commit_period(&mut self, kind: IntervalKind) -> String {
        if self.current.name.trim().is_empty() {
            self.current.name = DEFAULT_TASK_NAME.to_string();
        }

        let index = match self.store.find_matching(&self.current.name) {
            Some(index) => index,
            None => {
                self.store.insert_front(self.current.clone());
                0
            }
        };
        self.store.append_period(
            index,
            Period {
                kind,
                time: self.clock.now_ms(),
            },
        );

        let task_name = self.store.tasks()[index].name.clone();
        // Replace the working task with a fresh unsaved copy carrying the
        // same name: the next session accumulates on the same record while
        // the committed one stays out of reach.
        self.current = Task::new(task_name.clone());
        task_name
    }
}
