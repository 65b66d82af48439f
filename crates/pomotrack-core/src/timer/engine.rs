//! Countdown engine implementation.
//!
//! The engine is a wall-clock-based state machine. It does not use internal
//! threads or timers - the caller is responsible for calling `tick()`
//! periodically (1000ms works; 250ms gives a smoother display).
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Completed | Cancelled) -> Idle
//! ```
//!
//! Remaining time is recomputed from `clock.now_ms() - started_at` on every
//! tick, never decremented per callback, so a throttled or delayed driver
//! cannot accumulate drift.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = CountdownEngine::new();
//! engine.start(25 * 60 * 1000, IntervalKind::Pomodoro);
//! // In a loop:
//! engine.tick(); // Returns Some(Event::TimerCompleted) when the target is reached
//! ```

use serde::{Deserialize, Serialize};

use super::ceil_to_second;
use super::durations::IntervalKind;
use crate::clock::{Clock, SystemClock};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// Core countdown engine.
///
/// Owns at most one active timed interval. Completion fires exactly once per
/// session: the Running -> Completed transition consumes it, and further
/// ticks return `None`.
#[derive(Debug, Clone)]
pub struct CountdownEngine<C: Clock = SystemClock> {
    clock: C,
    state: TimerState,
    kind: Option<IntervalKind>,
    /// Requested length of the current session in milliseconds.
    duration_ms: u64,
    /// Wall-clock instant (ms since epoch) the current session started.
    /// `None` outside of Running.
    started_at_ms: Option<u64>,
}

impl CountdownEngine<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for CountdownEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> CountdownEngine<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            clock,
            state: TimerState::Idle,
            kind: None,
            duration_ms: 0,
            started_at_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    /// Kind of the current or most recent session.
    pub fn kind(&self) -> Option<IntervalKind> {
        self.kind
    }

    /// Raw remaining time of the running session, 0 otherwise.
    pub fn remaining_ms(&self) -> u64 {
        match (self.state, self.started_at_ms) {
            (TimerState::Running, Some(started)) => {
                let elapsed = self.clock.now_ms().saturating_sub(started);
                self.duration_ms.saturating_sub(elapsed)
            }
            _ => 0,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a session. No-op (`None`) while another session is Running or
    /// when `duration_ms` is zero.
    pub fn start(&mut self, duration_ms: u64, kind: IntervalKind) -> Option<Event> {
        if self.state == TimerState::Running || duration_ms == 0 {
            return None;
        }
        self.duration_ms = duration_ms;
        self.kind = Some(kind);
        self.started_at_ms = Some(self.clock.now_ms());
        self.state = TimerState::Running;
        Some(Event::TimerStarted {
            kind,
            duration_ms,
            at: self.clock.now(),
        })
    }

    /// Stop the running session without completing it. No completion event
    /// will ever fire for a cancelled session. No-op if not Running.
    pub fn cancel(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let remaining_ms = self.remaining_ms();
        let kind = self.kind?;
        self.state = TimerState::Cancelled;
        self.started_at_ms = None;
        Some(Event::TimerCancelled {
            kind,
            remaining_ms,
            at: self.clock.now(),
        })
    }

    /// Cancel any running session and start a new one as one atomic step.
    ///
    /// Both halves run under the same `&mut self` borrow, so no tick from
    /// the old session can observe the gap.
    pub fn restart(&mut self, duration_ms: u64, kind: IntervalKind) -> Option<Event> {
        self.cancel();
        self.start(duration_ms, kind)
    }

    /// Call periodically while a session runs.
    ///
    /// Returns `Some(Event::TimerProgress)` with the remaining time rounded
    /// up to a whole second (the displayed second holds as long as
    /// possible), or `Some(Event::TimerCompleted)` exactly once when the
    /// target duration has elapsed. Returns `None` outside of Running.
    pub fn tick(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        let kind = self.kind?;
        let remaining_ms = self.remaining_ms();
        if remaining_ms == 0 {
            self.state = TimerState::Completed;
            self.started_at_ms = None;
            return Some(Event::TimerCompleted {
                kind,
                at: self.clock.now(),
            });
        }
        Some(Event::TimerProgress {
            kind,
            remaining_ms: ceil_to_second(remaining_ms),
            at: self.clock.now(),
        })
    }
}
