use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The interval category of a countdown session.
///
/// Serialized with the same tags the persisted history uses
/// (`"pomodoro"`, `"shortBreak"`, `"longBreak"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntervalKind {
    Pomodoro,
    ShortBreak,
    LongBreak,
}

impl IntervalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Pomodoro => "pomodoro",
            IntervalKind::ShortBreak => "shortBreak",
            IntervalKind::LongBreak => "longBreak",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntervalKind {
    type Err = ValidationError;

    /// Parse a kind tag, rejecting anything outside the closed set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pomodoro" => Ok(IntervalKind::Pomodoro),
            "shortBreak" => Ok(IntervalKind::ShortBreak),
            "longBreak" => Ok(IntervalKind::LongBreak),
            other => Err(ValidationError::UnknownKind(other.to_string())),
        }
    }
}

/// Target length per interval kind, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub pomodoro_ms: u64,
    pub short_break_ms: u64,
    pub long_break_ms: u64,
}

impl Durations {
    /// Build a table from whole minutes.
    ///
    /// Uses saturating arithmetic to prevent overflow with large values.
    pub fn from_minutes(pomodoro: u64, short_break: u64, long_break: u64) -> Self {
        const MINUTE_MS: u64 = 60 * 1000;
        Self {
            pomodoro_ms: pomodoro.saturating_mul(MINUTE_MS),
            short_break_ms: short_break.saturating_mul(MINUTE_MS),
            long_break_ms: long_break.saturating_mul(MINUTE_MS),
        }
    }

    /// Look up the target duration for a kind.
    pub fn duration_for(&self, kind: IntervalKind) -> u64 {
        match kind {
            IntervalKind::Pomodoro => self.pomodoro_ms,
            IntervalKind::ShortBreak => self.short_break_ms,
            IntervalKind::LongBreak => self.long_break_ms,
        }
    }

    /// Divide every entry by the same factor.
    ///
    /// Fast-testing mode: all three kinds shrink identically so their
    /// relative proportions stay meaningful. A divisor of 300 maps each
    /// configured minute to 200ms.
    pub fn compressed(self, divisor: u64) -> Self {
        if divisor == 0 {
            return self;
        }
        Self {
            pomodoro_ms: self.pomodoro_ms / divisor,
            short_break_ms: self.short_break_ms / divisor,
            long_break_ms: self.long_break_ms / divisor,
        }
    }
}

impl Default for Durations {
    /// The classic 25/5/15 minute table.
    fn default() -> Self {
        Self::from_minutes(25, 5, 15)
    }
}
