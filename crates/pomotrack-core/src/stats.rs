//! Aggregation over recorded periods: today's activity, pomodoro counts,
//! and total time spent.
//!
//! All functions are pure views over the task list. Day boundaries are UTC.

use chrono::{DateTime, NaiveDate};

use crate::task::{Period, Task};
use crate::timer::{Durations, IntervalKind};

/// All periods across every task, in task display order.
pub fn all_periods(tasks: &[Task]) -> Vec<Period> {
    tasks.iter().flat_map(|t| t.periods.iter().copied()).collect()
}

/// Periods completed on the same UTC day as `now_ms`.
pub fn periods_today(tasks: &[Task], now_ms: u64) -> Vec<Period> {
    let Some(today) = utc_date(now_ms) else {
        return Vec::new();
    };
    all_periods(tasks)
        .into_iter()
        .filter(|p| utc_date(p.time) == Some(today))
        .collect()
}

/// Number of completed work intervals (breaks excluded).
pub fn pomodoro_count(periods: &[Period]) -> usize {
    periods
        .iter()
        .filter(|p| p.kind == IntervalKind::Pomodoro)
        .count()
}

/// Total time represented by `periods`, priced by the configured duration
/// table.
pub fn time_spent_ms(periods: &[Period], durations: &Durations) -> u64 {
    periods
        .iter()
        .map(|p| durations.duration_for(p.kind))
        .fold(0, u64::saturating_add)
}

/// Format a total as `h:mm` (hours unpadded, minutes zero-padded).
pub fn format_spent(total_ms: u64) -> String {
    let total_min = total_ms / 60_000;
    format!("{}:{:02}", total_min / 60, total_min % 60)
}

fn utc_date(epoch_ms: u64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(epoch_ms as i64).map(|dt| dt.date_naive())
}
