mod durations;
mod engine;

pub use durations::{Durations, IntervalKind};
pub use engine::{CountdownEngine, TimerState};

/// Round a millisecond value up to the next whole second.
///
/// Display rounding: 1ms left is still "1 second", only 0 is 0.
pub fn ceil_to_second(ms: u64) -> u64 {
    ms.div_ceil(1000) * 1000
}

/// Format a millisecond value as zero-padded `mm:ss`.
pub fn format_clock(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
