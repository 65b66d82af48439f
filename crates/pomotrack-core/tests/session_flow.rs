//! End-to-end session flows through the public API: coordinator, engine,
//! store, and collaborators wired together, driven by a manual clock.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use pomotrack_core::{
    AlertSound, Database, Durations, Event, IntervalKind, ManualClock, Notifier, ProgressDisplay,
    SessionCoordinator, TaskStore,
};

/// Records every collaborator call; clones share state so the test can
/// inspect what the coordinator did.
#[derive(Clone, Default)]
struct Recorder {
    inner: Arc<RecorderInner>,
}

#[derive(Default)]
struct RecorderInner {
    notifications: Mutex<Vec<(IntervalKind, String)>>,
    alerts: AtomicU32,
    idles: AtomicU32,
    progress: Mutex<Vec<u64>>,
}

impl Recorder {
    fn notifications(&self) -> Vec<(IntervalKind, String)> {
        self.inner.notifications.lock().unwrap().clone()
    }

    fn alerts(&self) -> u32 {
        self.inner.alerts.load(Ordering::SeqCst)
    }

    fn idles(&self) -> u32 {
        self.inner.idles.load(Ordering::SeqCst)
    }

    fn progress(&self) -> Vec<u64> {
        self.inner.progress.lock().unwrap().clone()
    }
}

impl Notifier for Recorder {
    fn notify(&self, kind: IntervalKind, task_name: &str) {
        self.inner
            .notifications
            .lock()
            .unwrap()
            .push((kind, task_name.to_string()));
    }
}

impl AlertSound for Recorder {
    fn play_alert(&self) {
        self.inner.alerts.fetch_add(1, Ordering::SeqCst);
    }
}

impl ProgressDisplay for Recorder {
    fn on_progress(&self, remaining_ms: u64, _task_name: &str) {
        self.inner.progress.lock().unwrap().push(remaining_ms);
    }

    fn on_idle(&self) {
        self.inner.idles.fetch_add(1, Ordering::SeqCst);
    }
}

/// Dev-compressed table: pomodoro 5s, short break 1s, long break 3s.
fn fast_durations() -> Durations {
    Durations::default().compressed(300)
}

fn harness() -> (ManualClock, Recorder, SessionCoordinator<ManualClock>) {
    let clock = ManualClock::new(1_700_000_000_000);
    let store = TaskStore::open(Database::open_memory().unwrap());
    let mut coordinator = SessionCoordinator::with_clock(fast_durations(), store, clock.clone());
    let recorder = Recorder::default();
    coordinator.set_notifier(Box::new(recorder.clone()));
    coordinator.set_alert(Box::new(recorder.clone()));
    coordinator.set_display(Box::new(recorder.clone()));
    (clock, recorder, coordinator)
}

/// Drive the coordinator with a 250ms periodic tick for `total_ms`,
/// counting how many sessions finish along the way.
fn drive(
    clock: &ManualClock,
    coordinator: &mut SessionCoordinator<ManualClock>,
    total_ms: u64,
) -> u32 {
    let mut finished = 0;
    let mut elapsed = 0;
    while elapsed < total_ms {
        clock.advance(250);
        elapsed += 250;
        if let Some(Event::SessionFinished { .. }) = coordinator.tick().unwrap() {
            finished += 1;
        }
    }
    finished
}

#[test]
fn fresh_start_records_one_task_one_period() {
    let (clock, recorder, mut coordinator) = harness();
    coordinator
        .begin(IntervalKind::Pomodoro, "Write spec")
        .unwrap();

    // Keep driving well past the deadline; completion must fire once.
    let finished = drive(&clock, &mut coordinator, 10_000);
    assert_eq!(finished, 1);

    let tasks = coordinator.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].name, "Write spec");
    assert_eq!(tasks[0].periods.len(), 1);
    assert_eq!(tasks[0].periods[0].kind, IntervalKind::Pomodoro);

    assert_eq!(
        recorder.notifications(),
        vec![(IntervalKind::Pomodoro, "Write spec".to_string())]
    );
    assert_eq!(recorder.alerts(), 1);
    assert_eq!(recorder.idles(), 1);
}

#[test]
fn accumulation_appends_to_the_same_task() {
    let (clock, recorder, mut coordinator) = harness();
    coordinator
        .begin(IntervalKind::Pomodoro, "Write spec")
        .unwrap();
    drive(&clock, &mut coordinator, 6_000);

    // Different case and whitespace must land on the same record.
    coordinator
        .begin(IntervalKind::ShortBreak, "write spec ")
        .unwrap();
    drive(&clock, &mut coordinator, 2_000);

    let tasks = coordinator.tasks();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].periods.len(), 2);
    assert_eq!(tasks[0].periods[0].kind, IntervalKind::Pomodoro);
    assert_eq!(tasks[0].periods[1].kind, IntervalKind::ShortBreak);

    assert_eq!(recorder.notifications().len(), 2);
    assert_eq!(recorder.alerts(), 2);
}

#[test]
fn cancel_before_deadline_changes_nothing() {
    let clock = ManualClock::new(1_700_000_000_000);
    let store = TaskStore::open(Database::open_memory().unwrap());
    // Full-size table: 25 minute pomodoro (1500s).
    let mut coordinator = SessionCoordinator::with_clock(Durations::default(), store, clock.clone());
    let recorder = Recorder::default();
    coordinator.set_notifier(Box::new(recorder.clone()));
    coordinator.set_alert(Box::new(recorder.clone()));

    coordinator.begin(IntervalKind::Pomodoro, "X").unwrap();
    clock.advance(10_000);
    coordinator.tick().unwrap();
    coordinator.cancel();

    clock.advance(30 * 60 * 1000);
    assert!(coordinator.tick().unwrap().is_none());

    assert!(coordinator.tasks().is_empty());
    assert!(recorder.notifications().is_empty());
    assert_eq!(recorder.alerts(), 0);
}

#[test]
fn unrecognized_kind_never_reaches_the_coordinator() {
    // The closed enum is the boundary: an unknown tag fails to parse, so
    // there is no way to begin an "espresso-break" session.
    let parsed = "espresso-break".parse::<IntervalKind>();
    assert!(parsed.is_err());

    let (_clock, recorder, coordinator) = harness();
    assert!(!coordinator.is_ticking());
    assert!(coordinator.tasks().is_empty());
    assert!(recorder.notifications().is_empty());
}

#[test]
fn progress_reaches_display_with_held_seconds() {
    let (clock, recorder, mut coordinator) = harness();
    coordinator
        .begin(IntervalKind::ShortBreak, "stretch")
        .unwrap();

    clock.advance(250);
    coordinator.tick().unwrap();
    clock.advance(250);
    coordinator.tick().unwrap();

    // Initial full duration, then ceiling-rounded remainders.
    assert_eq!(recorder.progress(), vec![1_000, 1_000, 1_000]);
}

#[test]
fn completed_session_survives_a_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pomotrack.db");

    let clock = ManualClock::new(1_700_000_000_000);
    let store = TaskStore::open(Database::open_at(&path).unwrap());
    let mut coordinator = SessionCoordinator::with_clock(fast_durations(), store, clock.clone());
    coordinator
        .begin(IntervalKind::LongBreak, "recharge")
        .unwrap();
    clock.advance(3_000);
    coordinator.tick().unwrap();
    drop(coordinator);

    let reloaded = TaskStore::open(Database::open_at(&path).unwrap());
    assert_eq!(reloaded.tasks().len(), 1);
    assert_eq!(reloaded.tasks()[0].name, "recharge");
    assert_eq!(reloaded.tasks()[0].periods[0].kind, IntervalKind::LongBreak);
}

#[test]
fn back_to_back_sessions_count_separately() {
    let (clock, recorder, mut coordinator) = harness();
    for _ in 0..3 {
        coordinator
            .begin(IntervalKind::Pomodoro, "grind")
            .unwrap();
        drive(&clock, &mut coordinator, 6_000);
    }

    assert_eq!(coordinator.tasks().len(), 1);
    assert_eq!(coordinator.tasks()[0].periods.len(), 3);
    assert_eq!(recorder.alerts(), 3);
}
