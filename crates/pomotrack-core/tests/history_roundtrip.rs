//! Persistence round-trips and degradation behavior for the task history.

use proptest::prelude::*;

use pomotrack_core::storage::history::TASKS_KEY;
use pomotrack_core::{Database, IntervalKind, Period, Task, TaskStore};

fn store_with(tasks: &[Task]) -> TaskStore {
    let mut store = TaskStore::open(Database::open_memory().unwrap());
    // insert_front reverses, so feed the list back to front.
    for task in tasks.iter().rev() {
        store.insert_front(task.clone());
    }
    store
}

fn reload(db: Database) -> TaskStore {
    TaskStore::open(db)
}

#[test]
fn empty_list_round_trips() {
    let store = store_with(&[]);
    store.save().unwrap();
    let db = store.into_database();
    assert!(reload(db).tasks().is_empty());
}

#[test]
fn loads_payload_written_by_a_prior_deployment() {
    // Byte layout a prior deployment would have left behind.
    let db = Database::open_memory().unwrap();
    db.set(
        TASKS_KEY,
        r#"[{"name":"Write spec","periods":[{"type":"shortBreak","time":1700000000000}]},{"name":"","periods":[]}]"#,
    )
    .unwrap();

    let store = TaskStore::open(db);
    assert_eq!(store.tasks().len(), 2);
    assert_eq!(store.tasks()[0].name, "Write spec");
    assert_eq!(store.tasks()[0].periods[0].kind, IntervalKind::ShortBreak);
    assert_eq!(store.tasks()[0].periods[0].time, 1_700_000_000_000);
    assert!(store.tasks()[1].periods.is_empty());
}

#[test]
fn malformed_payload_loads_as_empty_history() {
    let db = Database::open_memory().unwrap();
    db.set(TASKS_KEY, "not json at all").unwrap();
    assert!(TaskStore::open(db).tasks().is_empty());
}

#[test]
fn wrong_shape_payload_loads_as_empty_history() {
    let db = Database::open_memory().unwrap();
    db.set(TASKS_KEY, r#"{"name":"a single object"}"#).unwrap();
    assert!(TaskStore::open(db).tasks().is_empty());
}

fn arb_kind() -> impl Strategy<Value = IntervalKind> {
    prop_oneof![
        Just(IntervalKind::Pomodoro),
        Just(IntervalKind::ShortBreak),
        Just(IntervalKind::LongBreak),
    ]
}

fn arb_task() -> impl Strategy<Value = Task> {
    (
        ".{0,24}",
        proptest::collection::vec((arb_kind(), any::<u64>()), 0..8),
    )
        .prop_map(|(name, raw)| Task {
            name,
            periods: raw
                .into_iter()
                .map(|(kind, time)| Period { kind, time })
                .collect(),
        })
}

proptest! {
    /// Saving then loading reproduces an equivalent list: same names, same
    /// period kind/time sequences, same order.
    #[test]
    fn save_load_preserves_every_task(tasks in proptest::collection::vec(arb_task(), 0..6)) {
        let store = store_with(&tasks);
        store.save().unwrap();
        let reloaded = reload(store.into_database());
        prop_assert_eq!(reloaded.tasks(), tasks.as_slice());
    }
}
