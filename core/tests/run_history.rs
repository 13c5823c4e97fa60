//! Run history tests: solved volumes persisted to SQLite.

use airflow_core::{report::FlowReport, store::FlowStore};

fn store() -> FlowStore {
    let store = FlowStore::in_memory().expect("in-memory store");
    store.migrate().expect("migration");
    store
}

fn report() -> FlowReport {
    let order = vec!["X".to_string(), "Y".to_string(), "Z".to_string()];
    FlowReport::from_solution(&order, &[100.0, 50.0, 12.5])
}

#[test]
fn volumes_round_trip_in_index_order() {
    let mut store = store();
    let report = report();

    let run_id = store.insert_run("unit-test", report.volumes.len()).unwrap();
    store.insert_volumes(&run_id, &report).unwrap();

    let stored = store.volumes_for_run(&run_id).unwrap();
    assert_eq!(stored, report.volumes);
}

#[test]
fn each_run_gets_its_own_id() {
    let mut store = store();
    let report = report();

    let first = store.insert_run("a.txt", 3).unwrap();
    let second = store.insert_run("b.txt", 3).unwrap();
    assert_ne!(first, second);
    store.insert_volumes(&first, &report).unwrap();

    assert_eq!(store.run_count().unwrap(), 2);
    assert!(store.volumes_for_run(&second).unwrap().is_empty());
}

#[test]
fn non_finite_volumes_come_back_as_nan() {
    let mut store = store();
    let order = vec!["A".to_string(), "B".to_string()];
    let report = FlowReport::from_solution(&order, &[f64::NAN, 4.0]);

    let run_id = store.insert_run("singular", 2).unwrap();
    store.insert_volumes(&run_id, &report).unwrap();

    let stored = store.volumes_for_run(&run_id).unwrap();
    assert!(stored[0].volume.is_nan());
    assert_eq!(stored[1].volume, 4.0);
}

/// Volumes must reference an existing run.
#[test]
fn volumes_require_a_run() {
    let mut store = store();
    assert!(store.insert_volumes("no-such-run", &report()).is_err());
}
