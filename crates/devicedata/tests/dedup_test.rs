//! Integration tests for dataset deduplication.

use std::sync::Arc;

use serde_json::json;

use devicedata::dedup::{
    hash::HASH_DEACTIVATE_OLD_NAME, truncate::TRUNCATE_NAME, DataStoreSession, Dataset,
    DatasetState, DatasetType, DeduplicatorConfig, DelegateFactory, MemoryStore,
};
use devicedata::{DataError, Datum, Pipeline, Record};

fn session() -> Arc<dyn DataStoreSession> {
    Arc::new(MemoryStore::new())
}

fn delegate() -> DelegateFactory {
    DelegateFactory::from_config(&DeduplicatorConfig::default()).unwrap()
}

fn reading(value: f64) -> Datum {
    let outcome = Pipeline::new().process(&json!({
        "type": "cbg",
        "deviceId": "DexG5_123",
        "time": "2016-05-04T15:18:06Z",
        "value": value,
        "units": "mmol/L"
    }));
    assert!(outcome.is_valid(), "{:?}", outcome.errors);
    outcome.datum.unwrap()
}

fn active_count(session: &Arc<dyn DataStoreSession>, upload_id: &str) -> usize {
    session
        .get_dataset_data(upload_id)
        .unwrap()
        .iter()
        .filter(|datum| datum.base().active)
        .count()
}

// =============================================================================
// Registration
// =============================================================================

#[test]
fn test_registration_happens_once() {
    let session = session();
    let dataset = Dataset::new("user", "upload").with_device_id("DexG5_123");
    session.create_dataset(&dataset).unwrap();

    let first = delegate()
        .new_deduplicator_for_dataset(session.clone(), &dataset)
        .unwrap();
    first.register_dataset().unwrap();

    let second = delegate()
        .new_deduplicator_for_dataset(session.clone(), &dataset)
        .unwrap();
    let err = second.register_dataset().unwrap_err();
    assert!(matches!(err, DataError::AlreadyRegistered { ref name } if name == HASH_DEACTIVATE_OLD_NAME));
    assert!(err.to_string().contains(HASH_DEACTIVATE_OLD_NAME));
}

#[test]
fn test_concurrent_registration_has_one_winner() {
    let session = session();
    let dataset = Dataset::new("user", "upload")
        .with_device_id("pump")
        .with_device_manufacturers(["Medtronic"]);
    session.create_dataset(&dataset).unwrap();
    let delegate = delegate();

    let results: Vec<bool> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let session = session.clone();
                let delegate = &delegate;
                let dataset = &dataset;
                scope.spawn(move || {
                    delegate
                        .new_deduplicator_for_dataset(session, dataset)
                        .and_then(|deduplicator| deduplicator.register_dataset())
                        .is_ok()
                })
            })
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|won| **won).count(), 1);
    let persisted = session.get_dataset("upload").unwrap().unwrap();
    assert_eq!(persisted.deduplicator.name, TRUNCATE_NAME);
}

#[test]
fn test_resolving_requires_a_binding() {
    let session = session();
    let dataset = Dataset::new("user", "upload").with_device_id("DexG5_123");
    session.create_dataset(&dataset).unwrap();

    assert!(matches!(
        delegate().new_registered_deduplicator_for_dataset(session.clone(), &dataset),
        Err(DataError::NotRegistered)
    ));

    delegate()
        .new_deduplicator_for_dataset(session.clone(), &dataset)
        .unwrap()
        .register_dataset()
        .unwrap();

    let persisted = session.get_dataset("upload").unwrap().unwrap();
    let resolved = delegate()
        .new_registered_deduplicator_for_dataset(session.clone(), &persisted)
        .unwrap();
    assert_eq!(resolved.name(), HASH_DEACTIVATE_OLD_NAME);
    assert_eq!(resolved.version(), "1.0.0");
}

#[test]
fn test_unregistered_deduplicator_cannot_add_data() {
    let session = session();
    let dataset = Dataset::new("user", "upload").with_device_id("DexG5_123");
    session.create_dataset(&dataset).unwrap();

    let deduplicator = delegate()
        .new_deduplicator_for_dataset(session.clone(), &dataset)
        .unwrap();
    assert!(matches!(
        deduplicator.add_dataset_data(vec![reading(5.0)]),
        Err(DataError::NotRegistered)
    ));
}

// =============================================================================
// Strategies
// =============================================================================

#[test]
fn test_hash_deactivates_older_duplicates() {
    let session = session();
    let delegate = delegate();

    let old = Dataset::new("user", "old").with_device_id("DexG5_123");
    let new = Dataset::new("user", "new").with_device_id("DexG5_123");
    for dataset in [&old, &new] {
        session.create_dataset(dataset).unwrap();
    }

    let deduplicator = delegate
        .new_deduplicator_for_dataset(session.clone(), &old)
        .unwrap();
    deduplicator.register_dataset().unwrap();
    deduplicator
        .add_dataset_data(vec![reading(5.0), reading(6.0)])
        .unwrap();
    assert_eq!(active_count(&session, "old"), 0);
    deduplicator.deduplicate_dataset().unwrap();
    assert_eq!(active_count(&session, "old"), 2);

    let deduplicator = delegate
        .new_deduplicator_for_dataset(session.clone(), &new)
        .unwrap();
    deduplicator.register_dataset().unwrap();
    deduplicator.add_dataset_data(vec![reading(5.0)]).unwrap();
    deduplicator.deduplicate_dataset().unwrap();

    assert_eq!(active_count(&session, "old"), 1);
    assert_eq!(active_count(&session, "new"), 1);

    let stored = session.get_dataset_data("new").unwrap();
    let descriptor = stored[0].base().deduplicator.clone().unwrap();
    assert_eq!(descriptor.name, HASH_DEACTIVATE_OLD_NAME);
    assert_eq!(descriptor.hash.len(), 64);
    assert_eq!(stored[0].base().user_id.as_deref(), Some("user"));
    assert_eq!(stored[0].base().upload_id.as_deref(), Some("new"));

    let closed = session.get_dataset("new").unwrap().unwrap();
    assert_eq!(closed.state, DatasetState::Closed);
}

#[test]
fn test_truncate_replaces_device_data() {
    let session = session();
    let delegate = delegate();

    let old = Dataset::new("user", "old")
        .with_device_id("DexG5_123")
        .with_device_manufacturers(["Medtronic"]);
    let new = Dataset::new("user", "new")
        .with_type(DatasetType::Continuous)
        .with_device_id("DexG5_123")
        .with_device_manufacturers(["Medtronic"]);
    for dataset in [&old, &new] {
        session.create_dataset(dataset).unwrap();
    }

    for (dataset, values) in [(&old, vec![1.0, 2.0, 3.0]), (&new, vec![4.0])] {
        let deduplicator = delegate
            .new_deduplicator_for_dataset(session.clone(), dataset)
            .unwrap();
        assert_eq!(deduplicator.name(), TRUNCATE_NAME);
        deduplicator.register_dataset().unwrap();
        deduplicator
            .add_dataset_data(values.into_iter().map(reading).collect())
            .unwrap();
        deduplicator.deduplicate_dataset().unwrap();
    }

    assert!(session.get_dataset_data("old").unwrap().is_empty());
    assert_eq!(active_count(&session, "new"), 1);

    // Continuous datasets stay open.
    let continuous = session.get_dataset("new").unwrap().unwrap();
    assert_eq!(continuous.state, DatasetState::Open);
}

#[test]
fn test_deleted_dataset_refuses_data() {
    let session = session();
    let dataset = Dataset::new("user", "upload").with_device_id("DexG5_123");
    session.create_dataset(&dataset).unwrap();

    let deduplicator = delegate()
        .new_deduplicator_for_dataset(session.clone(), &dataset)
        .unwrap();
    deduplicator.register_dataset().unwrap();
    deduplicator.add_dataset_data(vec![reading(5.0)]).unwrap();
    deduplicator.delete_dataset().unwrap();

    assert!(session.get_dataset_data("upload").unwrap().is_empty());
    assert!(matches!(
        deduplicator.add_dataset_data(vec![reading(6.0)]),
        Err(DataError::DatasetDeleted { .. })
    ));
}
