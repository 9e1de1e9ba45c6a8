//! Concurrent mutations of one entity.

use std::sync::Arc;
use std::thread;

use outcome_rust::{
    CommonFailure, EntitiesExt, EntityService, InMemoryEntityStore, MergePatch, ServiceConfig,
};
use serde_json::json;

use crate::support::{init_tracing, Customer};

const THREADS: usize = 8;
const PATCHES: usize = 5;

fn shared_service(config: ServiceConfig) -> Arc<EntityService<Customer, InMemoryEntityStore>> {
    init_tracing();
    let service = EntityService::new(InMemoryEntityStore::new()).with_config(config);
    service
        .create(Customer::with_id("c-1", "A", "Boston"))
        .into_value()
        .unwrap();
    Arc::new(service)
}

#[test]
fn locked_patches_never_conflict_under_version_checks() {
    let customers = shared_service(ServiceConfig {
        check_versions: true,
        ..ServiceConfig::default()
    });

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let customers = Arc::clone(&customers);
            thread::spawn(move || {
                (0..PATCHES)
                    .filter(|i| {
                        let city = format!("city-{}-{}", t, i);
                        customers
                            .patch("c-1", &MergePatch::new(json!({ "city": city })))
                            .is_success()
                    })
                    .count()
            })
        })
        .collect();

    let succeeded: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(succeeded, THREADS * PATCHES);

    let stored = customers.store().entities::<Customer>().get("c-1").unwrap().unwrap();
    assert_eq!(stored.version, 1 + (THREADS * PATCHES) as u64);
    assert_eq!(customers.locks().tracked().unwrap(), 0);
}

#[test]
fn version_check_without_locks_reports_conflicts_as_failures() {
    let customers = shared_service(ServiceConfig {
        check_versions: true,
        lock_entities: false,
        ..ServiceConfig::default()
    });

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let customers = Arc::clone(&customers);
            thread::spawn(move || {
                (0..PATCHES)
                    .map(|i| {
                        let city = format!("city-{}-{}", t, i);
                        customers.patch("c-1", &MergePatch::new(json!({ "city": city })))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let outcomes: Vec<_> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();

    // Every attempt either landed or failed as CannotPatch; nothing is lost silently.
    for outcome in outcomes.iter().filter(|o| o.is_failure()) {
        let failure = outcome.failure().unwrap();
        assert_eq!(failure.kind(), CommonFailure::CannotPatch);
        assert!(failure.cause().unwrap().to_string().contains("concurrency conflict"));
    }
    let stored = customers.store().entities::<Customer>().get("c-1").unwrap().unwrap();
    assert_eq!(stored.version, 1 + succeeded as u64);
}
