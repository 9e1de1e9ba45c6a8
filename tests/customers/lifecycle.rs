//! Create, find, update and delete.

use outcome_rust::{
    CommonFailure, Entity, EntityService, FailureKind, InMemoryEntityStore, Outcome, Problem,
    ServiceConfig,
};

use crate::support::{customers, Customer};

#[test]
fn create_assigns_id_and_stamps_audit() {
    let customers = customers();

    let created = customers.create(Customer::new("A", "Boston"));

    assert!(created.is_success());
    let customer = created.get().unwrap();
    assert!(!customer.id.is_empty());
    assert!(customer.audit.created_at.is_some());
    assert_eq!(customer.audit.created_at, customer.audit.modified_at);

    let found = customers.find(&customer.id);
    assert_eq!(found.get().unwrap(), customer);
}

#[test]
fn create_keeps_caller_id() {
    let customers = customers();

    let created = customers.create(Customer::with_id("c-1", "A", "Boston"));

    assert_eq!(created.get().unwrap().id, "c-1");
}

#[test]
fn create_rejects_invalid_entity_without_writing() {
    let customers = customers();

    let created = customers.create(Customer::with_id("c-1", "   ", "Boston"));

    let failure = created.failure().unwrap();
    assert_eq!(failure.kind(), CommonFailure::CannotCreate);
    assert_eq!(failure.title(), "Cannot create entity");
    assert!(failure.detail().contains("name must not be blank"));
    assert!(!failure.has_cause());
    assert!(customers.store().is_empty().unwrap());
}

#[test]
fn create_without_id_fails_when_ids_are_not_assigned() {
    let customers = customers().with_config(ServiceConfig {
        assign_missing_ids: false,
        ..ServiceConfig::default()
    });

    let created = customers.create(Customer::new("A", "Boston"));

    assert_eq!(created.failure().unwrap().kind(), CommonFailure::CannotCreate);
    assert!(customers.store().is_empty().unwrap());
}

#[test]
fn create_duplicate_id_fails_with_store_cause() {
    let customers = customers();
    assert!(customers.create(Customer::with_id("c-1", "A", "Boston")).is_success());

    let duplicate = customers.create(Customer::with_id("c-1", "B", "Denver"));

    let failure = duplicate.failure().unwrap();
    assert_eq!(failure.kind(), CommonFailure::CannotCreate);
    assert!(failure.cause().unwrap().to_string().contains("already exists"));
    assert_eq!(customers.find("c-1").get().unwrap().name, "A");
}

#[test]
fn create_all_reports_partial_success() {
    let customers = customers();

    let outcome = customers.create_all(vec![
        Customer::with_id("c-1", "A", "Boston"),
        Customer::with_id("c-2", "", "Denver"),
        Customer::with_id("c-3", "C", "Austin"),
    ]);

    assert!(outcome.is_partial_success());
    let created: Vec<_> = outcome.value().unwrap().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(created, vec!["c-1", "c-3"]);
    let failure = outcome.failure().unwrap();
    assert_eq!(failure.kind(), CommonFailure::CannotCreate);
    assert!(failure.detail().starts_with("1 of 3 item(s) failed"));
}

#[test]
fn create_all_succeeds_when_every_item_does() {
    let customers = customers();

    let outcome = customers.create_all(vec![
        Customer::with_id("c-1", "A", "Boston"),
        Customer::with_id("c-2", "B", "Denver"),
    ]);

    assert!(outcome.is_success());
    assert_eq!(outcome.value().unwrap().len(), 2);
}

#[test]
fn find_missing_is_entity_not_found() {
    let customers = customers();

    let found = customers.find("nope");

    let failure = found.failure().unwrap();
    assert_eq!(failure.kind_name(), "EntityNotFound");
    assert_eq!(failure.detail(), "entity 'nope' was not found in customers");
    assert!(found.get().is_err());
}

#[test]
fn update_replaces_and_restamps() {
    let customers = customers();
    let created = customers
        .create(Customer::with_id("c-1", "A", "Boston"))
        .into_value()
        .unwrap();

    let mut changed = created.clone();
    changed.visits = 3;
    let updated = customers.update(changed).into_value().unwrap();

    assert_eq!(updated.visits, 3);
    assert_eq!(updated.audit.created_at, created.audit.created_at);
    assert!(updated.audit.modified_at >= created.audit.modified_at);
    assert_eq!(customers.find("c-1").get().unwrap().visits, 3);
}

#[test]
fn update_missing_is_entity_not_found() {
    let customers = customers();

    let updated = customers.update(Customer::with_id("ghost", "A", "Boston"));

    assert_eq!(updated.failure().unwrap().kind(), CommonFailure::EntityNotFound);
    assert!(customers.store().is_empty().unwrap());
}

#[test]
fn update_rejects_invalid_entity() {
    let customers = customers();
    customers
        .create(Customer::with_id("c-1", "A", "Boston"))
        .into_value()
        .unwrap();
    let before = customers.store().raw::<Customer>("c-1").unwrap();

    let updated = customers.update(Customer::with_id("c-1", &"x".repeat(41), "Boston"));

    let failure = updated.failure().unwrap();
    assert_eq!(failure.kind(), CommonFailure::CannotUpdate);
    assert!(failure.detail().contains("name must be at most 40 characters"));
    assert_eq!(customers.store().raw::<Customer>("c-1").unwrap(), before);
}

#[test]
fn delete_then_find_fails() {
    let customers = customers();
    customers
        .create(Customer::with_id("c-1", "A", "Boston"))
        .into_value()
        .unwrap();

    assert_eq!(customers.delete("c-1"), Outcome::Success(()));
    assert_eq!(customers.find("c-1").failure().unwrap().kind(), CommonFailure::EntityNotFound);

    let again = customers.delete("c-1");
    assert_eq!(again.failure().unwrap().kind(), CommonFailure::EntityNotFound);
}

#[test]
fn stamping_can_be_switched_off() {
    let customers = customers().with_config(ServiceConfig {
        stamp_changes: false,
        ..ServiceConfig::default()
    });

    let created = customers
        .create(Customer::with_id("c-1", "A", "Boston"))
        .into_value()
        .unwrap();

    assert_eq!(created.audit.created_at, None);
}

#[test]
fn service_config_loads_from_json() {
    let config = ServiceConfig::from_json(r#"{ "lock_entities": false }"#).unwrap();
    let customers: EntityService<Customer, _> =
        EntityService::new(InMemoryEntityStore::new()).with_config(config);

    assert!(!customers.config().lock_entities);
    assert!(customers.create(Customer::with_id("c-1", "A", "Boston")).is_success());
}

#[test]
fn derived_entity_uses_declared_collection() {
    assert_eq!(Customer::COLLECTION, "customers");
    assert_eq!(CommonFailure::generic(), CommonFailure::Generic);
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, Entity)]
struct LoyaltyCard {
    #[entity(not_blank)]
    holder: String,
    #[entity(min_len = 4)]
    number: String,
    id: String,
}

#[test]
fn derived_entity_defaults_collection_and_finds_id_after_checked_fields() {
    assert_eq!(LoyaltyCard::COLLECTION, "loyalty_cards");

    let mut card = LoyaltyCard {
        holder: " ".to_string(),
        number: "12".to_string(),
        id: String::new(),
    };
    card.set_id("card-1".to_string());
    assert_eq!(card.id(), "card-1");

    let violations = card.validate().unwrap_err();
    assert_eq!(violations.len(), 2);
}
