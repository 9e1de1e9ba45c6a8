use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use outcome_rust::{
    Audit, Entity, EntityService, EntityStore, InMemoryEntityStore, StoreError, Versioned,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[entity(collection = "customers")]
pub struct Customer {
    pub id: String,
    #[entity(not_blank, max_len = 40)]
    pub name: String,
    pub city: Option<String>,
    #[serde(default)]
    pub visits: u32,
    #[entity(audit)]
    #[serde(default)]
    pub audit: Audit,
}

impl Customer {
    pub fn new(name: &str, city: &str) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            city: Some(city.to_string()),
            visits: 0,
            audit: Audit::default(),
        }
    }

    pub fn with_id(id: &str, name: &str, city: &str) -> Self {
        Self {
            id: id.to_string(),
            ..Self::new(name, city)
        }
    }
}

pub type Customers = EntityService<Customer, InMemoryEntityStore>;

pub fn customers() -> Customers {
    init_tracing();
    EntityService::new(InMemoryEntityStore::new())
}

pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Store whose reads or writes can be switched to fail.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: InMemoryEntityStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Storage("disk unavailable".into()));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Storage("disk full".into()));
        }
        Ok(())
    }
}

impl EntityStore for FaultyStore {
    fn get_entity<E: Entity>(&self, id: &str) -> Result<Option<Versioned<E>>, StoreError> {
        self.check_read()?;
        self.inner.get_entity(id)
    }

    fn insert_entity<E: Entity>(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        self.check_write()?;
        self.inner.insert_entity(entity)
    }

    fn replace_entity<E: Entity>(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        self.check_write()?;
        self.inner.replace_entity(entity)
    }

    fn update_entity<E: Entity>(
        &self,
        entity: &E,
        expected_version: u64,
    ) -> Result<Versioned<E>, StoreError> {
        self.check_write()?;
        self.inner.update_entity(entity, expected_version)
    }

    fn delete_entity<E: Entity>(&self, id: &str) -> Result<bool, StoreError> {
        self.check_write()?;
        self.inner.delete_entity::<E>(id)
    }

    fn find_entities<E: Entity>(
        &self,
        predicate: &dyn Fn(&E) -> bool,
    ) -> Result<Vec<Versioned<E>>, StoreError> {
        self.check_read()?;
        self.inner.find_entities(predicate)
    }
}
