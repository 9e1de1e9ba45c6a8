//! EntityRepository - Typed accessor for entity CRUD operations.

use std::marker::PhantomData;

use super::{EntityStore, StoreError, Versioned};
use crate::entity::Entity;

/// Typed repository wrapper for accessing entities of a specific type.
pub struct EntityRepository<'a, S, E> {
    store: &'a S,
    _marker: PhantomData<E>,
}

impl<'a, S: EntityStore, E: Entity> EntityRepository<'a, S, E> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Versioned<E>>, StoreError> {
        self.store.get_entity(id)
    }

    pub fn insert(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        self.store.insert_entity(entity)
    }

    pub fn replace(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        self.store.replace_entity(entity)
    }

    pub fn update(&self, entity: &E, expected_version: u64) -> Result<Versioned<E>, StoreError> {
        self.store.update_entity(entity, expected_version)
    }

    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete_entity::<E>(id)
    }

    pub fn find(&self, predicate: &dyn Fn(&E) -> bool) -> Result<Vec<Versioned<E>>, StoreError> {
        self.store.find_entities(predicate)
    }
}

/// Extension trait for typed entity access on any EntityStore.
pub trait EntitiesExt: EntityStore + Sized {
    /// Get a typed entity repository.
    fn entities<E: Entity>(&self) -> EntityRepository<'_, Self, E> {
        EntityRepository::new(self)
    }
}

impl<S: EntityStore> EntitiesExt for S {}
