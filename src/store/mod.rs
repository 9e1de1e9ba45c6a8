//! Entity storage.
//!
//! `EntityStore` is the persistence seam the pipeline writes through. The
//! crate ships `InMemoryEntityStore`; other backends implement the same
//! trait.
//!
//! ```ignore
//! use outcome_rust::{EntitiesExt, InMemoryEntityStore};
//!
//! let store = InMemoryEntityStore::new();
//! store.entities::<Customer>().insert(&customer)?;
//! let loaded = store.entities::<Customer>().get("c-1")?;
//! ```

mod in_memory;
mod repository;

use thiserror::Error;

use crate::entity::Entity;

pub use in_memory::InMemoryEntityStore;
pub use repository::{EntitiesExt, EntityRepository};

/// A stored entity and its record version.
#[derive(Debug, Clone, PartialEq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Error type for entity store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Version check failed.
    #[error("concurrency conflict on {collection}:{id} (expected version {expected}, actual {actual})")]
    ConcurrencyConflict {
        collection: String,
        id: String,
        expected: u64,
        actual: u64,
    },
    /// Insert of an identifier that is already taken.
    #[error("entity already exists: {collection}:{id}")]
    AlreadyExists { collection: String, id: String },
    /// Entity not found where one was required.
    #[error("entity not found: {collection}:{id}")]
    NotFound { collection: String, id: String },
    /// Serialization/deserialization error.
    #[error("entity serialization error: {0}")]
    Serde(String),
    /// Storage-level error.
    #[error("entity storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}

/// Abstract CRUD storage for entities.
pub trait EntityStore: Send + Sync {
    /// Get an entity by ID. Returns None if not found.
    fn get_entity<E: Entity>(&self, id: &str) -> Result<Option<Versioned<E>>, StoreError>;

    /// Insert a new entity. Fails with `AlreadyExists` if the ID is taken.
    fn insert_entity<E: Entity>(&self, entity: &E) -> Result<Versioned<E>, StoreError>;

    /// Overwrite an existing entity, last writer wins. Fails with `NotFound`
    /// if it does not exist.
    fn replace_entity<E: Entity>(&self, entity: &E) -> Result<Versioned<E>, StoreError>;

    /// Overwrite an existing entity only if its stored version is
    /// `expected_version`.
    fn update_entity<E: Entity>(
        &self,
        entity: &E,
        expected_version: u64,
    ) -> Result<Versioned<E>, StoreError>;

    /// Delete an entity by ID. Returns true if it existed.
    fn delete_entity<E: Entity>(&self, id: &str) -> Result<bool, StoreError>;

    /// Find entities matching a predicate.
    fn find_entities<E: Entity>(
        &self,
        predicate: &dyn Fn(&E) -> bool,
    ) -> Result<Vec<Versioned<E>>, StoreError>;
}

impl<S: EntityStore> EntityStore for std::sync::Arc<S> {
    fn get_entity<E: Entity>(&self, id: &str) -> Result<Option<Versioned<E>>, StoreError> {
        (**self).get_entity(id)
    }

    fn insert_entity<E: Entity>(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        (**self).insert_entity(entity)
    }

    fn replace_entity<E: Entity>(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        (**self).replace_entity(entity)
    }

    fn update_entity<E: Entity>(
        &self,
        entity: &E,
        expected_version: u64,
    ) -> Result<Versioned<E>, StoreError> {
        (**self).update_entity(entity, expected_version)
    }

    fn delete_entity<E: Entity>(&self, id: &str) -> Result<bool, StoreError> {
        (**self).delete_entity::<E>(id)
    }

    fn find_entities<E: Entity>(
        &self,
        predicate: &dyn Fn(&E) -> bool,
    ) -> Result<Vec<Versioned<E>>, StoreError> {
        (**self).find_entities(predicate)
    }
}
