//! InMemoryEntityStore - HashMap-backed entity store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{EntityStore, StoreError, Versioned};
use crate::entity::Entity;

/// Internal stored representation of an entity.
struct StoredEntity {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory entity store backed by a HashMap.
///
/// Storage key is `"COLLECTION:id"`; values are JSON bytes, so reads always
/// hand out fresh copies. Clone-friendly via Arc.
#[derive(Clone)]
pub struct InMemoryEntityStore {
    storage: Arc<RwLock<HashMap<String, StoredEntity>>>,
}

impl Default for InMemoryEntityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryEntityStore {
    /// Create a new empty entity store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn make_key(collection: &str, id: &str) -> String {
        format!("{}:{}", collection, id)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, StoredEntity>>, StoreError> {
        self.storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, StoredEntity>>, StoreError> {
        self.storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))
    }

    /// Raw JSON bytes of a stored entity. Lets callers check that a record
    /// was left byte-for-byte untouched.
    pub fn raw<E: Entity>(&self, id: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let key = Self::make_key(E::COLLECTION, id);
        Ok(self.read()?.get(&key).map(|stored| stored.bytes.clone()))
    }

    /// Number of stored entities across all collections.
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }
}

impl EntityStore for InMemoryEntityStore {
    fn get_entity<E: Entity>(&self, id: &str) -> Result<Option<Versioned<E>>, StoreError> {
        let key = Self::make_key(E::COLLECTION, id);
        let storage = self.read()?;

        match storage.get(&key) {
            Some(stored) => {
                let data: E = serde_json::from_slice(&stored.bytes)?;
                Ok(Some(Versioned {
                    data,
                    version: stored.version,
                }))
            }
            None => Ok(None),
        }
    }

    fn insert_entity<E: Entity>(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        let key = Self::make_key(E::COLLECTION, entity.id());
        let bytes = serde_json::to_vec(entity)?;
        let mut storage = self.write()?;

        if storage.contains_key(&key) {
            return Err(StoreError::AlreadyExists {
                collection: E::COLLECTION.to_string(),
                id: entity.id().to_string(),
            });
        }

        storage.insert(key, StoredEntity { bytes, version: 1 });

        Ok(Versioned {
            data: entity.clone(),
            version: 1,
        })
    }

    fn replace_entity<E: Entity>(&self, entity: &E) -> Result<Versioned<E>, StoreError> {
        let key = Self::make_key(E::COLLECTION, entity.id());
        let bytes = serde_json::to_vec(entity)?;
        let mut storage = self.write()?;

        let stored = storage.get_mut(&key).ok_or_else(|| StoreError::NotFound {
            collection: E::COLLECTION.to_string(),
            id: entity.id().to_string(),
        })?;
        stored.bytes = bytes;
        stored.version += 1;

        Ok(Versioned {
            data: entity.clone(),
            version: stored.version,
        })
    }

    fn update_entity<E: Entity>(
        &self,
        entity: &E,
        expected_version: u64,
    ) -> Result<Versioned<E>, StoreError> {
        let key = Self::make_key(E::COLLECTION, entity.id());
        let bytes = serde_json::to_vec(entity)?;
        let mut storage = self.write()?;

        let stored = storage.get_mut(&key).ok_or_else(|| StoreError::NotFound {
            collection: E::COLLECTION.to_string(),
            id: entity.id().to_string(),
        })?;

        if stored.version != expected_version {
            return Err(StoreError::ConcurrencyConflict {
                collection: E::COLLECTION.to_string(),
                id: entity.id().to_string(),
                expected: expected_version,
                actual: stored.version,
            });
        }

        stored.bytes = bytes;
        stored.version += 1;

        Ok(Versioned {
            data: entity.clone(),
            version: stored.version,
        })
    }

    fn delete_entity<E: Entity>(&self, id: &str) -> Result<bool, StoreError> {
        let key = Self::make_key(E::COLLECTION, id);
        Ok(self.write()?.remove(&key).is_some())
    }

    fn find_entities<E: Entity>(
        &self,
        predicate: &dyn Fn(&E) -> bool,
    ) -> Result<Vec<Versioned<E>>, StoreError> {
        let storage = self.read()?;
        let prefix = format!("{}:", E::COLLECTION);
        let mut results = Vec::new();

        for (key, stored) in storage.iter() {
            if key.starts_with(&prefix) {
                if let Ok(data) = serde_json::from_slice::<E>(&stored.bytes) {
                    if predicate(&data) {
                        results.push(Versioned {
                            data,
                            version: stored.version,
                        });
                    }
                }
            }
        }

        Ok(results)
    }
}
