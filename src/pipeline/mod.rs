//! EntityService: create, update, patch and delete through the outcome
//! algebra.
//!
//! Every operation runs a fixed sequence of steps and stops at the first
//! failure. For `patch`:
//!
//! 1. **locate** the stored entity (`EntityNotFound` if absent);
//! 2. **overlay** the merge patch on its JSON form (`CannotPatch` with the
//!    serde error as cause if the result no longer fits the type);
//! 3. **validate** the candidate (`CannotPatch` listing violated fields);
//! 4. **persist** it (`CannotPatch` with the store error as cause).
//!
//! Nothing is written unless every earlier step succeeded, so a rejected
//! patch leaves the stored entity untouched.
//!
//! ## Example
//!
//! ```ignore
//! use outcome_rust::{EntityService, InMemoryEntityStore, MergePatch};
//! use serde_json::json;
//!
//! let customers = EntityService::<Customer, _>::new(InMemoryEntityStore::new());
//!
//! let created = customers.create(Customer::new("A", "Boston"));
//! let id = created.get()?.id.clone();
//!
//! customers
//!     .patch(&id, &MergePatch::new(json!({ "city": null })))
//!     .on_failure(|f| eprintln!("{}", f));
//! ```

mod config;
mod steps;

use std::marker::PhantomData;

use crate::entity::{Change, Entity};
use crate::failure::{CommonFailure, Problem};
use crate::lock::{self, InMemoryLockManager, LockManager};
use crate::outcome::{gather, OperationOutcome, Outcome};
use crate::patch::MergePatch;
use crate::store::EntityStore;
use crate::typed_failure;

pub use config::ServiceConfig;

use steps::Overlaid;

/// Mutation pipeline for one entity type over one store.
pub struct EntityService<E, S, L = InMemoryLockManager> {
    store: S,
    locks: L,
    config: ServiceConfig,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity, S: EntityStore> EntityService<E, S, InMemoryLockManager> {
    /// A service with in-memory entity locks and the default config.
    pub fn new(store: S) -> Self {
        Self::with_locks(store, InMemoryLockManager::new())
    }
}

impl<E: Entity, S: EntityStore, L: LockManager> EntityService<E, S, L> {
    pub fn with_locks(store: S, locks: L) -> Self {
        Self {
            store,
            locks,
            config: ServiceConfig::default(),
            _entity: PhantomData,
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn locks(&self) -> &L {
        &self.locks
    }

    /// Fetch an entity by id.
    #[tracing::instrument(level = "debug", skip(self), fields(collection = E::COLLECTION))]
    pub fn find(&self, id: &str) -> OperationOutcome<E> {
        let outcome = steps::locate::<E, S>(&self.store, id, CommonFailure::Generic)
            .map(|found| found.data);
        trace_outcome("find", &outcome);
        outcome
    }

    /// Validate and insert a new entity.
    ///
    /// A blank id is replaced with a v4 UUID unless
    /// `ServiceConfig::assign_missing_ids` is off, in which case it fails
    /// with `CannotCreate`.
    #[tracing::instrument(level = "debug", skip_all, fields(collection = E::COLLECTION))]
    pub fn create(&self, prototype: E) -> OperationOutcome<E> {
        let kind = CommonFailure::CannotCreate;
        let mut candidate = prototype;

        if candidate.id().trim().is_empty() {
            if !self.config.assign_missing_ids {
                let outcome = typed_failure!(kind, "", E::COLLECTION, "an identifier is required");
                trace_outcome("create", &outcome);
                return outcome;
            }
            candidate.set_id(uuid::Uuid::new_v4().to_string());
        }

        let id = candidate.id().to_string();
        let outcome = self.locked(&id, kind, || {
            steps::validate(candidate, kind)
                .map(|valid| self.stamp(valid, Change::created_now()))
                .and_then(|valid| steps::insert(&self.store, valid))
        });
        trace_outcome("create", &outcome);
        outcome
    }

    /// Create every prototype independently.
    ///
    /// Yields `Success` when all were created, `PartialSuccess` with the
    /// created entities when some failed, and `Failure` when none were.
    pub fn create_all<I>(&self, prototypes: I) -> OperationOutcome<Vec<E>>
    where
        I: IntoIterator<Item = E>,
    {
        gather(
            prototypes.into_iter().map(|prototype| self.create(prototype)),
            CommonFailure::CannotCreate,
        )
    }

    /// Replace a stored entity wholesale.
    #[tracing::instrument(level = "debug", skip_all, fields(collection = E::COLLECTION))]
    pub fn update(&self, entity: E) -> OperationOutcome<E> {
        let kind = CommonFailure::CannotUpdate;
        let id = entity.id().to_string();

        let outcome = self.locked(&id, kind, || {
            steps::locate::<E, S>(&self.store, &id, kind).and_then(|current| {
                steps::validate(entity, kind)
                    .map(|valid| self.stamp(valid, Change::modified_now()))
                    .and_then(|valid| {
                        steps::persist(&self.store, valid, self.expected(current.version), kind)
                    })
            })
        });
        trace_outcome("update", &outcome);
        outcome
    }

    /// Apply an RFC 7386 merge patch to a stored entity.
    ///
    /// A patch that changes nothing returns the stored entity without
    /// writing it.
    #[tracing::instrument(level = "debug", skip(self, patch), fields(collection = E::COLLECTION))]
    pub fn patch(&self, id: &str, patch: &MergePatch) -> OperationOutcome<E> {
        let kind = CommonFailure::CannotPatch;

        let outcome = self.locked(id, kind, || {
            steps::locate::<E, S>(&self.store, id, kind).and_then(|current| {
                let version = current.version;
                steps::overlay(&current.data, patch).and_then(|overlaid| match overlaid {
                    Overlaid::Unchanged => {
                        tracing::debug!("patch changes nothing");
                        Outcome::Success(current.data)
                    }
                    Overlaid::Changed(candidate) => steps::validate(candidate, kind)
                        .map(|valid| self.stamp(valid, Change::modified_now()))
                        .and_then(|valid| {
                            steps::persist(&self.store, valid, self.expected(version), kind)
                        }),
                })
            })
        });
        trace_outcome("patch", &outcome);
        outcome
    }

    /// Delete a stored entity.
    #[tracing::instrument(level = "debug", skip(self), fields(collection = E::COLLECTION))]
    pub fn delete(&self, id: &str) -> OperationOutcome<()> {
        let outcome = self.locked(id, CommonFailure::CannotDelete, || {
            steps::remove::<E, S>(&self.store, id)
        });
        trace_outcome("delete", &outcome);
        outcome
    }

    /// Run `critical` while holding the entity's lock, then drop the lock
    /// entry if no other operation is waiting on it.
    fn locked<T, F>(&self, id: &str, kind: CommonFailure, critical: F) -> OperationOutcome<T>
    where
        F: FnOnce() -> OperationOutcome<T>,
    {
        if !self.config.lock_entities {
            return critical();
        }

        let key = lock::entity_key(E::COLLECTION, id);
        let guard = match self.locks.acquire(&key) {
            Ok(guard) => guard,
            Err(err) => {
                return steps::fault::<E, _, _>(err, kind, id, "the entity lock is unavailable")
            }
        };
        let outcome = critical();
        drop(guard);

        if let Err(err) = self.locks.release_idle(&key) {
            tracing::warn!(key = %key, error = %err, "failed to release idle entity lock");
        }
        outcome
    }

    fn stamp(&self, mut entity: E, change: Change) -> E {
        if self.config.stamp_changes {
            entity.record_change(change);
        }
        entity
    }

    fn expected(&self, version: u64) -> Option<u64> {
        self.config.check_versions.then_some(version)
    }
}

fn trace_outcome<T>(operation: &'static str, outcome: &OperationOutcome<T>) {
    outcome.on(
        |_| tracing::debug!(operation, "succeeded"),
        |failure| {
            if failure.cause().is_some() {
                tracing::warn!(
                    operation,
                    kind = failure.kind_name(),
                    detail = failure.detail(),
                    "failed with cause"
                );
            } else {
                tracing::debug!(operation, kind = failure.kind_name(), detail = failure.detail(), "failed");
            }
        },
    );
}
