//! Three-way operation outcomes and an entity mutation pipeline built on
//! them.
//!
//! - [`outcome`]: `Success`, `Failure` and `PartialSuccess` with combinators.
//! - [`failure`]: failure kinds, `{}` templates and descriptors.
//! - [`patch`]: RFC 7386 JSON merge patches.
//! - [`entity`] and [`store`]: stored, self-validating entities.
//! - [`pipeline`]: `EntityService`, which turns every fault into a `Failure`.

extern crate self as outcome_rust;

pub mod entity;
pub mod failure;
pub mod lock;
pub mod outcome;
pub mod patch;
pub mod pipeline;
pub mod store;

pub use entity::{Audit, Change, Entity, Violation, Violations};
pub use failure::{
    ArityMismatch, Cause, CommonFailure, FailureDescriptor, FailureKind, FailureReport, Problem,
};
pub use lock::{InMemoryLock, InMemoryLockManager, Lock, LockError, LockGuard, LockManager};
pub use outcome::{gather, IllegalState, OperationOutcome, Outcome};
pub use patch::MergePatch;
pub use pipeline::{EntityService, ServiceConfig};
pub use store::{
    EntitiesExt, EntityRepository, EntityStore, InMemoryEntityStore, StoreError, Versioned,
};

// Derive macros share names with the traits; they live in the macro namespace.
#[cfg(feature = "derive")]
pub use outcome_rust_macros::{Entity, FailureKind};
