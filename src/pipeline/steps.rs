//! The individual pipeline steps. Each one turns every collaborator fault
//! into a `Failure` at the point where it happens.

use std::error::Error;

use crate::entity::Entity;
use crate::failure::CommonFailure;
use crate::outcome::{OperationOutcome, Outcome};
use crate::patch::MergePatch;
use crate::store::{EntitiesExt, EntityStore, Versioned};
use crate::{caused_failure, typed_failure};

/// Result of overlaying a patch.
pub(super) enum Overlaid<E> {
    /// The patched document equals the stored one.
    Unchanged,
    Changed(E),
}

/// A `kind` failure for entity `id` wrapping `cause`.
pub(super) fn fault<E, T, C>(cause: C, kind: CommonFailure, id: &str, reason: &str) -> OperationOutcome<T>
where
    E: Entity,
    C: Error + Send + Sync + 'static,
{
    match kind {
        CommonFailure::Generic => caused_failure!(
            cause,
            kind,
            "entity '{}' in {}: {}",
            id,
            E::COLLECTION,
            reason
        ),
        _ => caused_failure!(cause, kind, id, E::COLLECTION, reason),
    }
}

/// Fetch the current entity.
pub(super) fn locate<E, S>(store: &S, id: &str, kind: CommonFailure) -> OperationOutcome<Versioned<E>>
where
    E: Entity,
    S: EntityStore,
{
    match store.entities::<E>().get(id) {
        Ok(Some(found)) => Outcome::Success(found),
        Ok(None) => typed_failure!(CommonFailure::EntityNotFound, id, E::COLLECTION),
        Err(err) => fault::<E, _, _>(err, kind, id, "the stored entity could not be read"),
    }
}

/// Overlay `patch` onto `current` through its JSON form.
pub(super) fn overlay<E: Entity>(current: &E, patch: &MergePatch) -> OperationOutcome<Overlaid<E>> {
    let kind = CommonFailure::CannotPatch;
    let id = current.id();

    let before = match serde_json::to_value(current) {
        Ok(value) => value,
        Err(err) => {
            return fault::<E, _, _>(err, kind, id, "the stored entity could not be serialized")
        }
    };

    let after = patch.applied_to(&before);
    if after == before {
        return Outcome::Success(Overlaid::Unchanged);
    }

    let candidate: E = match serde_json::from_value(after) {
        Ok(candidate) => candidate,
        Err(err) => {
            let reason = format!("the patch does not fit the entity ({})", err);
            return fault::<E, _, _>(err, kind, id, &reason);
        }
    };

    if candidate.id() != id {
        let reason = format!("the identifier cannot change to '{}'", candidate.id());
        return typed_failure!(kind, id, E::COLLECTION, reason);
    }

    Outcome::Success(Overlaid::Changed(candidate))
}

/// Check the candidate's constraints before anything is written.
pub(super) fn validate<E: Entity>(candidate: E, kind: CommonFailure) -> OperationOutcome<E> {
    match candidate.validate() {
        Ok(()) => Outcome::Success(candidate),
        Err(violations) => {
            tracing::debug!(
                collection = E::COLLECTION,
                id = candidate.id(),
                fields = ?violations.fields(),
                "candidate rejected"
            );
            typed_failure!(kind, candidate.id(), E::COLLECTION, violations)
        }
    }
}

/// Write a new entity.
pub(super) fn insert<E, S>(store: &S, candidate: E) -> OperationOutcome<E>
where
    E: Entity,
    S: EntityStore,
{
    match store.entities::<E>().insert(&candidate) {
        Ok(written) => Outcome::Success(written.data),
        Err(err) => fault::<E, _, _>(
            err,
            CommonFailure::CannotCreate,
            candidate.id(),
            "the store rejected the insert",
        ),
    }
}

/// Overwrite an existing entity, version-checked when `expected_version` is set.
pub(super) fn persist<E, S>(
    store: &S,
    candidate: E,
    expected_version: Option<u64>,
    kind: CommonFailure,
) -> OperationOutcome<E>
where
    E: Entity,
    S: EntityStore,
{
    let entities = store.entities::<E>();
    let written = match expected_version {
        Some(version) => entities.update(&candidate, version),
        None => entities.replace(&candidate),
    };

    match written {
        Ok(written) => Outcome::Success(written.data),
        Err(err) => fault::<E, _, _>(err, kind, candidate.id(), "the store rejected the write"),
    }
}

/// Delete an entity.
pub(super) fn remove<E, S>(store: &S, id: &str) -> OperationOutcome<()>
where
    E: Entity,
    S: EntityStore,
{
    match store.entities::<E>().delete(id) {
        Ok(true) => Outcome::succeed_empty(),
        Ok(false) => typed_failure!(CommonFailure::EntityNotFound, id, E::COLLECTION),
        Err(err) => fault::<E, _, _>(
            err,
            CommonFailure::CannotDelete,
            id,
            "the store rejected the delete",
        ),
    }
}
