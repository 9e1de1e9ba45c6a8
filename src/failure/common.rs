use serde::{Deserialize, Serialize};

use super::FailureKind;

/// Failure kinds shared by every entity operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CommonFailure {
    /// Catch-all. Its template is empty, so the detail is whatever the
    /// caller passes.
    Generic,
    EntityNotFound,
    CannotCreate,
    CannotUpdate,
    CannotPatch,
    CannotDelete,
}

impl CommonFailure {
    pub const ALL: [CommonFailure; 6] = [
        CommonFailure::Generic,
        CommonFailure::EntityNotFound,
        CommonFailure::CannotCreate,
        CommonFailure::CannotUpdate,
        CommonFailure::CannotPatch,
        CommonFailure::CannotDelete,
    ];
}

impl FailureKind for CommonFailure {
    fn generic() -> Self {
        CommonFailure::Generic
    }

    fn name(&self) -> &'static str {
        match self {
            CommonFailure::Generic => "Generic",
            CommonFailure::EntityNotFound => "EntityNotFound",
            CommonFailure::CannotCreate => "CannotCreate",
            CommonFailure::CannotUpdate => "CannotUpdate",
            CommonFailure::CannotPatch => "CannotPatch",
            CommonFailure::CannotDelete => "CannotDelete",
        }
    }

    fn title(&self) -> &'static str {
        match self {
            CommonFailure::Generic => "Operation failed",
            CommonFailure::EntityNotFound => "Entity not found",
            CommonFailure::CannotCreate => "Cannot create entity",
            CommonFailure::CannotUpdate => "Cannot update entity",
            CommonFailure::CannotPatch => "Cannot patch entity",
            CommonFailure::CannotDelete => "Cannot delete entity",
        }
    }

    // Argument order: id, collection, reason.
    fn template(&self) -> &'static str {
        match self {
            CommonFailure::Generic => "",
            CommonFailure::EntityNotFound => "entity '{}' was not found in {}",
            CommonFailure::CannotCreate => "entity '{}' could not be created in {}: {}",
            CommonFailure::CannotUpdate => "entity '{}' could not be updated in {}: {}",
            CommonFailure::CannotPatch => "entity '{}' could not be patched in {}: {}",
            CommonFailure::CannotDelete => "entity '{}' could not be deleted from {}: {}",
        }
    }
}
