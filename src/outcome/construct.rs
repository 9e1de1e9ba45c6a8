//! Factory surface for building outcomes.
//!
//! Call sites use these instead of naming variants, so the descriptor rules
//! live in one place. The macros accept any mix of `Display` arguments:
//!
//! ```ignore
//! let missing: OperationOutcome<Customer> =
//!     typed_failure!(CommonFailure::EntityNotFound, id, Customer::COLLECTION);
//! let skipped: OperationOutcome<()> = fail_with_detail!("{} rows skipped", 3);
//! ```

use std::error::Error;
use std::fmt;

use super::Outcome;
use crate::failure::{FailureDescriptor, FailureKind};

impl<F, S> Outcome<F, S> {
    pub fn succeed(value: S) -> Self {
        Outcome::Success(value)
    }

    /// A usable value plus a non-fatal problem.
    pub fn partial_succeed(failure: F, value: S) -> Self {
        Outcome::PartialSuccess(failure, value)
    }
}

impl<F> Outcome<F, ()> {
    /// Success with no value.
    pub fn succeed_empty() -> Self {
        Outcome::Success(())
    }
}

impl<K: FailureKind, S> Outcome<FailureDescriptor<K>, S> {
    /// Failure of the generic kind with an empty detail.
    pub fn fail() -> Self {
        Outcome::Failure(FailureDescriptor::generic())
    }

    /// Failure of the generic kind with an ad-hoc templated detail.
    pub fn fail_with_detail(template: &str, args: &[&dyn fmt::Display]) -> Self {
        Outcome::Failure(FailureDescriptor::ad_hoc(template, args))
    }

    /// Failure of `kind`, detail built by the descriptor rules.
    pub fn typed_failure(kind: K, args: &[&dyn fmt::Display]) -> Self {
        Outcome::Failure(FailureDescriptor::new(kind, args))
    }

    /// Like [`typed_failure`](Self::typed_failure), wrapping `cause`.
    pub fn caused_failure<E>(cause: E, kind: K, args: &[&dyn fmt::Display]) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Outcome::Failure(FailureDescriptor::new(kind, args).with_cause(cause))
    }

    /// Failure of the generic kind described by `cause` itself.
    pub fn from_cause<E>(cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Outcome::Failure(FailureDescriptor::from_cause(cause))
    }
}

/// Build an `Outcome::Failure` of the generic kind with an ad-hoc template.
#[macro_export]
macro_rules! fail_with_detail {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::Outcome::fail_with_detail(
            $template,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Build an `Outcome::Failure` of a given kind.
#[macro_export]
macro_rules! typed_failure {
    ($kind:expr $(, $arg:expr)* $(,)?) => {
        $crate::Outcome::typed_failure(
            $kind,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}

/// Build an `Outcome::Failure` of a given kind that wraps a cause.
#[macro_export]
macro_rules! caused_failure {
    ($cause:expr, $kind:expr $(, $arg:expr)* $(,)?) => {
        $crate::Outcome::caused_failure(
            $cause,
            $kind,
            &[$(&$arg as &dyn ::std::fmt::Display),*],
        )
    };
}
