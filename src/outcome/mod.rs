//! Outcome: the result of a business operation.
//!
//! An [`Outcome`] is exactly one of:
//! - `Success(value)`,
//! - `Failure(problem)`,
//! - `PartialSuccess(problem, value)`: a usable value plus a non-fatal problem.
//!
//! Callers compose outcomes instead of unwinding:
//!
//! ```ignore
//! use outcome_rust::{typed_failure, CommonFailure, Outcome, OperationOutcome};
//!
//! fn load(id: &str) -> OperationOutcome<Customer> {
//!     match lookup(id) {
//!         Some(c) => Outcome::succeed(c),
//!         None => typed_failure!(CommonFailure::EntityNotFound, id, "customers"),
//!     }
//! }
//!
//! let greeting = load("c-1")
//!     .map(|c| format!("hello {}", c.name))
//!     .on_failure(|f| tracing::debug!(kind = f.kind_name(), "lookup failed"));
//! ```
//!
//! ## Combinators
//!
//! | operation            | Success      | Failure      | PartialSuccess |
//! |----------------------|--------------|--------------|----------------|
//! | `if_success`         | supplier     | unchanged    | supplier       |
//! | `if_success_with`    | transform    | unchanged    | transform      |
//! | `on_success`         | action       | no-op        | action         |
//! | `if_failure`         | unchanged    | supplier     | unchanged      |
//! | `if_failure_with`    | unchanged    | transform    | unchanged      |
//! | `on_failure`         | no-op        | action       | no-op          |
//! | `on`                 | success only | failure only | both           |

mod batch;
mod construct;
mod error;

pub use batch::gather;
pub use error::IllegalState;

use crate::failure::{CommonFailure, FailureDescriptor, Problem};

/// Outcome of an operation over `S`, failing with a [`FailureDescriptor`].
pub type OperationOutcome<S, K = CommonFailure> = Outcome<FailureDescriptor<K>, S>;

/// Sealed three-way result: success, failure, or partial success.
#[must_use = "an Outcome may be a Failure, which should be handled"]
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<F, S> {
    Success(S),
    Failure(F),
    PartialSuccess(F, S),
}

impl<F, S> Outcome<F, S> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn is_partial_success(&self) -> bool {
        matches!(self, Outcome::PartialSuccess(..))
    }

    /// True for `Success` and `PartialSuccess`.
    pub fn has_success_value(&self) -> bool {
        !self.is_failure()
    }

    /// True for `Failure` and `PartialSuccess`.
    pub fn has_failure_value(&self) -> bool {
        !self.is_success()
    }

    pub fn value(&self) -> Option<&S> {
        match self {
            Outcome::Success(value) | Outcome::PartialSuccess(_, value) => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&F> {
        match self {
            Outcome::Failure(failure) | Outcome::PartialSuccess(failure, _) => Some(failure),
            Outcome::Success(_) => None,
        }
    }

    pub fn into_parts(self) -> (Option<F>, Option<S>) {
        match self {
            Outcome::Success(value) => (None, Some(value)),
            Outcome::Failure(failure) => (Some(failure), None),
            Outcome::PartialSuccess(failure, value) => (Some(failure), Some(value)),
        }
    }

    /// Collapse into a `Result`. A partial success counts as `Ok`; its
    /// problem is dropped.
    pub fn into_result(self) -> Result<S, F> {
        match self {
            Outcome::Success(value) | Outcome::PartialSuccess(_, value) => Ok(value),
            Outcome::Failure(failure) => Err(failure),
        }
    }

    /// Continue with `supplier` when there is a success value.
    ///
    /// A `Failure` is passed through without calling `supplier`.
    pub fn if_success<T, G>(self, supplier: G) -> Outcome<F, T>
    where
        G: FnOnce() -> Outcome<F, T>,
    {
        match self {
            Outcome::Failure(failure) => Outcome::Failure(failure),
            Outcome::Success(_) | Outcome::PartialSuccess(..) => supplier(),
        }
    }

    /// Hand the whole outcome to `transform` when there is a success value.
    pub fn if_success_with<T, G>(self, transform: G) -> Outcome<F, T>
    where
        G: FnOnce(Self) -> Outcome<F, T>,
    {
        match self {
            Outcome::Failure(failure) => Outcome::Failure(failure),
            other => transform(other),
        }
    }

    /// Inspect the success value, if any.
    pub fn on_success<A>(&self, action: A) -> &Self
    where
        A: FnOnce(&S),
    {
        if let Some(value) = self.value() {
            action(value);
        }
        self
    }

    /// Recover with `supplier` from a pure `Failure`.
    ///
    /// `Success` and `PartialSuccess` are returned unchanged.
    pub fn if_failure<G>(self, supplier: G) -> Self
    where
        G: FnOnce() -> Self,
    {
        match self {
            Outcome::Failure(_) => supplier(),
            other => other,
        }
    }

    /// Hand a pure `Failure` to `transform`.
    pub fn if_failure_with<G>(self, transform: G) -> Self
    where
        G: FnOnce(Self) -> Self,
    {
        match self {
            failure @ Outcome::Failure(_) => transform(failure),
            other => other,
        }
    }

    /// Inspect a pure `Failure`. Not called for `PartialSuccess`.
    pub fn on_failure<A>(&self, action: A) -> &Self
    where
        A: FnOnce(&F),
    {
        if let Outcome::Failure(failure) = self {
            action(failure);
        }
        self
    }

    /// Inspect both sides. A `PartialSuccess` triggers both actions, success
    /// first.
    pub fn on<A, B>(&self, on_success: A, on_failure: B) -> &Self
    where
        A: FnOnce(&S),
        B: FnOnce(&F),
    {
        match self {
            Outcome::Success(value) => on_success(value),
            Outcome::Failure(failure) => on_failure(failure),
            Outcome::PartialSuccess(failure, value) => {
                on_success(value);
                on_failure(failure);
            }
        }
        self
    }

    pub fn map<T, G>(self, f: G) -> Outcome<F, T>
    where
        G: FnOnce(S) -> T,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(f(value)),
            Outcome::Failure(failure) => Outcome::Failure(failure),
            Outcome::PartialSuccess(failure, value) => Outcome::PartialSuccess(failure, f(value)),
        }
    }

    pub fn map_failure<E, G>(self, f: G) -> Outcome<E, S>
    where
        G: FnOnce(F) -> E,
    {
        match self {
            Outcome::Success(value) => Outcome::Success(value),
            Outcome::Failure(failure) => Outcome::Failure(f(failure)),
            Outcome::PartialSuccess(failure, value) => Outcome::PartialSuccess(f(failure), value),
        }
    }

    /// Flat-map over the success value.
    ///
    /// On a `PartialSuccess` the recorded problem survives a successful
    /// continuation; if the continuation fails or records its own problem,
    /// that outcome wins.
    pub fn and_then<T, G>(self, f: G) -> Outcome<F, T>
    where
        G: FnOnce(S) -> Outcome<F, T>,
    {
        match self {
            Outcome::Success(value) => f(value),
            Outcome::Failure(failure) => Outcome::Failure(failure),
            Outcome::PartialSuccess(failure, value) => match f(value) {
                Outcome::Success(next) => Outcome::PartialSuccess(failure, next),
                other => other,
            },
        }
    }
}

impl<F: Problem, S> Outcome<F, S> {
    /// Borrow the success value; a pure `Failure` is an illegal state.
    pub fn get(&self) -> Result<&S, IllegalState> {
        match self {
            Outcome::Success(value) | Outcome::PartialSuccess(_, value) => Ok(value),
            Outcome::Failure(failure) => Err(illegal_state("get", failure)),
        }
    }

    /// Take the success value; a pure `Failure` is an illegal state.
    pub fn into_value(self) -> Result<S, IllegalState> {
        match self {
            Outcome::Success(value) | Outcome::PartialSuccess(_, value) => Ok(value),
            Outcome::Failure(failure) => Err(illegal_state("into_value", &failure)),
        }
    }
}

fn illegal_state<F: Problem>(operation: &'static str, failure: &F) -> IllegalState {
    IllegalState {
        operation,
        failure: format!("{}: {}", failure.kind_name(), failure.detail()),
    }
}

impl<F, S> From<Result<S, F>> for Outcome<F, S> {
    fn from(result: Result<S, F>) -> Self {
        match result {
            Ok(value) => Outcome::Success(value),
            Err(failure) => Outcome::Failure(failure),
        }
    }
}
