//! Failure vocabulary: kinds, templates and descriptors.
//!
//! A [`FailureKind`] names a category of failure and carries a title plus a
//! `{}` template. A [`FailureDescriptor`] is one concrete failure of that
//! kind: the expanded detail string and, optionally, the fault it wraps.
//!
//! ```ignore
//! use outcome_rust::{CommonFailure, FailureDescriptor};
//!
//! let missing: FailureDescriptor =
//!     FailureDescriptor::new(CommonFailure::EntityNotFound, &[&"c-1", &"customers"]);
//! assert_eq!(missing.detail(), "entity 'c-1' was not found in customers");
//! ```

mod common;
mod descriptor;
mod kind;
mod report;
pub mod template;

use std::error::Error;

pub use common::CommonFailure;
pub use descriptor::{Cause, FailureDescriptor};
pub use kind::{ArityMismatch, FailureKind};
pub use report::FailureReport;

/// Anything an `Outcome` can carry as its failure payload.
pub trait Problem {
    /// Machine-readable kind name callers branch on.
    fn kind_name(&self) -> &'static str;

    fn title(&self) -> &str;

    fn detail(&self) -> &str;

    /// Diagnostic only. Never required for correct caller behaviour.
    fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)>;

    fn report(&self, trace_id: impl Into<String>) -> FailureReport
    where
        Self: Sized,
    {
        FailureReport::from_problem(self, trace_id)
    }
}

impl<K: FailureKind> Problem for FailureDescriptor<K> {
    fn kind_name(&self) -> &'static str {
        self.kind().name()
    }

    fn title(&self) -> &str {
        FailureDescriptor::title(self)
    }

    fn detail(&self) -> &str {
        FailureDescriptor::detail(self)
    }

    fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        FailureDescriptor::cause(self)
    }
}
