use std::fmt;

use super::template;

/// A closed vocabulary of failure categories.
///
/// Each kind has a stable title and a `{}` template used to build the detail
/// string of a [`FailureDescriptor`](super::FailureDescriptor). Implement it
/// by hand or with `#[derive(FailureKind)]`:
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq, FailureKind)]
/// enum BillingFailure {
///     #[failure(generic, title = "Billing failed")]
///     Generic,
///     #[failure(title = "Card declined", template = "card ending {} was declined: {}")]
///     CardDeclined,
/// }
/// ```
pub trait FailureKind: Copy + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// The catch-all member used by `Outcome::fail()` and friends.
    fn generic() -> Self
    where
        Self: Sized;

    /// Stable machine-readable name, e.g. `"EntityNotFound"`.
    fn name(&self) -> &'static str;

    /// Stable human-facing summary.
    fn title(&self) -> &'static str;

    /// Detail template with positional `{}` placeholders.
    fn template(&self) -> &'static str;

    /// Number of `{}` placeholders declared by the template.
    fn template_parameter_count(&self) -> usize {
        template::count_placeholders(self.template())
    }

    /// Substitute `args` into the template. Never fails; see
    /// [`format_template`](template::format_template).
    fn format_detail(&self, args: &[&dyn fmt::Display]) -> String {
        template::format_template(self.template(), args)
    }
}

/// A template/argument count disagreement observed while building a failure.
///
/// Mismatches are diagnostic only. The descriptor is still built with a
/// best-effort detail string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArityMismatch {
    pub kind: &'static str,
    pub expected: usize,
    pub supplied: usize,
}

impl ArityMismatch {
    /// Compare the declared placeholder count of `kind` with `supplied`.
    ///
    /// Kinds with zero placeholders never mismatch: their arguments follow
    /// the literal/ad-hoc template rules instead.
    pub fn check<K: FailureKind>(kind: &K, supplied: usize) -> Option<Self> {
        let expected = kind.template_parameter_count();
        if expected == 0 || expected == supplied {
            return None;
        }
        Some(ArityMismatch {
            kind: kind.name(),
            expected,
            supplied,
        })
    }
}

impl fmt::Display for ArityMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failure kind {} declares {} template parameter(s) but {} argument(s) were supplied",
            self.kind, self.expected, self.supplied
        )
    }
}
