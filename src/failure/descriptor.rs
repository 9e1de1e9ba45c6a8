use std::error::Error;
use std::fmt;
use std::sync::Arc;

use super::kind::ArityMismatch;
use super::{template, CommonFailure, FailureKind};

/// Shared handle to the lower-level fault a failure wraps.
pub type Cause = Arc<dyn Error + Send + Sync + 'static>;

/// The concrete payload carried by `Outcome::Failure` and
/// `Outcome::PartialSuccess`.
///
/// Immutable once built: the `with_*` methods consume and return a new value.
#[derive(Clone)]
pub struct FailureDescriptor<K = CommonFailure> {
    kind: K,
    title: String,
    detail: String,
    cause: Option<Cause>,
}

impl<K: FailureKind> FailureDescriptor<K> {
    /// Build a descriptor for `kind`, expanding `args` into the detail.
    ///
    /// Rules, in order:
    /// - The kind declares no placeholders:
    ///   - no args: the template itself is the detail;
    ///   - one arg: that arg is the detail, verbatim;
    ///   - more args: the first arg is an ad-hoc template for the rest.
    /// - Otherwise the args fill the kind's template. A count mismatch is
    ///   logged and the best-effort string is kept.
    pub fn new(kind: K, args: &[&dyn fmt::Display]) -> Self {
        let detail = expand_detail(&kind, args);
        Self::with_detail(kind, detail)
    }

    /// Build a descriptor from an already expanded detail string.
    pub fn with_detail(kind: K, detail: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            detail: detail.into(),
            cause: None,
        }
    }

    /// The generic kind with an empty detail.
    pub fn generic() -> Self {
        Self::new(K::generic(), &[])
    }

    /// The generic kind with `template` expanded by `args`.
    pub fn ad_hoc(template: &str, args: &[&dyn fmt::Display]) -> Self {
        Self::with_detail(K::generic(), template::format_template(template, args))
    }

    /// The generic kind, described by the cause's own message.
    pub fn from_cause<E>(cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        let detail = cause.to_string();
        Self::with_detail(K::generic(), detail).with_cause(cause)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Attach the fault this failure wraps.
    pub fn with_cause<E>(self, cause: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        self.with_shared_cause(Arc::new(cause))
    }

    pub fn with_boxed_cause(self, cause: Box<dyn Error + Send + Sync + 'static>) -> Self {
        self.with_shared_cause(Arc::from(cause))
    }

    pub fn with_shared_cause(mut self, cause: Cause) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn kind(&self) -> K {
        self.kind
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }

    pub fn cause(&self) -> Option<&(dyn Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    pub fn shared_cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    pub fn has_cause(&self) -> bool {
        self.cause.is_some()
    }
}

fn expand_detail<K: FailureKind>(kind: &K, args: &[&dyn fmt::Display]) -> String {
    if kind.template_parameter_count() == 0 {
        return match args {
            [] => kind.template().to_string(),
            [literal] => literal.to_string(),
            [ad_hoc, rest @ ..] => template::format_template(&ad_hoc.to_string(), rest),
        };
    }

    if let Some(mismatch) = ArityMismatch::check(kind, args.len()) {
        tracing::warn!(
            kind = mismatch.kind,
            expected = mismatch.expected,
            supplied = mismatch.supplied,
            "failure template arity mismatch"
        );
    }
    kind.format_detail(args)
}

impl<K: FailureKind> fmt::Display for FailureDescriptor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.title)
        } else {
            write!(f, "{}: {}", self.title, self.detail)
        }
    }
}

impl<K: FailureKind> fmt::Debug for FailureDescriptor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FailureDescriptor")
            .field("kind", &self.kind)
            .field("title", &self.title)
            .field("detail", &self.detail)
            .field("cause", &self.cause.as_ref().map(|c| c.to_string()))
            .finish()
    }
}

/// Causes compare by message; two descriptors wrapping equal-looking faults
/// are equal.
impl<K: FailureKind> PartialEq for FailureDescriptor<K> {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
            && self.title == other.title
            && self.detail == other.detail
            && self.cause.as_ref().map(|c| c.to_string())
                == other.cause.as_ref().map(|c| c.to_string())
    }
}

impl<K: FailureKind> Error for FailureDescriptor<K> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.cause.as_deref().map(|c| c as &(dyn Error + 'static))
    }
}
