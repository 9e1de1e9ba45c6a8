use super::Outcome;
use crate::failure::{FailureDescriptor, FailureKind};

/// Fold many outcomes into one.
///
/// - every item succeeded: `Success(values)`;
/// - some items failed: `PartialSuccess(summary, values of the rest)`;
/// - nothing succeeded: `Failure(summary)`.
///
/// The summary is a `kind` descriptor whose detail lists each failed item's
/// detail in input order. Problems recorded by partial items count as
/// failures in the summary, while their values are kept.
pub fn gather<K, S, I>(outcomes: I, kind: K) -> Outcome<FailureDescriptor<K>, Vec<S>>
where
    K: FailureKind,
    I: IntoIterator<Item = Outcome<FailureDescriptor<K>, S>>,
{
    let mut values = Vec::new();
    let mut problems = Vec::new();
    let mut total = 0usize;

    for outcome in outcomes {
        total += 1;
        let (problem, value) = outcome.into_parts();
        if let Some(problem) = problem {
            problems.push(problem);
        }
        if let Some(value) = value {
            values.push(value);
        }
    }

    if problems.is_empty() {
        return Outcome::Success(values);
    }

    let listed = problems
        .iter()
        .map(|p| {
            if p.detail().is_empty() {
                p.title().to_string()
            } else {
                p.detail().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("; ");
    let summary = FailureDescriptor::with_detail(
        kind,
        format!("{} of {} item(s) failed: {}", problems.len(), total, listed),
    );

    tracing::debug!(
        kind = kind.name(),
        failed = problems.len(),
        total,
        "gathered outcomes with failures"
    );

    if values.is_empty() {
        Outcome::Failure(summary)
    } else {
        Outcome::PartialSuccess(summary, values)
    }
}
