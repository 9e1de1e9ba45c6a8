//! Wire shape of a failure, handed to whatever transport sits on top.

use serde::{Deserialize, Serialize};

use super::Problem;

/// Transport-neutral rendering of a failure.
///
/// The cause itself never leaves the process; only its presence does.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureReport {
    pub title: String,
    pub detail: String,
    pub kind: String,
    #[serde(rename = "trace-id")]
    pub trace_id: String,
    #[serde(rename = "cause-present")]
    pub cause_present: bool,
}

impl FailureReport {
    pub fn from_problem<P: Problem + ?Sized>(problem: &P, trace_id: impl Into<String>) -> Self {
        Self {
            title: problem.title().to_string(),
            detail: problem.detail().to_string(),
            kind: problem.kind_name().to_string(),
            trace_id: trace_id.into(),
            cause_present: problem.cause().is_some(),
        }
    }

    /// Same as [`from_problem`](Self::from_problem) with a fresh v4 trace id.
    pub fn untraced<P: Problem + ?Sized>(problem: &P) -> Self {
        Self::from_problem(problem, uuid::Uuid::new_v4().to_string())
    }
}
