use thiserror::Error;

/// A success-only operation was called on an outcome without a success value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal state: {operation} requires a success value, but the outcome is a failure ({failure})")]
pub struct IllegalState {
    pub operation: &'static str,
    pub failure: String,
}
