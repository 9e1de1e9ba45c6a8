//! Field-level constraint checking for entities.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Every constraint an entity failed, in check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("constraint violations: {}", join(.0))]
pub struct Violations(Vec<Violation>);

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(Violation::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(Violation {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Violated field names, deduplicated, in first-seen order.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for violation in &self.0 {
            if !fields.contains(&violation.field.as_str()) {
                fields.push(&violation.field);
            }
        }
        fields
    }

    /// `Ok(())` when nothing was violated.
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Text-like field values the built-in constraints understand.
///
/// An absent optional value is blank and has no length.
pub trait Text {
    fn is_blank(&self) -> bool;

    /// Length in chars, `None` when absent.
    fn char_len(&self) -> Option<usize>;
}

impl Text for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }

    fn char_len(&self) -> Option<usize> {
        Some(self.chars().count())
    }
}

impl Text for String {
    fn is_blank(&self) -> bool {
        self.as_str().is_blank()
    }

    fn char_len(&self) -> Option<usize> {
        self.as_str().char_len()
    }
}

impl<T: Text> Text for Option<T> {
    fn is_blank(&self) -> bool {
        self.as_ref().map_or(true, Text::is_blank)
    }

    fn char_len(&self) -> Option<usize> {
        self.as_ref().and_then(Text::char_len)
    }
}

/// Record a violation when `value` is blank.
pub fn check_not_blank<T: Text + ?Sized>(violations: &mut Violations, field: &str, value: &T) {
    if value.is_blank() {
        violations.push(field, "must not be blank");
    }
}

/// Record a violation when `value` is shorter than `min` chars. Absent
/// values are not checked.
pub fn check_min_len<T: Text + ?Sized>(
    violations: &mut Violations,
    field: &str,
    value: &T,
    min: usize,
) {
    if let Some(len) = value.char_len() {
        if len < min {
            violations.push(field, format!("must be at least {} characters", min));
        }
    }
}

/// Record a violation when `value` is longer than `max` chars. Absent values
/// are not checked.
pub fn check_max_len<T: Text + ?Sized>(
    violations: &mut Violations,
    field: &str,
    value: &T,
    max: usize,
) {
    if let Some(len) = value.char_len() {
        if len > max {
            violations.push(field, format!("must be at most {} characters", max));
        }
    }
}
