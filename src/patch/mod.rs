//! JSON Merge Patch (RFC 7386).
//!
//! A merge patch lists only the fields a client wants to change:
//! - a key with a value replaces that field (objects merge recursively,
//!   arrays and scalars are replaced wholesale);
//! - a key mapped to `null` removes the field;
//! - an absent key leaves the field untouched.
//!
//! A patch that is not an object replaces the whole target.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A merge patch document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MergePatch(Value);

impl MergePatch {
    pub fn new(document: Value) -> Self {
        MergePatch(document)
    }

    /// Parse a patch from JSON text.
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json).map(MergePatch)
    }

    /// The empty object patch, which changes nothing.
    pub fn empty() -> Self {
        MergePatch(Value::Object(Map::new()))
    }

    pub fn document(&self) -> &Value {
        &self.0
    }

    pub fn into_document(self) -> Value {
        self.0
    }

    /// True for `{}`.
    pub fn is_empty(&self) -> bool {
        matches!(&self.0, Value::Object(map) if map.is_empty())
    }

    /// Top-level field names the patch mentions.
    pub fn fields(&self) -> Vec<&str> {
        match &self.0 {
            Value::Object(map) => map.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Apply the patch to `target` in place.
    pub fn apply_to(&self, target: &mut Value) {
        merge(target, &self.0);
    }

    /// Apply the patch to a copy of `target`.
    pub fn applied_to(&self, target: &Value) -> Value {
        let mut patched = target.clone();
        self.apply_to(&mut patched);
        patched
    }
}

impl From<Value> for MergePatch {
    fn from(document: Value) -> Self {
        MergePatch(document)
    }
}

/// RFC 7386 `MergePatch(Target, Patch)`.
pub fn merge(target: &mut Value, patch: &Value) {
    let Value::Object(patch_fields) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    if let Value::Object(target_fields) = target {
        for (key, value) in patch_fields {
            if value.is_null() {
                target_fields.remove(key);
            } else {
                merge(
                    target_fields.entry(key.as_str()).or_insert(Value::Null),
                    value,
                );
            }
        }
    }
}
