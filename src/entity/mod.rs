//! Entities - stored, identified, self-validating data.
//!
//! ## Example
//!
//! ```ignore
//! use outcome_rust::{Audit, Entity};
//!
//! #[derive(Clone, Serialize, Deserialize, Entity)]
//! #[entity(collection = "customers")]
//! struct Customer {
//!     id: String,
//!     #[entity(not_blank, max_len = 64)]
//!     name: String,
//!     city: Option<String>,
//!     #[entity(audit)]
//!     #[serde(default)]
//!     audit: Audit,
//! }
//! ```

pub mod validation;

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

pub use validation::{Violation, Violations};

/// Trait for types managed by an [`EntityService`](crate::EntityService).
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The collection name for this entity type (e.g., "customers").
    /// Maps to a table in SQL, a collection in MongoDB, a key prefix in KV stores, etc.
    const COLLECTION: &'static str;

    /// Returns the unique identifier for this entity instance.
    fn id(&self) -> &str;

    /// Assign the identifier. Used when creating an entity without one.
    fn set_id(&mut self, id: String);

    /// Check field-level constraints. Runs before every write.
    fn validate(&self) -> Result<(), Violations> {
        Ok(())
    }

    /// Receive a change stamp before the entity is written.
    fn record_change(&mut self, _change: Change) {}
}

/// What is about to happen to an entity, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Created(DateTime<Utc>),
    Modified(DateTime<Utc>),
}

impl Change {
    pub fn created_now() -> Self {
        Change::Created(Utc::now())
    }

    pub fn modified_now() -> Self {
        Change::Modified(Utc::now())
    }
}

/// Optional creation/modification timestamps an entity can embed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Audit {
    pub fn record(&mut self, change: Change) {
        match change {
            Change::Created(at) => {
                self.created_at = Some(at);
                self.modified_at = Some(at);
            }
            Change::Modified(at) => {
                if self.created_at.is_none() {
                    self.created_at = Some(at);
                }
                self.modified_at = Some(at);
            }
        }
    }
}
