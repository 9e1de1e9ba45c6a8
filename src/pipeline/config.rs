use serde::{Deserialize, Serialize};

/// Knobs for an [`EntityService`](super::EntityService).
///
/// Missing keys take their default, so `{}` is a valid configuration:
///
/// ```ignore
/// let config = ServiceConfig::from_json(r#"{ "check_versions": true }"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Hold a per-entity lock from locate to persist.
    pub lock_entities: bool,
    /// Hand a `Change` stamp to the entity before every write.
    pub stamp_changes: bool,
    /// Persist with the version read during locate and fail on mismatch,
    /// instead of last-writer-wins.
    pub check_versions: bool,
    /// Give a fresh v4 UUID to created entities whose id is blank.
    pub assign_missing_ids: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            lock_entities: true,
            stamp_changes: true,
            check_versions: false,
            assign_missing_ids: true,
        }
    }
}

impl ServiceConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
