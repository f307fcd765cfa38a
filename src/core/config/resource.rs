use crate::core::types::ResourceId;
use serde::{Deserialize, Serialize};

/// A finite, shared resource. Immutable for the life of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub tag: String,
}

impl Resource {
    pub fn new(id: u32, tag: impl Into<String>) -> Self {
        Self {
            id: ResourceId::new(id),
            tag: tag.into(),
        }
    }

    /// Resource whose tag is its numeric id
    pub fn numbered(id: u32) -> Self {
        Self::new(id, id.to_string())
    }
}
