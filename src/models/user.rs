use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::strong_types::UserId;

/// User record resolved from an event's `createdBy` reference
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Creator {
    pub fn new(id: i64, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            name: name.into(),
            image: image.into(),
            extra: Map::new(),
        }
    }
}
