use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::core::form::{integer_prefix, parse_category_ids};
use crate::core::strong_types::{CategoryId, EventId, UserId};

/// Event record as served by the resource API.
///
/// `start_time`/`end_time` stay in their wire form (ISO-like strings, the
/// same shape a datetime-local input produces) so edits round-trip without
/// reformatting. Fields this model does not know about are kept in `extra`
/// and written back on a full-record update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default, deserialize_with = "category_ids_or_empty")]
    pub category_ids: Vec<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn new(id: impl Into<EventId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image: String::new(),
            location: None,
            start_time: String::new(),
            end_time: String::new(),
            category_ids: Vec::new(),
            created_by: None,
            extra: Map::new(),
        }
    }

    pub fn with_categories(mut self, ids: &[i64]) -> Self {
        self.category_ids = ids.iter().copied().map(CategoryId::new).collect();
        self
    }

    pub fn with_creator(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }

    pub fn is_uncategorized(&self) -> bool {
        self.category_ids.is_empty()
    }
}

/// Creation payload: everything but the server-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub image: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    #[serde(default, deserialize_with = "category_ids_or_empty")]
    pub category_ids: Vec<CategoryId>,
    pub created_by: UserId,
}

impl NewEvent {
    /// Materialise the stored record once the server has picked an id
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            location: Some(self.location),
            start_time: self.start_time,
            end_time: self.end_time,
            category_ids: self.category_ids,
            created_by: Some(self.created_by),
            extra: Map::new(),
        }
    }
}

// Stored `categoryIds` are not always a clean id array: missing or null
// reads as empty, a bare number or string is one entry, and array entries
// without a leading integer (nulls, words) are dropped.
fn category_ids_or_empty<'de, D>(deserializer: D) -> Result<Vec<CategoryId>, D::Error>
where
    D: Deserializer<'de>,
{
    let ids = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries.iter().filter_map(category_id_of).collect(),
        Some(Value::String(raw)) => parse_category_ids(&raw),
        Some(other) => category_id_of(&other).into_iter().collect(),
    };
    Ok(ids)
}

fn category_id_of(value: &Value) -> Option<CategoryId> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(raw) => integer_prefix(raw),
        _ => None,
    }
    .map(CategoryId::new)
}
