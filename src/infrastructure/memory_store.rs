// In-memory resource store - backs the resource API server and view tests

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::core::strong_types::{EventId, UserId};
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::ResourceClient;
use crate::models::{Category, Creator, Event, NewEvent};

/// Operations of the resource API, used for failure injection and call counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceOp {
    ListEvents,
    GetEvent,
    CreateEvent,
    UpdateEvent,
    DeleteEvent,
    ListCategories,
    GetUser,
}

/// Whole-store contents in the json-server `db.json` layout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceSnapshot {
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub users: Vec<Creator>,
}

#[derive(Default)]
struct Faults {
    failing: HashSet<ResourceOp>,
    calls: HashMap<ResourceOp, usize>,
}

pub struct MemoryStore {
    data: RwLock<ResourceSnapshot>,
    faults: RwLock<Faults>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_snapshot(ResourceSnapshot::default())
    }

    pub fn from_snapshot(snapshot: ResourceSnapshot) -> Self {
        info!(
            "Memory store initialized with {} events, {} categories, {} users",
            snapshot.events.len(),
            snapshot.categories.len(),
            snapshot.users.len()
        );
        Self {
            data: RwLock::new(snapshot),
            faults: RwLock::new(Faults::default()),
        }
    }

    pub async fn snapshot(&self) -> ResourceSnapshot {
        self.data.read().await.clone()
    }

    /// Make every call of `op` fail until `recover` is called
    pub async fn fail(&self, op: ResourceOp) {
        self.faults.write().await.failing.insert(op);
    }

    pub async fn recover(&self, op: ResourceOp) {
        self.faults.write().await.failing.remove(&op);
    }

    pub async fn call_count(&self, op: ResourceOp) -> usize {
        self.faults.read().await.calls.get(&op).copied().unwrap_or(0)
    }

    async fn enter(&self, op: ResourceOp) -> AppResult<()> {
        let mut faults = self.faults.write().await;
        *faults.calls.entry(op).or_insert(0) += 1;
        if faults.failing.contains(&op) {
            debug!("Injected failure for {:?}", op);
            return Err(AppError::ResponseStatus(
                500,
                format!("injected failure for {:?}", op),
            ));
        }
        Ok(())
    }

    fn next_event_id(events: &[Event]) -> EventId {
        let max = events.iter().filter_map(|e| e.id.as_i64()).max().unwrap_or(0);
        EventId::Numeric(max + 1)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn same_id(a: &EventId, b: &EventId) -> bool {
    a == b || matches!((a.as_i64(), b.as_i64()), (Some(x), Some(y)) if x == y)
}

#[async_trait]
impl ResourceClient for MemoryStore {
    async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.enter(ResourceOp::ListEvents).await?;
        Ok(self.data.read().await.events.clone())
    }

    async fn get_event(&self, id: &EventId) -> AppResult<Event> {
        self.enter(ResourceOp::GetEvent).await?;
        self.data
            .read()
            .await
            .events
            .iter()
            .find(|e| same_id(&e.id, id))
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("event {} not found", id)))
    }

    async fn create_event(&self, payload: &NewEvent) -> AppResult<Event> {
        self.enter(ResourceOp::CreateEvent).await?;
        let mut data = self.data.write().await;
        let id = Self::next_event_id(&data.events);
        let event = payload.clone().into_event(id);
        data.events.push(event.clone());
        debug!("Created event {}", event.id);
        Ok(event)
    }

    async fn update_event(&self, id: &EventId, record: &Event) -> AppResult<Event> {
        self.enter(ResourceOp::UpdateEvent).await?;
        let mut data = self.data.write().await;
        let slot = data
            .events
            .iter_mut()
            .find(|e| same_id(&e.id, id))
            .ok_or_else(|| AppError::NotFound(format!("event {} not found", id)))?;
        let mut replacement = record.clone();
        replacement.id = slot.id.clone();
        *slot = replacement.clone();
        debug!("Replaced event {}", replacement.id);
        Ok(replacement)
    }

    async fn delete_event(&self, id: &EventId) -> AppResult<()> {
        self.enter(ResourceOp::DeleteEvent).await?;
        let mut data = self.data.write().await;
        let before = data.events.len();
        data.events.retain(|e| !same_id(&e.id, id));
        if data.events.len() == before {
            return Err(AppError::NotFound(format!("event {} not found", id)));
        }
        debug!("Deleted event {}", id);
        Ok(())
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.enter(ResourceOp::ListCategories).await?;
        Ok(self.data.read().await.categories.clone())
    }

    async fn get_user(&self, id: UserId) -> AppResult<Creator> {
        self.enter(ResourceOp::GetUser).await?;
        self.data
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::strong_types::CategoryId;

    fn payload(title: &str) -> NewEvent {
        NewEvent {
            title: title.to_string(),
            description: "desc".to_string(),
            image: "https://example.com/a.png".to_string(),
            location: "Hall".to_string(),
            start_time: "2023-03-15T19:00".to_string(),
            end_time: "2023-03-15T21:00".to_string(),
            category_ids: vec![CategoryId::new(1)],
            created_by: UserId::new(1),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_next_numeric_id() {
        let store = MemoryStore::from_snapshot(ResourceSnapshot {
            events: vec![Event::new(4, "a"), Event::new("abc", "b")],
            ..Default::default()
        });
        let created = store.create_event(&payload("Quiz")).await.unwrap();
        assert_eq!(created.id, EventId::Numeric(5));
        assert_eq!(created.location.as_deref(), Some("Hall"));

        let listed = store.list_events().await.unwrap();
        assert_eq!(listed.last().unwrap(), &created);
    }

    #[tokio::test]
    async fn test_update_replaces_whole_record() {
        let mut original = Event::new(1, "Jazz").with_categories(&[1, 2]);
        original.description = "old".to_string();
        let store = MemoryStore::from_snapshot(ResourceSnapshot {
            events: vec![original],
            ..Default::default()
        });

        // Replacement drops categories and description entirely
        let replacement = Event::new(99, "Jazz Night");
        let stored = store
            .update_event(&EventId::Numeric(1), &replacement)
            .await
            .unwrap();
        assert_eq!(stored.id, EventId::Numeric(1));
        assert!(stored.category_ids.is_empty());
        assert_eq!(stored.description, "");
    }

    #[tokio::test]
    async fn test_missing_records_are_not_found() {
        let store = MemoryStore::new();
        let id = EventId::Numeric(3);
        assert!(matches!(store.get_event(&id).await, Err(AppError::NotFound(_))));
        assert!(matches!(store.delete_event(&id).await, Err(AppError::NotFound(_))));
        assert!(matches!(
            store.get_user(UserId::new(1)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_text_and_numeric_ids_match() {
        let store = MemoryStore::from_snapshot(ResourceSnapshot {
            events: vec![Event::new("7", "Seven")],
            ..Default::default()
        });
        let found = store.get_event(&EventId::Numeric(7)).await.unwrap();
        assert_eq!(found.title, "Seven");
    }

    #[tokio::test]
    async fn test_failure_injection() {
        let store = MemoryStore::new();
        store.fail(ResourceOp::ListCategories).await;
        assert!(store.list_categories().await.is_err());
        store.recover(ResourceOp::ListCategories).await;
        assert!(store.list_categories().await.is_ok());
        assert_eq!(store.call_count(ResourceOp::ListCategories).await, 2);
        assert_eq!(store.call_count(ResourceOp::ListEvents).await, 0);
    }
}
