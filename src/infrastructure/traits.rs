use crate::core::strong_types::{EventId, UserId};
use crate::error::AppResult;
use crate::models::{Category, Creator, Event, NewEvent};
use async_trait::async_trait;

/// Access to the events resource API.
///
/// Views only distinguish success from failure; the error value is for
/// diagnostics.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn list_events(&self) -> AppResult<Vec<Event>>;
    async fn get_event(&self, id: &EventId) -> AppResult<Event>;
    /// The server assigns the id and any derived fields
    async fn create_event(&self, payload: &NewEvent) -> AppResult<Event>;
    /// Full replace, not a partial patch
    async fn update_event(&self, id: &EventId, record: &Event) -> AppResult<Event>;
    async fn delete_event(&self, id: &EventId) -> AppResult<()>;
    async fn list_categories(&self) -> AppResult<Vec<Category>>;
    async fn get_user(&self, id: UserId) -> AppResult<Creator>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// User-visible feedback for a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Fire-and-forget feedback channel; the most recent notification wins.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Route changes requested by a view
pub trait Navigator: Send + Sync {
    fn navigate_to(&self, path: &str);
}
