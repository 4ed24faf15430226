use std::sync::Mutex;

use tracing::debug;

use crate::core::strong_types::EventId;
use crate::infrastructure::traits::Navigator;

pub const ROOT_PATH: &str = "/";

/// Path of the detail view for an event
pub fn event_path(id: impl std::fmt::Display) -> String {
    format!("/event/{}", id)
}

/// Event id of a detail route (`/event/{id}`)
pub fn parse_event_route(path: &str) -> Option<EventId> {
    let id = path.strip_prefix("/event/")?.trim_end_matches('/');
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(EventId::from(id))
}

/// Navigator that records requested paths; the last one is the current route
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.history().pop()
    }

    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate_to(&self, path: &str) {
        debug!("Navigating to {}", path);
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(path.to_string());
    }
}
