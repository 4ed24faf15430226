// Render models - what each view shows for its current state

use crate::core::display::format_timestamp;
use crate::core::form::format_category_ids;
use crate::core::strong_types::EventId;
use crate::models::{Creator, Event};

/// One tile of the event list
#[derive(Debug, Clone, PartialEq)]
pub struct EventCard {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub location: String,
    pub start: String,
    pub end: String,
}

impl EventCard {
    pub fn from_event(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            image: event.image.clone(),
            location: event.location.clone().unwrap_or_default(),
            start: format_timestamp(&event.start_time),
            end: format_timestamp(&event.end_time),
        }
    }
}

/// Detail page content; only built once event and creator are both known
#[derive(Debug, Clone, PartialEq)]
pub struct EventDetails {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub start: String,
    pub end: String,
    /// Raw ids, comma joined
    pub categories: String,
    pub creator_name: String,
    pub creator_image: String,
}

impl EventDetails {
    pub fn new(event: &Event, creator: &Creator) -> Self {
        Self {
            id: event.id.clone(),
            title: event.title.clone(),
            description: event.description.clone(),
            image: event.image.clone(),
            start: format_timestamp(&event.start_time),
            end: format_timestamp(&event.end_time),
            categories: format_category_ids(&event.category_ids),
            creator_name: creator.name.clone(),
            creator_image: creator.image.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DetailRender {
    Loading,
    Ready(EventDetails),
}

impl DetailRender {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailRender::Loading)
    }
}
