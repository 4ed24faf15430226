// Form drafts - field-by-field edits staged before a whole-record submit

use std::{fmt, str::FromStr};

use crate::core::strong_types::{CategoryId, UserId};
use crate::error::AppError;
use crate::models::{Event, NewEvent};

/// Editable inputs of the create and edit dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventField {
    Title,
    Description,
    Image,
    Location,
    StartTime,
    EndTime,
    Categories,
}

impl EventField {
    pub const ALL: [EventField; 7] = [
        EventField::Title,
        EventField::Description,
        EventField::Image,
        EventField::Location,
        EventField::StartTime,
        EventField::EndTime,
        EventField::Categories,
    ];

    /// Input name, as it appears on the wire
    pub fn name(self) -> &'static str {
        match self {
            EventField::Title => "title",
            EventField::Description => "description",
            EventField::Image => "image",
            EventField::Location => "location",
            EventField::StartTime => "startTime",
            EventField::EndTime => "endTime",
            EventField::Categories => "categoryIds",
        }
    }
}

impl fmt::Display for EventField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(EventField::Title),
            "description" => Ok(EventField::Description),
            "image" => Ok(EventField::Image),
            "location" => Ok(EventField::Location),
            "startTime" | "start_time" => Ok(EventField::StartTime),
            "endTime" | "end_time" => Ok(EventField::EndTime),
            "categoryIds" | "categories" => Ok(EventField::Categories),
            other => Err(AppError::Validation(format!("unknown event field: {}", other))),
        }
    }
}

/// Leading integer of `raw`, read the way a browser's `parseInt` reads it:
/// leading whitespace and one sign are skipped, digits run until the first
/// non-digit, and no digits at all gives `None`.
pub fn integer_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1, &trimmed[1..]),
        Some(b'+') => (1, &trimmed[1..]),
        _ => (1, trimmed),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|v| sign * v)
}

/// Read a comma separated id list as typed into the categories input.
///
/// Entries without a leading integer are dropped.
pub fn parse_category_ids(input: &str) -> Vec<CategoryId> {
    input
        .split(',')
        .filter_map(integer_prefix)
        .map(CategoryId::new)
        .collect()
}

/// Comma joined ids, the way the categories input and detail view show them
pub fn format_category_ids(ids: &[CategoryId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Transient form state owned by the dialog that opened it.
///
/// Times are kept as raw input; nothing checks their order or shape
/// before submit.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    pub image: String,
    pub location: String,
    pub start_time: String,
    pub end_time: String,
    pub category_ids: Vec<CategoryId>,
}

impl EventDraft {
    /// Empty template of the create dialog
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_event(event: &Event) -> Self {
        Self {
            title: event.title.clone(),
            description: event.description.clone(),
            image: event.image.clone(),
            location: event.location.clone().unwrap_or_default(),
            start_time: event.start_time.clone(),
            end_time: event.end_time.clone(),
            category_ids: event.category_ids.clone(),
        }
    }

    pub fn set(&mut self, field: EventField, value: &str) {
        match field {
            EventField::Title => self.title = value.to_string(),
            EventField::Description => self.description = value.to_string(),
            EventField::Image => self.image = value.to_string(),
            EventField::Location => self.location = value.to_string(),
            EventField::StartTime => self.start_time = value.to_string(),
            EventField::EndTime => self.end_time = value.to_string(),
            EventField::Categories => self.category_ids = parse_category_ids(value),
        }
    }

    /// Current input value of a field
    pub fn value(&self, field: EventField) -> String {
        match field {
            EventField::Title => self.title.clone(),
            EventField::Description => self.description.clone(),
            EventField::Image => self.image.clone(),
            EventField::Location => self.location.clone(),
            EventField::StartTime => self.start_time.clone(),
            EventField::EndTime => self.end_time.clone(),
            EventField::Categories => format_category_ids(&self.category_ids),
        }
    }

    pub fn to_new_event(&self, created_by: UserId) -> NewEvent {
        NewEvent {
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            location: self.location.clone(),
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            category_ids: self.category_ids.clone(),
            created_by,
        }
    }

    /// Full record for a replace-style update: the draft's fields over `base`.
    ///
    /// Id, creator and unknown server fields come from `base`. A location the
    /// base never had stays absent unless the draft filled it in.
    pub fn apply_to(&self, base: &Event) -> Event {
        let location = match (&base.location, self.location.is_empty()) {
            (None, true) => None,
            _ => Some(self.location.clone()),
        };
        Event {
            id: base.id.clone(),
            title: self.title.clone(),
            description: self.description.clone(),
            image: self.image.clone(),
            location,
            start_time: self.start_time.clone(),
            end_time: self.end_time.clone(),
            category_ids: self.category_ids.clone(),
            created_by: base.created_by,
            extra: base.extra.clone(),
        }
    }

    /// Fields whose draft value differs from `base`
    pub fn changed_fields(&self, base: &Event) -> Vec<EventField> {
        let original = EventDraft::from_event(base);
        EventField::ALL
            .into_iter()
            .filter(|field| match field {
                EventField::Categories => self.category_ids != original.category_ids,
                other => self.value(*other) != original.value(*other),
            })
            .collect()
    }

    pub fn is_dirty(&self, base: &Event) -> bool {
        !self.changed_fields(base).is_empty()
    }
}
