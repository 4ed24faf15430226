// Strong Types - newtypes for the identifiers that cross the resource API
// Keeps event, category and user references from being mixed up

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Server-assigned event identifier.
///
/// The resource API treats ids as opaque: numeric ids come back as JSON
/// numbers, anything else as strings. Both are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Numeric(i64),
    Text(String),
}

impl EventId {
    /// Numeric value when the id is (or spells) an integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            EventId::Numeric(id) => Some(*id),
            EventId::Text(text) => text.parse().ok(),
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Numeric(id) => write!(f, "{}", id),
            EventId::Text(text) => write!(f, "{}", text),
        }
    }
}

impl FromStr for EventId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(id) => EventId::Numeric(id),
            Err(_) => EventId::Text(s.to_string()),
        })
    }
}

impl From<i64> for EventId {
    fn from(id: i64) -> Self {
        EventId::Numeric(id)
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        s.parse().unwrap_or_else(|never| match never {})
    }
}

/// Category reference stored in an event's `categoryIds`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CategoryId(pub i64);

impl CategoryId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for CategoryId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// User reference, used for an event's `createdBy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub i64);

impl UserId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
