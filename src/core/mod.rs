// Core types and pure view logic - no I/O

pub mod display;
pub mod filter;
pub mod form;
pub mod strong_types;

// Re-export commonly used types
pub use filter::{CategorySelection, EventFilter};
pub use form::{EventDraft, EventField};
pub use strong_types::{CategoryId, EventId, UserId};
