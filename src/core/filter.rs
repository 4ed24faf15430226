// List narrowing - search text and category selection over fetched events

use crate::core::form::integer_prefix;
use crate::core::strong_types::CategoryId;
use crate::models::Event;

/// Value of the category select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySelection {
    /// Empty select value: no category narrowing
    #[default]
    All,
    Category(CategoryId),
    /// A select value that names no integer id; only uncategorized events pass
    Unmatched,
}

impl CategorySelection {
    /// Interpret a raw select value.
    ///
    /// Leading whitespace and an optional sign are accepted and the integer
    /// prefix is used, so `"2"` and `"2abc"` both select category 2.
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return CategorySelection::All;
        }
        match integer_prefix(raw) {
            Some(id) => CategorySelection::Category(CategoryId::new(id)),
            None => CategorySelection::Unmatched,
        }
    }

    fn admits(&self, event: &Event) -> bool {
        match self {
            CategorySelection::All => true,
            CategorySelection::Category(id) => {
                event.category_ids.contains(id) || event.is_uncategorized()
            }
            CategorySelection::Unmatched => event.is_uncategorized(),
        }
    }
}

/// Current search text and category selection of the list view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilter {
    pub search: String,
    pub category: CategorySelection,
}

impl EventFilter {
    pub fn new(search: impl Into<String>, category: CategorySelection) -> Self {
        Self {
            search: search.into(),
            category,
        }
    }

    pub fn matches_search(&self, event: &Event) -> bool {
        event
            .title
            .to_lowercase()
            .contains(&self.search.to_lowercase())
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.matches_search(event) && self.category.admits(event)
    }

    /// Events passing both filters, in their original order
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }
}
