// Event list view - fetched collection, client side narrowing, create dialog

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::core::filter::{CategorySelection, EventFilter};
use crate::core::form::{EventDraft, EventField};
use crate::core::strong_types::UserId;
use crate::error::{AppError, AppResult};
use crate::infrastructure::traits::{Notification, NotificationSink, ResourceClient};
use crate::models::{Category, Event};
use crate::views::lifetime::ViewLifetime;
use crate::views::render::EventCard;

/// `None` means "not loaded", which renders the same as an empty list.
#[derive(Debug, Default)]
struct ListState {
    events: Option<Vec<Event>>,
    categories: Option<Vec<Category>>,
    filter: EventFilter,
    create_open: bool,
    draft: EventDraft,
}

#[derive(Clone)]
pub struct ListView {
    client: Arc<dyn ResourceClient>,
    notifier: Arc<dyn NotificationSink>,
    state: Arc<RwLock<ListState>>,
    lifetime: ViewLifetime,
}

impl ListView {
    pub fn new(client: Arc<dyn ResourceClient>, notifier: Arc<dyn NotificationSink>) -> Self {
        Self {
            client,
            notifier,
            state: Arc::new(RwLock::new(ListState::default())),
            lifetime: ViewLifetime::new(),
        }
    }

    pub fn lifetime(&self) -> &ViewLifetime {
        &self.lifetime
    }

    pub fn unmount(&self) {
        debug!("List view {} unmounted", self.lifetime.id());
        self.lifetime.unmount();
    }

    /// Fetch events and categories concurrently.
    ///
    /// Each fetch fills its own slice of state; a failure is logged and
    /// leaves that slice unset.
    pub async fn load(&self) {
        info!("Loading event list (view {})", self.lifetime.id());
        tokio::join!(self.load_events(), self.load_categories());
    }

    async fn load_events(&self) {
        match self.client.list_events().await {
            Ok(events) => {
                if !self.lifetime.is_mounted() {
                    debug!("Dropping event list for unmounted view {}", self.lifetime.id());
                    return;
                }
                debug!("Loaded {} events", events.len());
                self.state.write().await.events = Some(events);
            }
            Err(e) => error!("Error fetching events: {}", e),
        }
    }

    async fn load_categories(&self) {
        match self.client.list_categories().await {
            Ok(categories) => {
                if !self.lifetime.is_mounted() {
                    debug!("Dropping categories for unmounted view {}", self.lifetime.id());
                    return;
                }
                debug!("Loaded {} categories", categories.len());
                self.state.write().await.categories = Some(categories);
            }
            Err(e) => error!("Error fetching categories: {}", e),
        }
    }

    pub async fn events_loaded(&self) -> bool {
        self.state.read().await.events.is_some()
    }

    pub async fn categories_loaded(&self) -> bool {
        self.state.read().await.categories.is_some()
    }

    /// Every fetched event, unfiltered, in fetch order
    pub async fn events(&self) -> Vec<Event> {
        self.state.read().await.events.clone().unwrap_or_default()
    }

    /// Options of the category select
    pub async fn categories(&self) -> Vec<Category> {
        self.state.read().await.categories.clone().unwrap_or_default()
    }

    pub async fn set_search(&self, text: impl Into<String>) {
        self.state.write().await.filter.search = text.into();
    }

    /// Takes the raw select value; `""` clears the category filter
    pub async fn set_category_filter(&self, selection: &str) {
        self.state.write().await.filter.category = CategorySelection::parse(selection);
    }

    pub async fn filter(&self) -> EventFilter {
        self.state.read().await.filter.clone()
    }

    /// Events passing the current search and category selection
    pub async fn filtered(&self) -> Vec<Event> {
        let state = self.state.read().await;
        match &state.events {
            Some(events) => state.filter.apply(events).into_iter().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub async fn cards(&self) -> Vec<EventCard> {
        self.filtered()
            .await
            .iter()
            .map(EventCard::from_event)
            .collect()
    }

    pub async fn open_create_dialog(&self) {
        self.state.write().await.create_open = true;
    }

    pub async fn is_create_dialog_open(&self) -> bool {
        self.state.read().await.create_open
    }

    pub async fn update_draft(&self, field: EventField, value: &str) {
        self.state.write().await.draft.set(field, value);
    }

    pub async fn draft(&self) -> EventDraft {
        self.state.read().await.draft.clone()
    }

    /// Close the dialog and throw the draft away
    pub async fn cancel_create(&self) {
        let mut state = self.state.write().await;
        state.create_open = false;
        state.draft = EventDraft::empty();
    }

    /// Submit the create draft as `acting_user`.
    ///
    /// The collection only ever receives the record the server returned. On
    /// failure the dialog and draft stay as they were.
    pub async fn submit_create(&self, acting_user: UserId) -> AppResult<Event> {
        let payload = {
            let state = self.state.read().await;
            if !state.create_open {
                return Err(AppError::Validation("create dialog is not open".to_string()));
            }
            state.draft.to_new_event(acting_user)
        };

        match self.client.create_event(&payload).await {
            Ok(created) => {
                if !self.lifetime.is_mounted() {
                    debug!(
                        "Event {} created after view {} unmounted",
                        created.id,
                        self.lifetime.id()
                    );
                    return Ok(created);
                }
                {
                    let mut state = self.state.write().await;
                    state
                        .events
                        .get_or_insert_with(Vec::new)
                        .push(created.clone());
                    state.create_open = false;
                    state.draft = EventDraft::empty();
                }
                info!("Created event {} ({})", created.id, created.title);
                self.notifier.notify(Notification::success(
                    "Event added!",
                    "Your event has been successfully added.",
                ));
                Ok(created)
            }
            Err(e) => {
                error!("Error creating event: {}", e);
                if self.lifetime.is_mounted() {
                    self.notifier.notify(Notification::error(
                        "Error",
                        "An error occurred while adding the event. Please try again.",
                    ));
                }
                Err(e)
            }
        }
    }
}
