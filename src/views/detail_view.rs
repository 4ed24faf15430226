// Event detail view - event plus creator, staged edit, delete

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::core::form::{EventDraft, EventField};
use crate::core::strong_types::EventId;
use crate::error::{AppError, AppResult};
use crate::infrastructure::navigation::ROOT_PATH;
use crate::infrastructure::traits::{Navigator, Notification, NotificationSink, ResourceClient};
use crate::models::{Creator, Event};
use crate::views::lifetime::ViewLifetime;
use crate::views::render::{DetailRender, EventDetails};

/// Progress of the event -> creator fetch pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum LoadStage {
    Idle,
    LoadingEvent,
    EventFailed(String),
    LoadingCreator(Event),
    CreatorFailed { event: Event, error: String },
    Ready { event: Event, creator: Creator },
    /// The server confirmed the delete; no local copy is kept
    Deleted,
}

impl LoadStage {
    pub fn event(&self) -> Option<&Event> {
        match self {
            LoadStage::LoadingCreator(event)
            | LoadStage::CreatorFailed { event, .. }
            | LoadStage::Ready { event, .. } => Some(event),
            _ => None,
        }
    }

    fn event_mut(&mut self) -> Option<&mut Event> {
        match self {
            LoadStage::LoadingCreator(event)
            | LoadStage::CreatorFailed { event, .. }
            | LoadStage::Ready { event, .. } => Some(event),
            _ => None,
        }
    }

    /// Failure message of whichever stage failed
    pub fn failure(&self) -> Option<&str> {
        match self {
            LoadStage::EventFailed(error) | LoadStage::CreatorFailed { error, .. } => {
                Some(error.as_str())
            }
            _ => None,
        }
    }
}

#[derive(Debug)]
struct DetailState {
    stage: LoadStage,
    /// Open edit dialog and its staged values
    edit: Option<EventDraft>,
    delete_open: bool,
}

#[derive(Clone)]
pub struct DetailView {
    client: Arc<dyn ResourceClient>,
    notifier: Arc<dyn NotificationSink>,
    navigator: Arc<dyn Navigator>,
    event_id: EventId,
    state: Arc<RwLock<DetailState>>,
    lifetime: ViewLifetime,
}

impl DetailView {
    pub fn new(
        client: Arc<dyn ResourceClient>,
        notifier: Arc<dyn NotificationSink>,
        navigator: Arc<dyn Navigator>,
        event_id: EventId,
    ) -> Self {
        Self {
            client,
            notifier,
            navigator,
            event_id,
            state: Arc::new(RwLock::new(DetailState {
                stage: LoadStage::Idle,
                edit: None,
                delete_open: false,
            })),
            lifetime: ViewLifetime::new(),
        }
    }

    pub fn event_id(&self) -> &EventId {
        &self.event_id
    }

    pub fn lifetime(&self) -> &ViewLifetime {
        &self.lifetime
    }

    pub fn unmount(&self) {
        debug!("Detail view {} unmounted", self.lifetime.id());
        self.lifetime.unmount();
    }

    async fn set_stage(&self, stage: LoadStage) -> bool {
        if !self.lifetime.is_mounted() {
            debug!("Dropping load result for unmounted view {}", self.lifetime.id());
            return false;
        }
        self.state.write().await.stage = stage;
        true
    }

    /// Fetch the event, then its creator.
    ///
    /// Either failure is logged and parks the view in a failed stage, which
    /// still renders as loading.
    pub async fn load(&self) {
        info!("Loading event {} (view {})", self.event_id, self.lifetime.id());
        if !self.set_stage(LoadStage::LoadingEvent).await {
            return;
        }

        let event = match self.client.get_event(&self.event_id).await {
            Ok(event) => event,
            Err(e) => {
                error!("Error fetching event {}: {}", self.event_id, e);
                self.set_stage(LoadStage::EventFailed(e.to_string())).await;
                return;
            }
        };

        let Some(creator_id) = event.created_by else {
            error!("Event {} has no creator reference", self.event_id);
            self.set_stage(LoadStage::CreatorFailed {
                event,
                error: "event has no creator reference".to_string(),
            })
            .await;
            return;
        };

        if !self.set_stage(LoadStage::LoadingCreator(event.clone())).await {
            return;
        }

        match self.client.get_user(creator_id).await {
            Ok(creator) => {
                self.set_stage(LoadStage::Ready { event, creator }).await;
            }
            Err(e) => {
                error!("Error fetching creator {}: {}", creator_id, e);
                self.set_stage(LoadStage::CreatorFailed {
                    event,
                    error: e.to_string(),
                })
                .await;
            }
        }
    }

    pub async fn stage(&self) -> LoadStage {
        self.state.read().await.stage.clone()
    }

    /// The event as currently displayed (confirmed server state)
    pub async fn event(&self) -> Option<Event> {
        self.state.read().await.stage.event().cloned()
    }

    /// Nothing but a loading indicator until event and creator are both known
    pub async fn render(&self) -> DetailRender {
        match &self.state.read().await.stage {
            LoadStage::Ready { event, creator } => {
                DetailRender::Ready(EventDetails::new(event, creator))
            }
            _ => DetailRender::Loading,
        }
    }

    /// Stage a copy of the displayed event for editing
    pub async fn open_edit(&self) -> AppResult<()> {
        let mut state = self.state.write().await;
        let draft = match &state.stage {
            LoadStage::Ready { event, .. } => EventDraft::from_event(event),
            _ => {
                return Err(AppError::Validation(format!(
                    "event {} is not loaded",
                    self.event_id
                )))
            }
        };
        state.edit = Some(draft);
        Ok(())
    }

    pub async fn is_edit_open(&self) -> bool {
        self.state.read().await.edit.is_some()
    }

    /// Current values of the edit dialog
    pub async fn edit_draft(&self) -> Option<EventDraft> {
        self.state.read().await.edit.clone()
    }

    /// Apply one field edit to the staged draft; the displayed event is untouched
    pub async fn edit_field(&self, field: EventField, value: &str) -> AppResult<()> {
        let mut state = self.state.write().await;
        let draft = state
            .edit
            .as_mut()
            .ok_or_else(|| AppError::Validation("edit dialog is not open".to_string()))?;
        draft.set(field, value);
        Ok(())
    }

    pub async fn cancel_edit(&self) {
        self.state.write().await.edit = None;
    }

    /// Send the staged draft as a full-record update.
    ///
    /// Only a confirmed write replaces the displayed event. A failed write
    /// leaves the dialog open with the edits still staged.
    pub async fn submit_edit(&self) -> AppResult<Event> {
        let record = {
            let state = self.state.read().await;
            let draft = state
                .edit
                .as_ref()
                .ok_or_else(|| AppError::Validation("edit dialog is not open".to_string()))?;
            let base = state.stage.event().ok_or_else(|| {
                AppError::Validation(format!("event {} is not loaded", self.event_id))
            })?;
            debug!(
                "Updating event {} (changed: {:?})",
                self.event_id,
                draft.changed_fields(base)
            );
            draft.apply_to(base)
        };

        match self.client.update_event(&self.event_id, &record).await {
            Ok(updated) => {
                if !self.lifetime.is_mounted() {
                    debug!("Event {} updated after view unmounted", self.event_id);
                    return Ok(updated);
                }
                {
                    let mut state = self.state.write().await;
                    if let Some(event) = state.stage.event_mut() {
                        *event = updated.clone();
                    }
                    state.edit = None;
                }
                info!("Updated event {}", self.event_id);
                self.notifier.notify(Notification::success(
                    "Event Updated!",
                    "The event details have been successfully updated.",
                ));
                Ok(updated)
            }
            Err(e) => {
                error!("Error updating event {}: {}", self.event_id, e);
                if self.lifetime.is_mounted() {
                    self.notifier.notify(Notification::error(
                        "Error",
                        "An error occurred while updating the event details. Please try again later.",
                    ));
                }
                Err(e)
            }
        }
    }

    pub async fn open_delete(&self) {
        self.state.write().await.delete_open = true;
    }

    pub async fn cancel_delete(&self) {
        self.state.write().await.delete_open = false;
    }

    pub async fn is_delete_open(&self) -> bool {
        self.state.read().await.delete_open
    }

    /// Delete the event; on success return to the root view
    pub async fn confirm_delete(&self) -> AppResult<()> {
        if !self.is_delete_open().await {
            return Err(AppError::Validation("delete dialog is not open".to_string()));
        }

        match self.client.delete_event(&self.event_id).await {
            Ok(()) => {
                if !self.lifetime.is_mounted() {
                    debug!("Event {} deleted after view unmounted", self.event_id);
                    return Ok(());
                }
                {
                    let mut state = self.state.write().await;
                    state.stage = LoadStage::Deleted;
                    state.edit = None;
                    state.delete_open = false;
                }
                info!("Deleted event {}", self.event_id);
                self.notifier.notify(Notification::success(
                    "Event Deleted!",
                    "The event has been successfully deleted.",
                ));
                self.navigator.navigate_to(ROOT_PATH);
                Ok(())
            }
            Err(e) => {
                error!("Error deleting event {}: {}", self.event_id, e);
                if self.lifetime.is_mounted() {
                    self.notifier.notify(Notification::error(
                        "Error",
                        "An error occurred while deleting the event. Please try again later.",
                    ));
                }
                Err(e)
            }
        }
    }
}
