use std::sync::Arc;
use crate::{
    config::Config,
    core::strong_types::EventId,
    infrastructure::{
        http_client::HttpResourceClient,
        notifications::LogNotifier,
        traits::{Navigator, NotificationSink, ResourceClient},
    },
    views::{DetailView, ListView},
};

/// Collaborators shared by every view the application opens
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ResourceClient>,
    pub notifier: Arc<dyn NotificationSink>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let client = Arc::new(HttpResourceClient::from_config(&config.api));
        Self::with_collaborators(config, client, Arc::new(LogNotifier))
    }

    pub fn with_collaborators(
        config: Config,
        client: Arc<dyn ResourceClient>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            client,
            notifier,
            config,
        }
    }

    /// Fresh list view instance with its own state
    pub fn list_view(&self) -> ListView {
        ListView::new(self.client.clone(), self.notifier.clone())
    }

    /// Fresh detail view instance for one event
    pub fn detail_view(&self, event_id: EventId, navigator: Arc<dyn Navigator>) -> DetailView {
        DetailView::new(
            self.client.clone(),
            self.notifier.clone(),
            navigator,
            event_id,
        )
    }
}
