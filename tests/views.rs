use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use event_views::{
    core::{form::EventField, strong_types::{EventId, UserId}},
    data_seeder::load_snapshot,
    error::AppResult,
    infrastructure::{
        memory_store::{MemoryStore, ResourceOp, ResourceSnapshot},
        navigation::RecordingNavigator,
        notifications::RecordingNotifier,
        traits::{NotificationKind, ResourceClient},
    },
    models::{Category, Creator, Event, NewEvent},
    views::{DetailRender, DetailView, ListView, LoadStage},
};

fn seed() -> ResourceSnapshot {
    let mut jazz = Event::new(1, "Jazz Night").with_creator(UserId::new(1));
    jazz.description = "Live quartet".to_string();
    jazz.start_time = "2023-03-15T19:00".to_string();
    jazz.end_time = "2023-03-15T22:00".to_string();
    ResourceSnapshot {
        events: vec![
            jazz,
            Event::new(2, "Rock Show")
                .with_categories(&[2])
                .with_creator(UserId::new(2)),
            Event::new(3, "Chess Club")
                .with_categories(&[3])
                .with_creator(UserId::new(1)),
        ],
        categories: vec![Category::new(2, "music"), Category::new(3, "games")],
        users: vec![
            Creator::new(1, "Ignacio Doe", "https://example.com/ignacio.png"),
            Creator::new(2, "Jane Bennett", "https://example.com/jane.png"),
        ],
    }
}

struct Harness {
    store: Arc<MemoryStore>,
    notifier: Arc<RecordingNotifier>,
    navigator: Arc<RecordingNavigator>,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(MemoryStore::from_snapshot(seed())),
            notifier: Arc::new(RecordingNotifier::new()),
            navigator: Arc::new(RecordingNavigator::new()),
        }
    }

    fn list_view(&self) -> ListView {
        ListView::new(self.store.clone(), self.notifier.clone())
    }

    fn detail_view(&self, id: i64) -> DetailView {
        DetailView::new(
            self.store.clone(),
            self.notifier.clone(),
            self.navigator.clone(),
            EventId::Numeric(id),
        )
    }
}

#[tokio::test]
async fn test_search_and_category_scenarios() {
    let harness = Harness::new();
    let view = harness.list_view();
    view.load().await;

    view.set_search("Jazz").await;
    let titles: Vec<_> = view.filtered().await.into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["Jazz Night"]);

    view.set_search("").await;
    view.set_category_filter("2").await;
    let titles: Vec<_> = view.filtered().await.into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["Jazz Night", "Rock Show"]);
}

#[tokio::test]
async fn test_failed_event_fetch_renders_empty_list() {
    let harness = Harness::new();
    harness.store.fail(ResourceOp::ListEvents).await;
    let view = harness.list_view();
    view.load().await;

    assert!(!view.events_loaded().await);
    assert!(view.cards().await.is_empty());
    assert_eq!(view.categories().await.len(), 2);
    assert!(harness.notifier.all().is_empty());
}

#[tokio::test]
async fn test_create_then_list_round_trip() {
    let harness = Harness::new();
    let view = harness.list_view();
    view.load().await;

    view.open_create_dialog().await;
    view.update_draft(EventField::Title, "Pub quiz").await;
    view.update_draft(EventField::Description, "Teams of four").await;
    view.update_draft(EventField::Location, "The Anchor").await;
    view.update_draft(EventField::StartTime, "2023-04-01T20:00").await;
    view.update_draft(EventField::EndTime, "2023-04-01T23:00").await;
    view.update_draft(EventField::Categories, "3").await;

    let created = view.submit_create(UserId::new(2)).await.unwrap();
    assert_eq!(created.id, EventId::Numeric(4));
    assert_eq!(created.created_by, Some(UserId::new(2)));

    // Local collection holds the server's record and the dialog is reset
    assert_eq!(view.events().await.last(), Some(&created));
    assert!(!view.is_create_dialog_open().await);
    assert_eq!(view.draft().await.title, "");
    let last = harness.notifier.last().unwrap();
    assert_eq!(last.kind, NotificationKind::Success);
    assert_eq!(last.title, "Event added!");

    // A fresh listing contains the record with the submitted fields
    let listed = harness.store.list_events().await.unwrap();
    let stored = listed.iter().find(|e| e.id == created.id).unwrap();
    assert_eq!(stored.title, "Pub quiz");
    assert_eq!(stored.location.as_deref(), Some("The Anchor"));
    assert_eq!(stored.start_time, "2023-04-01T20:00");
    assert_eq!(stored.category_ids.len(), 1);
}

#[tokio::test]
async fn test_detail_renders_once_creator_resolves() {
    let harness = Harness::new();
    let view = harness.detail_view(1);
    assert!(view.render().await.is_loading());

    view.load().await;
    match view.render().await {
        DetailRender::Ready(details) => {
            assert_eq!(details.title, "Jazz Night");
            assert_eq!(details.creator_name, "Ignacio Doe");
            assert_eq!(details.start, "3/15/2023, 7:00:00 PM");
            assert_eq!(details.categories, "");
        }
        DetailRender::Loading => panic!("expected details"),
    }
}

#[tokio::test]
async fn test_creator_failure_keeps_loading() {
    let harness = Harness::new();
    harness.store.fail(ResourceOp::GetUser).await;
    let view = harness.detail_view(1);
    view.load().await;

    assert!(view.render().await.is_loading());
    match view.stage().await {
        LoadStage::CreatorFailed { event, .. } => assert_eq!(event.title, "Jazz Night"),
        other => panic!("unexpected stage {:?}", other),
    }
    assert!(harness.notifier.all().is_empty());
}

#[tokio::test]
async fn test_unmodified_edit_is_idempotent() {
    let harness = Harness::new();
    let view = harness.detail_view(1);
    view.load().await;
    let before = view.event().await.unwrap();

    view.open_edit().await.unwrap();
    let after = view.submit_edit().await.unwrap();

    assert_eq!(after, before);
    assert_eq!(harness.store.get_event(&EventId::Numeric(1)).await.unwrap(), before);
    assert!(!view.is_edit_open().await);
}

#[tokio::test]
async fn test_successful_edit_replaces_displayed_event() {
    let harness = Harness::new();
    let view = harness.detail_view(2);
    view.load().await;

    view.open_edit().await.unwrap();
    view.edit_field(EventField::Title, "Rock Show II").await.unwrap();
    view.edit_field(EventField::Categories, "2, 3").await.unwrap();
    view.submit_edit().await.unwrap();

    let shown = view.event().await.unwrap();
    assert_eq!(shown.title, "Rock Show II");
    match view.render().await {
        DetailRender::Ready(details) => assert_eq!(details.categories, "2, 3"),
        DetailRender::Loading => panic!("expected details"),
    }
    assert_eq!(harness.notifier.last().unwrap().title, "Event Updated!");
}

#[tokio::test]
async fn test_failed_edit_keeps_draft_and_displayed_event() {
    let harness = Harness::new();
    let view = harness.detail_view(1);
    view.load().await;
    harness.store.fail(ResourceOp::UpdateEvent).await;

    view.open_edit().await.unwrap();
    view.edit_field(EventField::Title, "Jazz Night (moved)").await.unwrap();
    assert!(view.submit_edit().await.is_err());

    assert!(view.is_edit_open().await);
    assert_eq!(view.edit_draft().await.unwrap().title, "Jazz Night (moved)");
    assert_eq!(view.event().await.unwrap().title, "Jazz Night");
    assert_eq!(harness.notifier.last().unwrap().kind, NotificationKind::Error);

    // Retrying after recovery sends the staged edits
    harness.store.recover(ResourceOp::UpdateEvent).await;
    view.submit_edit().await.unwrap();
    assert_eq!(view.event().await.unwrap().title, "Jazz Night (moved)");
}

#[tokio::test]
async fn test_delete_success_navigates_to_root() {
    let harness = Harness::new();
    let view = harness.detail_view(3);
    view.load().await;

    view.open_delete().await;
    view.confirm_delete().await.unwrap();

    assert_eq!(harness.navigator.current().as_deref(), Some("/"));
    assert_eq!(harness.notifier.last().unwrap().title, "Event Deleted!");
    assert!(harness.store.get_event(&EventId::Numeric(3)).await.is_err());

    // The deleted record is not kept locally
    assert_eq!(view.stage().await, LoadStage::Deleted);
    assert!(view.event().await.is_none());
    assert!(view.render().await.is_loading());
    assert!(!view.is_delete_open().await);
}

#[tokio::test]
async fn test_delete_failure_stays_on_view() {
    let harness = Harness::new();
    let view = harness.detail_view(3);
    view.load().await;
    harness.store.fail(ResourceOp::DeleteEvent).await;

    view.open_delete().await;
    assert!(view.confirm_delete().await.is_err());

    assert!(harness.navigator.history().is_empty());
    assert_eq!(harness.notifier.last().unwrap().kind, NotificationKind::Error);
    assert_eq!(view.event().await.unwrap().title, "Chess Club");
    assert!(!view.render().await.is_loading());
    assert!(view.is_delete_open().await);
}

/// Holds the gated operations until released
struct GatedClient {
    inner: MemoryStore,
    gated: Vec<ResourceOp>,
    gate: Notify,
}

impl GatedClient {
    fn new(gated: &[ResourceOp]) -> Arc<Self> {
        Arc::new(Self {
            inner: MemoryStore::from_snapshot(seed()),
            gated: gated.to_vec(),
            gate: Notify::new(),
        })
    }

    async fn pass(&self, op: ResourceOp) {
        if self.gated.contains(&op) {
            self.gate.notified().await;
        }
    }
}

#[async_trait]
impl ResourceClient for GatedClient {
    async fn list_events(&self) -> AppResult<Vec<Event>> {
        self.pass(ResourceOp::ListEvents).await;
        self.inner.list_events().await
    }
    async fn get_event(&self, id: &EventId) -> AppResult<Event> {
        self.pass(ResourceOp::GetEvent).await;
        self.inner.get_event(id).await
    }
    async fn create_event(&self, payload: &NewEvent) -> AppResult<Event> {
        self.pass(ResourceOp::CreateEvent).await;
        self.inner.create_event(payload).await
    }
    async fn update_event(&self, id: &EventId, record: &Event) -> AppResult<Event> {
        self.pass(ResourceOp::UpdateEvent).await;
        self.inner.update_event(id, record).await
    }
    async fn delete_event(&self, id: &EventId) -> AppResult<()> {
        self.pass(ResourceOp::DeleteEvent).await;
        self.inner.delete_event(id).await
    }
    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.pass(ResourceOp::ListCategories).await;
        self.inner.list_categories().await
    }
    async fn get_user(&self, id: UserId) -> AppResult<Creator> {
        self.pass(ResourceOp::GetUser).await;
        self.inner.get_user(id).await
    }
}

fn gated_detail_view(
    client: &Arc<GatedClient>,
    notifier: &Arc<RecordingNotifier>,
    navigator: &Arc<RecordingNavigator>,
) -> DetailView {
    DetailView::new(
        client.clone(),
        notifier.clone(),
        navigator.clone(),
        EventId::Numeric(1),
    )
}

#[tokio::test]
async fn test_unmounted_list_ignores_late_response() {
    let client = GatedClient::new(&[ResourceOp::ListEvents, ResourceOp::GetEvent]);
    let view = ListView::new(client.clone(), Arc::new(RecordingNotifier::new()));

    let pending = tokio::spawn({
        let view = view.clone();
        async move { view.load().await }
    });
    tokio::task::yield_now().await;

    view.unmount();
    client.gate.notify_one();
    pending.await.unwrap();

    assert!(!view.events_loaded().await);
}

#[tokio::test]
async fn test_unmounted_detail_ignores_late_response() {
    let client = GatedClient::new(&[ResourceOp::ListEvents, ResourceOp::GetEvent]);
    let view = gated_detail_view(
        &client,
        &Arc::new(RecordingNotifier::new()),
        &Arc::new(RecordingNavigator::new()),
    );

    let pending = tokio::spawn({
        let view = view.clone();
        async move { view.load().await }
    });
    tokio::task::yield_now().await;

    view.unmount();
    client.gate.notify_one();
    pending.await.unwrap();

    assert!(view.event().await.is_none());
    assert!(view.render().await.is_loading());
}

#[tokio::test]
async fn test_create_finishing_after_unmount_leaves_view_alone() {
    let client = GatedClient::new(&[ResourceOp::CreateEvent]);
    let notifier = Arc::new(RecordingNotifier::new());
    let view = ListView::new(client.clone(), notifier.clone());
    view.load().await;
    view.open_create_dialog().await;
    view.update_draft(EventField::Title, "Pub quiz").await;

    let pending = tokio::spawn({
        let view = view.clone();
        async move { view.submit_create(UserId::new(1)).await }
    });
    tokio::task::yield_now().await;

    view.unmount();
    client.gate.notify_one();
    let created = pending.await.unwrap().unwrap();

    // The server has the record but the view never took it in
    assert!(client.inner.get_event(&created.id).await.is_ok());
    assert_eq!(view.events().await.len(), 3);
    assert!(view.is_create_dialog_open().await);
    assert_eq!(view.draft().await.title, "Pub quiz");
    assert!(notifier.all().is_empty());
}

#[tokio::test]
async fn test_edit_finishing_after_unmount_leaves_view_alone() {
    let client = GatedClient::new(&[ResourceOp::UpdateEvent]);
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let view = gated_detail_view(&client, &notifier, &navigator);
    view.load().await;
    view.open_edit().await.unwrap();
    view.edit_field(EventField::Title, "Jazz Night (late)").await.unwrap();

    let pending = tokio::spawn({
        let view = view.clone();
        async move { view.submit_edit().await }
    });
    tokio::task::yield_now().await;

    view.unmount();
    client.gate.notify_one();
    pending.await.unwrap().unwrap();

    assert_eq!(view.event().await.unwrap().title, "Jazz Night");
    assert!(view.is_edit_open().await);
    assert!(notifier.all().is_empty());
    assert!(navigator.history().is_empty());
}

#[tokio::test]
async fn test_delete_finishing_after_unmount_does_not_navigate() {
    let client = GatedClient::new(&[ResourceOp::DeleteEvent]);
    let notifier = Arc::new(RecordingNotifier::new());
    let navigator = Arc::new(RecordingNavigator::new());
    let view = gated_detail_view(&client, &notifier, &navigator);
    view.load().await;
    view.open_delete().await;

    let pending = tokio::spawn({
        let view = view.clone();
        async move { view.confirm_delete().await }
    });
    tokio::task::yield_now().await;

    view.unmount();
    client.gate.notify_one();
    pending.await.unwrap().unwrap();

    assert!(client.inner.get_event(&EventId::Numeric(1)).await.is_err());
    assert!(navigator.history().is_empty());
    assert!(notifier.all().is_empty());
    assert_eq!(view.event().await.unwrap().title, "Jazz Night");
    assert!(view.is_delete_open().await);
}

#[tokio::test]
async fn test_irregular_db_file_still_lists_every_event() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{
            "events": [
                {{"id": 1, "title": "Jazz Night", "categoryIds": [1]}},
                {{"id": 2, "title": "Rock Show", "categoryIds": "2"}},
                {{"id": 3, "title": "Chess Club", "categoryIds": [3, null]}}
            ],
            "categories": [{{"id": 2, "name": "music"}}]
        }}"#
    )
    .unwrap();

    let store = Arc::new(MemoryStore::from_snapshot(
        load_snapshot(file.path()).await.unwrap(),
    ));
    let view = ListView::new(store, Arc::new(RecordingNotifier::new()));
    view.load().await;
    assert_eq!(view.events().await.len(), 3);

    view.set_category_filter("2").await;
    let titles: Vec<_> = view.filtered().await.into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["Rock Show"]);
}
