// Event console - drives the list and detail views against a running resource API

use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use event_views::{
    app_state::AppState,
    config::Config,
    core::{form::EventField, strong_types::EventId},
    infrastructure::{
        navigation::{event_path, RecordingNavigator},
        traits::{Notification, NotificationKind, NotificationSink},
        HttpResourceClient,
    },
    views::{DetailRender, LoadStage},
};

#[derive(Parser)]
#[command(name = "event_console", about = "Browse and manage events")]
struct Cli {
    /// Resource API base URL (overrides EVENTS_API_URL)
    #[arg(long, global = true)]
    api: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List events, optionally narrowed by title text and category
    List {
        #[arg(long, default_value = "")]
        search: String,
        /// Category id; events without categories are always listed
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Show one event with its creator
    Show { id: String },
    /// Create an event as the configured acting user
    Create(FieldArgs),
    /// Replace an event with the given fields changed
    Edit {
        id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete an event
    Delete { id: String },
}

#[derive(Args, Default)]
struct FieldArgs {
    #[arg(long)]
    title: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    image: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Start time, e.g. 2023-03-15T19:00
    #[arg(long)]
    start: Option<String>,
    #[arg(long)]
    end: Option<String>,
    /// Comma separated category ids
    #[arg(long)]
    categories: Option<String>,
}

impl FieldArgs {
    fn edits(&self) -> Vec<(EventField, &str)> {
        [
            (EventField::Title, &self.title),
            (EventField::Description, &self.description),
            (EventField::Image, &self.image),
            (EventField::Location, &self.location),
            (EventField::StartTime, &self.start),
            (EventField::EndTime, &self.end),
            (EventField::Categories, &self.categories),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
        .collect()
    }
}

struct ConsoleNotifier;

impl NotificationSink for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let marker = match notification.kind {
            NotificationKind::Success => "✔",
            NotificationKind::Error => "✖",
        };
        println!("{} {} {}", marker, notification.title, notification.description);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(api) = cli.api {
        config.api.base_url = api;
    }
    let client = Arc::new(HttpResourceClient::from_config(&config.api));
    let state = AppState::with_collaborators(config, client, Arc::new(ConsoleNotifier));

    match cli.command {
        Command::List { search, category } => list(&state, &search, &category).await,
        Command::Show { id } => show(&state, EventId::from(id.as_str())).await,
        Command::Create(fields) => create(&state, &fields).await,
        Command::Edit { id, fields } => edit(&state, EventId::from(id.as_str()), &fields).await,
        Command::Delete { id } => delete(&state, EventId::from(id.as_str())).await,
    }
}

async fn list(state: &AppState, search: &str, category: &str) -> anyhow::Result<()> {
    let view = state.list_view();
    view.load().await;
    view.set_search(search).await;
    view.set_category_filter(category).await;

    let categories = view.categories().await;
    if !categories.is_empty() {
        let names: Vec<String> = categories
            .iter()
            .map(|c| format!("{}={}", c.id, c.name))
            .collect();
        println!("Categories: {}", names.join(", "));
    }
    for card in view.cards().await {
        println!("{}  {}", event_path(&card.id), card.title);
        println!("    {}", card.description);
        println!("    Location: {}", card.location);
        println!("    Start Time: {}", card.start);
        println!("    End Time: {}", card.end);
    }
    Ok(())
}

async fn show(state: &AppState, id: EventId) -> anyhow::Result<()> {
    let view = state.detail_view(id, Arc::new(RecordingNavigator::new()));
    view.load().await;
    match view.render().await {
        DetailRender::Ready(details) => {
            println!("{}", details.title);
            println!("Description: {}", details.description);
            println!("Image: {}", details.image);
            println!("Start Time: {}", details.start);
            println!("End Time: {}", details.end);
            println!("Categories: {}", details.categories);
            println!("Created by: {} ({})", details.creator_name, details.creator_image);
        }
        DetailRender::Loading => {
            println!("Loading...");
            if let Some(reason) = view.stage().await.failure() {
                eprintln!("stalled: {}", reason);
            }
        }
    }
    Ok(())
}

async fn create(state: &AppState, fields: &FieldArgs) -> anyhow::Result<()> {
    let view = state.list_view();
    view.load().await;
    view.open_create_dialog().await;
    for (field, value) in fields.edits() {
        view.update_draft(field, value).await;
    }
    let created = view.submit_create(state.config.session.acting_user).await?;
    println!("{}", event_path(&created.id));
    Ok(())
}

async fn edit(state: &AppState, id: EventId, fields: &FieldArgs) -> anyhow::Result<()> {
    let view = state.detail_view(id.clone(), Arc::new(RecordingNavigator::new()));
    view.load().await;
    if let LoadStage::EventFailed(reason) | LoadStage::CreatorFailed { error: reason, .. } =
        view.stage().await
    {
        anyhow::bail!("event {} could not be loaded: {}", id, reason);
    }
    view.open_edit().await?;
    for (field, value) in fields.edits() {
        view.edit_field(field, value).await?;
    }
    let updated = view.submit_edit().await?;
    println!("{} {}", event_path(&updated.id), updated.title);
    Ok(())
}

async fn delete(state: &AppState, id: EventId) -> anyhow::Result<()> {
    let navigator = Arc::new(RecordingNavigator::new());
    let view = state.detail_view(id, navigator.clone());
    view.open_delete().await;
    view.confirm_delete().await?;
    if let Some(route) = navigator.current() {
        println!("-> {}", route);
    }
    Ok(())
}
