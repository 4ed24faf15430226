use crate::{
    core::strong_types::UserId,
    error::{AppError, AppResult},
    infrastructure::memory_store::ResourceSnapshot,
    models::{Category, Creator, Event},
};
use std::path::Path;
use tracing::info;

/// Read a json-server style `{ "events", "categories", "users" }` file
pub async fn load_snapshot(path: impl AsRef<Path>) -> AppResult<ResourceSnapshot> {
    let path = path.as_ref();
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::ConfigurationError(format!("cannot read {}: {}", path.display(), e))
    })?;
    let snapshot: ResourceSnapshot = serde_json::from_str(&raw)?;
    info!(
        "Loaded seed data from {}: {} events",
        path.display(),
        snapshot.events.len()
    );
    Ok(snapshot)
}

/// Built-in data for a fresh server
pub fn sample_snapshot() -> ResourceSnapshot {
    let event = |id: i64, title: &str, description: &str, location: &str, day: u32, creator: i64, categories: &[i64]| {
        let mut event = Event::new(id, title)
            .with_categories(categories)
            .with_creator(UserId::new(creator));
        event.description = description.to_string();
        event.image = format!("https://picsum.photos/seed/event{}/640/360", id);
        event.location = Some(location.to_string());
        event.start_time = format!("2023-03-{:02}T18:00", day);
        event.end_time = format!("2023-03-{:02}T21:00", day);
        event
    };

    ResourceSnapshot {
        events: vec![
            event(1, "Bouldering", "Climb the walls with fellow beginners", "Climbing hall", 10, 1, &[1]),
            event(2, "Board game night", "Bring your favourite game", "De Speeltuin", 12, 2, &[2]),
            event(3, "Sunset yoga", "Relaxing session on the beach", "Scheveningen", 15, 1, &[1, 3]),
            event(4, "Open studio", "Everyone welcome, no theme", "Community centre", 18, 2, &[]),
        ],
        categories: vec![
            Category::new(1, "sports"),
            Category::new(2, "games"),
            Category::new(3, "relaxation"),
        ],
        users: vec![
            Creator::new(1, "Ignacio Doe", "https://picsum.photos/seed/user1/100/100"),
            Creator::new(2, "Jane Bennett", "https://picsum.photos/seed/user2/100/100"),
        ],
    }
}
