// Events resource API - json-server style routes over the in-memory store

use std::sync::Arc;

use axum::{
    extract::{Path as AxumPath, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::{
    core::strong_types::{EventId, UserId},
    error::{AppError, AppResult},
    infrastructure::{memory_store::MemoryStore, traits::ResourceClient},
    models::{Category, Creator, Event, NewEvent},
};

type StoreState = State<Arc<MemoryStore>>;

pub async fn list_events_handler(State(store): StoreState) -> AppResult<Json<Vec<Event>>> {
    Ok(Json(store.list_events().await?))
}

pub async fn get_event_handler(
    State(store): StoreState,
    AxumPath(id): AxumPath<String>,
) -> AppResult<Json<Event>> {
    Ok(Json(store.get_event(&EventId::from(id.as_str())).await?))
}

pub async fn create_event_handler(
    State(store): StoreState,
    Json(payload): Json<NewEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let created = store.create_event(&payload).await?;
    info!("POST /events -> {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// Full replace; the path id wins over any id in the body
pub async fn update_event_handler(
    State(store): StoreState,
    AxumPath(id): AxumPath<String>,
    Json(mut body): Json<Value>,
) -> AppResult<Json<Event>> {
    let id = EventId::from(id.as_str());
    let object = body
        .as_object_mut()
        .ok_or_else(|| AppError::BadRequest("event body must be a JSON object".to_string()))?;
    object.insert("id".to_string(), serde_json::to_value(&id)?);
    let record: Event = serde_json::from_value(body)?;
    let updated = store.update_event(&id, &record).await?;
    info!("PUT /events/{}", id);
    Ok(Json(updated))
}

pub async fn delete_event_handler(
    State(store): StoreState,
    AxumPath(id): AxumPath<String>,
) -> AppResult<Json<Value>> {
    let id = EventId::from(id.as_str());
    store.delete_event(&id).await?;
    info!("DELETE /events/{}", id);
    Ok(Json(json!({})))
}

pub async fn list_categories_handler(State(store): StoreState) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(store.list_categories().await?))
}

pub async fn get_user_handler(
    State(store): StoreState,
    AxumPath(id): AxumPath<i64>,
) -> AppResult<Json<Creator>> {
    Ok(Json(store.get_user(UserId::new(id)).await?))
}

pub fn create_resource_router(store: Arc<MemoryStore>) -> Router {
    Router::new()
        // Events
        .route("/events", get(list_events_handler).post(create_event_handler))
        .route(
            "/events/{id}",
            get(get_event_handler)
                .put(update_event_handler)
                .delete(delete_event_handler),
        )
        // Read-only resources
        .route("/categories", get(list_categories_handler))
        .route("/users/{id}", get(get_user_handler))
        .with_state(store)
}
