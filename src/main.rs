// Events resource API server - the backend the list and detail views talk to

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use event_views::{
    config::Config,
    data_seeder::{load_snapshot, sample_snapshot},
    infrastructure::memory_store::MemoryStore,
    resource_api::create_resource_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Load configuration
    let config = Config::from_env()?;

    let snapshot = match &config.server.seed_path {
        Some(path) => load_snapshot(path).await?,
        None => sample_snapshot(),
    };
    let store = Arc::new(MemoryStore::from_snapshot(snapshot));

    let app = Router::new()
        .merge(create_resource_router(store))
        .layer(ServiceBuilder::new().layer(CorsLayer::permissive()));

    let addr = config.server_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Events resource API listening on http://{}", addr);
    info!("  GET    /events            - List events");
    info!("  POST   /events            - Create event");
    info!("  GET    /events/{{id}}       - Get event");
    info!("  PUT    /events/{{id}}       - Replace event");
    info!("  DELETE /events/{{id}}       - Delete event");
    info!("  GET    /categories        - List categories");
    info!("  GET    /users/{{id}}        - Get user");

    axum::serve(listener, app).await?;

    Ok(())
}
