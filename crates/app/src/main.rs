use std::sync::Arc;

use engine::{JsonFileStore, MemoryStore, TripStore};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "tripsplit={level},server={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    let store: Arc<dyn TripStore> = match &settings.server.store_path {
        Some(path) => {
            tracing::info!("Persisting trips to {path}");
            Arc::new(JsonFileStore::open(path).await?)
        }
        None => {
            tracing::info!("Using in-memory trip store");
            Arc::new(MemoryStore::new())
        }
    };

    let engine = engine::Engine::builder().store(store).build();

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    server::run_with_listener(engine, listener).await?;

    Ok(())
}
