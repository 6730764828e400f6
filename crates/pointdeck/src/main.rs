//! Pointdeck server binary.

use std::sync::Arc;

use pointdeck::{build_routes, AppState, ServerConfig};
use pointdeck_engine::Engine;
use pointdeck_hub::Hub;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(ServerConfig::from_env());
    let engine = Arc::new(Engine::new());
    let hub = Hub::spawn(64);

    spawn_sweeper(Arc::clone(&engine), &config);

    let state = AppState {
        engine,
        hub,
        config: Arc::clone(&config),
    };
    let app = build_routes(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Starts the periodic idle-room sweep.
fn spawn_sweeper(engine: Arc<Engine>, config: &ServerConfig) {
    let interval = config.sweep_interval;
    let max_age = config.room_max_age;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it so the sweep
        // starts one full interval after boot.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = engine.sweep_idle(max_age).await;
            if removed > 0 {
                tracing::info!(removed, "swept idle rooms");
            }
        }
    });
}
