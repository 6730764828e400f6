//! HTTP routes and shared application state.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use pointdeck_engine::Engine;
use pointdeck_hub::HubHandle;
use pointdeck_protocol::{RoomId, ServerEvent};
use serde::{Deserialize, Serialize};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::ws;
use crate::ServerConfig;

/// Shared state passed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    pub hub: HubHandle<ServerEvent>,
    pub config: Arc<ServerConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    /// Comma-separated vote values, e.g. `"1,2,3,5,8,13"`.
    pub card_set: String,
}

#[derive(Debug, Serialize)]
pub struct CreateRoomResponse {
    pub id: RoomId,
}

/// Builds the application router:
///
/// - `POST /api/create` — create a room
/// - `GET /ws?roomId=...` — WebSocket upgrade into a room
/// - everything else — static frontend, falling back to `index.html`
///   so client-side routes deep-link correctly
pub fn build_routes(state: AppState) -> Router {
    let index = state.config.static_dir.join("index.html");
    let spa = ServeDir::new(&state.config.static_dir)
        .fallback(ServeFile::new(index));

    Router::new()
        .route("/api/create", post(create_room))
        .route("/ws", get(ws::upgrade))
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /api/create`: creates a room and returns its id.
async fn create_room(
    State(state): State<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, (StatusCode, String)> {
    let id = state
        .engine
        .create_room(&req.card_set)
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    Ok(Json(CreateRoomResponse { id }))
}
