//! WebSocket boundary: one handler task per connection.
//!
//! The flow for each accepted socket is:
//!   1. Check the room exists, mint a fresh private id
//!   2. Register a bounded outbound channel with the hub
//!   3. Spawn a writer task that serializes events onto the socket
//!   4. Loop: read frames → parse actions → dispatch
//!   5. On exit, unregister from the hub
//!
//! A dropped socket only detaches the connection from the hub. The
//! player's engine record stays, so a reload with the same recovery id
//! lands back on the same public id with votes intact.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Query, State, WebSocketUpgrade};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use futures_util::{SinkExt, StreamExt};
use pointdeck_protocol::{ClientAction, PrivateId, RoomId};
use serde::Deserialize;
use tokio::sync::mpsc;

use crate::actions::{self, Connection};
use crate::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WsParams {
    room_id: RoomId,
}

/// `GET /ws?roomId=...`: upgrades to a WebSocket into the given room.
pub(crate) async fn upgrade(
    ws: WebSocketUpgrade,
    Query(params): Query<WsParams>,
    State(state): State<AppState>,
) -> Response {
    if !state.engine.room_exists(params.room_id).await {
        return (StatusCode::NOT_FOUND, "room not found").into_response();
    }
    ws.on_upgrade(move |socket| handle_socket(socket, state, params.room_id))
}

async fn handle_socket(socket: WebSocket, state: AppState, room_id: RoomId) {
    let private_id = PrivateId::new();
    tracing::debug!(%room_id, conn_id = %private_id, "socket connected");

    let (event_tx, mut event_rx) =
        mpsc::channel(state.config.outbound_buffer);
    if state.hub.register(room_id, private_id, event_tx).await.is_err() {
        return;
    }

    let (mut ws_tx, mut ws_rx) = socket.split();

    // Writer task: drains the hub channel onto the socket. Ends when the
    // hub drops our sender (unregister or eviction) or the socket dies.
    let writer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            let text = match serde_json::to_string(&event) {
                Ok(text) => text,
                Err(e) => {
                    tracing::error!(error = %e, "failed to serialize event");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
        let _ = ws_tx.send(Message::Close(None)).await;
    });

    let conn = Connection::new(room_id, private_id);

    while let Some(frame) = ws_rx.next().await {
        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                tracing::debug!(conn_id = %private_id, error = %e, "read error");
                break;
            }
        };
        let text = match frame {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by axum; ignore everything else.
            _ => continue,
        };

        let action: ClientAction = match serde_json::from_str(&text) {
            Ok(action) => action,
            Err(e) => {
                tracing::debug!(
                    conn_id = %private_id,
                    error = %e,
                    "dropping malformed frame"
                );
                continue;
            }
        };

        if actions::dispatch(&state, &conn, action).await.is_err() {
            // Hub gone; nothing left to do for this connection.
            break;
        }
    }

    let _ = state.hub.unregister(private_id).await;
    let _ = writer.await;
    tracing::debug!(%room_id, conn_id = %private_id, "socket closed");
}
