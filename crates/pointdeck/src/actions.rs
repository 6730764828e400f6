//! Maps client actions onto engine operations and hub fan-out.
//!
//! Each action either succeeds and broadcasts, or fails and broadcasts
//! nothing. Clients never see a failed action; the failure is logged
//! server-side and the room state stays exactly as it was.

use chrono::Utc;
use pointdeck_hub::HubError;
use pointdeck_protocol::{
    ChatEntry, ClientAction, LogEntry, PrivateId, RoomId, ServerEvent,
};

use crate::AppState;

/// Per-connection dispatch state.
pub(crate) struct Connection {
    room_id: RoomId,
    private_id: PrivateId,
}

impl Connection {
    pub(crate) fn new(room_id: RoomId, private_id: PrivateId) -> Self {
        Self {
            room_id,
            private_id,
        }
    }
}

/// Applies one client action.
///
/// Returns `Err` only when the hub itself is gone; engine failures are
/// logged and swallowed so one bad action never tears down the socket.
pub(crate) async fn dispatch(
    state: &AppState,
    conn: &Connection,
    action: ClientAction,
) -> Result<(), HubError> {
    let room_id = conn.room_id;

    // Anything but a join from a connection without a player record is
    // ignored: the client either never joined, was kicked, or left.
    let player_name = state
        .engine
        .player_name(room_id, conn.private_id)
        .await;
    let name = match (&player_name, &action) {
        (Some(name), _) => name.clone(),
        (None, ClientAction::Join { .. }) => String::new(),
        (None, _) => {
            tracing::debug!(
                conn_id = %conn.private_id,
                ?action,
                "ignoring action from connection without a player"
            );
            return Ok(());
        }
    };

    match action {
        ClientAction::Join {
            name,
            recovery_id,
            kind,
        } => {
            let player = match state
                .engine
                .join_room(room_id, recovery_id, &name, conn.private_id, kind)
                .await
            {
                Ok(player) => player,
                Err(e) => {
                    tracing::warn!(%room_id, error = %e, "join failed");
                    return Ok(());
                }
            };
            tracing::info!(
                %room_id,
                public_id = player.public_id,
                name = %player.name,
                "player joined"
            );
            let joined_name = player.name.clone();
            state
                .hub
                .send_to(conn.private_id, ServerEvent::JoinSuccess(player))
                .await?;
            broadcast_update(state, room_id).await?;
            broadcast_log(state, room_id, &joined_name, "Joined the room")
                .await?;
        }

        ClientAction::Vote { vote } => {
            if let Err(e) =
                state.engine.vote(room_id, conn.private_id, &vote).await
            {
                tracing::warn!(%room_id, name = %name, error = %e, "vote rejected");
                return Ok(());
            }
            broadcast_log(state, room_id, &name, "Voted").await?;
            broadcast_update(state, room_id).await?;
        }

        ClientAction::Unvote => {
            if let Err(e) =
                state.engine.unvote(room_id, conn.private_id).await
            {
                tracing::debug!(%room_id, name = %name, error = %e, "unvote rejected");
                return Ok(());
            }
            broadcast_log(state, room_id, &name, "Redacted their vote").await?;
            broadcast_update(state, room_id).await?;
        }

        ClientAction::Show => {
            if let Err(e) = state.engine.show_votes(room_id).await {
                tracing::warn!(%room_id, error = %e, "show rejected");
                return Ok(());
            }
            broadcast_log(state, room_id, &name, "Made all votes visible")
                .await?;
            broadcast_update(state, room_id).await?;
        }

        ClientAction::Clear => {
            if let Err(e) = state.engine.clear_votes(room_id).await {
                tracing::warn!(%room_id, error = %e, "clear rejected");
                return Ok(());
            }
            broadcast_log(state, room_id, &name, "Cleared all votes").await?;
            broadcast_update(state, room_id).await?;
            state.hub.broadcast(room_id, ServerEvent::Clear).await?;
        }

        ClientAction::Kick { public_id } => {
            let kicked = match state.engine.kick_player(room_id, public_id).await
            {
                Ok(kicked) => kicked,
                Err(e) => {
                    tracing::warn!(%room_id, public_id, error = %e, "kick rejected");
                    return Ok(());
                }
            };
            tracing::info!(%room_id, public_id, by = %name, "player kicked");
            // Notify the target before detaching it so the notice is
            // still in its buffer when the channel closes.
            state.hub.send_to(kicked, ServerEvent::Kicked).await?;
            state.hub.unregister(kicked).await?;
            broadcast_update(state, room_id).await?;
        }

        ClientAction::ChangeType { kind } => {
            let player = match state
                .engine
                .change_player_type(room_id, conn.private_id, kind)
                .await
            {
                Ok(player) => player,
                Err(e) => {
                    tracing::warn!(%room_id, error = %e, "type change rejected");
                    return Ok(());
                }
            };
            let message =
                format!("Changed their player type to {}", player.kind);
            broadcast_log(state, room_id, &name, &message).await?;
            broadcast_update(state, room_id).await?;
        }

        ClientAction::Chat { message } => {
            let entry = ChatEntry {
                user: name,
                message,
                timestamp: Utc::now(),
            };
            state.hub.broadcast(room_id, ServerEvent::Chat(entry)).await?;
        }

        ClientAction::Leave => {
            let Some(left_name) =
                state.engine.leave_room(room_id, conn.private_id).await
            else {
                return Ok(());
            };
            tracing::info!(%room_id, name = %left_name, "player left");
            broadcast_update(state, room_id).await?;
            broadcast_log(state, room_id, &left_name, "Left the room").await?;
        }
    }

    Ok(())
}

async fn broadcast_update(
    state: &AppState,
    room_id: RoomId,
) -> Result<(), HubError> {
    let snapshot = match state.engine.snapshot(room_id).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!(%room_id, error = %e, "snapshot for update failed");
            return Ok(());
        }
    };
    state
        .hub
        .broadcast(room_id, ServerEvent::Updated(snapshot))
        .await
}

async fn broadcast_log(
    state: &AppState,
    room_id: RoomId,
    user: &str,
    message: &str,
) -> Result<(), HubError> {
    let entry = LogEntry {
        user: user.to_owned(),
        message: message.to_owned(),
        timestamp: Utc::now(),
    };
    state.hub.broadcast(room_id, ServerEvent::Log(entry)).await
}
