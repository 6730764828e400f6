//! Client actions and server events.
//!
//! Inbound frames are `{"action": "...", "payload": {...}}`; outbound
//! frames are `{"type": "...", "payload": {...}}`. Both are closed
//! tagged enums — a frame carrying an unknown tag fails to deserialize
//! instead of being silently ignored, so typos and stale clients
//! surface in the logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Player, PlayerType, RoomSnapshot};

/// Everything a connected client is allowed to ask for.
///
/// The boundary layer maps each variant 1:1 onto one engine or hub
/// operation; there is no other way to mutate a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "payload", rename_all = "camelCase")]
pub enum ClientAction {
    /// Enter the room (or re-enter it after a reconnect).
    #[serde(rename_all = "camelCase")]
    Join {
        name: String,
        recovery_id: crate::RecoveryId,
        #[serde(rename = "type")]
        kind: PlayerType,
    },

    /// Cast or change a hidden vote.
    Vote { vote: String },

    /// Withdraw the current vote.
    Unvote,

    /// Reveal all votes.
    Show,

    /// Start a fresh round: empty the votes and hide them again.
    Clear,

    /// Remove another player by their public id.
    #[serde(rename_all = "camelCase")]
    Kick { public_id: u32 },

    /// Switch between participant and observer.
    ChangeType {
        #[serde(rename = "type")]
        kind: PlayerType,
    },

    /// Say something to the room.
    Chat { message: String },

    /// Explicitly leave the room (as opposed to just dropping the socket).
    Leave,
}

/// A line in the room's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub user: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// A chat message echoed to the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEntry {
    pub user: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Everything the server fans out to connected clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Full room snapshot, sent after every successful mutation.
    Updated(RoomSnapshot),

    /// Sent only to the joining connection, carrying its own player
    /// record (including the private id the client needs to keep).
    JoinSuccess(Player),

    /// Human-readable activity-log line.
    Log(LogEntry),

    /// Chat echo.
    Chat(ChatEntry),

    /// The round was cleared; clients reset their card selection.
    Clear,

    /// Targeted notice: this connection was removed from the room.
    Kicked,
}
