//! The shared room data model.
//!
//! These types appear inside `updated` events, so their JSON shape is
//! part of the wire contract: field names are camelCase and enum
//! variants serialize as their plain names (`"Participant"`, `"Awake"`).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{PrivateId, RecoveryId, RoomId};

/// Whether a player may cast votes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerType {
    /// Full participant — may vote.
    Participant,
    /// Watching only — may never vote.
    Observer,
}

impl std::fmt::Display for PlayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Participant => "Participant",
            Self::Observer => "Observer",
        })
    }
}

/// Connectivity marker shown next to a player.
///
/// Every join and rejoin sets `Awake`. Nothing currently transitions a
/// player to `Asleep`; the variant is reserved for a presence-heartbeat
/// feature and kept so clients can already render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerMode {
    Awake,
    Asleep,
}

/// One participation slot in a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Private id of the player's current live connection.
    pub id: PrivateId,
    /// Stable, room-scoped integer identity. Votes are keyed by this,
    /// so a reconnect never loses or duplicates a vote.
    pub public_id: u32,
    /// The client-held token that maps reconnects back to this slot.
    pub recovery_id: RecoveryId,
    /// Display name; updated on rejoin.
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PlayerType,
    pub mode: PlayerMode,
}

/// The single active voting round of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteSession {
    /// Selectable vote values, fixed at room creation.
    pub card_set: Vec<String>,
    /// Cast votes, keyed by public id rendered as text. A missing key
    /// means "no vote cast".
    pub votes: HashMap<String, String>,
    /// While `true`, votes are visible and immutable until cleared.
    pub is_shown: bool,
}

impl VoteSession {
    /// Creates a fresh hidden round with no votes.
    pub fn new(card_set: Vec<String>) -> Self {
        Self {
            card_set,
            votes: HashMap::new(),
            is_shown: false,
        }
    }

    /// Empties the votes and hides the round again. The card set is
    /// untouched — it never changes for the lifetime of the room.
    pub fn clear(&mut self) {
        self.votes.clear();
        self.is_shown = false;
    }
}

/// Full room state as broadcast to every connected client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomSnapshot {
    pub id: RoomId,
    /// All players, keyed by the private id of their live connection.
    pub players: HashMap<PrivateId, Player>,
    pub current_session: VoteSession,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_player() -> Player {
        Player {
            id: PrivateId::new(),
            public_id: 1,
            recovery_id: RecoveryId(uuid::Uuid::new_v4()),
            name: "alice".into(),
            kind: PlayerType::Participant,
            mode: PlayerMode::Awake,
        }
    }

    #[test]
    fn test_player_json_uses_camel_case_and_type_key() {
        let json: serde_json::Value =
            serde_json::to_value(sample_player()).unwrap();
        assert_eq!(json["publicId"], 1);
        assert_eq!(json["type"], "Participant");
        assert_eq!(json["mode"], "Awake");
        assert!(json["recoveryId"].is_string());
        assert!(json["id"].is_string());
    }

    #[test]
    fn test_vote_session_json_shape() {
        let mut session = VoteSession::new(vec!["1".into(), "2".into()]);
        session.votes.insert("1".into(), "2".into());
        session.is_shown = true;

        let json: serde_json::Value =
            serde_json::to_value(&session).unwrap();
        assert_eq!(json["cardSet"], serde_json::json!(["1", "2"]));
        assert_eq!(json["votes"]["1"], "2");
        assert_eq!(json["isShown"], true);
    }

    #[test]
    fn test_vote_session_clear_resets_votes_and_reveal() {
        let mut session = VoteSession::new(vec!["1".into()]);
        session.votes.insert("1".into(), "1".into());
        session.is_shown = true;

        session.clear();

        assert!(session.votes.is_empty());
        assert!(!session.is_shown);
        assert_eq!(session.card_set, vec!["1".to_string()]);
    }

    #[test]
    fn test_room_snapshot_round_trip() {
        let player = sample_player();
        let mut players = HashMap::new();
        players.insert(player.id, player);

        let snapshot = RoomSnapshot {
            id: RoomId::new(),
            players,
            current_session: VoteSession::new(vec!["1".into()]),
        };

        let bytes = serde_json::to_vec(&snapshot).unwrap();
        let decoded: RoomSnapshot = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
