//! Identity types.
//!
//! Three distinct scopes of identity exist and must never be confused:
//!
//! - [`RoomId`] — one estimation room; the correlation key shared by the
//!   engine and the broadcast hub.
//! - [`PrivateId`] — one live socket. Minted by the boundary when a
//!   connection is accepted; a reconnect always gets a fresh one.
//! - [`RecoveryId`] — a durable token held by the client, used to
//!   re-associate a new connection with an existing participation slot.
//!
//! Each is a newtype over [`Uuid`] so a `RoomId` can't be passed where a
//! `PrivateId` is expected, even though both are UUIDs underneath.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an estimation room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub Uuid);

impl RoomId {
    /// Generates a fresh random room id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoomId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Identifier for one live connection.
///
/// Reassigned on every reconnect — a new socket means a new private id,
/// even for the same human. Votes are therefore never keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrivateId(pub Uuid);

impl PrivateId {
    /// Generates a fresh private id for a newly accepted connection.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PrivateId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PrivateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-supplied durable token for reconnection.
///
/// The server never generates these; the client mints one and presents
/// it on every join so a page reload lands back on the same public id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecoveryId(pub Uuid);

impl fmt::Display for RecoveryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_serializes_as_plain_uuid_string() {
        let id = RoomId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.0));
    }

    #[test]
    fn test_room_id_round_trips_through_from_str() {
        let id = RoomId::new();
        let parsed: RoomId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_room_id_rejects_garbage() {
        assert!("not-a-uuid".parse::<RoomId>().is_err());
    }

    #[test]
    fn test_private_ids_are_unique() {
        assert_ne!(PrivateId::new(), PrivateId::new());
    }

    #[test]
    fn test_private_id_works_as_map_key() {
        use std::collections::HashMap;
        let a = PrivateId::new();
        let mut map = HashMap::new();
        map.insert(a, "alice");
        assert_eq!(map[&a], "alice");
    }
}
