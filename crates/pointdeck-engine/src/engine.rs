//! The engine: one authoritative table of rooms and every state
//! transition on it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use pointdeck_protocol::{
    Player, PlayerMode, PlayerType, PrivateId, RecoveryId, RoomId,
    RoomSnapshot,
};
use tokio::sync::RwLock;

use crate::room::Room;
use crate::EngineError;

/// Authoritative store of all rooms, players, and vote sessions.
///
/// Constructed once by the composition root and shared by handle; all
/// connection handlers call into the same instance. Writers take the
/// exclusive lock, snapshot reads share the lock and run in parallel.
/// Every critical section is short and free of I/O.
pub struct Engine {
    rooms: RwLock<HashMap<RoomId, Room>>,
    /// Reference point for `last_access` timestamps. Monotonic, so the
    /// idle sweep is immune to wall-clock adjustments.
    epoch: Instant,
}

impl Engine {
    /// Creates an engine with an empty room table.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            epoch: Instant::now(),
        }
    }

    fn now(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    /// Creates a room from a comma-separated card specification.
    ///
    /// Tokens are trimmed and empty ones dropped, so `"1, 2,,3 ,"`
    /// yields `["1", "2", "3"]`. The cleaned set must be non-empty.
    pub async fn create_room(
        &self,
        card_spec: &str,
    ) -> Result<RoomId, EngineError> {
        let card_set: Vec<String> = card_spec
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_owned)
            .collect();

        if card_set.is_empty() {
            return Err(EngineError::EmptyCardSet);
        }

        let id = RoomId::new();
        let room = Room::new(id, card_set, self.now());
        self.rooms.write().await.insert(id, room);

        tracing::info!(room_id = %id, "room created");
        Ok(id)
    }

    /// Adds a player to a room, or folds a reconnecting client back
    /// onto its existing participation slot.
    ///
    /// If any current player carries the same recovery id this is a
    /// reconnect: the record is re-keyed under the new private id and
    /// its name, type, and mode are refreshed, while the public id and
    /// any cast vote stay untouched. Otherwise a new slot is allocated
    /// with the next public id.
    ///
    /// Two live connections presenting the same recovery id both fold
    /// onto the same slot; the latest join wins and the earlier
    /// connection goes stale. That is accepted behavior, not a race to
    /// defend against.
    pub async fn join_room(
        &self,
        room_id: RoomId,
        recovery_id: RecoveryId,
        name: &str,
        private_id: PrivateId,
        kind: PlayerType,
    ) -> Result<Player, EngineError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(&room_id)
            .ok_or(EngineError::RoomNotFound(room_id))?;
        room.touch(self.now());

        if let Some(old_key) = room.find_by_recovery(recovery_id) {
            // Reconnect: same slot, fresh connection identity.
            let mut player = room
                .players
                .remove(&old_key)
                .ok_or(EngineError::PlayerNotFound(room_id))?;
            player.id = private_id;
            player.name = name.to_owned();
            player.kind = kind;
            player.mode = PlayerMode::Awake;
            room.players.insert(private_id, player.clone());

            tracing::debug!(
                room_id = %room_id,
                public_id = player.public_id,
                "player reconnected"
            );
            return Ok(player);
        }

        let player = Player {
            id: private_id,
            public_id: room.allocate_public_id(),
            recovery_id,
            name: name.to_owned(),
            kind,
            mode: PlayerMode::Awake,
        };
        room.players.insert(private_id, player.clone());

        tracing::debug!(
            room_id = %room_id,
            public_id = player.public_id,
            "player joined"
        );
        Ok(player)
    }

    /// Records a vote for the player behind `private_id`.
    ///
    /// Overwrites any earlier vote for the same slot. Observers may not
    /// vote, and once the round is revealed votes are frozen until a
    /// clear.
    pub async fn vote(
        &self,
        room_id: RoomId,
        private_id: PrivateId,
        value: &str,
    ) -> Result<(), EngineError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(&room_id)
            .ok_or(EngineError::RoomNotFound(room_id))?;
        room.touch(self.now());

        let player = room
            .players
            .get(&private_id)
            .ok_or(EngineError::PlayerNotFound(room_id))?;
        if player.kind == PlayerType::Observer {
            return Err(EngineError::ObserverCannotVote);
        }
        if room.session.is_shown {
            return Err(EngineError::VotesRevealed);
        }

        let key = player.public_id.to_string();
        room.session.votes.insert(key, value.to_owned());
        Ok(())
    }

    /// Withdraws the player's vote, if any.
    ///
    /// An unknown player is a silent no-op; an already-revealed round
    /// still refuses the change.
    pub async fn unvote(
        &self,
        room_id: RoomId,
        private_id: PrivateId,
    ) -> Result<(), EngineError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(&room_id)
            .ok_or(EngineError::RoomNotFound(room_id))?;
        room.touch(self.now());

        if room.session.is_shown {
            return Err(EngineError::VotesRevealed);
        }

        if let Some(player) = room.players.get(&private_id) {
            let key = player.public_id.to_string();
            room.session.votes.remove(&key);
        }
        Ok(())
    }

    /// Reveals the votes. Idempotent.
    pub async fn show_votes(
        &self,
        room_id: RoomId,
    ) -> Result<(), EngineError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(&room_id)
            .ok_or(EngineError::RoomNotFound(room_id))?;
        room.touch(self.now());
        room.session.is_shown = true;
        Ok(())
    }

    /// Starts a fresh round: empties the votes and hides them again.
    /// Idempotent.
    pub async fn clear_votes(
        &self,
        room_id: RoomId,
    ) -> Result<(), EngineError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(&room_id)
            .ok_or(EngineError::RoomNotFound(room_id))?;
        room.touch(self.now());
        room.session.clear();
        Ok(())
    }

    /// Removes the player with the given public id and their vote.
    ///
    /// Returns the removed player's current private id so the boundary
    /// can notify and evict that live connection.
    pub async fn kick_player(
        &self,
        room_id: RoomId,
        public_id: u32,
    ) -> Result<PrivateId, EngineError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(&room_id)
            .ok_or(EngineError::RoomNotFound(room_id))?;
        room.touch(self.now());

        let private_id = room
            .find_by_public_id(public_id)
            .ok_or(EngineError::PlayerNotFound(room_id))?;
        room.players.remove(&private_id);
        room.session.votes.remove(&public_id.to_string());

        tracing::debug!(room_id = %room_id, public_id, "player kicked");
        Ok(private_id)
    }

    /// Removes the player behind `private_id` and their vote.
    ///
    /// Returns the player's name for logging, or `None` when the room
    /// or player is unknown — an explicit leave from a stale connection
    /// is not an error.
    pub async fn leave_room(
        &self,
        room_id: RoomId,
        private_id: PrivateId,
    ) -> Option<String> {
        let mut rooms = self.rooms.write().await;
        let room = rooms.get_mut(&room_id)?;
        room.touch(self.now());

        let player = room.players.remove(&private_id)?;
        room.session.votes.remove(&player.public_id.to_string());
        Some(player.name)
    }

    /// Switches a player between participant and observer.
    ///
    /// A player turning observer loses their pending vote — observers
    /// can never have an entry in the vote map.
    pub async fn change_player_type(
        &self,
        room_id: RoomId,
        private_id: PrivateId,
        kind: PlayerType,
    ) -> Result<Player, EngineError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(&room_id)
            .ok_or(EngineError::RoomNotFound(room_id))?;
        room.touch(self.now());

        let player = room
            .players
            .get_mut(&private_id)
            .ok_or(EngineError::PlayerNotFound(room_id))?;
        player.kind = kind;
        let public_id = player.public_id;
        let player = player.clone();

        if kind == PlayerType::Observer {
            room.session.votes.remove(&public_id.to_string());
        }
        Ok(player)
    }

    /// Returns a full copy of the room state for broadcasting.
    ///
    /// Takes the shared lock, so any number of snapshot reads proceed
    /// in parallel with each other.
    pub async fn snapshot(
        &self,
        room_id: RoomId,
    ) -> Result<RoomSnapshot, EngineError> {
        let rooms = self.rooms.read().await;
        let room = rooms
            .get(&room_id)
            .ok_or(EngineError::RoomNotFound(room_id))?;
        room.touch(self.now());
        Ok(room.snapshot())
    }

    /// Looks up a player's display name for log lines.
    pub async fn player_name(
        &self,
        room_id: RoomId,
        private_id: PrivateId,
    ) -> Option<String> {
        let rooms = self.rooms.read().await;
        let room = rooms.get(&room_id)?;
        room.touch(self.now());
        room.players.get(&private_id).map(|p| p.name.clone())
    }

    /// Whether a room exists. Counts as activity for the idle sweep.
    pub async fn room_exists(&self, room_id: RoomId) -> bool {
        let rooms = self.rooms.read().await;
        match rooms.get(&room_id) {
            Some(room) => {
                room.touch(self.now());
                true
            }
            None => false,
        }
    }

    /// Deletes every room idle for longer than `max_age`.
    ///
    /// The age check and the deletion run inside one exclusive critical
    /// section, so a room touched concurrently with the sweep decision
    /// is never deleted. Returns the number of rooms removed.
    pub async fn sweep_idle(&self, max_age: Duration) -> usize {
        let mut rooms = self.rooms.write().await;
        let now = self.now();
        let max_age = max_age.as_millis() as u64;

        let before = rooms.len();
        rooms.retain(|id, room| {
            let idle = now.saturating_sub(room.last_access());
            let keep = idle <= max_age;
            if !keep {
                tracing::info!(room_id = %id, idle_ms = idle, "expiring idle room");
            }
            keep
        });
        before - rooms.len()
    }

    /// Number of live rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn recovery(n: u128) -> RecoveryId {
        RecoveryId(Uuid::from_u128(n))
    }

    async fn engine_with_room() -> (Engine, RoomId) {
        let engine = Engine::new();
        let room = engine.create_room("1,2,3,5,8").await.unwrap();
        (engine, room)
    }

    /// Joins a fresh participant and returns their connection identity.
    async fn join(
        engine: &Engine,
        room: RoomId,
        n: u128,
        name: &str,
        kind: PlayerType,
    ) -> (PrivateId, Player) {
        let private_id = PrivateId::new();
        let player = engine
            .join_room(room, recovery(n), name, private_id, kind)
            .await
            .unwrap();
        (private_id, player)
    }

    // =====================================================================
    // create_room
    // =====================================================================

    #[tokio::test]
    async fn test_create_room_cleans_card_spec() {
        let engine = Engine::new();
        let room = engine.create_room(" 1 , 2,,3 ,").await.unwrap();

        let snap = engine.snapshot(room).await.unwrap();
        assert_eq!(snap.current_session.card_set, vec!["1", "2", "3"]);
        assert!(snap.players.is_empty());
        assert!(!snap.current_session.is_shown);
        assert!(snap.current_session.votes.is_empty());
    }

    #[tokio::test]
    async fn test_create_room_rejects_empty_spec() {
        let engine = Engine::new();
        assert_eq!(
            engine.create_room("").await,
            Err(EngineError::EmptyCardSet)
        );
        assert_eq!(
            engine.create_room(" , ,, ").await,
            Err(EngineError::EmptyCardSet)
        );
        assert_eq!(engine.room_count().await, 0);
    }

    #[tokio::test]
    async fn test_create_room_ids_are_unique() {
        let engine = Engine::new();
        let a = engine.create_room("1").await.unwrap();
        let b = engine.create_room("1").await.unwrap();
        assert_ne!(a, b);
        assert_eq!(engine.room_count().await, 2);
    }

    // =====================================================================
    // join_room
    // =====================================================================

    #[tokio::test]
    async fn test_join_room_allocates_increasing_public_ids() {
        let (engine, room) = engine_with_room().await;
        let (_, a) = join(&engine, room, 1, "alice", PlayerType::Participant).await;
        let (_, b) = join(&engine, room, 2, "bob", PlayerType::Observer).await;

        assert_eq!(a.public_id, 1);
        assert_eq!(b.public_id, 2);
        assert_eq!(a.mode, PlayerMode::Awake);
    }

    #[tokio::test]
    async fn test_join_room_unknown_room_fails() {
        let engine = Engine::new();
        let missing = RoomId::new();
        let result = engine
            .join_room(
                missing,
                recovery(1),
                "alice",
                PrivateId::new(),
                PlayerType::Participant,
            )
            .await;
        assert_eq!(result, Err(EngineError::RoomNotFound(missing)));
    }

    #[tokio::test]
    async fn test_public_ids_never_reused_after_kick() {
        let (engine, room) = engine_with_room().await;
        join(&engine, room, 1, "alice", PlayerType::Participant).await;
        let (_, b) = join(&engine, room, 2, "bob", PlayerType::Participant).await;

        engine.kick_player(room, b.public_id).await.unwrap();

        // The highest ever allocated id was 2; the next joiner must get 3
        // even though 2 is free again.
        let (_, c) = join(&engine, room, 3, "carol", PlayerType::Participant).await;
        assert_eq!(c.public_id, 3);
    }

    #[tokio::test]
    async fn test_public_ids_never_reused_after_leave() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;
        engine.leave_room(room, pa).await.unwrap();

        let (_, b) = join(&engine, room, 2, "bob", PlayerType::Participant).await;
        assert_eq!(b.public_id, 2);
    }

    #[tokio::test]
    async fn test_rejoin_preserves_public_id_and_vote() {
        let (engine, room) = engine_with_room().await;
        let (pa, a) = join(&engine, room, 7, "alice", PlayerType::Participant).await;
        engine.vote(room, pa, "8").await.unwrap();

        // Same recovery id, fresh connection: new private id, new name.
        let new_private = PrivateId::new();
        let rejoined = engine
            .join_room(room, recovery(7), "alice2", new_private, PlayerType::Participant)
            .await
            .unwrap();

        assert_eq!(rejoined.public_id, a.public_id);
        assert_eq!(rejoined.id, new_private);
        assert_eq!(rejoined.name, "alice2");

        let snap = engine.snapshot(room).await.unwrap();
        assert_eq!(snap.players.len(), 1, "no duplicate slot");
        assert!(!snap.players.contains_key(&pa), "old key removed");
        assert_eq!(snap.current_session.votes["1"], "8");
    }

    #[tokio::test]
    async fn test_rejoin_does_not_consume_a_public_id() {
        let (engine, room) = engine_with_room().await;
        join(&engine, room, 1, "alice", PlayerType::Participant).await;

        // Alice reconnects, then a genuinely new player joins.
        engine
            .join_room(room, recovery(1), "alice", PrivateId::new(), PlayerType::Participant)
            .await
            .unwrap();
        let (_, b) = join(&engine, room, 2, "bob", PlayerType::Participant).await;
        assert_eq!(b.public_id, 2);
    }

    // =====================================================================
    // vote / unvote
    // =====================================================================

    #[tokio::test]
    async fn test_vote_records_under_public_id_key() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;

        engine.vote(room, pa, "5").await.unwrap();

        let snap = engine.snapshot(room).await.unwrap();
        assert_eq!(snap.current_session.votes["1"], "5");
    }

    #[tokio::test]
    async fn test_vote_overwrites_previous_value() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;

        engine.vote(room, pa, "5").await.unwrap();
        engine.vote(room, pa, "8").await.unwrap();

        let snap = engine.snapshot(room).await.unwrap();
        assert_eq!(snap.current_session.votes.len(), 1);
        assert_eq!(snap.current_session.votes["1"], "8");
    }

    #[tokio::test]
    async fn test_observer_cannot_vote() {
        let (engine, room) = engine_with_room().await;
        let (pb, _) = join(&engine, room, 2, "bob", PlayerType::Observer).await;

        let result = engine.vote(room, pb, "3").await;

        assert_eq!(result, Err(EngineError::ObserverCannotVote));
        let snap = engine.snapshot(room).await.unwrap();
        assert!(snap.current_session.votes.is_empty());
    }

    #[tokio::test]
    async fn test_vote_unknown_player_fails() {
        let (engine, room) = engine_with_room().await;
        let result = engine.vote(room, PrivateId::new(), "1").await;
        assert_eq!(result, Err(EngineError::PlayerNotFound(room)));
    }

    #[tokio::test]
    async fn test_vote_locked_after_reveal() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;
        engine.vote(room, pa, "5").await.unwrap();
        engine.show_votes(room).await.unwrap();

        assert_eq!(
            engine.vote(room, pa, "8").await,
            Err(EngineError::VotesRevealed)
        );
        assert_eq!(
            engine.unvote(room, pa).await,
            Err(EngineError::VotesRevealed)
        );

        let snap = engine.snapshot(room).await.unwrap();
        assert_eq!(snap.current_session.votes["1"], "5");
    }

    #[tokio::test]
    async fn test_unvote_removes_vote() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;
        engine.vote(room, pa, "5").await.unwrap();

        engine.unvote(room, pa).await.unwrap();

        let snap = engine.snapshot(room).await.unwrap();
        assert!(snap.current_session.votes.is_empty());
    }

    #[tokio::test]
    async fn test_unvote_unknown_player_is_noop() {
        let (engine, room) = engine_with_room().await;
        assert_eq!(engine.unvote(room, PrivateId::new()).await, Ok(()));
    }

    // =====================================================================
    // show / clear
    // =====================================================================

    #[tokio::test]
    async fn test_show_votes_is_idempotent() {
        let (engine, room) = engine_with_room().await;
        engine.show_votes(room).await.unwrap();
        engine.show_votes(room).await.unwrap();

        let snap = engine.snapshot(room).await.unwrap();
        assert!(snap.current_session.is_shown);
    }

    #[tokio::test]
    async fn test_clear_votes_resets_round() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;
        engine.vote(room, pa, "5").await.unwrap();
        engine.show_votes(room).await.unwrap();

        engine.clear_votes(room).await.unwrap();

        let snap = engine.snapshot(room).await.unwrap();
        assert!(snap.current_session.votes.is_empty());
        assert!(!snap.current_session.is_shown);

        // Voting opens again after the clear.
        engine.vote(room, pa, "8").await.unwrap();
        let snap = engine.snapshot(room).await.unwrap();
        assert_eq!(snap.current_session.votes["1"], "8");
    }

    #[tokio::test]
    async fn test_clear_votes_on_fresh_room_is_noop() {
        let (engine, room) = engine_with_room().await;
        engine.clear_votes(room).await.unwrap();
        let snap = engine.snapshot(room).await.unwrap();
        assert!(snap.current_session.votes.is_empty());
        assert!(!snap.current_session.is_shown);
    }

    // =====================================================================
    // kick / leave / changeType
    // =====================================================================

    #[tokio::test]
    async fn test_kick_removes_player_and_vote() {
        let (engine, room) = engine_with_room().await;
        let (pa, a) = join(&engine, room, 1, "alice", PlayerType::Participant).await;
        engine.vote(room, pa, "5").await.unwrap();

        let kicked = engine.kick_player(room, a.public_id).await.unwrap();
        assert_eq!(kicked, pa);

        let snap = engine.snapshot(room).await.unwrap();
        assert!(snap.players.is_empty());
        assert!(snap.current_session.votes.is_empty());
    }

    #[tokio::test]
    async fn test_kick_unknown_public_id_fails() {
        let (engine, room) = engine_with_room().await;
        assert_eq!(
            engine.kick_player(room, 42).await,
            Err(EngineError::PlayerNotFound(room))
        );
    }

    #[tokio::test]
    async fn test_leave_room_returns_name_and_removes_vote() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;
        engine.vote(room, pa, "5").await.unwrap();

        let name = engine.leave_room(room, pa).await;
        assert_eq!(name.as_deref(), Some("alice"));

        let snap = engine.snapshot(room).await.unwrap();
        assert!(snap.players.is_empty());
        assert!(snap.current_session.votes.is_empty());
    }

    #[tokio::test]
    async fn test_leave_room_unknown_player_is_none() {
        let (engine, room) = engine_with_room().await;
        assert_eq!(engine.leave_room(room, PrivateId::new()).await, None);
        assert_eq!(engine.leave_room(RoomId::new(), PrivateId::new()).await, None);
    }

    #[tokio::test]
    async fn test_change_type_to_observer_drops_vote() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;
        engine.vote(room, pa, "5").await.unwrap();

        let player = engine
            .change_player_type(room, pa, PlayerType::Observer)
            .await
            .unwrap();
        assert_eq!(player.kind, PlayerType::Observer);

        let snap = engine.snapshot(room).await.unwrap();
        assert!(snap.current_session.votes.is_empty());
    }

    #[tokio::test]
    async fn test_change_type_back_to_participant_allows_voting() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Observer).await;
        engine
            .change_player_type(room, pa, PlayerType::Participant)
            .await
            .unwrap();
        engine.vote(room, pa, "2").await.unwrap();
    }

    // =====================================================================
    // snapshot / player_name
    // =====================================================================

    #[tokio::test]
    async fn test_snapshot_unknown_room_fails() {
        let engine = Engine::new();
        let missing = RoomId::new();
        assert_eq!(
            engine.snapshot(missing).await,
            Err(EngineError::RoomNotFound(missing))
        );
    }

    #[tokio::test]
    async fn test_player_name_lookup() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;

        assert_eq!(
            engine.player_name(room, pa).await.as_deref(),
            Some("alice")
        );
        assert_eq!(engine.player_name(room, PrivateId::new()).await, None);
    }

    // =====================================================================
    // sweep_idle
    // =====================================================================

    #[tokio::test]
    async fn test_sweep_idle_removes_stale_rooms() {
        let (engine, room) = engine_with_room().await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        let removed = engine.sweep_idle(Duration::from_millis(5)).await;

        assert_eq!(removed, 1);
        assert_eq!(
            engine.snapshot(room).await,
            Err(EngineError::RoomNotFound(room))
        );
    }

    #[tokio::test]
    async fn test_sweep_idle_keeps_recently_touched_rooms() {
        let engine = Engine::new();
        let stale = engine.create_room("1").await.unwrap();
        let fresh = engine.create_room("1").await.unwrap();

        tokio::time::sleep(Duration::from_millis(20)).await;
        // Reading a snapshot counts as activity.
        engine.snapshot(fresh).await.unwrap();

        let removed = engine.sweep_idle(Duration::from_millis(10)).await;
        assert_eq!(removed, 1);
        assert!(engine.snapshot(fresh).await.is_ok());
        assert!(engine.snapshot(stale).await.is_err());
    }

    #[tokio::test]
    async fn test_sweep_idle_with_long_age_removes_nothing() {
        let (engine, _room) = engine_with_room().await;
        let removed = engine.sweep_idle(Duration::from_secs(3600)).await;
        assert_eq!(removed, 0);
        assert_eq!(engine.room_count().await, 1);
    }

    #[tokio::test]
    async fn test_mutation_counts_as_activity_for_sweep() {
        let (engine, room) = engine_with_room().await;
        let (pa, _) = join(&engine, room, 1, "alice", PlayerType::Participant).await;

        tokio::time::sleep(Duration::from_millis(20)).await;
        engine.vote(room, pa, "1").await.unwrap();

        let removed = engine.sweep_idle(Duration::from_millis(10)).await;
        assert_eq!(removed, 0);
    }
}
