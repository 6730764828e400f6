//! Internal room record.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use pointdeck_protocol::{
    Player, PrivateId, RecoveryId, RoomId, RoomSnapshot, VoteSession,
};

/// One room as stored in the engine's table.
///
/// `last_access` is atomic so read-path operations (snapshots, name
/// lookups) can refresh it while holding only the shared lock; the idle
/// sweep reads it under the exclusive lock, so the age check and the
/// deletion happen in one atomic step.
pub(crate) struct Room {
    pub(crate) id: RoomId,
    pub(crate) players: HashMap<PrivateId, Player>,
    pub(crate) session: VoteSession,
    next_public_id: u32,
    last_access: AtomicU64,
}

impl Room {
    pub(crate) fn new(id: RoomId, card_set: Vec<String>, now: u64) -> Self {
        Self {
            id,
            players: HashMap::new(),
            session: VoteSession::new(card_set),
            next_public_id: 1,
            last_access: AtomicU64::new(now),
        }
    }

    /// Records activity. `now` is milliseconds since the engine epoch.
    pub(crate) fn touch(&self, now: u64) {
        self.last_access.store(now, Ordering::Relaxed);
    }

    pub(crate) fn last_access(&self) -> u64 {
        self.last_access.load(Ordering::Relaxed)
    }

    /// Allocates the next public id, starting at 1. Ids are never
    /// reused within a room's lifetime, even after kicks and leaves, so
    /// a vote recorded under a public id can never be misattributed to
    /// a later, different player.
    pub(crate) fn allocate_public_id(&mut self) -> u32 {
        let id = self.next_public_id;
        self.next_public_id += 1;
        id
    }

    pub(crate) fn find_by_recovery(
        &self,
        recovery_id: RecoveryId,
    ) -> Option<PrivateId> {
        self.players
            .values()
            .find(|p| p.recovery_id == recovery_id)
            .map(|p| p.id)
    }

    pub(crate) fn find_by_public_id(
        &self,
        public_id: u32,
    ) -> Option<PrivateId> {
        self.players
            .values()
            .find(|p| p.public_id == public_id)
            .map(|p| p.id)
    }

    pub(crate) fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            id: self.id,
            players: self.players.clone(),
            current_session: self.session.clone(),
        }
    }
}
