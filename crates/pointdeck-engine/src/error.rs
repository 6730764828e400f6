//! Error types for engine operations.

use pointdeck_protocol::RoomId;

/// Errors that room operations can fail with.
///
/// All of these are local and non-fatal: the boundary layer logs the
/// failure and drops the offending action, leaving room state exactly
/// as it was.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The requested card set cleaned down to nothing.
    #[error("card set cannot be empty")]
    EmptyCardSet,

    /// The room does not exist (or has been swept).
    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    /// No player with that identity in the room.
    #[error("player not found in room {0}")]
    PlayerNotFound(RoomId),

    /// Observers may never vote.
    #[error("observers cannot vote")]
    ObserverCannotVote,

    /// Votes are revealed; they are immutable until the round is cleared.
    #[error("votes are revealed and cannot change until cleared")]
    VotesRevealed,
}
