//! Wire protocol for Pointdeck.
//!
//! This crate defines the "language" that clients and the server speak:
//!
//! - **Ids** ([`RoomId`], [`PrivateId`], [`RecoveryId`]) — the three
//!   identity scopes of the system.
//! - **Model** ([`Player`], [`VoteSession`], [`RoomSnapshot`]) — the
//!   shared room state that travels inside `updated` events.
//! - **Messages** ([`ClientAction`], [`ServerEvent`]) — the closed
//!   action set clients may send and the event set the server fans out.
//!
//! The protocol layer knows nothing about connections, rooms tables, or
//! broadcasting — it only defines shapes and their JSON encoding.

mod ids;
mod message;
mod model;

pub use ids::{PrivateId, RecoveryId, RoomId};
pub use message::{ChatEntry, ClientAction, LogEntry, ServerEvent};
pub use model::{Player, PlayerMode, PlayerType, RoomSnapshot, VoteSession};
