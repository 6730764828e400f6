//! Broadcast hub for Pointdeck.
//!
//! The hub is an isolated Tokio task that owns the mapping from rooms
//! to live connections and fans events out to them. It runs in its own
//! task, communicating with the outside world through an mpsc channel —
//! no shared mutable state, just message passing.
//!
//! The hub knows nothing about game rules and the engine knows nothing
//! about connections; the only thing they share is the
//! [`RoomId`](pointdeck_protocol::RoomId) correlation key.
//!
//! Delivery is best-effort. Each connection registers a bounded sender;
//! a connection whose buffer is full when an event arrives is evicted
//! rather than allowed to stall the room.

mod error;
mod hub;

pub use error::HubError;
pub use hub::{ConnectionSender, Hub, HubHandle};
