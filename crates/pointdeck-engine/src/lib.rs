//! Room engine for Pointdeck.
//!
//! Single source of truth for all rooms, players, and vote sessions.
//! Every operation is atomic with respect to every other operation on
//! any room: the whole table sits behind one readers-writer lock, so
//! mutations are mutually exclusive while snapshot reads proceed in
//! parallel. No operation performs I/O inside the critical section.
//!
//! # Key types
//!
//! - [`Engine`] — the room table and all state transitions
//! - [`EngineError`] — what each operation can fail with
//!
//! The engine never touches connections; fan-out of the events it
//! produces is the broadcast hub's job. The two share only a
//! [`RoomId`](pointdeck_protocol::RoomId) as correlation key.

mod engine;
mod error;
mod room;

pub use engine::Engine;
pub use error::EngineError;
