//! Hub actor: room membership and event fan-out.

use std::collections::HashMap;

use pointdeck_protocol::{PrivateId, RoomId};
use tokio::sync::{mpsc, oneshot};

use crate::HubError;

/// Channel sender for delivering events to one connection's writer task.
pub type ConnectionSender<E> = mpsc::Sender<E>;

/// Commands sent to the hub actor through its channel.
enum HubCommand<E> {
    /// Attach a connection to a room.
    Register {
        room_id: RoomId,
        conn_id: PrivateId,
        sender: ConnectionSender<E>,
    },

    /// Detach a connection from whatever room it is in.
    Unregister { conn_id: PrivateId },

    /// Deliver an event to every connection in a room.
    Broadcast { room_id: RoomId, event: E },

    /// Deliver an event to a single connection.
    SendTo { conn_id: PrivateId, event: E },

    /// Request the number of connections in a room.
    ConnectionCount {
        room_id: RoomId,
        reply: oneshot::Sender<usize>,
    },
}

/// Handle to the running hub actor. Used to send commands to it.
///
/// This is cheap to clone — it's just an `mpsc::Sender` wrapper. Every
/// connection handler holds one.
pub struct HubHandle<E> {
    sender: mpsc::Sender<HubCommand<E>>,
}

// Derived Clone would demand E: Clone on the handle itself, which
// callers holding a handle to a non-Clone event type would trip over.
impl<E> Clone for HubHandle<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E: Clone + Send + 'static> HubHandle<E> {
    /// Attaches a connection to a room.
    ///
    /// Registering an id that is already attached replaces its sender
    /// (and moves it, if the room differs).
    pub async fn register(
        &self,
        room_id: RoomId,
        conn_id: PrivateId,
        sender: ConnectionSender<E>,
    ) -> Result<(), HubError> {
        self.sender
            .send(HubCommand::Register {
                room_id,
                conn_id,
                sender,
            })
            .await
            .map_err(|_| HubError::Closed)
    }

    /// Detaches a connection. Unknown ids are a no-op.
    pub async fn unregister(&self, conn_id: PrivateId) -> Result<(), HubError> {
        self.sender
            .send(HubCommand::Unregister { conn_id })
            .await
            .map_err(|_| HubError::Closed)
    }

    /// Fans an event out to every connection in a room.
    ///
    /// Returns as soon as the hub has accepted the command; delivery to
    /// individual connections is best-effort.
    pub async fn broadcast(&self, room_id: RoomId, event: E) -> Result<(), HubError> {
        self.sender
            .send(HubCommand::Broadcast { room_id, event })
            .await
            .map_err(|_| HubError::Closed)
    }

    /// Delivers an event to one connection only.
    pub async fn send_to(&self, conn_id: PrivateId, event: E) -> Result<(), HubError> {
        self.sender
            .send(HubCommand::SendTo { conn_id, event })
            .await
            .map_err(|_| HubError::Closed)
    }

    /// Number of connections currently attached to a room.
    pub async fn connection_count(&self, room_id: RoomId) -> Result<usize, HubError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(HubCommand::ConnectionCount {
                room_id,
                reply: reply_tx,
            })
            .await
            .map_err(|_| HubError::Closed)?;
        reply_rx.await.map_err(|_| HubError::Closed)
    }
}

/// The hub actor's state. Owned exclusively by its task.
pub struct Hub<E> {
    rooms: HashMap<RoomId, HashMap<PrivateId, ConnectionSender<E>>>,
    memberships: HashMap<PrivateId, RoomId>,
    receiver: mpsc::Receiver<HubCommand<E>>,
}

impl<E: Clone + Send + 'static> Hub<E> {
    /// Spawns the hub task and returns a handle to it.
    ///
    /// `buffer` bounds the command channel, applying backpressure to
    /// callers if the hub falls behind.
    pub fn spawn(buffer: usize) -> HubHandle<E> {
        let (tx, rx) = mpsc::channel(buffer);
        let hub = Hub {
            rooms: HashMap::new(),
            memberships: HashMap::new(),
            receiver: rx,
        };
        tokio::spawn(hub.run());
        HubHandle { sender: tx }
    }

    /// Main loop. Ends when every handle has been dropped.
    async fn run(mut self) {
        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                HubCommand::Register {
                    room_id,
                    conn_id,
                    sender,
                } => self.register(room_id, conn_id, sender),
                HubCommand::Unregister { conn_id } => self.unregister(conn_id),
                HubCommand::Broadcast { room_id, event } => {
                    self.broadcast(room_id, event)
                }
                HubCommand::SendTo { conn_id, event } => self.send_to(conn_id, event),
                HubCommand::ConnectionCount { room_id, reply } => {
                    let count =
                        self.rooms.get(&room_id).map_or(0, HashMap::len);
                    let _ = reply.send(count);
                }
            }
        }
        tracing::debug!("hub stopped");
    }

    fn register(
        &mut self,
        room_id: RoomId,
        conn_id: PrivateId,
        sender: ConnectionSender<E>,
    ) {
        // A connection lives in at most one room.
        if let Some(previous) = self.memberships.insert(conn_id, room_id) {
            if previous != room_id {
                if let Some(room) = self.rooms.get_mut(&previous) {
                    room.remove(&conn_id);
                    if room.is_empty() {
                        self.rooms.remove(&previous);
                    }
                }
            }
        }
        self.rooms.entry(room_id).or_default().insert(conn_id, sender);
        tracing::debug!(room_id = %room_id, conn_id = %conn_id, "connection registered");
    }

    fn unregister(&mut self, conn_id: PrivateId) {
        let Some(room_id) = self.memberships.remove(&conn_id) else {
            return;
        };
        if let Some(room) = self.rooms.get_mut(&room_id) {
            room.remove(&conn_id);
            if room.is_empty() {
                self.rooms.remove(&room_id);
            }
        }
        tracing::debug!(room_id = %room_id, conn_id = %conn_id, "connection unregistered");
    }

    fn broadcast(&mut self, room_id: RoomId, event: E) {
        let Some(room) = self.rooms.get(&room_id) else {
            return;
        };

        // A full buffer means the consumer is not keeping up; dropping
        // its sender closes the channel and ends its writer task.
        let mut evicted = Vec::new();
        for (conn_id, sender) in room {
            if sender.try_send(event.clone()).is_err() {
                evicted.push(*conn_id);
            }
        }
        for conn_id in evicted {
            tracing::warn!(
                room_id = %room_id,
                conn_id = %conn_id,
                "evicting slow or closed connection"
            );
            self.unregister(conn_id);
        }
    }

    fn send_to(&mut self, conn_id: PrivateId, event: E) {
        let Some(room_id) = self.memberships.get(&conn_id).copied() else {
            return;
        };
        let Some(sender) = self.rooms.get(&room_id).and_then(|r| r.get(&conn_id))
        else {
            return;
        };
        if sender.try_send(event).is_err() {
            tracing::warn!(
                conn_id = %conn_id,
                "evicting slow or closed connection"
            );
            self.unregister(conn_id);
        }
    }
}
