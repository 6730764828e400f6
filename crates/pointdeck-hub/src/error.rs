//! Error types for the hub layer.

/// Errors that can occur when talking to the hub actor.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum HubError {
    /// The hub task has stopped and its command channel is closed.
    #[error("hub is no longer running")]
    Closed,
}
