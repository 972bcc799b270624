//! Error types for the session layer.

use hanabi_protocol::ProtocolError;
use hanabi_transport::TransportError;

use crate::PlayerStatus;

/// Errors returned by [`PlayerSession`](crate::PlayerSession) operations.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The operation isn't allowed in the session's current status, e.g.
    /// playing a card while still in the lobby. This is a bug in the
    /// caller; nothing was sent.
    #[error("{operation} is not allowed while the player is in {status}")]
    InvalidStateTransition {
        operation: &'static str,
        status: PlayerStatus,
    },

    /// The client configuration failed validation. Nothing was connected.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The connection failed: connect, handshake, send, or receive.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A message could not be built (a blank player name, say).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}
