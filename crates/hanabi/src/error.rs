//! Unified error type for the Hanabi client.

use hanabi_protocol::ProtocolError;
use hanabi_session::SessionError;
use hanabi_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `hanabi` crate, you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant lets `?` convert sub-crate errors.
#[derive(Debug, thiserror::Error)]
pub enum HanabiError {
    /// A transport-level error (connect, handshake, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, framing).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (operation not allowed, bad config).
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl HanabiError {
    /// True if the caller tried an operation the player's current status
    /// doesn't allow. Nothing was sent in that case, and the session is
    /// still usable.
    pub fn is_invalid_state(&self) -> bool {
        matches!(
            self,
            Self::Session(SessionError::InvalidStateTransition { .. })
        )
    }
}
