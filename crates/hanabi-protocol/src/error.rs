//! Error types for the protocol layer.
//!
//! Everything that can go wrong between a [`Message`](crate::Message) and
//! the bytes on the wire ends up here. Framing errors and malformed payloads
//! are fatal to a connection: once the byte stream is out of sync there is
//! no way to find the start of the next frame again.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a message into bytes).
    ///
    /// With the message types in this crate this should never happen in
    /// practice, but serde's API is fallible so we surface it.
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// The payload of a frame is not a valid message.
    ///
    /// Covers unknown `"type"` tags, missing or mistyped fields, and
    /// values that fail shape validation (an empty player name, say).
    #[error("malformed message: {0}")]
    MalformedMessage(serde_json::Error),

    /// A length prefix announced a frame bigger than we are willing to
    /// buffer. Almost always a sign the stream is corrupt.
    #[error("frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },

    /// The message is well-formed JSON but violates a shape rule
    /// at construction time (e.g. a blank player name).
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}

impl ProtocolError {
    /// Returns `true` if the error means the byte stream can no longer be
    /// trusted and the connection must be torn down.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::MalformedMessage(_) | Self::FrameTooLarge { .. })
    }
}
