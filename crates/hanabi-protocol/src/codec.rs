//! Codec trait and the JSON implementation used for message payloads.
//!
//! A codec only turns values into payload bytes and back. It knows nothing
//! about frames; [`crate::frame`] wraps its output in a length prefix.
//! Keeping the two apart means a binary payload format could be swapped in
//! without touching the framing or anything above it.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because the connection that owns it is shared
/// between the caller's task and the session's receive loop.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::MalformedMessage` if the bytes are not valid
    /// for the requested type.
    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// This is the format the game server speaks.
///
/// ## Example
///
/// ```rust
/// use hanabi_protocol::{Codec, JsonCodec, Message, PlayerName};
///
/// let codec = JsonCodec;
/// let msg = Message::ReadyData { name: PlayerName::new("Alice").unwrap() };
///
/// let bytes = codec.encode(&msg).unwrap();
/// let decoded: Message = codec.decode(&bytes).unwrap();
/// assert_eq!(msg, decoded);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize>(
        &self,
        value: &T,
    ) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(
        &self,
        data: &[u8],
    ) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::MalformedMessage)
    }
}
