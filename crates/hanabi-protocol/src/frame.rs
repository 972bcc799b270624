//! Length-prefixed framing for messages on a byte stream.
//!
//! Wire format of one frame:
//!
//! ```text
//! ┌───────────────┬──────────────────────────────┐
//! │ len: u32 (BE) │ payload: len bytes of JSON   │
//! └───────────────┴──────────────────────────────┘
//! ```
//!
//! TCP hands us bytes in whatever chunks it likes: half a frame, three
//! frames at once, one byte at a time. [`FrameDecoder`] keeps the leftover
//! bytes between reads and only hands out a [`Message`] once its whole
//! frame has arrived.

use crate::{Message, ProtocolError};

/// Size of the length prefix in bytes.
pub const LENGTH_PREFIX_SIZE: usize = 4;

/// Largest payload we accept in one frame (1 MiB). A game state snapshot
/// is a few kilobytes; anything near this is a corrupt prefix.
pub const MAX_FRAME_SIZE: usize = 1024 * 1024;

/// Bytes requested from the socket per read. Bounds one I/O call, not the
/// size of a message.
pub const DEFAULT_READ_CHUNK: usize = 4096;

/// Encodes a message as one complete frame (prefix + payload).
///
/// # Errors
/// Returns `ProtocolError::Encode` if the payload can't be serialized, or
/// `ProtocolError::FrameTooLarge` if it exceeds [`MAX_FRAME_SIZE`].
pub fn encode_frame(message: &Message) -> Result<Vec<u8>, ProtocolError> {
    let payload = message.to_bytes()?;
    if payload.len() > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge {
            len: payload.len(),
            max: MAX_FRAME_SIZE,
        });
    }

    let mut frame = Vec::with_capacity(LENGTH_PREFIX_SIZE + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Tries to decode one frame from the front of `buf`.
///
/// Returns `Ok(Some((message, consumed)))` once a full frame is present,
/// where `consumed` is the number of bytes the frame took up. Returns
/// `Ok(None)` if more bytes are needed; nothing is consumed in that case.
///
/// # Errors
/// `ProtocolError::FrameTooLarge` if the length prefix is over the limit,
/// `ProtocolError::MalformedMessage` if the payload doesn't decode.
pub fn decode_frame(
    buf: &[u8],
) -> Result<Option<(Message, usize)>, ProtocolError> {
    let Some(prefix) = buf.get(..LENGTH_PREFIX_SIZE) else {
        return Ok(None);
    };
    let mut len_bytes = [0u8; LENGTH_PREFIX_SIZE];
    len_bytes.copy_from_slice(prefix);
    let len = u32::from_be_bytes(len_bytes) as usize;

    if len > MAX_FRAME_SIZE {
        return Err(ProtocolError::FrameTooLarge {
            len,
            max: MAX_FRAME_SIZE,
        });
    }

    let end = LENGTH_PREFIX_SIZE + len;
    let Some(payload) = buf.get(LENGTH_PREFIX_SIZE..end) else {
        return Ok(None);
    };
    let message = Message::from_bytes(payload)?;
    Ok(Some((message, end)))
}

// ---------------------------------------------------------------------------
// FrameDecoder
// ---------------------------------------------------------------------------

/// Reassembles messages from arbitrarily chunked reads.
///
/// Feed it every chunk read from the socket with [`extend`](Self::extend),
/// then drain complete messages with [`next_message`](Self::next_message)
/// until it returns `Ok(None)`. Messages come out in the order their bytes
/// went in.
///
/// After an error the buffer is left as it was; the stream is out of sync
/// and the connection should be dropped.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    buf: Vec<u8>,
}

impl FrameDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends bytes read from the stream.
    pub fn extend(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Pops the next complete message, if one is buffered.
    ///
    /// # Errors
    /// See [`decode_frame`].
    pub fn next_message(&mut self) -> Result<Option<Message>, ProtocolError> {
        match decode_frame(&self.buf)? {
            Some((message, consumed)) => {
                self.buf.drain(..consumed);
                Ok(Some(message))
            }
            None => Ok(None),
        }
    }

    /// Number of bytes waiting for the rest of their frame.
    pub fn buffered_len(&self) -> usize {
        self.buf.len()
    }
}
