//! Wire protocol for the Hanabi client.
//!
//! This crate defines the "language" the client and the game server speak:
//!
//! - **Types** ([`Message`], [`PlayerName`], [`Hint`], [`Card`], etc.):
//!   the values that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]): how a message becomes
//!   payload bytes and back.
//! - **Framing** ([`encode_frame`], [`FrameDecoder`]): how payloads are
//!   delimited on a byte stream so partial reads can be reassembled.
//! - **Errors** ([`ProtocolError`]): what can go wrong in between.
//!
//! # Architecture
//!
//! ```text
//! Session (operations) → Protocol (Message ⇄ frame) → Transport (bytes)
//! ```
//!
//! Nothing here touches a socket.

mod codec;
mod error;
pub mod frame;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use frame::{FrameDecoder, decode_frame, encode_frame};
pub use types::{
    ActionKind, Card, CardIndex, Color, Direction, Hint, HintKind, Message,
    PlayerName, PlayerView,
};
