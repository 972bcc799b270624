//! Transport layer for the Hanabi client.
//!
//! Provides the [`Connection`] trait (send one message, receive one
//! message, close), a TCP implementation, and the join [`handshake`] that
//! must run before any other traffic.
//!
//! # Feature Flags
//!
//! - `tcp` (default): [`TcpConnection`] over `tokio::net::TcpStream`

mod error;
mod handshake;
#[cfg(feature = "tcp")]
mod tcp;

pub use error::TransportError;
pub use handshake::handshake;
#[cfg(feature = "tcp")]
pub use tcp::TcpConnection;

use std::fmt;
use std::future::Future;

use hanabi_protocol::Message;

/// Opaque identifier for a connection, used in log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Where the game server lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Creates an endpoint from a host name or address and a port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A single connection to the game server, exchanging whole messages.
///
/// Implementations own the socket and any partially read bytes; callers
/// only ever see complete [`Message`]s. One task may sit in
/// [`recv`](Self::recv) while others [`send`](Self::send): reads and
/// writes use separate halves, and concurrent sends are serialized so
/// frames never interleave.
///
/// The futures are `Send` so a session can drive `recv` from a spawned
/// Tokio task.
pub trait Connection: Send + Sync + 'static {
    /// Sends one message, waiting until the whole frame is written.
    ///
    /// # Errors
    /// `TransportError::ConnectionClosed` if the connection was already
    /// closed, `TransportError::SendFailed` if the write fails (the
    /// connection is closed as a result).
    fn send(
        &self,
        message: &Message,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Waits for the next complete message from the server.
    ///
    /// # Errors
    /// `TransportError::ConnectionClosed` when the peer closes the stream
    /// or [`close`](Self::close) is called while waiting. Framing errors
    /// come back as `TransportError::Protocol` and close the connection.
    fn recv(
        &self,
    ) -> impl Future<Output = Result<Message, TransportError>> + Send;

    /// Closes the connection. Wakes any pending `recv` or `send`.
    ///
    /// Idempotent: calling it again is a no-op that returns `Ok(())`.
    fn close(&self) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Returns `true` once the connection has been closed by either side.
    fn is_closed(&self) -> bool;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
