use hanabi_protocol::ProtocolError;

/// Errors that can occur in the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Opening the TCP stream failed.
    #[error("connect failed: {0}")]
    ConnectFailed(#[source] std::io::Error),

    /// The connection is closed, either by the peer (EOF) or locally by
    /// [`Connection::close`](crate::Connection::close).
    ///
    /// The receive loop treats this as the normal end of a session.
    #[error("connection closed")]
    ConnectionClosed,

    /// Writing a frame failed. The connection is closed afterwards.
    #[error("send failed: {0}")]
    SendFailed(#[source] std::io::Error),

    /// Reading from the socket failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(#[source] std::io::Error),

    /// A frame could not be encoded or decoded. Decode failures are fatal:
    /// the stream can't be resynchronized.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The server answered the join request with a rejection.
    #[error("handshake rejected: {0}")]
    HandshakeRejected(String),

    /// The handshake did not complete (unexpected reply, closed socket,
    /// undecodable reply).
    #[error("handshake failed: {0}")]
    HandshakeFailed(String),
}

impl TransportError {
    /// Returns `true` for the clean end-of-stream signal.
    pub fn is_closed(&self) -> bool {
        matches!(self, Self::ConnectionClosed)
    }
}
