//! The join handshake.
//!
//! ```text
//! client                         server
//!   │ ── AddPlayer { name } ──────→ │
//!   │ ←──── ConnectionOk { name } ─ │   accepted
//!   │ ←─ ConnectionRejected { .. } ─ │   or denied
//! ```
//!
//! Exactly one reply is read. Anything other than a `ConnectionOk` for our
//! own name leaves the connection unusable, so it is closed on every
//! failure path before the error goes back to the caller.

use hanabi_protocol::{Message, PlayerName};

use crate::{Connection, TransportError};

/// Performs the join handshake on a freshly opened connection.
///
/// # Errors
/// - `TransportError::HandshakeRejected` if the server sent
///   `ConnectionRejected`.
/// - `TransportError::HandshakeFailed` for any other reply, a reply for a
///   different name, an undecodable reply, or a closed socket.
/// - `TransportError::SendFailed` / `ConnectionClosed` if the join request
///   could not be written.
pub async fn handshake<C: Connection>(
    conn: &C,
    name: &PlayerName,
) -> Result<(), TransportError> {
    let result = exchange(conn, name).await;

    match &result {
        Ok(()) => {
            tracing::info!(conn_id = %conn.id(), player = %name, "handshake accepted");
        }
        Err(e) => {
            tracing::warn!(conn_id = %conn.id(), player = %name, error = %e, "handshake failed");
            if let Err(close_err) = conn.close().await {
                tracing::debug!(error = %close_err, "close after failed handshake");
            }
        }
    }

    result
}

async fn exchange<C: Connection>(
    conn: &C,
    name: &PlayerName,
) -> Result<(), TransportError> {
    conn.send(&Message::AddPlayer { name: name.clone() }).await?;

    match conn.recv().await {
        Ok(Message::ConnectionOk { name: confirmed }) if &confirmed == name => Ok(()),
        Ok(Message::ConnectionOk { name: confirmed }) => {
            Err(TransportError::HandshakeFailed(format!(
                "server confirmed {confirmed}, expected {name}"
            )))
        }
        Ok(Message::ConnectionRejected { reason }) => {
            Err(TransportError::HandshakeRejected(reason))
        }
        Ok(other) => Err(TransportError::HandshakeFailed(format!(
            "expected ConnectionOk, got {}",
            other.name()
        ))),
        Err(TransportError::ConnectionClosed) => Err(
            TransportError::HandshakeFailed("connection closed before reply".into()),
        ),
        Err(e) => Err(TransportError::HandshakeFailed(e.to_string())),
    }
}
