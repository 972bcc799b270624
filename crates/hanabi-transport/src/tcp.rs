//! TCP transport implementation using `tokio::net::TcpStream`.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};

use hanabi_protocol::frame::DEFAULT_READ_CHUNK;
use hanabi_protocol::{FrameDecoder, Message, PlayerName, encode_frame};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::{Mutex, watch};

use crate::{Connection, ConnectionId, Endpoint, TransportError, handshake};

/// Counter for generating unique connection IDs.
static NEXT_CONNECTION_ID: AtomicU64 = AtomicU64::new(1);

/// The read side: the socket half, whatever bytes arrived ahead of a
/// complete frame, and the scratch buffer reads land in. Only `recv`
/// touches it.
struct ReadState {
    half: OwnedReadHalf,
    decoder: FrameDecoder,
    chunk: Box<[u8]>,
}

/// A [`Connection`] over a TCP stream.
///
/// The stream is split in two. The read half and the frame buffer live
/// behind one lock (held by whoever is receiving, normally the session's
/// receive loop); the write half lives behind another so sends never
/// interleave. A `watch` channel carries the closed flag, which lets
/// [`close`](Connection::close) wake a task blocked on the socket.
pub struct TcpConnection {
    id: ConnectionId,
    peer: SocketAddr,
    reader: Mutex<ReadState>,
    writer: Mutex<Option<OwnedWriteHalf>>,
    closed: watch::Sender<bool>,
}

impl TcpConnection {
    /// Opens a TCP stream to the game server. No handshake is performed.
    pub async fn connect(endpoint: &Endpoint) -> Result<Self, TransportError> {
        let stream = TcpStream::connect((endpoint.host(), endpoint.port()))
            .await
            .map_err(TransportError::ConnectFailed)?;
        stream.set_nodelay(true).map_err(TransportError::ConnectFailed)?;
        let conn = Self::from_stream(stream)?;
        tracing::info!(conn_id = %conn.id, %endpoint, "connected to server");
        Ok(conn)
    }

    /// Connects and performs the join handshake as `name`.
    ///
    /// On a failed handshake the connection is closed before the error is
    /// returned.
    pub async fn open(
        endpoint: &Endpoint,
        name: &PlayerName,
    ) -> Result<Self, TransportError> {
        let conn = Self::connect(endpoint).await?;
        handshake(&conn, name).await?;
        Ok(conn)
    }

    /// Wraps an already connected stream.
    pub fn from_stream(stream: TcpStream) -> Result<Self, TransportError> {
        let peer = stream.peer_addr().map_err(TransportError::ConnectFailed)?;
        let (read, write) = stream.into_split();
        let (closed, _) = watch::channel(false);

        Ok(Self {
            id: ConnectionId::new(
                NEXT_CONNECTION_ID.fetch_add(1, Ordering::Relaxed),
            ),
            peer,
            reader: Mutex::new(ReadState {
                half: read,
                decoder: FrameDecoder::new(),
                chunk: vec![0u8; DEFAULT_READ_CHUNK].into_boxed_slice(),
            }),
            writer: Mutex::new(Some(write)),
            closed,
        })
    }

    /// Flags the connection as closed. Returns the previous value.
    fn mark_closed(&self) -> bool {
        self.closed.send_replace(true)
    }
}

/// Resolves once the closed flag is set.
async fn closed_signal(rx: &mut watch::Receiver<bool>) {
    let _ = rx.wait_for(|closed| *closed).await;
}

impl Connection for TcpConnection {
    async fn send(&self, message: &Message) -> Result<(), TransportError> {
        let frame = encode_frame(message)?;
        let mut closed_rx = self.closed.subscribe();
        if *closed_rx.borrow_and_update() {
            return Err(TransportError::ConnectionClosed);
        }

        let mut writer = tokio::select! {
            guard = self.writer.lock() => guard,
            _ = closed_signal(&mut closed_rx) => {
                return Err(TransportError::ConnectionClosed);
            }
        };
        let Some(half) = writer.as_mut() else {
            return Err(TransportError::ConnectionClosed);
        };

        // One write_all per frame, under the writer lock.
        let written = tokio::select! {
            result = half.write_all(&frame) => result,
            _ = closed_signal(&mut closed_rx) => {
                return Err(TransportError::ConnectionClosed);
            }
        };

        match written {
            Ok(()) => {
                tracing::debug!(
                    conn_id = %self.id,
                    message = message.name(),
                    bytes = frame.len(),
                    "sent message"
                );
                Ok(())
            }
            Err(e) => {
                tracing::debug!(conn_id = %self.id, error = %e, "send failed");
                self.mark_closed();
                writer.take();
                Err(TransportError::SendFailed(e))
            }
        }
    }

    async fn recv(&self) -> Result<Message, TransportError> {
        let mut closed_rx = self.closed.subscribe();
        let mut state = tokio::select! {
            guard = self.reader.lock() => guard,
            _ = closed_signal(&mut closed_rx) => {
                return Err(TransportError::ConnectionClosed);
            }
        };
        let ReadState {
            half,
            decoder,
            chunk,
        } = &mut *state;

        loop {
            if *closed_rx.borrow_and_update() {
                return Err(TransportError::ConnectionClosed);
            }

            match decoder.next_message() {
                Ok(Some(message)) => {
                    tracing::debug!(
                        conn_id = %self.id,
                        message = message.name(),
                        "received message"
                    );
                    return Ok(message);
                }
                Ok(None) => {}
                Err(e) => {
                    if e.is_fatal() {
                        tracing::warn!(
                            conn_id = %self.id,
                            error = %e,
                            "undecodable frame, closing connection"
                        );
                        self.mark_closed();
                    }
                    return Err(TransportError::Protocol(e));
                }
            }

            let read = tokio::select! {
                result = half.read(&mut chunk[..]) => result,
                _ = closed_signal(&mut closed_rx) => {
                    return Err(TransportError::ConnectionClosed);
                }
            };

            match read {
                Ok(0) => {
                    tracing::debug!(
                        conn_id = %self.id,
                        leftover = decoder.buffered_len(),
                        "server closed the stream"
                    );
                    self.mark_closed();
                    return Err(TransportError::ConnectionClosed);
                }
                Ok(n) => decoder.extend(&chunk[..n]),
                Err(e) => {
                    self.mark_closed();
                    return Err(TransportError::ReceiveFailed(e));
                }
            }
        }
    }

    async fn close(&self) -> Result<(), TransportError> {
        let was_closed = self.mark_closed();
        if !was_closed {
            tracing::info!(conn_id = %self.id, peer = %self.peer, "closing connection");
        }

        // The flag above has already woken any sender holding this lock.
        let half = self.writer.lock().await.take();
        if let Some(mut half) = half {
            if let Err(e) = half.shutdown().await {
                // The peer may already be gone; nothing left to do.
                tracing::debug!(conn_id = %self.id, error = %e, "shutdown failed");
            }
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    fn id(&self) -> ConnectionId {
        self.id
    }
}
