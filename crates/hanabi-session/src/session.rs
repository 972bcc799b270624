//! The player session: the object a bot or UI drives.
//!
//! A session wraps one handshaken [`Connection`] and does two things:
//!
//! 1. **Gates outbound operations** on the player's [`PlayerStatus`]. Each
//!    operation checks its precondition, sends one message, and (for
//!    `mark_ready` and `terminate`) moves the status forward.
//! 2. **Runs a receive loop** on its own Tokio task, handing every inbound
//!    message to the registered [`SessionObserver`] in arrival order.
//!
//! ```text
//!  caller ── play(2) ──→ PlayerSession ── PlayCardRequest ──→ Connection ──→ server
//!                              │
//!  observer ←─ on_message ── receive loop ←── recv() ←── Connection ←── server
//! ```

use std::sync::Arc;

use hanabi_protocol::{CardIndex, Direction, Hint, Message, PlayerName};
#[cfg(feature = "tcp")]
use hanabi_transport::TcpConnection;
use hanabi_transport::{Connection, ConnectionId, TransportError};
use tokio::sync::{Mutex, RwLock, watch};
use tokio::task::JoinHandle;

#[cfg(feature = "tcp")]
use crate::ClientConfig;
use crate::{PlayerStatus, SessionError, SessionObserver};

/// State shared between the session handle and its receive loop.
struct Shared {
    name: PlayerName,
    status: watch::Sender<PlayerStatus>,
    observer: RwLock<Arc<dyn SessionObserver>>,
}

impl Shared {
    async fn observer(&self) -> Arc<dyn SessionObserver> {
        Arc::clone(&*self.observer.read().await)
    }

    /// Moves the status to `to` if that is a forward step, then tells the
    /// observer. Returns `false` (and does nothing) otherwise.
    async fn transition(&self, to: PlayerStatus) -> bool {
        let mut from = None;
        self.status.send_if_modified(|status| {
            if status.can_transition_to(to) {
                from = Some(*status);
                *status = to;
                true
            } else {
                false
            }
        });

        let Some(from) = from else {
            return false;
        };
        tracing::info!(player = %self.name, %from, %to, "status changed");
        self.observer().await.on_status_change(&self.name, from, to);
        true
    }
}

/// A connected player.
///
/// Created by [`connect`](PlayerSession::connect) (TCP) or
/// [`start`](PlayerSession::start) (any [`Connection`]); both perform the
/// handshake, so a session in hand is always past the join step and
/// starts in [`PlayerStatus::Lobby`].
///
/// Operations can be called from any task. They are serialized, so
/// messages go out in call order and a status check can't race its send.
pub struct PlayerSession<C: Connection> {
    conn: Arc<C>,
    shared: Arc<Shared>,
    /// Held for the duration of each outbound operation.
    ops: Mutex<()>,
    receive_loop: Mutex<Option<JoinHandle<()>>>,
}

#[cfg(feature = "tcp")]
impl PlayerSession<TcpConnection> {
    /// Validates `config`, connects over TCP, and joins as
    /// `config.player_name`.
    ///
    /// # Errors
    /// `SessionError::InvalidConfig` before any network activity if the
    /// config is invalid; `SessionError::Transport` if connecting or the
    /// handshake fails (the socket is closed in that case).
    pub async fn connect(
        config: &ClientConfig,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let name = PlayerName::new(config.player_name.clone())?;
        let conn = TcpConnection::connect(&config.endpoint()).await?;
        Self::start(conn, name, observer).await
    }
}

impl<C: Connection> PlayerSession<C> {
    /// Performs the handshake on `conn` and, once accepted, starts the
    /// receive loop.
    ///
    /// # Errors
    /// `SessionError::Transport` if the handshake fails. The connection has
    /// been closed by then.
    pub async fn start(
        conn: C,
        name: PlayerName,
        observer: Arc<dyn SessionObserver>,
    ) -> Result<Self, SessionError> {
        hanabi_transport::handshake(&conn, &name).await?;

        let conn = Arc::new(conn);
        let (status, _) = watch::channel(PlayerStatus::Lobby);
        let shared = Arc::new(Shared {
            name,
            status,
            observer: RwLock::new(observer),
        });

        let handle = tokio::spawn(receive_loop(
            Arc::clone(&conn),
            Arc::clone(&shared),
        ));
        tracing::info!(conn_id = %conn.id(), player = %shared.name, "joined lobby");

        Ok(Self {
            conn,
            shared,
            ops: Mutex::new(()),
            receive_loop: Mutex::new(Some(handle)),
        })
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The name this session joined with. Never changes.
    pub fn name(&self) -> &PlayerName {
        &self.shared.name
    }

    /// The current status.
    pub fn status(&self) -> PlayerStatus {
        *self.shared.status.borrow()
    }

    pub fn is_terminated(&self) -> bool {
        self.status().is_terminal()
    }

    /// A receiver that sees every status change.
    pub fn status_changes(&self) -> watch::Receiver<PlayerStatus> {
        self.shared.status.subscribe()
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.conn.id()
    }

    /// Replaces the observer. Messages received after this call go to the
    /// new one.
    pub async fn set_observer(&self, observer: Arc<dyn SessionObserver>) {
        *self.shared.observer.write().await = observer;
    }

    // -----------------------------------------------------------------------
    // Lobby operations
    // -----------------------------------------------------------------------

    /// Asks the server to start the game. The status doesn't change; the
    /// server decides when the game begins.
    pub async fn request_start(&self) -> Result<(), SessionError> {
        let message = Message::StartRequest {
            name: self.name().clone(),
        };
        self.send_gated("request_start", &[PlayerStatus::Lobby], message, None)
            .await
    }

    /// Marks the player ready and moves the session into the game.
    pub async fn mark_ready(&self) -> Result<(), SessionError> {
        let message = Message::ReadyData {
            name: self.name().clone(),
        };
        self.send_gated(
            "mark_ready",
            &[PlayerStatus::Lobby],
            message,
            Some(PlayerStatus::Game),
        )
        .await
    }

    // -----------------------------------------------------------------------
    // Game operations
    // -----------------------------------------------------------------------

    /// Polls the server for the current game state. Allowed in the lobby
    /// and in the game.
    pub async fn request_state(&self) -> Result<(), SessionError> {
        let message = Message::GetGameStateRequest {
            name: self.name().clone(),
        };
        self.send_gated(
            "request_state",
            &[PlayerStatus::Lobby, PlayerStatus::Game],
            message,
            None,
        )
        .await
    }

    /// Discards the card at `card_index`. The index isn't checked against
    /// the hand size; the server is the authority on that.
    pub async fn discard(&self, card_index: CardIndex) -> Result<(), SessionError> {
        let message = Message::DiscardRequest {
            name: self.name().clone(),
            card_index,
        };
        self.send_gated("discard", &[PlayerStatus::Game], message, None)
            .await
    }

    /// Plays the card at `card_index`.
    pub async fn play(&self, card_index: CardIndex) -> Result<(), SessionError> {
        let message = Message::PlayCardRequest {
            name: self.name().clone(),
            card_index,
        };
        self.send_gated("play", &[PlayerStatus::Game], message, None)
            .await
    }

    /// Gives `target` a color or value hint.
    pub async fn give_hint(
        &self,
        target: &PlayerName,
        hint: Hint,
    ) -> Result<(), SessionError> {
        let message = Message::HintData {
            source: self.name().clone(),
            destination: target.clone(),
            hint,
        };
        self.send_gated("give_hint", &[PlayerStatus::Game], message, None)
            .await
    }

    // -----------------------------------------------------------------------
    // Shutdown
    // -----------------------------------------------------------------------

    /// Closes the connection and ends the session.
    ///
    /// Allowed in any status and idempotent: calling it again returns
    /// `Ok(())` and changes nothing. A pending receive is woken, so the
    /// receive loop exits on its own.
    pub async fn terminate(&self) -> Result<(), SessionError> {
        // No `ops` lock here: close has to get through even while an
        // operation is blocked on a write.
        self.conn.close().await?;
        self.shared.transition(PlayerStatus::Terminated).await;
        Ok(())
    }

    /// Waits for the receive loop to finish. Returns immediately if it
    /// already has, or if another caller is already waiting.
    pub async fn wait_closed(&self) {
        let handle = self.receive_loop.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                tracing::warn!(player = %self.shared.name, error = %e, "receive loop panicked");
            }
        }
    }

    /// Checks `status ∈ allowed`, sends `message`, then moves to `then`.
    async fn send_gated(
        &self,
        operation: &'static str,
        allowed: &[PlayerStatus],
        message: Message,
        then: Option<PlayerStatus>,
    ) -> Result<(), SessionError> {
        let _op = self.ops.lock().await;

        let status = self.status();
        if !allowed.contains(&status) {
            tracing::debug!(player = %self.shared.name, operation, %status, "operation rejected");
            return Err(SessionError::InvalidStateTransition { operation, status });
        }

        self.conn.send(&message).await?;

        if let Some(next) = then {
            self.shared.transition(next).await;
        }
        Ok(())
    }
}

impl<C: Connection> Drop for PlayerSession<C> {
    fn drop(&mut self) {
        // Dropping the loop's future releases its handle on the connection,
        // and with it the socket.
        if let Some(handle) = self.receive_loop.get_mut().take() {
            handle.abort();
        }
    }
}

/// Reads messages until the connection closes, routing each one to the
/// observer. Messages meant for the server are logged but still routed.
///
/// A clean close ends the loop quietly. Any other error is fatal: the loop
/// stops without retrying and reports it through `on_closed`. Either way
/// the connection is closed and the session ends up `Terminated`.
async fn receive_loop<C: Connection>(conn: Arc<C>, shared: Arc<Shared>) {
    let conn_id = conn.id();
    tracing::debug!(%conn_id, player = %shared.name, "receive loop started");

    let error = loop {
        match conn.recv().await {
            Ok(message) => {
                if message.direction() == Direction::ClientToServer {
                    tracing::warn!(
                        %conn_id,
                        player = %shared.name,
                        message = message.name(),
                        "server sent a client-to-server message"
                    );
                }
                shared.observer().await.on_message(&message);
            }
            Err(TransportError::ConnectionClosed) => break None,
            Err(e) => {
                tracing::warn!(%conn_id, player = %shared.name, error = %e, "receive failed");
                break Some(e);
            }
        }
    };

    if let Err(e) = conn.close().await {
        tracing::debug!(%conn_id, error = %e, "close after receive loop");
    }
    shared.transition(PlayerStatus::Terminated).await;
    shared.observer().await.on_closed(error.as_ref());

    tracing::info!(%conn_id, player = %shared.name, "receive loop stopped");
}
