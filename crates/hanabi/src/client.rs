//! `ClientBuilder`: the one-stop way to get a connected player.
//!
//! Ties the layers together: config → TCP connect → handshake → session
//! with its receive loop running.

use std::sync::Arc;

use hanabi_session::{
    ClientConfig, NoopObserver, PlayerSession, SessionObserver,
};
use hanabi_transport::TcpConnection;

use crate::HanabiError;

/// A player connected over TCP.
pub type Client = PlayerSession<TcpConnection>;

/// Builder for connecting a player to a game server.
///
/// # Example
///
/// ```rust,no_run
/// use hanabi::prelude::*;
///
/// # async fn run() -> Result<(), HanabiError> {
/// let client = ClientBuilder::new()
///     .host("127.0.0.1")
///     .port(1024)
///     .name("Alice")
///     .connect()
///     .await?;
/// client.mark_ready().await?;
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    config: ClientConfig,
    observer: Arc<dyn SessionObserver>,
}

impl ClientBuilder {
    /// Creates a builder with the default config and no observer.
    pub fn new() -> Self {
        Self {
            config: ClientConfig::default(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Starts from an existing config, e.g. one parsed from arguments.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the server host.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Sets the server port.
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Sets the name to join with.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.config.player_name = name.into();
        self
    }

    /// Registers the observer that receives status changes and inbound
    /// messages. Can be swapped later with `set_observer`.
    pub fn observer(mut self, observer: impl SessionObserver) -> Self {
        self.observer = Arc::new(observer);
        self
    }

    /// Validates the config, connects, and performs the handshake.
    ///
    /// # Errors
    /// `HanabiError::Session` for an invalid config, `HanabiError::Transport`
    /// (wrapped in the session error) if the server can't be reached or
    /// rejects the join.
    pub async fn connect(self) -> Result<Client, HanabiError> {
        tracing::debug!(
            host = %self.config.host,
            port = self.config.port,
            player = %self.config.player_name,
            "connecting"
        );
        let client = PlayerSession::connect(&self.config, self.observer).await?;
        Ok(client)
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
