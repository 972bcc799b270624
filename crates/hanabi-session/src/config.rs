//! Client configuration: where to connect and who to be.

use hanabi_transport::Endpoint;

use crate::SessionError;

/// Port the game server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 1024;

/// Configuration for connecting a player to a game server.
///
/// Start from `ClientConfig::default()` and fill in at least the player
/// name, or parse the usual `host port name` triple with
/// [`from_args`](Self::from_args).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server host name or IP address.
    pub host: String,

    /// Server TCP port.
    pub port: u16,

    /// Display name announced in the handshake. Must not be blank.
    pub player_name: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            player_name: String::new(),
        }
    }
}

impl ClientConfig {
    /// Creates a config from its three parts.
    pub fn new(
        host: impl Into<String>,
        port: u16,
        player_name: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            port,
            player_name: player_name.into(),
        }
    }

    /// Parses positional `host port name` arguments (program name already
    /// stripped). Missing trailing arguments keep their defaults, except
    /// the name, which is required.
    ///
    /// # Errors
    /// `SessionError::InvalidConfig` if the port isn't a number or the
    /// result fails [`validate`](Self::validate).
    pub fn from_args<I>(args: I) -> Result<Self, SessionError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let mut config = Self::default();

        if let Some(host) = args.next() {
            config.host = host;
        }
        if let Some(port) = args.next() {
            config.port = port.parse().map_err(|_| {
                SessionError::InvalidConfig(format!("invalid port: {port}"))
            })?;
        }
        if let Some(name) = args.next() {
            config.player_name = name;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the config before any connection is attempted.
    ///
    /// # Errors
    /// `SessionError::InvalidConfig` for an empty host, port 0, or a blank
    /// player name.
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.host.trim().is_empty() {
            return Err(SessionError::InvalidConfig("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(SessionError::InvalidConfig("port must not be 0".into()));
        }
        if self.player_name.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "player name must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The server endpoint described by this config.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.host.clone(), self.port)
    }
}
