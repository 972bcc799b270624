//! # Hanabi
//!
//! Network client for the cooperative card game Hanabi.
//!
//! A player connects to a game server over TCP, joins under a name, and
//! then drives a [`Client`] through the lobby and the game: mark ready,
//! ask for the state, play, discard, and give hints. Everything the server
//! sends back is delivered to a [`SessionObserver`](prelude::SessionObserver).
//!
//! The work is split over three crates, re-exported here:
//!
//! - [`protocol`]: messages, JSON codec, length-prefixed framing
//! - [`transport`]: TCP connection and join handshake
//! - [`session`]: player status, gated operations, receive loop
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use hanabi::prelude::*;
//!
//! struct Printer;
//!
//! impl SessionObserver for Printer {
//!     fn on_message(&self, message: &Message) {
//!         println!("{message}");
//!     }
//! }
//!
//! # async fn run() -> Result<(), HanabiError> {
//! let client = ClientBuilder::new()
//!     .name("Alice")
//!     .observer(Printer)
//!     .connect()
//!     .await?;
//! client.mark_ready().await?;
//! client.play(0).await?;
//! client.terminate().await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod logging;

pub use client::{Client, ClientBuilder};
pub use error::HanabiError;
pub use logging::init_logging;

pub use hanabi_protocol as protocol;
pub use hanabi_session as session;
pub use hanabi_transport as transport;

pub mod prelude {
    //! Everything a typical player program needs.

    pub use crate::{Client, ClientBuilder, HanabiError, init_logging};
    pub use hanabi_protocol::{
        ActionKind, Card, CardIndex, Color, Hint, HintKind, Message,
        PlayerName, PlayerView,
    };
    pub use hanabi_session::{
        ClientConfig, NoopObserver, PlayerStatus, SessionError,
        SessionObserver,
    };
    pub use hanabi_transport::TransportError;
}
