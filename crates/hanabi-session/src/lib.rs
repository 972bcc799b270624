//! Player sessions for the Hanabi client.
//!
//! This crate is the player-facing surface of the client:
//!
//! 1. **Status**: where the player is, as [`PlayerStatus`] (Lobby → Game →
//!    Terminated)
//! 2. **Session**: the operations a player can perform, each gated on
//!    that status ([`PlayerSession`])
//! 3. **Observation**: inbound messages and status changes, delivered to
//!    a caller-supplied [`SessionObserver`]
//! 4. **Configuration**: host, port, and name ([`ClientConfig`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Bot / UI (above)  ← decides what to do, implements SessionObserver
//!     ↕
//! Session Layer (this crate)  ← player status and operations
//!     ↕
//! Transport Layer (below)  ← connection, handshake, framing I/O
//! ```
//!
//! # Feature Flags
//!
//! - `tcp` (default): [`PlayerSession::connect`] over `hanabi-transport`'s
//!   TCP connection. Without it, sessions are built with
//!   [`PlayerSession::start`] on any `Connection`.

mod config;
mod error;
mod observer;
mod session;
mod status;

pub use config::{ClientConfig, DEFAULT_PORT};
pub use error::SessionError;
pub use observer::{NoopObserver, SessionObserver};
pub use session::PlayerSession;
pub use status::PlayerStatus;
