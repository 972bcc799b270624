//! Hook for whatever sits above the session: a bot, a terminal UI, a test.
//!
//! The session never prints anything. It reports status changes and every
//! inbound message through the [`SessionObserver`] registered by the
//! caller, and the caller decides what to do with them.

use hanabi_protocol::{Message, PlayerName};
use hanabi_transport::TransportError;

use crate::PlayerStatus;

/// Receives session events.
///
/// All methods have empty default bodies, so implement only what you need.
///
/// The callbacks run on the session's receive loop (or on the task that
/// called an operation, for status changes). They should return quickly;
/// hand heavy work off to a channel or another task.
pub trait SessionObserver: Send + Sync + 'static {
    /// The player's status moved forward.
    fn on_status_change(
        &self,
        player: &PlayerName,
        from: PlayerStatus,
        to: PlayerStatus,
    ) {
        let _ = (player, from, to);
    }

    /// A message arrived from the server. Called in arrival order.
    fn on_message(&self, message: &Message) {
        let _ = message;
    }

    /// The receive loop stopped. `error` is `None` for a normal close
    /// (peer hung up or the session was terminated) and `Some` for a fatal
    /// connection or framing error.
    fn on_closed(&self, error: Option<&TransportError>) {
        let _ = error;
    }
}

/// An observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
