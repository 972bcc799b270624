//! The player's status state machine.

use std::fmt;

/// Where the player is in the life of a session.
///
/// Transitions only move forward:
///
/// ```text
///   Lobby ──(ready)──→ Game ──(terminate)──→ Terminated
///     │                                          ↑
///     └──────────────(terminate)─────────────────┘
/// ```
///
/// - **Lobby**: handshake done; the player can ask to start or mark ready.
/// - **Game**: the player marked ready and may play, discard and hint.
/// - **Terminated**: the connection is closed. Final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerStatus {
    Lobby,
    Game,
    Terminated,
}

impl PlayerStatus {
    /// Returns `true` if moving from `self` to `target` goes forward.
    pub fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Lobby, Self::Game)
                | (Self::Lobby, Self::Terminated)
                | (Self::Game, Self::Terminated)
        )
    }

    /// Returns `true` once the session is over.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Terminated)
    }
}

impl fmt::Display for PlayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lobby => write!(f, "Lobby"),
            Self::Game => write!(f, "Game"),
            Self::Terminated => write!(f, "Terminated"),
        }
    }
}
