//! Core protocol types for the Hanabi wire format.
//!
//! Every value that travels between the client and the game server is
//! defined here. The taxonomy is closed: [`Message`] is a single enum and
//! decoding picks the variant from its `"type"` tag, so there is never any
//! guessing about what a buffer contains.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Codec, JsonCodec, ProtocolError};

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A player's display name, the identity the server knows us by.
///
/// Newtype over `String` so a name can't be confused with any other piece
/// of text (a hint reason, an error message). The only way to build one is
/// [`PlayerName::new`], which rejects blank names, and deserialization
/// goes through the same check via `#[serde(try_from = "String")]`.
///
/// On the wire it is a plain JSON string: `"Alice"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName(String);

impl PlayerName {
    /// Creates a player name.
    ///
    /// # Errors
    /// Returns `ProtocolError::InvalidMessage` if the name is empty or
    /// only whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ProtocolError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProtocolError::InvalidMessage(
                "player name must not be empty".into(),
            ));
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlayerName {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.0
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Cards and hints
// ---------------------------------------------------------------------------

/// Position of a card in a player's hand.
///
/// Cards are always referenced by position, never by value, so the client
/// never says anything over the wire about cards it isn't supposed to see.
pub type CardIndex = usize;

/// The five Hanabi suits. Lowercase on the wire: `"red"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Red,
    Blue,
    Yellow,
    Green,
}

impl Color {
    /// All colors, in the order the server lists them.
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Red,
        Color::Blue,
        Color::Yellow,
        Color::Green,
    ];
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::White => "white",
            Self::Red => "red",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::Green => "green",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for Color {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProtocolError::InvalidMessage(format!("unknown color: {s}")))
    }
}

/// A card as the server shows it (other players' hands, the table, the
/// discard pile). Our own hand is never described this way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub color: Color,
    pub value: u8,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.value)
    }
}

/// What a hint reveals: a color or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HintKind {
    Color,
    Value,
}

impl fmt::Display for HintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color => f.write_str("color"),
            Self::Value => f.write_str("value"),
        }
    }
}

/// A hint payload. The kind and the value travel together, so a color
/// hint can't carry a number or the other way round.
///
/// `#[serde(tag = "kind", content = "value")]` gives adjacently tagged JSON:
///   `{ "kind": "color", "value": "red" }` or `{ "kind": "value", "value": 3 }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Hint {
    Color(Color),
    Value(u8),
}

impl Hint {
    /// Returns which kind of hint this is.
    pub fn kind(&self) -> HintKind {
        match self {
            Self::Color(_) => HintKind::Color,
            Self::Value(_) => HintKind::Value,
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(color) => write!(f, "color {color}"),
            Self::Value(value) => write!(f, "value {value}"),
        }
    }
}

/// The kind of card action the server reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Play,
    Discard,
}

/// Another player as seen in a game state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerView {
    pub name: PlayerName,
    pub hand: Vec<Card>,
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

/// Which way a message travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    ClientToServer,
    ServerToClient,
}

/// Every message on the wire.
///
/// `#[serde(tag = "type")]` produces internally tagged JSON:
///   `{ "type": "DiscardRequest", "name": "Alice", "card_index": 2 }`
/// Decoding reads the tag and serde's generated code dispatches straight to
/// the matching variant; an unknown tag is a decode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    // -- Client → Server: lobby --

    /// Handshake join request. Must be the first message on a connection.
    AddPlayer { name: PlayerName },

    /// Ask the server to start the game.
    StartRequest { name: PlayerName },

    /// Mark the player ready; the client moves itself into the game.
    ReadyData { name: PlayerName },

    // -- Client → Server: game --

    /// Poll for the current game state.
    GetGameStateRequest { name: PlayerName },

    DiscardRequest {
        name: PlayerName,
        card_index: CardIndex,
    },

    PlayCardRequest {
        name: PlayerName,
        card_index: CardIndex,
    },

    /// Give `destination` a hint about their hand.
    HintData {
        source: PlayerName,
        destination: PlayerName,
        hint: Hint,
    },

    // -- Server → Client: handshake --

    /// Handshake accepted. Echoes the name the server registered.
    ConnectionOk { name: PlayerName },

    /// Handshake denied (name taken, game already running, ...).
    ConnectionRejected { reason: String },

    // -- Server → Client: lobby and game --

    /// A start request was counted.
    StartRequestAccepted { accepted: u32, connected: u32 },

    /// The game has begun with these players, in turn order.
    GameStarted { players: Vec<PlayerName> },

    /// Answer to `GetGameStateRequest`. Our own hand is never included.
    GameState {
        current_player: PlayerName,
        players: Vec<PlayerView>,
        table_cards: Vec<Card>,
        discard_pile: Vec<Card>,
        used_note_tokens: u8,
        used_storm_tokens: u8,
    },

    /// A play or discard went through.
    ActionValid {
        player: PlayerName,
        action: ActionKind,
        card_index: CardIndex,
        card: Card,
        current_player: PlayerName,
    },

    /// A played card landed on the table.
    PlayOk {
        player: PlayerName,
        card_index: CardIndex,
        card: Card,
        current_player: PlayerName,
    },

    /// A played card did not fit; a storm token is used.
    ThunderStrike {
        player: PlayerName,
        card_index: CardIndex,
        card: Card,
        current_player: PlayerName,
    },

    /// Someone gave a hint. `positions` are indices into the
    /// destination's hand.
    HintReceived {
        source: PlayerName,
        destination: PlayerName,
        hint: Hint,
        positions: Vec<CardIndex>,
    },

    /// The server refused an action (not your turn, no tokens left, ...).
    ActionInvalid { message: String },

    /// The server could not make sense of something we sent.
    InvalidDataReceived { data: String },

    GameOver { score: u32, score_message: String },
}

impl Message {
    /// Serializes the message to its JSON payload (no frame header).
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProtocolError> {
        JsonCodec.encode(self)
    }

    /// Reconstructs a message from a JSON payload.
    ///
    /// # Errors
    /// Returns `ProtocolError::MalformedMessage` if the tag is unknown or
    /// the fields don't match the tagged variant.
    pub fn from_bytes(data: &[u8]) -> Result<Self, ProtocolError> {
        JsonCodec.decode(data)
    }

    /// The variant's wire tag, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AddPlayer { .. } => "AddPlayer",
            Self::StartRequest { .. } => "StartRequest",
            Self::ReadyData { .. } => "ReadyData",
            Self::GetGameStateRequest { .. } => "GetGameStateRequest",
            Self::DiscardRequest { .. } => "DiscardRequest",
            Self::PlayCardRequest { .. } => "PlayCardRequest",
            Self::HintData { .. } => "HintData",
            Self::ConnectionOk { .. } => "ConnectionOk",
            Self::ConnectionRejected { .. } => "ConnectionRejected",
            Self::StartRequestAccepted { .. } => "StartRequestAccepted",
            Self::GameStarted { .. } => "GameStarted",
            Self::GameState { .. } => "GameState",
            Self::ActionValid { .. } => "ActionValid",
            Self::PlayOk { .. } => "PlayOk",
            Self::ThunderStrike { .. } => "ThunderStrike",
            Self::HintReceived { .. } => "HintReceived",
            Self::ActionInvalid { .. } => "ActionInvalid",
            Self::InvalidDataReceived { .. } => "InvalidDataReceived",
            Self::GameOver { .. } => "GameOver",
        }
    }

    /// Which way this message is meant to travel.
    pub fn direction(&self) -> Direction {
        match self {
            Self::AddPlayer { .. }
            | Self::StartRequest { .. }
            | Self::ReadyData { .. }
            | Self::GetGameStateRequest { .. }
            | Self::DiscardRequest { .. }
            | Self::PlayCardRequest { .. }
            | Self::HintData { .. } => Direction::ClientToServer,
            _ => Direction::ServerToClient,
        }
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The server parses these exact JSON shapes, so each test pins one.

    use super::*;
    use crate::{FrameDecoder, encode_frame};

    fn name(s: &str) -> PlayerName {
        PlayerName::new(s).unwrap()
    }

    // =====================================================================
    // PlayerName
    // =====================================================================

    #[test]
    fn test_player_name_rejects_blank() {
        assert!(PlayerName::new("").is_err());
        assert!(PlayerName::new("   ").is_err());
        assert_eq!(name("Alice").as_str(), "Alice");
    }

    #[test]
    fn test_player_name_serializes_as_plain_string() {
        let json = serde_json::to_string(&name("Alice")).unwrap();
        assert_eq!(json, "\"Alice\"");
    }

    #[test]
    fn test_player_name_empty_fails_to_deserialize() {
        let result: Result<PlayerName, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    // =====================================================================
    // Hints
    // =====================================================================

    #[test]
    fn test_color_hint_json_format() {
        let json = serde_json::to_value(Hint::Color(Color::Red)).unwrap();
        assert_eq!(json["kind"], "color");
        assert_eq!(json["value"], "red");
    }

    #[test]
    fn test_value_hint_json_format() {
        let json = serde_json::to_value(Hint::Value(3)).unwrap();
        assert_eq!(json["kind"], "value");
        assert_eq!(json["value"], 3);
    }

    #[test]
    fn test_hint_with_mismatched_payload_is_rejected() {
        let bad = r#"{"kind": "color", "value": 3}"#;
        assert!(serde_json::from_str::<Hint>(bad).is_err());
        let bad = r#"{"kind": "value", "value": "red"}"#;
        assert!(serde_json::from_str::<Hint>(bad).is_err());
    }

    #[test]
    fn test_hint_kind() {
        assert_eq!(Hint::Color(Color::Blue).kind(), HintKind::Color);
        assert_eq!(Hint::Value(5).kind(), HintKind::Value);
    }

    #[test]
    fn test_color_from_str_is_case_insensitive() {
        assert_eq!("Yellow".parse::<Color>().unwrap(), Color::Yellow);
        assert!("purple".parse::<Color>().is_err());
    }

    // =====================================================================
    // Message shapes
    // =====================================================================

    #[test]
    fn test_add_player_json_format() {
        let msg = Message::AddPlayer { name: name("Alice") };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "AddPlayer");
        assert_eq!(json["name"], "Alice");
    }

    #[test]
    fn test_discard_request_json_format() {
        let msg = Message::DiscardRequest {
            name: name("Alice"),
            card_index: 2,
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "DiscardRequest");
        assert_eq!(json["card_index"], 2);
    }

    #[test]
    fn test_hint_data_json_format() {
        let msg = Message::HintData {
            source: name("Alice"),
            destination: name("Bob"),
            hint: Hint::Value(1),
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "HintData");
        assert_eq!(json["source"], "Alice");
        assert_eq!(json["destination"], "Bob");
        assert_eq!(json["hint"]["kind"], "value");
    }

    #[test]
    fn test_connection_rejected_is_distinct_from_ok() {
        let ok = Message::ConnectionOk { name: name("Alice") };
        let rejected = Message::ConnectionRejected {
            reason: "name taken".into(),
        };
        assert_ne!(ok.name(), rejected.name());
    }

    #[test]
    fn test_direction() {
        assert_eq!(
            Message::ReadyData { name: name("A") }.direction(),
            Direction::ClientToServer
        );
        assert_eq!(
            Message::GameOver {
                score: 25,
                score_message: "legendary".into()
            }
            .direction(),
            Direction::ServerToClient
        );
    }

    #[test]
    fn test_name_matches_serialized_tag() {
        let msg = Message::GameStarted {
            players: vec![name("A"), name("B")],
        };
        let json: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], msg.name());
    }

    // =====================================================================
    // to_bytes / from_bytes
    // =====================================================================

    /// Position of each variant in declaration order. The match has no
    /// wildcard, so a new variant fails to compile here until it is
    /// added to `every_variant`.
    fn variant_index(msg: &Message) -> usize {
        match msg {
            Message::AddPlayer { .. } => 0,
            Message::StartRequest { .. } => 1,
            Message::ReadyData { .. } => 2,
            Message::GetGameStateRequest { .. } => 3,
            Message::DiscardRequest { .. } => 4,
            Message::PlayCardRequest { .. } => 5,
            Message::HintData { .. } => 6,
            Message::ConnectionOk { .. } => 7,
            Message::ConnectionRejected { .. } => 8,
            Message::StartRequestAccepted { .. } => 9,
            Message::GameStarted { .. } => 10,
            Message::GameState { .. } => 11,
            Message::ActionValid { .. } => 12,
            Message::PlayOk { .. } => 13,
            Message::ThunderStrike { .. } => 14,
            Message::HintReceived { .. } => 15,
            Message::ActionInvalid { .. } => 16,
            Message::InvalidDataReceived { .. } => 17,
            Message::GameOver { .. } => 18,
        }
    }

    const VARIANT_COUNT: usize = 19;

    /// At least one value of every variant, with both hint kinds.
    fn every_variant() -> Vec<Message> {
        let long = "x".repeat(500);
        vec![
            Message::AddPlayer { name: name("A") },
            Message::StartRequest { name: name(&long) },
            Message::ReadyData { name: name("Bob") },
            Message::GetGameStateRequest { name: name("Bob") },
            Message::DiscardRequest {
                name: name("Bob"),
                card_index: 0,
            },
            Message::PlayCardRequest {
                name: name("Bob"),
                card_index: usize::MAX,
            },
            Message::HintData {
                source: name("Bob"),
                destination: name(&long),
                hint: Hint::Color(Color::Green),
            },
            Message::ConnectionOk { name: name("Bob") },
            Message::ConnectionRejected {
                reason: String::new(),
            },
            Message::StartRequestAccepted {
                accepted: 1,
                connected: 3,
            },
            Message::GameState {
                current_player: name("Bob"),
                players: vec![PlayerView {
                    name: name("Carol"),
                    hand: vec![Card {
                        color: Color::White,
                        value: 1,
                    }],
                }],
                table_cards: vec![],
                discard_pile: vec![Card {
                    color: Color::Red,
                    value: 5,
                }],
                used_note_tokens: 2,
                used_storm_tokens: 1,
            },
            Message::ActionValid {
                player: name("Carol"),
                action: ActionKind::Discard,
                card_index: 4,
                card: Card {
                    color: Color::Blue,
                    value: 2,
                },
                current_player: name("Bob"),
            },
            Message::HintReceived {
                source: name("Carol"),
                destination: name("Bob"),
                hint: Hint::Value(4),
                positions: vec![0, 3],
            },
            Message::GameOver {
                score: 0,
                score_message: "better luck next time".into(),
            },
            Message::HintData {
                source: name("Carol"),
                destination: name("Bob"),
                hint: Hint::Value(1),
            },
            Message::GameStarted {
                players: vec![name("Alice"), name("Bob"), name("Carol")],
            },
            Message::PlayOk {
                player: name("Alice"),
                card_index: 1,
                card: Card {
                    color: Color::Yellow,
                    value: 1,
                },
                current_player: name("Bob"),
            },
            Message::ThunderStrike {
                player: name("Bob"),
                card_index: 2,
                card: Card {
                    color: Color::Red,
                    value: 4,
                },
                current_player: name("Carol"),
            },
            Message::ActionInvalid {
                message: "not your turn".into(),
            },
            Message::InvalidDataReceived {
                data: "{\"type\": \"Nope\"}".into(),
            },
        ]
    }

    #[test]
    fn test_every_variant_is_listed() {
        let mut seen = [false; VARIANT_COUNT];
        for msg in every_variant() {
            seen[variant_index(&msg)] = true;
        }
        let missing: Vec<usize> = (0..VARIANT_COUNT).filter(|&i| !seen[i]).collect();
        assert!(missing.is_empty(), "variants without a sample: {missing:?}");

        let hints: Vec<HintKind> = every_variant()
            .iter()
            .filter_map(|msg| match msg {
                Message::HintData { hint, .. } => Some(hint.kind()),
                _ => None,
            })
            .collect();
        assert!(hints.contains(&HintKind::Color));
        assert!(hints.contains(&HintKind::Value));
    }

    #[test]
    fn test_round_trip_every_variant() {
        for msg in every_variant() {
            let bytes = msg.to_bytes().unwrap();
            assert_eq!(Message::from_bytes(&bytes).unwrap(), msg);
        }
    }

    #[test]
    fn test_every_variant_survives_byte_at_a_time_framing() {
        let messages = every_variant();
        let mut stream = Vec::new();
        for msg in &messages {
            stream.extend(encode_frame(msg).unwrap());
        }

        let mut decoder = FrameDecoder::new();
        let mut decoded = Vec::new();
        for byte in stream {
            decoder.extend(&[byte]);
            while let Some(msg) = decoder.next_message().unwrap() {
                decoded.push(msg);
            }
        }

        assert_eq!(decoded, messages);
        assert_eq!(decoder.buffered_len(), 0);
    }

    #[test]
    fn test_unknown_tag_is_malformed() {
        let err = Message::from_bytes(br#"{"type": "FlyToMoon"}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedMessage(_)));
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err =
            Message::from_bytes(br#"{"type": "DiscardRequest", "name": "A"}"#)
                .unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedMessage(_)));
    }

    #[test]
    fn test_negative_card_index_is_malformed() {
        let raw = br#"{"type": "PlayCardRequest", "name": "A", "card_index": -1}"#;
        assert!(Message::from_bytes(raw).is_err());
    }

    #[test]
    fn test_empty_name_on_the_wire_is_malformed() {
        let err =
            Message::from_bytes(br#"{"type": "ReadyData", "name": ""}"#).unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedMessage(_)));
    }
}
