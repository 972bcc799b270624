//! Turns server messages into console lines.

use hanabi::prelude::*;

fn cards(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".into();
    }
    cards
        .iter()
        .map(Card::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn describe(message: &Message) -> String {
    match message {
        Message::StartRequestAccepted {
            accepted,
            connected,
        } => format!("start requested ({accepted}/{connected} players)"),
        Message::GameStarted { players } => {
            let names: Vec<_> = players.iter().map(PlayerName::as_str).collect();
            format!("game started: {}", names.join(", "))
        }
        Message::GameState {
            current_player,
            players,
            table_cards,
            discard_pile,
            used_note_tokens,
            used_storm_tokens,
        } => {
            let mut out = format!("current player: {current_player}\n");
            for player in players {
                out.push_str(&format!("  {}: {}\n", player.name, cards(&player.hand)));
            }
            out.push_str(&format!("table: {}\n", cards(table_cards)));
            out.push_str(&format!("discard pile: {}\n", cards(discard_pile)));
            out.push_str(&format!(
                "note tokens used: {used_note_tokens}, storm tokens used: {used_storm_tokens}"
            ));
            out
        }
        Message::ActionValid {
            player,
            action,
            card_index,
            card,
            current_player,
        } => format!(
            "{player} {} card {card_index} ({card}); {current_player} to play",
            match action {
                ActionKind::Play => "played",
                ActionKind::Discard => "discarded",
            }
        ),
        Message::PlayOk {
            player,
            card,
            current_player,
            ..
        } => format!("{player} played {card}; {current_player} to play"),
        Message::ThunderStrike {
            player,
            card,
            current_player,
            ..
        } => format!("thunder strike! {player} misplayed {card}; {current_player} to play"),
        Message::HintReceived {
            source,
            destination,
            hint,
            positions,
        } => format!("{source} hints {destination}: {hint} at {positions:?}"),
        Message::ActionInvalid { message } => format!("invalid action: {message}"),
        Message::InvalidDataReceived { data } => format!("server could not read: {data}"),
        Message::GameOver {
            score,
            score_message,
        } => format!("game over, score {score}: {score_message}"),
        other => other.to_string(),
    }
}
