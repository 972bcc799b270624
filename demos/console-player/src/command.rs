use std::str::FromStr;

use hanabi::prelude::*;

pub const HELP: &str = "\
commands:
  start                       ask the server to start the game
  ready                       mark yourself ready
  state                       request the game state
  play <index>                play the card at <index>
  discard <index>             discard the card at <index>
  hint <player> color <color> hint a color (white, red, blue, yellow, green)
  hint <player> value <n>     hint a value (1-5)
  help                        show this text
  exit                        leave the game";

/// One line typed by the player.
#[derive(Debug, PartialEq)]
pub enum Command {
    Start,
    Ready,
    State,
    Play(CardIndex),
    Discard(CardIndex),
    Hint { target: PlayerName, hint: Hint },
    Help,
    Exit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = line.split_whitespace().collect();
        match words.as_slice() {
            ["start"] => Ok(Self::Start),
            ["ready"] => Ok(Self::Ready),
            ["state"] | ["show"] => Ok(Self::State),
            ["play", index] => Ok(Self::Play(parse_index(index)?)),
            ["discard", index] => Ok(Self::Discard(parse_index(index)?)),
            ["hint", target, kind, value] => {
                let target = PlayerName::new(*target).map_err(|e| e.to_string())?;
                let hint = match *kind {
                    "color" => Hint::Color(value.parse::<Color>().map_err(|e| e.to_string())?),
                    "value" => Hint::Value(parse_value(value)?),
                    other => return Err(format!("unknown hint kind: {other}")),
                };
                Ok(Self::Hint { target, hint })
            }
            ["help"] => Ok(Self::Help),
            ["exit"] | ["quit"] => Ok(Self::Exit),
            [] => Err("empty command".into()),
            _ => Err(format!("unknown command: {line}")),
        }
    }
}

fn parse_index(s: &str) -> Result<CardIndex, String> {
    s.parse().map_err(|_| format!("not a card index: {s}"))
}

fn parse_value(s: &str) -> Result<u8, String> {
    match s.parse() {
        Ok(v @ 1..=5) => Ok(v),
        _ => Err(format!("card values run from 1 to 5, got {s}")),
    }
}
