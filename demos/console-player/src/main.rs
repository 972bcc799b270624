//! Console Hanabi player.
//!
//! Usage:
//! ```bash
//! cargo run -p console-player -- 127.0.0.1 1024 Alice
//! ```
//!
//! Reads one command per line from stdin (`help` lists them) and prints
//! whatever the server sends. Set `RUST_LOG=debug` to see the traffic.

mod command;
mod render;

use std::process::ExitCode;

use hanabi::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::command::{Command, HELP};

struct Console;

impl SessionObserver for Console {
    fn on_status_change(&self, player: &PlayerName, from: PlayerStatus, to: PlayerStatus) {
        println!("[{player}] {from} -> {to}");
    }

    fn on_message(&self, message: &Message) {
        println!("{}", render::describe(message));
    }

    fn on_closed(&self, error: Option<&TransportError>) {
        match error {
            Some(e) => eprintln!("connection lost: {e}"),
            None => println!("disconnected"),
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging("info");

    let config = match ClientConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("usage: console-player <host> <port> <name>");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "client failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ClientConfig) -> Result<(), HanabiError> {
    let client = ClientBuilder::new()
        .config(config)
        .observer(Console)
        .connect()
        .await?;
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut status = client.status_changes();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(error = %e, "stdin closed");
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(cmd) => {
                        if !execute(&client, cmd).await? {
                            break;
                        }
                    }
                    Err(e) => println!("{e} (try `help`)"),
                }
            }
            _ = status.wait_for(|s| s.is_terminal()) => break,
        }
    }

    client.terminate().await?;
    client.wait_closed().await;
    Ok(())
}

/// Runs one command. Returns `Ok(false)` when the player asked to leave.
///
/// Commands the current status doesn't allow are reported and skipped;
/// only connection failures end the program.
async fn execute(client: &Client, cmd: Command) -> Result<bool, HanabiError> {
    let result = match cmd {
        Command::Start => client.request_start().await,
        Command::Ready => client.mark_ready().await,
        Command::State => client.request_state().await,
        Command::Play(index) => client.play(index).await,
        Command::Discard(index) => client.discard(index).await,
        Command::Hint { target, hint } => client.give_hint(&target, hint).await,
        Command::Help => {
            println!("{HELP}");
            Ok(())
        }
        Command::Exit => return Ok(false),
    };

    match result {
        Ok(()) => Ok(true),
        Err(e @ SessionError::InvalidStateTransition { .. }) => {
            println!("{e}");
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}
