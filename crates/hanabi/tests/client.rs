//! Integration tests for the `ClientBuilder` against a loopback server.

use std::time::Duration;

use hanabi::prelude::*;
use hanabi::protocol::{FrameDecoder, encode_frame};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

const TIMEOUT: Duration = Duration::from_secs(2);

async fn read_message(stream: &mut TcpStream, decoder: &mut FrameDecoder) -> Option<Message> {
    let mut buf = [0u8; 512];
    loop {
        if let Some(msg) = decoder.next_message().unwrap() {
            return Some(msg);
        }
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            return None;
        }
        decoder.extend(&buf[..n]);
    }
}

async fn write_message(stream: &mut TcpStream, msg: &Message) {
    stream.write_all(&encode_frame(msg).unwrap()).await.unwrap();
}

struct Forward(mpsc::UnboundedSender<Message>);

impl SessionObserver for Forward {
    fn on_message(&self, message: &Message) {
        let _ = self.0.send(message.clone());
    }
}

#[tokio::test]
async fn test_builder_connects_and_plays() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let server = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut decoder = FrameDecoder::new();

        let join = read_message(&mut stream, &mut decoder).await.unwrap();
        let Message::AddPlayer { name } = join else {
            panic!("expected AddPlayer, got {join:?}");
        };
        write_message(&mut stream, &Message::ConnectionOk { name }).await;
        write_message(
            &mut stream,
            &Message::GameOver {
                score: 25,
                score_message: "legendary".into(),
            },
        )
        .await;

        let mut seen = Vec::new();
        while let Some(msg) = read_message(&mut stream, &mut decoder).await {
            seen.push(msg);
        }
        seen
    });

    let (tx, mut inbound) = mpsc::unbounded_channel();
    let client = ClientBuilder::new()
        .host("127.0.0.1")
        .port(port)
        .name("Alice")
        .observer(Forward(tx))
        .connect()
        .await
        .unwrap();
    assert_eq!(client.name().as_str(), "Alice");
    assert_eq!(client.status(), PlayerStatus::Lobby);

    let first = tokio::time::timeout(TIMEOUT, inbound.recv()).await.unwrap();
    assert_eq!(
        first,
        Some(Message::GameOver {
            score: 25,
            score_message: "legendary".into(),
        })
    );

    client.mark_ready().await.unwrap();
    client.play(3).await.unwrap();
    let err: HanabiError = client.request_start().await.unwrap_err().into();
    assert!(err.is_invalid_state());

    client.terminate().await.unwrap();
    tokio::time::timeout(TIMEOUT, client.wait_closed())
        .await
        .unwrap();

    let alice = PlayerName::new("Alice").unwrap();
    let seen = tokio::time::timeout(TIMEOUT, server).await.unwrap().unwrap();
    assert_eq!(
        seen,
        vec![
            Message::ReadyData {
                name: alice.clone()
            },
            Message::PlayCardRequest {
                name: alice,
                card_index: 3,
            },
        ]
    );
}

#[tokio::test]
async fn test_builder_rejects_missing_name() {
    let result = ClientBuilder::new().port(1).connect().await;
    assert!(matches!(
        result,
        Err(HanabiError::Session(SessionError::InvalidConfig(_)))
    ));
}

#[tokio::test]
async fn test_builder_from_config() {
    let config = ClientConfig::new("127.0.0.1", 0, "Bob");
    let result = ClientBuilder::new().config(config).connect().await;
    assert!(matches!(
        result,
        Err(HanabiError::Session(SessionError::InvalidConfig(_)))
    ));
}
