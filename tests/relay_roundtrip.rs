//! Drives the whole relay in memory: HTTP send endpoint, a mocked producer feeding a channel that
//! stands in for the broker, and the subscriber logging what comes out the other side.

use std::{
    io,
    net::TcpListener,
    sync::{Arc, Mutex},
};

use kafka_relay::{
    async_trait,
    relay::{self, AppState, Subscriber},
    test_utils::mocks::MockStreamingClient,
    Message, Result, StreamingConsumer,
};
use reqwest::StatusCode;
use tokio::sync::{mpsc, oneshot};

const TOPIC: &str = "test-topic";

struct ChannelConsumer(tokio::sync::Mutex<mpsc::UnboundedReceiver<Message>>);

#[async_trait]
impl StreamingConsumer for ChannelConsumer {
    async fn recv(&self) -> Option<Result<Message>> {
        self.0.lock().await.recv().await.map(Ok)
    }
}

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn lines_containing(&self, needle: &str) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

/// Sends every message through the relay, shuts the endpoint down, and returns how many messages
/// the subscriber logged together with the captured log output.
async fn relay_messages(messages: &[&str]) -> (u64, CapturedLogs) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let _guard = tracing::subscriber::set_default(
        tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish(),
    );

    let (broker_tx, broker_rx) = mpsc::unbounded_channel();
    let client = MockStreamingClient::default().with_publishes_to(TOPIC, broker_tx);
    let consumer = ChannelConsumer(tokio::sync::Mutex::new(broker_rx));

    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let (stop, stopped) = oneshot::channel::<()>();
    let server = tokio::spawn(relay::serve(
        listener,
        AppState::new(client, TOPIC),
        async move {
            let _ = stopped.await;
        },
    ));

    let http = reqwest::Client::new();
    let responses = futures_util::future::join_all(messages.iter().map(|message| {
        http.post(format!("{base_url}/send"))
            .query(&[("message", message)])
            .send()
    }))
    .await;

    for (response, message) in responses.into_iter().zip(messages) {
        let response = response.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.text().await.unwrap().contains(message));
    }

    // stopping the endpoint drops the producer, which closes the in-memory broker
    stop.send(()).unwrap();
    server.await.unwrap().unwrap();

    let received = Subscriber::new(consumer)
        .run(std::future::pending())
        .await;

    (received, logs)
}

#[tokio::test]
async fn hello_is_logged_exactly_once_with_topic() {
    let (received, logs) = relay_messages(&["hello"]).await;

    assert_eq!(received, 1);
    let lines = logs.lines_containing("Received message:");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("hello"));
    assert!(lines[0].contains(TOPIC));
}

#[tokio::test]
async fn concurrent_sends_are_logged_independently() {
    let (received, logs) = relay_messages(&["first", "second"]).await;

    assert_eq!(received, 2);
    let lines = logs.lines_containing("Received message:");
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().any(|line| line.contains("first")));
    assert!(lines.iter().any(|line| line.contains("second")));
}

#[tokio::test]
async fn identical_sends_are_not_deduplicated() {
    let (received, logs) = relay_messages(&["same", "same"]).await;

    assert_eq!(received, 2);
    assert_eq!(
        logs.lines_containing("Received message: same from topic: test-topic")
            .len(),
        2
    );
}

#[tokio::test]
async fn shutdown_stops_an_idle_subscriber() {
    let (_broker_tx, broker_rx) = mpsc::unbounded_channel::<Message>();
    let consumer = ChannelConsumer(tokio::sync::Mutex::new(broker_rx));

    let received = Subscriber::new(consumer).run(async {}).await;

    assert_eq!(received, 0);
}
