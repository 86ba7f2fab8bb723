use std::future::pending;

use kafka_relay::{
    relay::Subscriber,
    test_utils::mocks::MockStreamingConsumer,
    throw, Message,
};

#[tokio::test]
async fn logs_every_delivered_message() {
    let consumer = MockStreamingConsumer::default().with_messages(vec![
        Message::new("test-topic", "hello"),
        Message::new("test-topic", "world"),
    ]);

    let received = Subscriber::new(consumer).run(pending()).await;

    assert_eq!(received, 2);
}

#[tokio::test]
async fn duplicate_messages_are_not_collapsed() {
    let consumer = MockStreamingConsumer::default().with_messages(vec![
        Message::new("test-topic", "hello"),
        Message::new("test-topic", "hello"),
    ]);

    let received = Subscriber::new(consumer).run(pending()).await;

    assert_eq!(received, 2);
}

#[tokio::test]
async fn receive_errors_are_skipped() {
    let consumer = MockStreamingConsumer::default().with_deliveries(vec![
        Ok(Message::new("test-topic", "before")),
        Err(throw!("Kafka payload is not valid UTF-8")),
        Ok(Message::new("test-topic", "after")),
    ]);

    let received = Subscriber::new(consumer).run(pending()).await;

    assert_eq!(received, 2);
}

#[tokio::test]
async fn closed_stream_stops_subscriber() {
    let consumer = MockStreamingConsumer::default().with_messages(vec![]);

    let received = Subscriber::new(consumer).run(pending()).await;

    assert_eq!(received, 0);
}
