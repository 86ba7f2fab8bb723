use std::future::Future;

use crate::{Message, StreamingConsumer};

/// Line written for every message the subscriber receives.
pub fn received_line(message: &Message) -> String {
    format!(
        "Received message: {} from topic: {}",
        message.payload, message.topic
    )
}

/// Logs every message delivered by its consumer.
pub struct Subscriber<C> {
    consumer: C,
}

impl<C: StreamingConsumer> Subscriber<C> {
    pub fn new(consumer: C) -> Self {
        Self { consumer }
    }

    /// Drains the consumer until `shutdown` resolves or the stream closes, returning how many
    /// messages were relayed to the log.
    ///
    /// Receive errors are logged and skipped.
    pub async fn run<F>(&self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut received = 0;

        loop {
            tokio::select! {
                biased;

                _ = &mut shutdown => break,
                next = self.consumer.recv() => match next {
                    Some(Ok(message)) => {
                        self.handle(&message);
                        received += 1;
                    }
                    Some(Err(e)) => tracing::error!(error = ?e, "failed to receive message"),
                    None => {
                        tracing::warn!("message stream closed");
                        break;
                    }
                },
            }
        }

        tracing::info!(received, "subscriber stopped");
        received
    }

    fn handle(&self, message: &Message) {
        let line = received_line(message);
        tracing::info!(topic = %message.topic, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_contains_payload_and_topic() {
        let line = received_line(&Message::new("test-topic", "hello"));
        assert_eq!(line, "Received message: hello from topic: test-topic");
    }

    #[test]
    fn empty_payload_still_logs_topic() {
        let line = received_line(&Message::new("test-topic", ""));
        assert_eq!(line, "Received message:  from topic: test-topic");
    }
}
