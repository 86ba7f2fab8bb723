use std::collections::VecDeque;

use crate::{async_trait, Message, Result, StreamingConsumer as StreamingConsumerInterface};
use mockall::mock;

mock! {
    pub StreamingConsumer {}

    #[async_trait]
    impl StreamingConsumerInterface for StreamingConsumer {
        async fn recv(&self) -> Option<Result<Message>>;
    }
}

impl MockStreamingConsumer {
    /// Delivers `deliveries` in order, then reports the stream as closed.
    pub fn with_deliveries(mut self, deliveries: Vec<Result<Message>>) -> Self {
        let mut queue = VecDeque::from(deliveries);
        self.expect_recv()
            .times(queue.len() + 1)
            .returning(move || queue.pop_front());

        self
    }

    /// Delivers `messages` in order, then reports the stream as closed.
    pub fn with_messages(self, messages: Vec<Message>) -> Self {
        self.with_deliveries(messages.into_iter().map(Ok).collect())
    }
}
