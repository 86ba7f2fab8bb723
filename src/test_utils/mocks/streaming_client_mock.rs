use crate::{async_trait, throw, Message, Result, StreamingClient as StreamingClientInterface};
use mockall::{mock, predicate::eq};

mock! {
    pub StreamingClient {}

    #[async_trait]
    impl StreamingClientInterface for StreamingClient {
        async fn publish(&self, message: Message) -> Result<()>;
        async fn health_check(&self) -> Result<()>;
    }
}

impl MockStreamingClient {
    /// Expects exactly one publish of `message`, answering with `result`.
    pub fn with_publish(mut self, message: Message, result: Result<()>) -> Self {
        let failed = result.is_err();
        self.expect_publish()
            .times(1)
            .with(eq(message))
            .returning(move |_| {
                if failed {
                    Err(throw!("Publish error"))
                } else {
                    Ok(())
                }
            });

        self
    }

    /// Accepts any number of publishes to `topic` and reports every payload through `sink`.
    pub fn with_publishes_to(
        mut self,
        topic: &str,
        sink: tokio::sync::mpsc::UnboundedSender<Message>,
    ) -> Self {
        let topic = topic.to_string();
        self.expect_publish()
            .withf(move |message| message.topic == topic)
            .returning(move |message| {
                sink.send(message).map_err(|_| throw!("Publish sink closed"))
            });

        self
    }

    pub fn with_health_check(mut self, result: Result<()>) -> Self {
        let failed = result.is_err();
        self.expect_health_check().times(1).returning(move || {
            if failed {
                Err(throw!("Health check error"))
            } else {
                Ok(())
            }
        });

        self
    }
}
