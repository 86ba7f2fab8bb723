use super::message::Message;

#[crate::async_trait]
pub trait StreamingConsumer: Sync + Send + 'static {
    /// Waits for the next message on the subscribed topic.
    ///
    /// `None` means the underlying stream is closed and no more messages will arrive.
    async fn recv(&self) -> Option<crate::Result<Message>>;
}
