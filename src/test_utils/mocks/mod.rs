mod streaming_client_mock;
mod streaming_consumer_mock;

pub use streaming_client_mock::MockStreamingClient;
pub use streaming_consumer_mock::MockStreamingConsumer;
