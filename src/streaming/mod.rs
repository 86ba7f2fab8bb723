#[cfg(feature = "streaming")]
mod kafka_client;
#[cfg(feature = "streaming")]
mod kafka_config;
#[cfg(feature = "streaming")]
mod kafka_consumer;
mod message;
mod streaming_client;
mod streaming_consumer;

#[cfg(feature = "streaming")]
pub use kafka_client::KafkaClient;
#[cfg(feature = "streaming")]
pub use kafka_config::KafkaConfig;
#[cfg(feature = "streaming")]
pub use kafka_consumer::KafkaConsumer;
pub use message::Message;
pub use streaming_client::StreamingClient;
pub use streaming_consumer::StreamingConsumer;
