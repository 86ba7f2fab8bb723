use std::{
    fmt::{Debug, Formatter},
    time::Duration,
};

use eyre::WrapErr;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};

use super::{KafkaConfig, Message, StreamingClient};

use crate::{Result, Timeable};

const NO_RETRY: Duration = Duration::from_secs(0);
const METADATA_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Clone)]
pub struct KafkaClient {
    producer: FutureProducer,
    health_check_topic: Option<String>,
}

impl KafkaClient {
    /// Creates a Kafka producer connected to the broker.
    ///
    /// The connection is validated immediately after creation, and if not connected, the
    /// client creation will fail with an error.
    pub async fn new(config: &KafkaConfig) -> Result<Self> {
        tracing::info!(config = ?config, "initing kafka-client");

        let client = KafkaClient {
            producer: config
                .producer_config()?
                .create()
                .wrap_err("Failed to open connection with Kafka")?,
            health_check_topic: config.kafka_health_check_topic.clone(),
        };

        client.health_check().await?;

        Ok(client)
    }
}

#[crate::async_trait]
impl StreamingClient for KafkaClient {
    /// Publishes the message and waits for the broker to acknowledge it.
    async fn publish(&self, message: Message) -> Result<()> {
        let record = FutureRecord::<(), _>::to(&message.topic).payload(&message.payload);

        self.producer
            .send(record, NO_RETRY)
            .time_as("kafka_publish")
            .await
            .map_err(|(e, _)| e)
            .wrap_err("Failed to send message to Kafka")?;

        tracing::info!(
            topic = %message.topic,
            "Sent message: {} to topic: {}",
            message.payload,
            message.topic
        );
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        // fetch_metadata blocks the calling thread until the broker answers
        let producer = self.producer.clone();
        let topic = self.health_check_topic.clone();

        tokio::task::spawn_blocking(move || {
            producer
                .client()
                .fetch_metadata(topic.as_deref(), METADATA_TIMEOUT)
                .map(|_| ())
        })
        .await?
        .wrap_err("Failed to check Kafka health")
    }
}

impl Debug for KafkaClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaClient")
            .field("producer", &"...")
            .field("health_check_topic", &self.health_check_topic)
            .finish()
    }
}
