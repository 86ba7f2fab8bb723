use std::fmt::{Debug, Formatter};

use eyre::WrapErr;
use futures_util::StreamExt;
use rdkafka::{
    consumer::{Consumer, StreamConsumer},
    Message as KafkaMessage,
};

use super::{KafkaConfig, Message, StreamingConsumer};

use crate::Result;

pub struct KafkaConsumer {
    consumer: StreamConsumer,
    group_id: String,
}

impl KafkaConsumer {
    /// Creates a consumer in `group_id` and subscribes it to `topic`.
    pub fn subscribe(config: &KafkaConfig, group_id: &str, topic: &str) -> Result<Self> {
        tracing::info!(config = ?config, group_id, topic, "initing kafka-consumer");

        let consumer: StreamConsumer = config
            .client_config()?
            .set("group.id", group_id)
            .set("session.timeout.ms", "6000")
            .set("enable.auto.commit", "true")
            .create()
            .wrap_err("Failed to open connection with Kafka")?;

        consumer
            .subscribe(&[topic])
            .wrap_err_with(|| format!("Failed to subscribe to topic {topic}"))?;

        Ok(Self {
            consumer,
            group_id: group_id.to_string(),
        })
    }
}

#[crate::async_trait]
impl StreamingConsumer for KafkaConsumer {
    async fn recv(&self) -> Option<Result<Message>> {
        let received = self.consumer.stream().next().await?;

        Some(
            received
                .wrap_err("Failed to receive message from Kafka")
                .and_then(|message| to_message(&message)),
        )
    }
}

/// Converts a Kafka record into a relayed message.
///
/// Records without payload (tombstones) are relayed as empty text; payloads that are not UTF-8
/// are rejected.
fn to_message<M: KafkaMessage>(record: &M) -> Result<Message> {
    let payload = match record.payload_view::<str>() {
        None => "",
        Some(payload) => payload.wrap_err("Kafka payload is not valid UTF-8")?,
    };

    Ok(Message::new(record.topic(), payload))
}

impl Debug for KafkaConsumer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaConsumer")
            .field("consumer", &"...")
            .field("group_id", &self.group_id)
            .finish()
    }
}
