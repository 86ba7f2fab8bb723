use std::net::SocketAddr;

use crate::Parser;

#[cfg(feature = "streaming")]
use crate::KafkaConfig;

pub const DEFAULT_TOPIC: &str = "test-topic";
pub const DEFAULT_GROUP_ID: &str = "my-kafka-group";

#[derive(Debug, Clone, Parser)]
pub struct RelayConfig {
    #[clap(
        long = "relay-listen-addr",
        env = "RELAY_LISTEN_ADDR",
        default_value = "0.0.0.0:8080"
    )]
    pub listen_addr: SocketAddr,

    #[clap(long = "relay-topic", env = "RELAY_TOPIC", default_value = DEFAULT_TOPIC)]
    pub topic: String,

    #[clap(long = "relay-group-id", env = "RELAY_GROUP_ID", default_value = DEFAULT_GROUP_ID)]
    pub group_id: String,

    #[cfg(feature = "streaming")]
    #[clap(flatten)]
    pub kafka: KafkaConfig,
}
