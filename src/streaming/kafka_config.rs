use base64::{engine::general_purpose, Engine as _};
use eyre::WrapErr;
use rdkafka::ClientConfig;

use crate::{Parser, Result, Sensitive};

#[derive(Debug, Clone, Parser)]
pub struct KafkaConfig {
    #[clap(long = "kafka-url", env = "KAFKA_URL", default_value = "localhost:9092")]
    pub kafka_url: String,

    #[clap(long = "kafka-health-check-topic", env = "KAFKA_HEALTH_CHECK_TOPIC")]
    pub kafka_health_check_topic: Option<String>,

    /// Upper bound on how long a publish waits for the broker to acknowledge delivery.
    #[clap(
        long = "kafka-message-timeout-ms",
        env = "KAFKA_MESSAGE_TIMEOUT_MS",
        default_value = "5000"
    )]
    pub kafka_message_timeout_ms: u64,

    #[clap(long = "kafka-key", env = "KAFKA_KEY")]
    pub kafka_key: Option<Sensitive<String>>,

    #[clap(long = "kafka-cert", env = "KAFKA_CERT")]
    pub kafka_cert: Option<Sensitive<String>>,

    #[clap(long = "kafka-ca", env = "KAFKA_CA")]
    pub kafka_ca: Option<Sensitive<String>>,
}

impl KafkaConfig {
    /// Base librdkafka configuration shared by producers and consumers.
    ///
    /// SSL is only turned on when key, certificate and CA are all present.
    pub(super) fn client_config(&self) -> Result<ClientConfig> {
        let mut client_config = ClientConfig::new();
        client_config.set("bootstrap.servers", &self.kafka_url);

        if let (Some(key), Some(certificate), Some(ca)) =
            (&self.kafka_key, &self.kafka_cert, &self.kafka_ca)
        {
            client_config
                .set("security.protocol", "ssl")
                .set(
                    "ssl.key.pem",
                    pem_string_from_base64(key).wrap_err("Invalid KAFKA_KEY")?.expose(),
                )
                .set(
                    "ssl.certificate.pem",
                    pem_string_from_base64(certificate)
                        .wrap_err("Invalid KAFKA_CERT")?
                        .expose(),
                )
                .set(
                    "ssl.ca.pem",
                    pem_string_from_base64(ca).wrap_err("Invalid KAFKA_CA")?.expose(),
                );
        }

        Ok(client_config)
    }

    /// Client configuration with the producer-only settings on top.
    pub(super) fn producer_config(&self) -> Result<ClientConfig> {
        let mut client_config = self.client_config()?;
        client_config.set(
            "message.timeout.ms",
            self.kafka_message_timeout_ms.to_string(),
        );

        Ok(client_config)
    }
}

fn pem_string_from_base64(base64: &Sensitive<String>) -> Result<Sensitive<String>> {
    let pem_bytes = general_purpose::STANDARD.decode(base64.expose())?;
    let pem_text = String::from_utf8(pem_bytes)?;

    Ok(Sensitive::from(pem_text))
}
