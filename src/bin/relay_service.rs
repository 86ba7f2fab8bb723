use std::net::TcpListener;

use kafka_relay::{
    relay::{self, AppState, RelayConfig, Subscriber},
    shutdown_signal, Config, KafkaClient, KafkaConsumer, Result, WrapErr,
};
use tokio::sync::watch;

#[kafka_relay::main]
async fn main() -> Result<()> {
    let env = Config::<RelayConfig>::init("relay").await?;
    let config = env.config.project;

    let client = KafkaClient::new(&config.kafka).await?;
    let consumer = KafkaConsumer::subscribe(&config.kafka, &config.group_id, &config.topic)?;

    let (stop_tx, mut stop_rx) = watch::channel(());
    let subscriber = tokio::spawn(async move {
        Subscriber::new(consumer)
            .run(async move {
                let _ = stop_rx.changed().await;
            })
            .await
    });

    let listener = TcpListener::bind(config.listen_addr)
        .wrap_err_with(|| format!("Failed to bind relay to {}", config.listen_addr))?;
    let served = relay::serve(
        listener,
        AppState::new(client, config.topic),
        shutdown_signal(),
    )
    .await;

    let _ = stop_tx.send(());
    subscriber.await?;

    served
}
