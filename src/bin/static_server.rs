use std::net::TcpListener;

use kafka_relay::{
    shutdown_signal,
    static_server::{self, StaticServerConfig},
    Config, Result, WrapErr,
};

#[kafka_relay::main]
async fn main() -> Result<()> {
    let env = Config::<StaticServerConfig>::init("static_server").await?;
    let config = env.config.project;

    let listener = TcpListener::bind(config.addr())
        .wrap_err_with(|| format!("Failed to bind static server to {}", config.addr()))?;

    static_server::serve(listener, &config.root, shutdown_signal()).await
}
