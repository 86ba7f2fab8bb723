//! The message relay: an HTTP send endpoint that publishes to a fixed topic, and a subscriber
//! that logs everything arriving on that same topic.

mod config;
mod error;
mod handlers;
mod subscriber;

use std::{future::Future, net::TcpListener, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{Result, StreamingClient, WrapErr};

pub use config::{RelayConfig, DEFAULT_GROUP_ID, DEFAULT_TOPIC};
pub use error::RelayError;
pub use handlers::{confirmation, SendParams};
pub use subscriber::{received_line, Subscriber};

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn StreamingClient>,
    pub topic: String,
}

impl AppState {
    pub fn new(client: impl StreamingClient, topic: impl Into<String>) -> Self {
        Self {
            client: Arc::new(client),
            topic: topic.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/send", post(handlers::send))
        .route("/health", get(handlers::health))
        .with_state(state)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Serves the relay endpoints on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let server = axum::Server::from_tcp(listener)
        .wrap_err("Failed to listen for relay requests")?
        .serve(router(state).into_make_service());

    tracing::info!(addr = %server.local_addr(), "relay listening");

    server
        .with_graceful_shutdown(shutdown)
        .await
        .wrap_err("Relay server failed")
}
