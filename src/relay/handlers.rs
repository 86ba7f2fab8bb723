use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use http::StatusCode;
use serde::Deserialize;

use super::{AppState, RelayError};
use crate::{HealthStatusReport, Message};

const CONFIRMATION: &str = "메시지 전송 완료: ";

const HEALTH_TIMEOUT_MS: u64 = 1000;
const HEALTH_DEGRADE_MS: u64 = 500;

#[derive(Debug, Deserialize)]
pub struct SendParams {
    pub message: String,
}

/// Body returned to the caller once `message` has been handed to the broker.
pub fn confirmation(message: &str) -> String {
    format!("{CONFIRMATION}{message}")
}

/// `POST /send?message=<text>`
pub(super) async fn send(
    State(state): State<AppState>,
    Query(params): Query<SendParams>,
) -> Result<String, RelayError> {
    let body = confirmation(&params.message);

    state
        .client
        .publish(Message::new(&state.topic, params.message))
        .await?;

    Ok(body)
}

/// `GET /health`
pub(super) async fn health(State(state): State<AppState>) -> Response {
    let report = HealthStatusReport::check_with_timeout_and_degrade(
        state.client.health_check(),
        HEALTH_TIMEOUT_MS,
        HEALTH_DEGRADE_MS,
    )
    .await;

    let status = if report.status.is_available() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report)).into_response()
}
