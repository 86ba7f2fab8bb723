use axum::response::{IntoResponse, Response};
use http::StatusCode;

/// Any failure behind a relay endpoint. Clients only ever see a generic 500, the report itself
/// goes to the log.
#[derive(Debug)]
pub struct RelayError(eyre::Report);

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self.0, "request failed");

        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}

impl<E> From<E> for RelayError
where
    E: Into<eyre::Report>,
{
    fn from(error: E) -> Self {
        Self(error.into())
    }
}
