use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    /// Body was not a JSON chat request
    #[error("invalid request body: {0}")]
    BadRequest(String),

    /// Relay settings that cannot be turned into a router
    #[error("invalid relay configuration: {0}")]
    Config(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match &self {
            RelayError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RelayError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
