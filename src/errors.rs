use axum::http::StatusCode;
use axum::response::IntoResponse;
use thiserror::Error;

use crate::external::broker::BrokerError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Broker error: {0}")]
    Broker(#[from] BrokerError),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("External error: {0}")]
    External(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Broker(e) => (StatusCode::BAD_GATEWAY, e.to_string()).into_response(),
            AppError::External(msg) => (StatusCode::BAD_GATEWAY, msg).into_response(),
        }
    }
}
