//! Error handling
//!
//! One request-level error type. Everything a handler can fail with is
//! funneled into `AppError` and rendered as the `{"error": ...}` body the
//! dashboard expects, with the status code carrying the failure class:
//! 503 while no model is loaded, 400 for client payload problems, 500 for
//! anything unexpected inside the pipeline.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::logic::features::normalize::NormalizeError;
use crate::logic::model::InferenceError;
use crate::storage::StoreError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The service came up without a usable model artifact; permanent until
    /// restart.
    #[error("Model not loaded on server")]
    ModelUnavailable,

    /// Missing or non-object request body.
    #[error("No data provided")]
    NoInput,

    /// A supplied field could not be coerced; the message names the field.
    #[error("{0}")]
    BadInput(String),

    /// Anything unexpected; the message is diagnostic text, not a contract.
    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ModelUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NoInput | AppError::BadInput(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(msg) => {
                tracing::error!("internal error: {msg}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        match err {
            NormalizeError::BadField { .. } => AppError::BadInput(err.to_string()),
            NormalizeError::Vector(_) => AppError::Internal(err.to_string()),
        }
    }
}

impl From<InferenceError> for AppError {
    fn from(err: InferenceError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Internal(err.to_string())
    }
}
