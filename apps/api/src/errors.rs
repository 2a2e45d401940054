use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream LLM error: {0}")]
    Upstream(#[from] LlmError),

    #[error("Could not parse extracted RFP data: {0}")]
    ExtractionParse(String),

    #[error("Factbook synthesis failed: {0}")]
    Synthesis(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code, also used by tests to compare failure kinds.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidFormat(_) => "INVALID_FORMAT",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Upstream(_) => "UPSTREAM_ERROR",
            AppError::ExtractionParse(_) => "EXTRACTION_PARSE_ERROR",
            AppError::Synthesis(_) => "SYNTHESIS_ERROR",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Storage(_) => "STORAGE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::InvalidFormat(_)
            | AppError::PayloadTooLarge(_)
            | AppError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Upstream(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("The AI service request failed: {e}"),
                )
            }
            AppError::ExtractionParse(msg) => {
                tracing::error!("Extraction parse error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The AI response could not be read as RFP data".to_string(),
                )
            }
            AppError::Synthesis(msg) => {
                tracing::error!("Synthesis error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Factbook generation failed: {msg}"),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A storage error occurred".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
