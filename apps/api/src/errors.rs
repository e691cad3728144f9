use axum::extract::multipart::MultipartError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::extract::ExtractError;
use crate::llm_client::LlmError;

/// Application-level error type. The `Display` text of each variant is the
/// exact user-facing message the presenter puts in the error slot; transport,
/// schema, and refusal failures deliberately collapse into one generic
/// processing message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Could not extract text from PDF")]
    EmptyExtraction,

    #[error("Error processing file: {0}")]
    Extract(#[from] ExtractError),

    #[error("Error processing file: {0}")]
    Llm(#[from] LlmError),

    #[error("Invalid upload request: {0}")]
    Multipart(#[from] MultipartError),
}

/// Response conversion for failures that happen outside the analysis
/// pipeline (a multipart stream the handler cannot even drain). Pipeline
/// failures never reach this path — the presenter renders them into the
/// task's view instead.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Multipart(e) => {
                tracing::warn!("multipart decode failed: {e}");
                (StatusCode::BAD_REQUEST, "MALFORMED_UPLOAD", e.to_string())
            }
            AppError::EmptyExtraction => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "EMPTY_EXTRACTION",
                self.to_string(),
            ),
            AppError::Extract(e) => {
                tracing::error!("document decode failed: {e}");
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "EXTRACT_ERROR",
                    self.to_string(),
                )
            }
            AppError::Llm(e) => {
                tracing::error!("LLM error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "LLM_ERROR",
                    self.to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
