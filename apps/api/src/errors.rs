use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::export::ExportError;
use crate::llm_client::GeminiError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Policy: every failure is converted to a JSON error body at the route
/// boundary; nothing is retried automatically — a failed generation requires
/// a new user-initiated submission.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// Single-flight guard: a generation request is already outstanding.
    #[error("Generation in flight: {0}")]
    Busy(String),

    #[error(transparent)]
    Gemini(#[from] GeminiError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Busy(msg) => (StatusCode::CONFLICT, "GENERATION_IN_FLIGHT", msg.clone()),
            AppError::Gemini(e) => match e {
                GeminiError::Upstream { status, .. } => {
                    tracing::error!("Upstream AI error: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        format!("AI provider returned status {status}"),
                    )
                }
                GeminiError::MalformedResponse(_) => {
                    tracing::error!("Malformed AI response: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "MALFORMED_RESPONSE",
                        "AI provider returned an unexpected response shape".to_string(),
                    )
                }
                GeminiError::Transport(_) => {
                    tracing::error!("AI transport error: {e}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "UPSTREAM_ERROR",
                        "Failed to reach the AI provider".to_string(),
                    )
                }
            },
            AppError::Export(e) => {
                tracing::error!("Export error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "EXPORT_ERROR",
                    "Failed to export the plan document".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Plan store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "Failed to access the plan store".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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
