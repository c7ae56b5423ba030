#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::chat::conversation::ValidationError;
use crate::llm_client::LlmError;
use crate::resume::store::DataIntegrityError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Error bodies follow the chat wire contract: `{ "success": false, "error": ... }`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Resume data error: {0}")]
    DataIntegrity(#[from] DataIntegrityError),

    #[error("LLM auth error: {0}")]
    Auth(String),

    #[error("LLM rate limited")]
    RateLimited,

    #[error("LLM transport error: {0}")]
    Transport(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Auth(msg) => AppError::Auth(msg),
            LlmError::RateLimited { .. } => AppError::RateLimited,
            LlmError::Transport(msg) => AppError::Transport(msg),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::DataIntegrity(e) => {
                tracing::error!("Resume data error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Resume data could not be loaded. Please try again later.".to_string(),
                )
            }
            AppError::Auth(msg) => {
                tracing::error!("LLM auth error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "API configuration error. Please check server configuration.".to_string(),
                )
            }
            AppError::RateLimited => {
                tracing::warn!("LLM rate limited");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "Rate limit exceeded. Please try again later.".to_string(),
                )
            }
            AppError::Transport(msg) => {
                tracing::error!("LLM transport error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process message. Please try again.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process message. Please try again.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "success": false,
            "error": message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_maps_to_400() {
        let response = AppError::from(ValidationError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_rate_limit_maps_to_429() {
        let response = AppError::from(LlmError::RateLimited { retries: 3 }).into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_auth_error_maps_to_500() {
        let response = AppError::from(LlmError::Auth("bad key".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_transport_error_maps_to_500() {
        let response = AppError::from(LlmError::Transport("reset".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
