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
    #[error("OpenRouter API key not configured")]
    MissingApiKey,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("OpenRouter API error (status {status}): {body}")]
    Upstream { status: u16, body: String },

    #[error("Request to provider timed out")]
    Timeout,

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Resume generation failed")]
    GenerationFailed,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Every provider-client failure maps into one raised error channel.
/// Timeouts are not special-cased into a return value anywhere.
impl From<LlmError> for AppError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::MissingApiKey => AppError::MissingApiKey,
            LlmError::Timeout => AppError::Timeout,
            LlmError::Api { status, body } => AppError::Upstream { status, body },
            LlmError::Http(e) => AppError::Llm(format!("provider request failed: {e}")),
            LlmError::Parse(e) => AppError::Llm(format!("provider response was not valid JSON: {e}")),
            LlmError::EmptyContent => AppError::Llm("provider returned empty content".to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::MissingApiKey => (
                StatusCode::SERVICE_UNAVAILABLE,
                "MISSING_API_KEY",
                "OpenRouter API key not configured".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Upstream { status, body } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "UPSTREAM_ERROR",
                format!("OpenRouter API error: {body}"),
            ),
            AppError::Timeout => (
                StatusCode::REQUEST_TIMEOUT,
                "REQUEST_TIMEOUT",
                "Request to provider timed out".to_string(),
            ),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "LLM_ERROR",
                    "An AI processing error occurred".to_string(),
                )
            }
            AppError::GenerationFailed => (
                StatusCode::BAD_GATEWAY,
                "GENERATION_FAILED",
                "No schema-valid resume could be produced for this request".to_string(),
            ),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_error_preserves_status_and_body() {
        let err: AppError = LlmError::Api {
            status: 429,
            body: "rate limited".to_string(),
        }
        .into();

        match &err {
            AppError::Upstream { status, body } => {
                assert_eq!(*status, 429);
                assert_eq!(body, "rate limited");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_missing_api_key_is_service_unavailable() {
        let err: AppError = LlmError::MissingApiKey.into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }

    #[test]
    fn test_timeout_surfaces_through_the_raised_channel() {
        let err: AppError = LlmError::Timeout.into();
        assert_eq!(err.into_response().status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[test]
    fn test_unmapped_upstream_status_falls_back_to_bad_gateway() {
        let err = AppError::Upstream {
            status: 42,
            body: "weird".to_string(),
        };
        assert_eq!(err.into_response().status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_generation_failed_is_bad_gateway() {
        assert_eq!(
            AppError::GenerationFailed.into_response().status(),
            StatusCode::BAD_GATEWAY
        );
    }
}
