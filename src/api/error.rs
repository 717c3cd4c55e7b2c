//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::test_runner::TestRunnerError;
use crate::service::test_store::TestStoreError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Test document not found (404)
    #[error("Test file not found: {0}")]
    TestNotFound(String),

    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// External service error (502)
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Feature disabled by configuration (503)
    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::TestNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::TestNotFound(_) => "test_not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Internal(_) => "internal_error",
            ApiError::ExternalService(_) => "external_service_error",
            ApiError::Unavailable(_) => "service_unavailable",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<TestStoreError> for ApiError {
    fn from(err: TestStoreError) -> Self {
        match err {
            TestStoreError::NotFound(id) => ApiError::TestNotFound(id),
            TestStoreError::Io(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<TestRunnerError> for ApiError {
    fn from(err: TestRunnerError) -> Self {
        match err {
            TestRunnerError::LlmUnavailable => ApiError::Unavailable(
                "LLM provider not configured, set OPENAI_API_KEY to enable AI responses"
                    .to_string(),
            ),
            TestRunnerError::Store(e) => e.into(),
            TestRunnerError::Llm(e) => ApiError::ExternalService(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::from(TestStoreError::NotFound("x.md".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(TestRunnerError::LlmUnavailable).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::from(TestRunnerError::Store(TestStoreError::NotFound("x.md".into())))
                .status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::BadRequest("Message is required.".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
    }
}
