/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the
/// appropriate status code and a JSON body.
///
/// Internal errors carry two strings: the fixed message the client sees and
/// the underlying cause, which only goes to the log.
///
/// # Example
///
/// ```
/// use taskflow_api::error::{ApiError, ApiResult};
/// use axum::Json;
/// use serde_json::{json, Value};
///
/// async fn handler() -> ApiResult<Json<Value>> {
///     let data: Result<u32, std::io::Error> = Ok(7);
///     let data = data.map_err(|e| ApiError::internal("Error loading data", e))?;
///     Ok(Json(json!({ "data": data })))
/// }
/// ```

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use taskflow_shared::auth::context::AuthError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Unauthorized (401)
    Unauthorized(String),

    /// Not found (404)
    NotFound(String),

    /// Internal server error (500)
    InternalError {
        /// Returned to the client
        message: String,
        /// Logged only
        cause: String,
    },
}

impl ApiError {
    /// Internal error with a client-facing message and a logged cause
    pub fn internal(message: impl Into<String>, cause: impl fmt::Display) -> Self {
        ApiError::InternalError {
            message: message.into(),
            cause: cause.to_string(),
        }
    }
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "unauthorized", "internal_error")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError { message, cause } => {
                write!(f, "Internal error: {} ({})", message, cause)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::InternalError { message, cause } => {
                // Log internal errors but don't expose details to clients
                tracing::error!(error = %cause, "{}", message);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", message)
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Every authentication failure is a 401
impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => ApiError::Unauthorized("Missing credentials".to_string()),
            AuthError::InvalidFormat(msg) => ApiError::Unauthorized(msg),
            AuthError::InvalidToken(err) => ApiError::Unauthorized(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskflow_shared::auth::jwt::JwtError;

    #[test]
    fn test_error_display() {
        let err = ApiError::NotFound("Task not found".to_string());
        assert_eq!(err.to_string(), "Not found: Task not found");

        let err = ApiError::internal("Error creating task", "connection refused");
        assert_eq!(
            err.to_string(),
            "Internal error: Error creating task (connection refused)"
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_cause() {
        let response = ApiError::internal("Error creating task", "relation \"tasks\" does not exist")
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(body.error, "internal_error");
        assert_eq!(body.message, "Error creating task");
    }

    #[test]
    fn test_auth_errors_are_unauthorized() {
        let errors = [
            AuthError::MissingCredentials,
            AuthError::InvalidFormat("Expected Bearer token".to_string()),
            AuthError::InvalidToken(JwtError::Expired),
        ];

        for err in errors {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
