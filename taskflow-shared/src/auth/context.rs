/// Per-request identity
///
/// The API's auth layer resolves the session token once per request and
/// inserts an [`AuthContext`] into the request extensions. Handlers receive
/// it explicitly via `Extension<AuthContext>`; nothing reads identity from
/// ambient state.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use taskflow_shared::auth::context::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("User: {}", auth.user_id)
/// }
/// ```

use axum::http::{header, HeaderMap};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_token, JwtError};

/// Authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,
}

/// Why a request could not be authenticated
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header present but not `Bearer <token>`
    #[error("Invalid authorization header: {0}")]
    InvalidFormat(String),

    /// Token failed validation
    #[error("Invalid token: {0}")]
    InvalidToken(#[from] JwtError),
}

impl AuthContext {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    /// Resolves the caller from an `Authorization: Bearer <token>` header
    ///
    /// # Errors
    ///
    /// Returns an error if the header is missing, malformed, or carries an
    /// invalid or expired token.
    pub fn from_headers(headers: &HeaderMap, secret: &str) -> Result<Self, AuthError> {
        let auth_header = headers
            .get(header::AUTHORIZATION)
            .ok_or(AuthError::MissingCredentials)?
            .to_str()
            .map_err(|_| AuthError::InvalidFormat("Header is not valid ASCII".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

        let claims = validate_token(token.trim(), secret)?;

        Ok(Self::new(claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{create_token, Claims};
    use axum::http::HeaderValue;
    use chrono::Duration;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_valid_bearer_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(&Claims::new(user_id), SECRET).unwrap();

        let auth = AuthContext::from_headers(&headers_with(&format!("Bearer {token}")), SECRET).unwrap();
        assert_eq!(auth, AuthContext::new(user_id));
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            AuthContext::from_headers(&HeaderMap::new(), SECRET),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_non_bearer_scheme() {
        assert!(matches!(
            AuthContext::from_headers(&headers_with("Basic dXNlcjpwYXNz"), SECRET),
            Err(AuthError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_expired_token() {
        let claims = Claims::with_expiration(Uuid::new_v4(), Duration::minutes(-5));
        let token = create_token(&claims, SECRET).unwrap();

        assert!(matches!(
            AuthContext::from_headers(&headers_with(&format!("Bearer {token}")), SECRET),
            Err(AuthError::InvalidToken(JwtError::Expired))
        ));
    }
}
