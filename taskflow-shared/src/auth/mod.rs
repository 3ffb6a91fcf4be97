/// Authentication utilities
///
/// Taskflow does not run its own login flow. An external identity provider
/// issues session tokens; this module validates them and turns them into an
/// explicit per-request identity.
///
/// # Modules
///
/// - [`jwt`]: HS256 session token validation
/// - [`context`]: Per-request [`AuthContext`](context::AuthContext)
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap};
/// use taskflow_shared::auth::{context::AuthContext, jwt::{create_token, Claims}};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let secret = "your-secret-key-at-least-32-bytes";
/// let user_id = Uuid::new_v4();
/// let token = create_token(&Claims::new(user_id), secret)?;
///
/// let mut headers = HeaderMap::new();
/// headers.insert(header::AUTHORIZATION, format!("Bearer {token}").parse()?);
///
/// let auth = AuthContext::from_headers(&headers, secret)?;
/// assert_eq!(auth.user_id, user_id);
/// # Ok(())
/// # }
/// ```

pub mod context;
pub mod jwt;
