/// Request-layer authentication
///
/// Extracts the bearer token from the `Authorization` header, validates it
/// and identifies the acting driver. The API's auth layer stores the result
/// as an [`AuthContext`] request extension; handlers pass `driver_id`
/// explicitly into the model operations and nothing downstream re-checks
/// identity.
///
/// # Example
///
/// ```
/// use axum::http::{header, HeaderMap, HeaderValue};
/// use taxi_shared::auth::jwt::issue_token_pair;
/// use taxi_shared::auth::middleware::authenticate_bearer;
/// use uuid::Uuid;
///
/// let secret = "test-secret-key-at-least-32-bytes-long";
/// let driver_id = Uuid::new_v4();
/// let tokens = issue_token_pair(driver_id, secret).unwrap();
///
/// let mut headers = HeaderMap::new();
/// let value = format!("Bearer {}", tokens.access_token);
/// headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&value).unwrap());
///
/// assert_eq!(authenticate_bearer(&headers, secret).unwrap().driver_id, driver_id);
/// ```

use axum::{
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::{validate_access_token, JwtError};

/// Identity of the driver making the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated driver ID
    pub driver_id: Uuid,
}

impl AuthContext {
    pub fn new(driver_id: Uuid) -> Self {
        Self { driver_id }
    }
}

/// Error type for authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Missing authorization header
    #[error("Missing credentials")]
    MissingCredentials,

    /// Authorization header is not `Bearer <token>`
    #[error("{0}")]
    InvalidFormat(String),

    /// Token validation failed
    #[error("{0}")]
    InvalidToken(String),

    /// Token is valid but the driver is gone or deactivated
    #[error("Driver account is not active")]
    InactiveDriver,

    /// Database error while resolving the driver
    #[error("{0}")]
    DatabaseError(String),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::MissingCredentials
            | AuthError::InvalidToken(_)
            | AuthError::InactiveDriver => StatusCode::UNAUTHORIZED,
            AuthError::InvalidFormat(_) => StatusCode::BAD_REQUEST,
            AuthError::DatabaseError(_) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        };
        (status, self.to_string()).into_response()
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::InvalidToken("Token expired".to_string()),
            JwtError::InvalidIssuer => AuthError::InvalidToken("Invalid issuer".to_string()),
            other => AuthError::InvalidToken(format!("Invalid token: {}", other)),
        }
    }
}

/// Resolves the bearer token in `headers` to an [`AuthContext`]
///
/// Only checks the token. Callers that must reject deleted or inactive
/// drivers look the driver up afterwards.
pub fn authenticate_bearer(headers: &HeaderMap, secret: &str) -> Result<AuthContext, AuthError> {
    let auth_header = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingCredentials)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))?;

    let claims = validate_access_token(token, secret)?;
    Ok(AuthContext::new(claims.sub))
}
