/// JWT access and refresh tokens for drivers
///
/// Tokens are HS256-signed and carry the driver ID as `sub`. An access token
/// lives 24 hours and authenticates API calls; a refresh token lives 30 days
/// and can only be exchanged for a new access token.
///
/// # Example
///
/// ```
/// use taxi_shared::auth::jwt::{issue_token_pair, validate_access_token};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let driver_id = Uuid::new_v4();
/// let secret = "test-secret-key-at-least-32-bytes-long";
///
/// let tokens = issue_token_pair(driver_id, secret)?;
/// let claims = validate_access_token(&tokens.access_token, secret)?;
/// assert_eq!(claims.sub, driver_id);
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Issuer written into and required from every token
pub const ISSUER: &str = "taxi";

/// Error type for JWT operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to encode token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, format or claim check failed
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Token was issued by someone else
    #[error("Invalid issuer")]
    InvalidIssuer,

    /// Token is valid but of the other type
    #[error("Expected {expected} token")]
    WrongType { expected: &'static str },
}

/// Token type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Short-lived token for API calls
    Access,

    /// Long-lived token for obtaining new access tokens
    Refresh,
}

impl TokenType {
    /// Default lifetime of the token type
    pub fn lifetime(&self) -> Duration {
        match self {
            TokenType::Access => Duration::hours(24),
            TokenType::Refresh => Duration::days(30),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: driver ID
    pub sub: Uuid,

    /// Issuer, always [`ISSUER`]
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Not before (Unix timestamp)
    pub nbf: i64,

    pub token_type: TokenType,
}

impl Claims {
    /// Claims for `driver_id` with the default lifetime of `token_type`
    pub fn new(driver_id: Uuid, token_type: TokenType) -> Self {
        Self::expiring_in(driver_id, token_type, token_type.lifetime())
    }

    /// Claims expiring `lifetime` from now (negative values produce expired claims)
    pub fn expiring_in(driver_id: Uuid, token_type: TokenType, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: driver_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
            nbf: now.timestamp(),
            token_type,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// An access token together with its refresh token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs claims with HS256
///
/// # Errors
///
/// Returns `JwtError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, JwtError> {
    encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Issues a fresh access/refresh pair for a driver
pub fn issue_token_pair(driver_id: Uuid, secret: &str) -> Result<TokenPair, JwtError> {
    Ok(TokenPair {
        access_token: create_token(&Claims::new(driver_id, TokenType::Access), secret)?,
        refresh_token: create_token(&Claims::new(driver_id, TokenType::Refresh), secret)?,
    })
}

/// Validates signature, expiry, not-before and issuer, then returns the claims
///
/// # Errors
///
/// - `JwtError::Expired` for expired tokens
/// - `JwtError::InvalidIssuer` for foreign tokens
/// - `JwtError::ValidationError` for anything else
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;
    validation.validate_nbf = true;

    decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidIssuer => JwtError::InvalidIssuer,
            _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
        })
}

fn validate_typed(token: &str, secret: &str, expected: TokenType) -> Result<Claims, JwtError> {
    let claims = validate_token(token, secret)?;

    if claims.token_type != expected {
        return Err(JwtError::WrongType {
            expected: expected.as_str(),
        });
    }

    Ok(claims)
}

/// Validates a token and requires it to be an access token
pub fn validate_access_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_typed(token, secret, TokenType::Access)
}

/// Validates a token and requires it to be a refresh token
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    validate_typed(token, secret, TokenType::Refresh)
}

/// Exchanges a refresh token for a new access token for the same driver
pub fn refresh_access_token(refresh_token: &str, secret: &str) -> Result<String, JwtError> {
    let refresh_claims = validate_refresh_token(refresh_token, secret)?;
    create_token(&Claims::new(refresh_claims.sub, TokenType::Access), secret)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-at-least-32-bytes-long";

    #[test]
    fn test_lifetimes() {
        assert_eq!(TokenType::Access.lifetime(), Duration::hours(24));
        assert_eq!(TokenType::Refresh.lifetime(), Duration::days(30));
    }

    #[test]
    fn test_claims_creation() {
        let driver_id = Uuid::new_v4();
        let claims = Claims::new(driver_id, TokenType::Access);

        assert_eq!(claims.sub, driver_id);
        assert_eq!(claims.iss, ISSUER);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_create_and_validate() {
        let driver_id = Uuid::new_v4();
        let token = create_token(&Claims::new(driver_id, TokenType::Access), SECRET).unwrap();

        let claims = validate_token(&token, SECRET).unwrap();
        assert_eq!(claims.sub, driver_id);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = create_token(&Claims::new(Uuid::new_v4(), TokenType::Access), SECRET).unwrap();
        assert!(matches!(
            validate_token(&token, "another-secret-key-at-least-32-bytes"),
            Err(JwtError::ValidationError(_))
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let claims = Claims::expiring_in(Uuid::new_v4(), TokenType::Access, Duration::seconds(-3600));
        assert!(claims.is_expired());

        let token = create_token(&claims, SECRET).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(JwtError::Expired)));
    }

    #[test]
    fn test_token_types_not_interchangeable() {
        let pair = issue_token_pair(Uuid::new_v4(), SECRET).unwrap();

        assert!(validate_access_token(&pair.access_token, SECRET).is_ok());
        assert!(validate_refresh_token(&pair.refresh_token, SECRET).is_ok());
        assert!(matches!(
            validate_access_token(&pair.refresh_token, SECRET),
            Err(JwtError::WrongType { expected: "access" })
        ));
        assert!(validate_refresh_token(&pair.access_token, SECRET).is_err());
    }

    #[test]
    fn test_refresh_keeps_driver() {
        let driver_id = Uuid::new_v4();
        let pair = issue_token_pair(driver_id, SECRET).unwrap();

        let access = refresh_access_token(&pair.refresh_token, SECRET).unwrap();
        assert_eq!(validate_access_token(&access, SECRET).unwrap().sub, driver_id);

        assert!(refresh_access_token(&pair.access_token, SECRET).is_err());
    }
}
