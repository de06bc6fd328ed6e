/// Authentication utilities
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and strength rules
/// - [`jwt`]: JWT access/refresh token generation and validation
/// - [`middleware`]: Request-layer authentication producing an [`middleware::AuthContext`]
///
/// # Example
///
/// ```no_run
/// use taxi_shared::auth::password::{hash_password, verify_password};
/// use taxi_shared::auth::jwt::{create_token, Claims, TokenType};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Dr1ver!Pass")?;
/// assert!(verify_password("Dr1ver!Pass", &hash)?);
///
/// let claims = Claims::new(Uuid::new_v4(), TokenType::Access);
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!")?;
/// # Ok(())
/// # }
/// ```

pub mod jwt;
pub mod middleware;
pub mod password;
