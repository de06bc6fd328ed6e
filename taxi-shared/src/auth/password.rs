/// Driver password hashing using Argon2id
///
/// Passwords are stored as PHC strings
/// (`$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`), so the parameters used
/// for a hash travel with it and verification needs no configuration.
///
/// # Example
///
/// ```
/// use taxi_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("Taxi!2024")?;
/// assert!(verify_password("Taxi!2024", &hash)?);
/// assert!(!verify_password("taxi!2024", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};
use std::borrow::Cow;

/// Memory cost in KiB (64 MiB)
const MEMORY_COST_KIB: u32 = 65536;

/// Number of passes
const TIME_COST: u32 = 3;

/// Parallel lanes
const PARALLELISM: u32 = 4;

/// Hash output length in bytes
const OUTPUT_LENGTH: usize = 32;

/// Minimum password length in characters
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Stored hash is not a valid PHC string
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(MEMORY_COST_KIB)
        .t_cost(TIME_COST)
        .p_cost(PARALLELISM)
        .output_len(OUTPUT_LENGTH)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a plaintext password with a fresh random salt
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a plaintext password against a stored hash
///
/// # Returns
///
/// `Ok(true)` on match, `Ok(false)` on mismatch
///
/// # Errors
///
/// Returns an error if the stored hash cannot be parsed or verification
/// fails for a reason other than a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Checks that a new password meets the minimum strength rules
///
/// The password must be at least 8 characters and contain an upper-case
/// letter, a lower-case letter, a digit and a special character.
///
/// # Errors
///
/// Returns the first rule that the password breaks.
///
/// ```
/// use taxi_shared::auth::password::validate_password_strength;
///
/// assert!(validate_password_strength("Taxi!2024").is_ok());
/// assert!(validate_password_strength("taxi2024").is_err());
/// ```
pub fn validate_password_strength(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err("Password must be at least 8 characters long");
    }

    let rules: [(fn(char) -> bool, &'static str); 4] = [
        (char::is_uppercase, "Password must contain at least one uppercase letter"),
        (char::is_lowercase, "Password must contain at least one lowercase letter"),
        (char::is_numeric, "Password must contain at least one digit"),
        (|c: char| !c.is_alphanumeric(), "Password must contain at least one special character"),
    ];

    for (predicate, message) in rules {
        if !password.chars().any(predicate) {
            return Err(message);
        }
    }

    Ok(())
}

/// `validator` adapter for request structs
pub fn validate_password_field(password: &str) -> Result<(), validator::ValidationError> {
    validate_password_strength(password).map_err(|reason| {
        let mut error = validator::ValidationError::new("password");
        error.message = Some(Cow::Borrowed(reason));
        error
    })
}
