/// Driver username validation
///
/// Usernames are 1 to 150 characters of letters, digits and `@ . + - _`.

use std::borrow::Cow;

/// Maximum username length in characters
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Message reported for a malformed username
pub const INVALID_USERNAME: &str =
    "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.";

/// Checks a candidate username
///
/// # Errors
///
/// Returns the human-readable reason when the username is empty, too long,
/// or contains a disallowed character.
pub fn validate_username(candidate: &str) -> Result<(), &'static str> {
    let length = candidate.chars().count();
    if length == 0 {
        return Err("Username is required");
    }
    if length > MAX_USERNAME_LENGTH {
        return Err("Username must be at most 150 characters");
    }
    if !candidate
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '_' | '@' | '.' | '+' | '-'))
    {
        return Err(INVALID_USERNAME);
    }
    Ok(())
}

/// `validator` adapter for request structs
pub fn validate_username_field(candidate: &str) -> Result<(), validator::ValidationError> {
    validate_username(candidate).map_err(|reason| {
        let mut error = validator::ValidationError::new("username");
        error.message = Some(Cow::Borrowed(reason));
        error
    })
}
