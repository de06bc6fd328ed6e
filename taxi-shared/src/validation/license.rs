/// Driver license number validation
///
/// A license number is exactly 8 characters: a 3-letter upper-case prefix
/// followed by 5 digits, e.g. `ABC12345`.
///
/// The check never normalizes its input. `abc12345` is rejected rather than
/// upper-cased, and every violation yields the same message.
///
/// # Example
///
/// ```
/// use taxi_shared::validation::license::validate_license_number;
///
/// assert!(validate_license_number("ABC12345").is_ok());
/// assert!(validate_license_number("abc12345").is_err());
/// ```

use std::borrow::Cow;
use unicode_general_category::{get_general_category, GeneralCategory};

/// Message reported for every malformed license number
pub const INVALID_LICENSE_NUMBER: &str = "Invalid license number";

const LICENSE_LENGTH: usize = 8;
const PREFIX_LENGTH: usize = 3;

/// Error returned by [`validate_license_number`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Invalid license number")]
pub struct LicenseNumberError;

/// Checks a candidate license number
///
/// Accepts the input iff:
/// - it is exactly 8 characters long
/// - the first 3 characters are letters (general category `L*`)
/// - the first 3 characters are already upper-case
/// - the last 5 characters are ASCII digits `0-9`
///
/// # Errors
///
/// Returns [`LicenseNumberError`] when any clause fails.
pub fn validate_license_number(candidate: &str) -> Result<(), LicenseNumberError> {
    let chars: Vec<char> = candidate.chars().collect();
    if chars.len() != LICENSE_LENGTH {
        return Err(LicenseNumberError);
    }

    let (prefix, serial) = chars.split_at(PREFIX_LENGTH);

    if !prefix.iter().copied().all(is_letter) {
        return Err(LicenseNumberError);
    }

    // Upper-case mapping can change length ('ß' -> "SS"), so compare strings.
    let prefix: String = prefix.iter().collect();
    if prefix.to_uppercase() != prefix {
        return Err(LicenseNumberError);
    }

    if !serial.iter().all(|c| c.is_ascii_digit()) {
        return Err(LicenseNumberError);
    }

    Ok(())
}

/// Letter categories only. `char::is_alphabetic` also admits letter numbers
/// such as 'Ⅰ' and marks or symbols carrying `Other_Alphabetic`.
fn is_letter(c: char) -> bool {
    matches!(
        get_general_category(c),
        GeneralCategory::UppercaseLetter
            | GeneralCategory::LowercaseLetter
            | GeneralCategory::TitlecaseLetter
            | GeneralCategory::ModifierLetter
            | GeneralCategory::OtherLetter
    )
}

/// `validator` adapter for request structs
///
/// ```
/// use taxi_shared::validation::license::validate_license_field;
/// use validator::Validate;
///
/// #[derive(Validate)]
/// struct LicenseForm {
///     #[validate(custom(function = "validate_license_field"))]
///     license_number: String,
/// }
///
/// let form = LicenseForm { license_number: "XYZ00001".to_string() };
/// assert!(form.validate().is_ok());
/// ```
pub fn validate_license_field(candidate: &str) -> Result<(), validator::ValidationError> {
    validate_license_number(candidate).map_err(|_| {
        let mut error = validator::ValidationError::new("license_number");
        error.message = Some(Cow::Borrowed(INVALID_LICENSE_NUMBER));
        error
    })
}
