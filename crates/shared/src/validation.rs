//! Common validation utilities.

use validator::ValidationError;

/// Longest accepted session id.
pub const MAX_SESSION_ID_LENGTH: usize = 64;

/// Maximum number of interest tags on a profile.
pub const MAX_INTERESTS: usize = 10;

/// Maximum length of a single interest tag.
pub const MAX_INTEREST_LENGTH: usize = 30;

lazy_static::lazy_static! {
    /// `#RRGGBB` avatar background color.
    pub static ref HEX_COLOR_REGEX: regex::Regex =
        regex::Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();

    /// Loose international phone number: optional `+`, digits with spaces,
    /// dashes, dots or parentheses, 7 to 15 digits overall.
    pub static ref PHONE_NUMBER_REGEX: regex::Regex =
        regex::Regex::new(r"^\+?[0-9 ().-]{7,20}$").unwrap();

    static ref SESSION_ID_REGEX: regex::Regex =
        regex::Regex::new(r"^[A-Za-z0-9_-]+$").unwrap();
}

/// Returns true when the value is an acceptable session id.
pub fn is_valid_session_id(value: &str) -> bool {
    !value.is_empty() && value.len() <= MAX_SESSION_ID_LENGTH && SESSION_ID_REGEX.is_match(value)
}

/// Validates a session id referenced in a request body.
pub fn validate_session_id(value: &str) -> Result<(), ValidationError> {
    if is_valid_session_id(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("session_id_format");
        err.message = Some("Session id must be 1-64 characters of letters, digits, '-' or '_'".into());
        Err(err)
    }
}

/// Validates the interest tags of a profile.
pub fn validate_interests(interests: &[String]) -> Result<(), ValidationError> {
    if interests.len() > MAX_INTERESTS {
        let mut err = ValidationError::new("interests_count");
        err.message = Some(format!("At most {} interests are allowed", MAX_INTERESTS).into());
        return Err(err);
    }

    for tag in interests {
        let len = tag.trim().chars().count();
        if len == 0 || len > MAX_INTEREST_LENGTH {
            let mut err = ValidationError::new("interest_length");
            err.message = Some(
                format!("Each interest must be 1-{} characters", MAX_INTEREST_LENGTH).into(),
            );
            return Err(err);
        }
    }

    Ok(())
}

/// Validates that a phone number carries between 7 and 15 digits.
pub fn validate_phone_digits(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if (7..=15).contains(&digits) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_digits");
        err.message = Some("Phone number must contain 7 to 15 digits".into());
        Err(err)
    }
}

/// Normalizes an event access code for case-insensitive lookup.
pub fn normalize_access_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Normalizes an interest tag for comparison.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}
