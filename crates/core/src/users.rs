//! Account naming rules.
//!
//! A username doubles as the `/user/{username}` path segment, so it is
//! limited to characters that need no escaping in a URL path.

use crate::error::CoreError;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_LENGTH: usize = 64;

/// Whether `c` may appear in a username: ASCII letters, digits, `_`, `.`, `-`.
fn is_username_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// Whether `username` is non-empty, short enough and uses only
/// path-safe characters.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= MAX_USERNAME_LENGTH
        && username.chars().all(is_username_char)
}

/// Validate a username submitted at registration.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() || username.len() > MAX_USERNAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Username must be between 1 and {MAX_USERNAME_LENGTH} characters"
        )));
    }
    if !username.chars().all(is_username_char) {
        return Err(CoreError::Validation(
            "Username may only contain letters, digits, '_', '.' and '-'".into(),
        ));
    }
    Ok(())
}
