//! Input validation for recipient addresses and Drive query values.

use regex::Regex;
use std::sync::LazyLock;

use crate::error::{DriveError, Result};

/// Pragmatic mailbox pattern: local part, `@`, dotted domain.
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+'-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}$")
        .expect("Invalid email regex")
});

/// Validate and normalize the address of the new owner.
///
/// # Examples
///
/// ```
/// use drive_transfer::validate::validate_email;
///
/// assert_eq!(validate_email("  someone@gmail.com ").unwrap(), "someone@gmail.com");
/// assert!(validate_email("someone").is_err());
/// ```
pub fn validate_email(address: &str) -> Result<String> {
    let trimmed = address.trim();

    if EMAIL_REGEX.is_match(trimmed) {
        return Ok(trimmed.to_string());
    }

    Err(DriveError::InvalidRecipient(address.to_string()))
}

/// Escape a value for use inside a single-quoted Drive query string.
pub fn escape_query_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
