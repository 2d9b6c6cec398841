//! Login form validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::error::AuthError;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Minimum password length accepted by the identity backend.
const MIN_PASSWORD_LEN: usize = 6;

/// Loose shape check: `local@domain.tld` with no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check form input before any network call.
///
/// `creating` enables the password length rule that only applies to sign-up.
pub fn validate_credentials(email: &str, password: &str, creating: bool) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::InvalidInput("Enter your email address."));
    }
    if !is_valid_email(email.trim()) {
        return Err(AuthError::InvalidInput("That email address is not valid."));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput("Enter your password."));
    }
    if creating && password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::InvalidInput(
            "Password should be at least 6 characters.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.org"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada @example.com"));
        assert!(!is_valid_email("@example.com"));
    }

    #[test]
    fn test_validate_credentials() {
        assert!(validate_credentials("ada@example.com", "secret", false).is_ok());
        assert!(validate_credentials("ada@example.com", "abc", false).is_ok());
        assert_eq!(
            validate_credentials("ada@example.com", "abc", true),
            Err(AuthError::InvalidInput(
                "Password should be at least 6 characters."
            ))
        );
        assert_eq!(
            validate_credentials("", "secret", false),
            Err(AuthError::InvalidInput("Enter your email address."))
        );
        assert_eq!(
            validate_credentials("ada@example.com", "", false),
            Err(AuthError::InvalidInput("Enter your password."))
        );
    }
}
