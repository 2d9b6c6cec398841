//! Custom error types for the application.
//!
//! Provides structured error handling with meaningful error messages
//! and proper error categorization for each domain:
//!
//! - [`ConfigError`] - Backend configuration loading and validation
//! - [`FetchError`] - Network/fetch-related errors for HTTP requests
//! - [`AuthError`] - Identity Toolkit / Secure Token failures
//! - [`FirestoreError`] - Document reads and decoding
//! - [`StorageError`] - Session persistence in Web Storage
//! - [`TransitionError`] - Rejected auth state transitions

use thiserror::Error;

/// Backend configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No configuration source was present.
    #[error("no backend configuration found")]
    NotFound,
    /// A required field is missing or blank.
    #[error("missing required config field `{0}`")]
    MissingField(&'static str),
    /// The TOML document could not be parsed.
    #[error("invalid config: {0}")]
    Parse(String),
}

/// Network/fetch-related errors for HTTP requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// Failed to build the HTTP request
    #[error("Failed to create request: {0}")]
    RequestCreationFailed(String),
    /// Network request failed (CORS, offline, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),
    /// HTTP error response (non-2xx status) with its raw body
    #[error("HTTP error: {status}")]
    HttpError { status: u16, body: String },
    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParseError(String),
    /// Request timed out
    #[error("Request timed out")]
    Timeout,
}

/// Identity Toolkit error codes the UI distinguishes.
///
/// Parsed from the `error.message` field of a failed response, which
/// sometimes carries a detail suffix (`WEAK_PASSWORD : Password should be...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthErrorCode {
    EmailNotFound,
    InvalidPassword,
    InvalidCredentials,
    EmailExists,
    WeakPassword,
    InvalidEmail,
    UserDisabled,
    TooManyAttempts,
    TokenExpired,
    InvalidRefreshToken,
    Other(String),
}

impl AuthErrorCode {
    pub fn parse(message: &str) -> Self {
        let code = message.split(':').next().unwrap_or_default().trim();
        match code {
            "EMAIL_NOT_FOUND" => Self::EmailNotFound,
            "INVALID_PASSWORD" => Self::InvalidPassword,
            "INVALID_LOGIN_CREDENTIALS" => Self::InvalidCredentials,
            "EMAIL_EXISTS" => Self::EmailExists,
            "WEAK_PASSWORD" => Self::WeakPassword,
            "INVALID_EMAIL" => Self::InvalidEmail,
            "USER_DISABLED" => Self::UserDisabled,
            "TOO_MANY_ATTEMPTS_TRY_LATER" => Self::TooManyAttempts,
            "TOKEN_EXPIRED" | "USER_NOT_FOUND" => Self::TokenExpired,
            "INVALID_REFRESH_TOKEN" | "INVALID_GRANT_TYPE" => Self::InvalidRefreshToken,
            other => Self::Other(other.to_string()),
        }
    }

    /// Message suitable for showing next to the login form.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmailNotFound | Self::InvalidPassword | Self::InvalidCredentials => {
                "Incorrect email or password.".to_string()
            }
            Self::EmailExists => "An account with this email already exists.".to_string(),
            Self::WeakPassword => "Password should be at least 6 characters.".to_string(),
            Self::InvalidEmail => "That email address is not valid.".to_string(),
            Self::UserDisabled => "This account has been disabled.".to_string(),
            Self::TooManyAttempts => "Too many attempts. Try again later.".to_string(),
            Self::TokenExpired | Self::InvalidRefreshToken => {
                "Your session has expired. Please sign in again.".to_string()
            }
            Self::Other(code) => format!("Authentication failed ({code})."),
        }
    }
}

/// Authentication errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend rejected the request.
    #[error("{}", .0.user_message())]
    Rejected(AuthErrorCode),
    /// The request never produced a usable response.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Form input failed local validation.
    #[error("{0}")]
    InvalidInput(&'static str),
    /// The backend client was never initialized.
    #[error("backend is not configured")]
    NotConfigured,
    /// An operation that needs a session ran while signed out.
    #[error("not signed in")]
    NotSignedIn,
    /// The persisted session could not be saved or loaded.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Firestore document errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FirestoreError {
    #[error("document not found: {0}")]
    NotFound(String),
    #[error("permission denied")]
    PermissionDenied,
    #[error("field `{field}` missing or not a {expected}")]
    Field {
        field: &'static str,
        expected: &'static str,
    },
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("backend is not configured")]
    NotConfigured,
}

/// Session persistence errors for Web Storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The requested storage area does not exist or refuses writes.
    #[error("{0} storage is not available")]
    Unavailable(&'static str),
    /// Failed to write to storage.
    #[error("failed to save to {0} storage")]
    WriteFailed(&'static str),
    /// Failed to remove from storage.
    #[error("failed to remove from {0} storage")]
    RemoveFailed(&'static str),
    /// Stored session was not valid JSON.
    #[error("stored session is corrupt: {0}")]
    Corrupt(String),
}

/// An auth state change not allowed from the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot {action} while {from}")]
pub struct TransitionError {
    pub action: &'static str,
    pub from: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_code_parsing() {
        assert_eq!(AuthErrorCode::parse("EMAIL_NOT_FOUND"), AuthErrorCode::EmailNotFound);
        assert_eq!(
            AuthErrorCode::parse("WEAK_PASSWORD : Password should be at least 6 characters"),
            AuthErrorCode::WeakPassword
        );
        assert_eq!(
            AuthErrorCode::parse("INVALID_LOGIN_CREDENTIALS"),
            AuthErrorCode::InvalidCredentials
        );
        assert_eq!(
            AuthErrorCode::parse("SOMETHING_NEW"),
            AuthErrorCode::Other("SOMETHING_NEW".to_string())
        );
    }

    #[test]
    fn test_credential_errors_share_message() {
        let expected = "Incorrect email or password.";
        assert_eq!(AuthErrorCode::EmailNotFound.user_message(), expected);
        assert_eq!(AuthErrorCode::InvalidPassword.user_message(), expected);
        assert_eq!(AuthErrorCode::InvalidCredentials.user_message(), expected);
    }

    #[test]
    fn test_auth_error_display() {
        let err = AuthError::Rejected(AuthErrorCode::EmailExists);
        assert_eq!(err.to_string(), "An account with this email already exists.");

        let err = AuthError::from(FetchError::Timeout);
        assert_eq!(err.to_string(), "Request timed out");
    }

    #[test]
    fn test_transition_error_display() {
        let err = TransitionError {
            action: "complete sign-in",
            from: "signed out",
        };
        assert_eq!(err.to_string(), "cannot complete sign-in while signed out");
    }
}
