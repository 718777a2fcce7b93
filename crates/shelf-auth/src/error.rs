//! Authentication errors.

use shelf_commerce::validation::FieldErrors;
use shelf_commerce::CommerceError;
use thiserror::Error;

/// Authentication error type.
#[derive(Error, Debug)]
pub enum AuthError {
    /// No credential is stored.
    #[error("not logged in")]
    NotLoggedIn,

    /// The server rejected the e-mail/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// A blank or malformed token was offered.
    #[error("token invalid")]
    InvalidToken,

    /// Form input failed validation.
    #[error("invalid input: {0}")]
    Validation(FieldErrors),

    /// The token file could not be read or written.
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl AuthError {
    /// Check if this is an authentication failure.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            AuthError::NotLoggedIn | AuthError::InvalidCredentials | AuthError::InvalidToken
        )
    }
}

impl From<FieldErrors> for AuthError {
    fn from(errors: FieldErrors) -> Self {
        AuthError::Validation(errors)
    }
}

impl From<AuthError> for CommerceError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::NotLoggedIn | AuthError::InvalidCredentials | AuthError::InvalidToken => {
                CommerceError::Unauthorized
            }
            AuthError::Validation(errors) => CommerceError::ValidationFailed(errors.to_string()),
            AuthError::Storage(e) => {
                CommerceError::NetworkOrServer(format!("could not access session file: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_auth_failure() {
        assert!(AuthError::NotLoggedIn.is_auth_failure());
        assert!(AuthError::InvalidToken.is_auth_failure());
        assert!(!AuthError::Validation(FieldErrors::new()).is_auth_failure());
    }

    #[test]
    fn test_into_commerce_error() {
        assert_eq!(
            CommerceError::from(AuthError::NotLoggedIn),
            CommerceError::Unauthorized
        );

        let mut errors = FieldErrors::new();
        errors.add("email", "Invalid email format");
        assert_eq!(
            CommerceError::from(AuthError::Validation(errors)),
            CommerceError::ValidationFailed("email: Invalid email format".into())
        );
    }
}
