use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error for signup, login and token resolution
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    /// Deliberately uninformative: unknown user and wrong password look alike.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signup data: {0}")]
    Validation(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Token issuance failed: {0}")]
    TokenIssue(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(username) => AuthError::DuplicateUser(username),
            UserError::InvalidUsername(e) => AuthError::Validation(e.to_string()),
            UserError::InvalidPassword(e) => AuthError::Validation(e.to_string()),
            UserError::Hashing(msg) => AuthError::Hashing(msg),
            UserError::DatabaseError(msg) => AuthError::DatabaseError(msg),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        AuthError::Hashing(err.to_string())
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => AuthError::ExpiredToken,
            auth::JwtError::EncodingFailed(msg) | auth::JwtError::InvalidSecret(msg) => {
                AuthError::TokenIssue(msg)
            }
            other => AuthError::InvalidToken(other.to_string()),
        }
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            // An unreadable stored hash must not reveal that the user exists.
            auth::AuthenticationError::PasswordError(e) => {
                tracing::error!("Stored password hash could not be verified: {}", e);
                AuthError::InvalidCredentials
            }
            auth::AuthenticationError::JwtError(e) => AuthError::TokenIssue(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_username_maps_to_duplicate_user() {
        let err = AuthError::from(UserError::UsernameAlreadyExists("alice".to_string()));
        assert!(matches!(err, AuthError::DuplicateUser(name) if name == "alice"));
    }

    #[test]
    fn test_jwt_errors() {
        assert!(matches!(
            AuthError::from(auth::JwtError::TokenExpired),
            AuthError::ExpiredToken
        ));
        assert!(matches!(
            AuthError::from(auth::JwtError::InvalidToken("bad".to_string())),
            AuthError::InvalidToken(_)
        ));
        assert!(matches!(
            AuthError::from(auth::JwtError::MissingClaim("sub".to_string())),
            AuthError::InvalidToken(_)
        ));
    }
}
