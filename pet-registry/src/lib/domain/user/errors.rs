use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username is required")]
    Empty,

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Username must not contain whitespace")]
    ContainsWhitespace,
}

/// Error for plaintext password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password is required")]
    Empty,

    #[error("Password too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("New password and confirmation do not match")]
    ConfirmationMismatch,
}

/// Top-level error for all user-related operations
#[derive(Debug, Clone, Error)]
pub enum UserError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    // Domain-level errors
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("User not found with username: {0}")]
    NotFoundByUsername(String),

    #[error("No users found")]
    NoneFound,

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    // Infrastructure errors
    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<auth::PasswordError> for UserError {
    fn from(err: auth::PasswordError) -> Self {
        UserError::Hashing(err.to_string())
    }
}
