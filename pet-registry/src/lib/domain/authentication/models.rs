use crate::domain::user::models::Password;
use crate::domain::user::models::Username;

/// Validated registration request.
#[derive(Debug, Clone)]
pub struct SignupCommand {
    pub username: Username,
    pub password: Password,
}

/// Raw login request.
///
/// Kept unvalidated so a malformed username fails exactly like a wrong
/// password.
#[derive(Clone)]
pub struct LoginCommand {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCommand")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Bearer token handed out on login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}
