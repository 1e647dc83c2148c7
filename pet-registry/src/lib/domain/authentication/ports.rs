use async_trait::async_trait;

use crate::domain::authentication::errors::AuthError;
use crate::domain::authentication::models::AccessToken;
use crate::domain::authentication::models::LoginCommand;
use crate::domain::authentication::models::SignupCommand;
use crate::domain::user::models::Password;
use crate::domain::user::models::Principal;
use crate::domain::user::models::User;
use crate::domain::user::models::Username;

/// Port for credential handling and request authentication.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new regular user.
    ///
    /// # Errors
    /// * `DuplicateUser` - Username already taken
    /// * `Hashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn signup(&self, command: SignupCommand) -> Result<User, AuthError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown user or wrong password
    /// * `TokenIssue` - Token could not be signed
    /// * `DatabaseError` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<AccessToken, AuthError>;

    /// Turn a bearer token into the principal it was issued to.
    ///
    /// # Errors
    /// * `ExpiredToken` - Token lifetime has passed
    /// * `InvalidToken` - Bad signature, malformed token or unknown subject
    /// * `DatabaseError` - Database operation failed
    async fn resolve_principal(&self, token: &str) -> Result<Principal, AuthError>;

    /// Create the first admin account if none exists yet.
    ///
    /// Returns whether an account was created.
    ///
    /// # Errors
    /// * `DuplicateUser` - Username is held by a non-admin user
    /// * `Hashing` - Password could not be hashed
    /// * `DatabaseError` - Database operation failed
    async fn bootstrap_admin(&self, username: Username, password: Password)
        -> Result<bool, AuthError>;
}
