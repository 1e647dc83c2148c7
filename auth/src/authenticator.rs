use chrono::DateTime;
use chrono::Utc;

use crate::jwt::JwtError;
use crate::jwt::TokenService;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token
/// issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    tokens: TokenService,
    // Hash with the live cost, verified against when no account matches.
    decoy_hash: String,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// Signed bearer token
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// # Errors
    /// * `PasswordError` - The decoy hash could not be computed
    pub fn new(
        password_hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Result<Self, PasswordError> {
        let decoy_hash = password_hasher.hash("decoy-password")?;

        Ok(Self {
            password_hasher,
            tokens,
            decoy_hash,
        })
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Arguments
    /// * `password` - Plaintext password to verify
    /// * `stored_hash` - Stored password hash
    /// * `subject` - Token subject (the username)
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is unreadable
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.verify(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let issued = self.tokens.issue(subject)?;

        Ok(AuthenticationResult {
            access_token: issued.token,
            expires_at: issued.expires_at,
        })
    }

    /// Fail a login for which no account exists.
    ///
    /// Runs one password verification at the configured cost first, so the
    /// rejection takes as long as a wrong password for a real account.
    pub fn reject(&self, password: &str) -> AuthenticationError {
        let _ = self.password_hasher.verify(password, &self.decoy_hash);
        AuthenticationError::InvalidCredentials
    }
}
