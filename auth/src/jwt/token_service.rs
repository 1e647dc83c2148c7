use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use super::claims::Claims;
use super::errors::JwtError;
use super::handler::JwtHandler;

/// A freshly signed bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Issues and checks time-limited bearer tokens whose subject is a username.
///
/// Tokens are stateless: nothing is stored server side, so expiry is the
/// only way a token stops being accepted.
pub struct TokenService {
    handler: JwtHandler,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(handler: JwtHandler, lifetime: Duration) -> Self {
        Self { handler, lifetime }
    }

    /// How long an issued token stays valid.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Issue a token for `subject`, valid from now for the configured lifetime.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, issued_at, self.lifetime);
        let token = self.handler.encode(&claims)?;

        Ok(IssuedToken {
            token,
            expires_at: issued_at + self.lifetime,
        })
    }

    /// Read the subject out of a token after verifying signature and expiry.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token or signature mismatch
    /// * `TokenExpired` - Token is past its expiry
    /// * `MissingClaim` - Subject is empty
    pub fn extract_subject(&self, token: &str) -> Result<String, JwtError> {
        let claims: Claims = self.handler.decode(token)?;
        if claims.sub.is_empty() {
            return Err(JwtError::MissingClaim("sub".to_string()));
        }
        Ok(claims.sub)
    }

    /// True only if the signature verifies, the token has not expired and its
    /// subject is exactly `expected_subject`. Every failure is `false`.
    pub fn validate(&self, token: &str, expected_subject: &str) -> bool {
        match self.handler.decode::<Claims>(token) {
            Ok(claims) => {
                claims.sub == expected_subject && !claims.is_expired(Utc::now().timestamp())
            }
            Err(_) => false,
        }
    }
}
