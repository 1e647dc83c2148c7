use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::errors::JwtError;

/// JWT encoder/decoder bound to one HS256 key.
///
/// Generic over the claims type. Decoding is strict: zero clock leeway and
/// both `exp` and `sub` must be present.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtHandler {
    /// Create a handler from raw secret bytes.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::with_keys(
            EncodingKey::from_secret(secret),
            DecodingKey::from_secret(secret),
        )
    }

    /// Create a handler from a base64-encoded secret, as held in configuration.
    ///
    /// # Errors
    /// * `InvalidSecret` - Secret is blank or not valid base64
    pub fn from_base64_secret(secret: &str) -> Result<Self, JwtError> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(JwtError::InvalidSecret("secret is empty".to_string()));
        }

        let encoding_key = EncodingKey::from_base64_secret(secret)
            .map_err(|e| JwtError::InvalidSecret(e.to_string()))?;
        let decoding_key = DecodingKey::from_base64_secret(secret)
            .map_err(|e| JwtError::InvalidSecret(e.to_string()))?;

        Ok(Self::with_keys(encoding_key, decoding_key))
    }

    fn with_keys(encoding_key: EncodingKey, decoding_key: DecodingKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Encode claims into a signed token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims could not be serialized or signed
    pub fn encode<T: Serialize>(&self, claims: &T) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify the signature and expiry of a token and return its claims.
    ///
    /// # Errors
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidToken` - Malformed token, bad signature or missing claims
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, JwtError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                ErrorKind::InvalidSignature => {
                    JwtError::InvalidToken("signature does not match".to_string())
                }
                _ => JwtError::InvalidToken(e.to_string()),
            })
    }
}
