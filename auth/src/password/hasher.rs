use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// One-way adaptive password hashing (Argon2id).
///
/// The cost is fixed when the hasher is built. Every produced hash carries
/// its own parameters in PHC format, so hashes created under an older cost
/// keep verifying after the cost is raised.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Create a hasher with the library's recommended cost.
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Create a hasher with an explicit cost.
    ///
    /// # Arguments
    /// * `memory_kib` - Memory cost in KiB
    /// * `iterations` - Number of passes over memory
    ///
    /// # Errors
    /// * `InvalidParameters` - The cost is outside what Argon2 accepts
    pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self, PasswordError> {
        let params = Params::new(memory_kib, iterations, Params::DEFAULT_P_COST, None)
            .map_err(|e| PasswordError::InvalidParameters(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and digest)
    ///
    /// # Errors
    /// * `HashingFailed` - Password hashing operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored PHC hash.
    ///
    /// A mismatch is `Ok(false)`; only an unreadable hash is an error.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("Invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_hasher() -> PasswordHasher {
        PasswordHasher::with_cost(256, 1).expect("valid test cost")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = cheap_hasher();
        let hash = hasher.hash("correct horse").expect("Failed to hash password");

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).unwrap());
        assert!(!hasher.verify("battery staple", &hash).unwrap());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = cheap_hasher();
        let first = hasher.hash("password").unwrap();
        let second = hasher.hash("password").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_across_cost_change() {
        let hash = cheap_hasher().hash("password").unwrap();
        let stronger = PasswordHasher::with_cost(512, 2).unwrap();

        assert!(stronger.verify("password", &hash).unwrap());
    }

    #[test]
    fn test_verify_invalid_hash() {
        let result = cheap_hasher().verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }

    #[test]
    fn test_rejects_invalid_cost() {
        let result = PasswordHasher::with_cost(1, 1);
        assert!(matches!(result, Err(PasswordError::InvalidParameters(_))));
    }
}
