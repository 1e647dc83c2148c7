//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the pet registry:
//! - Password hashing (Argon2id)
//! - HS256 JWT encoding and decoding
//! - A token service issuing and checking username-bearing tokens
//! - An authenticator tying password verification to token issuance
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::with_cost(256, 1).unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use auth::{JwtHandler, TokenService};
//! use chrono::Duration;
//!
//! // base64 of "test-secret-key-for-jwt-signing-at-least-32-bytes"
//! let secret = "dGVzdC1zZWNyZXQta2V5LWZvci1qd3Qtc2lnbmluZy1hdC1sZWFzdC0zMi1ieXRlcw==";
//! let tokens = TokenService::new(
//!     JwtHandler::from_base64_secret(secret).unwrap(),
//!     Duration::hours(1),
//! );
//!
//! let issued = tokens.issue("alice").unwrap();
//! assert!(tokens.validate(&issued.token, "alice"));
//! assert_eq!(tokens.extract_subject(&issued.token).unwrap(), "alice");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::IssuedToken;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenService;
pub use password::PasswordError;
pub use password::PasswordHasher;
