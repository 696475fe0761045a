//! # serena-auth
//!
//! Session tokens and credential handling for the Serena API: HS256
//! JWTs with a seven-day lifetime, salted iterated-SHA-256 password
//! hashes, and a redacting wrapper for the signing key.

pub mod error;
pub mod password;
pub mod secret;
pub mod token;

pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use secret::SecretString;
pub use token::{issue_token, verify_token, Claims, TOKEN_TTL_DAYS};
