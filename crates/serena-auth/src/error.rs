//! Auth error taxonomy.

use thiserror::Error;

/// Errors from token issuance/verification and credential handling.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token failed signature or claims validation.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The token's expiry is in the past.
    #[error("token expired")]
    TokenExpired,

    /// A stored credential hash is not in a recognized format.
    #[error("malformed password hash")]
    MalformedHash,

    /// Token encoding failed (key or claims problem).
    #[error("token issuance failed: {0}")]
    Issuance(String),
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => Self::TokenExpired,
            _ => Self::InvalidToken(err.to_string()),
        }
    }
}
