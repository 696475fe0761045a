//! Session token issuance and verification.
//!
//! Tokens are HS256 JWTs carrying the account id and role, valid for
//! seven days from issuance.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use serena_core::user::Role;

use crate::error::AuthError;
use crate::secret::SecretString;

/// Session lifetime, matching the public client's expectations.
pub const TOKEN_TTL_DAYS: i64 = 7;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: Uuid,
    /// Account role at issuance time.
    pub role: Role,
    /// Expiry, seconds since epoch.
    pub exp: i64,
    /// Issued-at, seconds since epoch.
    pub iat: i64,
}

/// Issue a seven-day session token for the given account.
pub fn issue_token(secret: &SecretString, user_id: Uuid, role: Role) -> Result<String, AuthError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        role,
        exp: (now + Duration::days(TOKEN_TTL_DAYS)).timestamp(),
        iat: now.timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.expose().as_bytes()),
    )
    .map_err(|e| AuthError::Issuance(e.to_string()))
}

/// Verify a session token's signature and expiry.
pub fn verify_token(secret: &SecretString, token: &str) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.expose().as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}
