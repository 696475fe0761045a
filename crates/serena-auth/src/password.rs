//! Credential hashing.
//!
//! Salted, iterated SHA-256 with a constant-time digest comparison.
//! Stored format: `v1$<salt_hex>$<digest_hex>`. The version prefix
//! leaves room to migrate the scheme without invalidating stored hashes.

use rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::AuthError;

const VERSION: &str = "v1";
const SALT_LEN: usize = 16;
const ITERATIONS: u32 = 10_000;

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn from_hex(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}

fn derive(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    let mut digest = hasher.finalize();
    for _ in 1..ITERATIONS {
        let mut hasher = Sha256::new();
        hasher.update(digest);
        digest = hasher.finalize();
    }
    digest.into()
}

/// Hash a cleartext password with a fresh random salt.
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; SALT_LEN];
    OsRng.fill_bytes(&mut salt);
    let digest = derive(&salt, password);
    format!("{VERSION}${}${}", to_hex(&salt), to_hex(&digest))
}

/// Check a cleartext password against a stored hash.
///
/// Returns `Ok(false)` on mismatch; `Err` only when the stored hash is
/// not in a recognized format.
pub fn verify_password(password: &str, stored: &str) -> Result<bool, AuthError> {
    let mut parts = stored.split('$');
    let (version, salt_hex, digest_hex) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(v), Some(s), Some(d), None) => (v, s, d),
        _ => return Err(AuthError::MalformedHash),
    };
    if version != VERSION {
        return Err(AuthError::MalformedHash);
    }
    let salt = from_hex(salt_hex).ok_or(AuthError::MalformedHash)?;
    let expected = from_hex(digest_hex).ok_or(AuthError::MalformedHash)?;
    if expected.len() != 32 {
        return Err(AuthError::MalformedHash);
    }

    let actual = derive(&salt, password);
    Ok(actual.ct_eq(&expected[..]).into())
}
