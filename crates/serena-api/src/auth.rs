//! # Request Authentication
//!
//! Bearer token extraction for route handlers. A handler that takes an
//! [`AuthUser`] parameter only runs for requests with a valid session
//! token; everything else is rejected with 401 before the handler body.
//!
//! Authorization is a separate, per-handler step: admin operations call
//! [`require_admin`] first, before touching any state, so an
//! insufficient role can never observe or mutate anything.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use uuid::Uuid;

use serena_core::user::Role;

use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller, decoded from the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("missing authorization header".to_string()))?;

        let token = header_value.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthorized("authorization header must use Bearer scheme".to_string())
        })?;

        let claims = serena_auth::verify_token(&state.config.jwt_secret, token).map_err(|e| {
            tracing::warn!(reason = %e, "authentication failed");
            AppError::Unauthorized("invalid or expired token".to_string())
        })?;

        Ok(AuthUser {
            id: claims.sub,
            role: claims.role,
        })
    }
}

/// Check that the caller holds the admin role.
///
/// Admin handlers call this before any other work.
pub fn require_admin(caller: &AuthUser) -> Result<(), AppError> {
    if caller.role == Role::Admin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}
