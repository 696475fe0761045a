//! # Auth API
//!
//! Registration, login, newsletter subscription and the current-user
//! lookup. Login failures are deliberately indistinguishable: an unknown
//! email and a wrong password both produce the same 400 so the endpoint
//! cannot be used to probe which addresses hold accounts.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use serena_auth::{hash_password, issue_token, verify_password};
use serena_core::user::{RegisterDraft, Role, SubscribeDraft, Subscription, User, UserProfile};
use serena_core::validate::{is_valid_email, normalize_email, FieldError};

use crate::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/subscribe", post(subscribe))
        .route("/api/auth/me", get(me))
}

/// The account fields returned alongside a fresh token.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl SessionUser {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Token plus the public view of the account it belongs to.
#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub user: SessionUser,
}

/// POST /api/auth/register — Create a client account (public).
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterDraft,
    responses(
        (status = 200, description = "Account created, session issued", body = SessionResponse),
        (status = 400, description = "Validation failed or email taken", body = crate::error::ValidationBody),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(draft): Json<RegisterDraft>,
) -> Result<Json<SessionResponse>, AppError> {
    let (new, password) = draft.validate()?;

    if state.users.find_by_email(&new.email).is_some() {
        return Err(AppError::BadRequest("user already exists".to_string()));
    }

    let user = User::create(new, hash_password(&password));
    state.users.insert(user.clone());

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::users::insert(pool, &user).await {
            tracing::error!(id = %user.id, error = %e, "failed to persist user");
            return Err(AppError::Internal(
                "account recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    let token = issue_token(&state.config.jwt_secret, user.id, user.role)
        .map_err(|e| AppError::Internal(format!("token issuance failed: {e}")))?;

    Ok(Json(SessionResponse {
        token,
        user: SessionUser::from_user(&user),
    }))
}

/// Login payload. Both fields optional at the serde boundary so missing
/// values surface as field-tagged errors.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// POST /api/auth/login — Exchange credentials for a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued", body = SessionResponse),
        (status = 400, description = "Validation failed or bad credentials", body = crate::error::MessageBody),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut errors = Vec::new();

    let email = normalize_email(req.email.as_deref().unwrap_or(""));
    if !is_valid_email(&email) {
        errors.push(FieldError::new("email", "please enter a valid email"));
    }
    if req.password.is_none() {
        errors.push(FieldError::new("password", "password is required"));
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }
    let password = req.password.unwrap_or_default();

    // Same response for unknown email and wrong password.
    let user = state
        .users
        .find_by_email(&email)
        .ok_or_else(|| AppError::BadRequest("invalid credentials".to_string()))?;

    let matches = verify_password(&password, &user.password_hash).map_err(|e| {
        tracing::error!(id = %user.id, error = %e, "stored credential hash is malformed");
        AppError::Internal("credential verification failed".to_string())
    })?;
    if !matches {
        return Err(AppError::BadRequest("invalid credentials".to_string()));
    }

    let now = Utc::now();
    let user = state
        .users
        .update(&user.id, |u| u.last_login = Some(now))
        .ok_or_else(|| AppError::Internal("account vanished during login".to_string()))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::users::update_last_login(pool, user.id, now).await {
            // Login still succeeds; the timestamp is advisory.
            tracing::error!(id = %user.id, error = %e, "failed to persist last_login");
        }
    }

    let token = issue_token(&state.config.jwt_secret, user.id, user.role)
        .map_err(|e| AppError::Internal(format!("token issuance failed: {e}")))?;

    Ok(Json(SessionResponse {
        token,
        user: SessionUser::from_user(&user),
    }))
}

/// Subscription acknowledgement.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubscribeResponse {
    pub message: String,
    pub subscription: Subscription,
}

/// POST /api/auth/subscribe — Newsletter signup (public, no credential).
///
/// Validation only; nothing is stored. The echo gives the frontend the
/// normalized values it submitted.
#[utoipa::path(
    post,
    path = "/api/auth/subscribe",
    request_body = SubscribeDraft,
    responses(
        (status = 201, description = "Subscription accepted", body = SubscribeResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationBody),
    ),
    tag = "auth"
)]
pub async fn subscribe(
    Json(draft): Json<SubscribeDraft>,
) -> Result<(StatusCode, Json<SubscribeResponse>), AppError> {
    let subscription = draft.validate()?;

    tracing::info!(email = %subscription.email, "newsletter subscription received");

    Ok((
        StatusCode::CREATED,
        Json(SubscribeResponse {
            message: "subscription successful".to_string(),
            subscription,
        }),
    ))
}

/// GET /api/auth/me — The authenticated caller's own profile.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Current account", body = UserProfile),
        (status = 401, description = "Unauthenticated", body = crate::error::MessageBody),
        (status = 404, description = "Account no longer exists", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn me(State(state): State<AppState>, caller: AuthUser) -> Result<Json<UserProfile>, AppError> {
    let user = state
        .users
        .get(&caller.id)
        .ok_or_else(|| AppError::NotFound("user not found".to_string()))?;

    Ok(Json(user.profile()))
}
