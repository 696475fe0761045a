//! # Therapy Catalog API
//!
//! Public catalog reads plus the admin CRUD surface. Responses in this
//! module carry a `success` flag the frontend's catalog components key
//! on; the booking and contact modules never did, and the asymmetry is
//! kept.
//!
//! Deletion is soft: the entry stays on record with `active = false` and
//! drops out of the public listing, but the detail endpoint still serves
//! it by id.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use serena_core::query::paginate;
use serena_core::therapy::{sort_for_listing, Therapy, TherapyDraft};

use crate::auth::{require_admin, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Build the therapies router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/therapies", get(list_therapies).post(create_therapy))
        .route(
            "/api/therapies/:id",
            get(get_therapy).put(update_therapy).delete(delete_therapy),
        )
        .route("/api/therapies/category/:category", get(by_category))
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::Internal(format!("malformed therapy id: {raw}")))
}

/// Public list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub page: Option<i64>,
    /// Pagination only engages when a limit is supplied.
    pub limit: Option<i64>,
}

/// Public list response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TherapyListResponse {
    pub success: bool,
    pub therapies: Vec<Therapy>,
    pub total: usize,
    pub page: i64,
    pub total_pages: i64,
}

/// GET /api/therapies — Public catalog listing (active entries only).
#[utoipa::path(
    get,
    path = "/api/therapies",
    params(
        ("category" = Option<String>, Query, description = "Exact-match category filter"),
        ("page" = Option<i64>, Query, description = "1-based page; only used with limit"),
        ("limit" = Option<i64>, Query, description = "Page size; omit for the full listing"),
    ),
    responses(
        (status = 200, description = "Catalog listing", body = TherapyListResponse),
    ),
    tag = "therapies"
)]
pub async fn list_therapies(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Result<Json<TherapyListResponse>, AppError> {
    let mut therapies: Vec<Therapy> = state
        .therapies
        .list()
        .into_iter()
        .filter(|t| t.active)
        .collect();
    // Raw string comparison: an unknown category matches nothing.
    if let Some(category) = &params.category {
        therapies.retain(|t| t.category.as_str() == category);
    }
    sort_for_listing(&mut therapies);

    let total = therapies.len();
    let page = params.page.unwrap_or(1);

    let (therapies, total_pages) = match params.limit {
        None => (therapies, 1),
        Some(limit) => {
            let sliced = paginate(therapies, page, limit);
            (sliced.items, sliced.total_pages)
        }
    };

    Ok(Json(TherapyListResponse {
        success: true,
        therapies,
        total,
        page,
        total_pages,
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TherapyDetailResponse {
    pub success: bool,
    pub therapy: Therapy,
}

/// GET /api/therapies/:id — One catalog entry, active or not (public).
#[utoipa::path(
    get,
    path = "/api/therapies/{id}",
    params(("id" = String, Path, description = "Therapy id")),
    responses(
        (status = 200, description = "Entry found", body = TherapyDetailResponse),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    tag = "therapies"
)]
pub async fn get_therapy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TherapyDetailResponse>, AppError> {
    // This endpoint alone treats a malformed id as a plain miss; the
    // admin mutations below keep the internal-fault behavior.
    let therapy = id
        .parse::<Uuid>()
        .ok()
        .and_then(|id| state.therapies.get(&id))
        .ok_or_else(|| AppError::NotFound("therapy not found".to_string()))?;

    Ok(Json(TherapyDetailResponse {
        success: true,
        therapy,
    }))
}

/// By-category response.
#[derive(Debug, Serialize, ToSchema)]
pub struct TherapyCategoryResponse {
    pub success: bool,
    pub therapies: Vec<Therapy>,
    pub category: String,
    pub total: usize,
}

/// GET /api/therapies/category/:category — Active entries in one category (public).
#[utoipa::path(
    get,
    path = "/api/therapies/category/{category}",
    params(("category" = String, Path, description = "Category code")),
    responses(
        (status = 200, description = "Entries in the category", body = TherapyCategoryResponse),
    ),
    tag = "therapies"
)]
pub async fn by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<TherapyCategoryResponse>, AppError> {
    let mut therapies: Vec<Therapy> = state
        .therapies
        .list()
        .into_iter()
        .filter(|t| t.active && t.category.as_str() == category)
        .collect();
    sort_for_listing(&mut therapies);

    let total = therapies.len();
    Ok(Json(TherapyCategoryResponse {
        success: true,
        therapies,
        category,
        total,
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TherapyMutationResponse {
    pub success: bool,
    pub message: String,
    pub therapy: Therapy,
}

/// POST /api/therapies — Create a catalog entry (admin).
#[utoipa::path(
    post,
    path = "/api/therapies",
    request_body = TherapyDraft,
    responses(
        (status = 201, description = "Entry created", body = TherapyMutationResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationBody),
        (status = 403, description = "Not an admin", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "therapies"
)]
pub async fn create_therapy(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(draft): Json<TherapyDraft>,
) -> Result<(StatusCode, Json<TherapyMutationResponse>), AppError> {
    require_admin(&caller)?;

    let therapy = Therapy::create(draft.validate()?);
    state.therapies.insert(therapy.id, therapy.clone());

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::therapies::insert(pool, &therapy).await {
            tracing::error!(id = %therapy.id, error = %e, "failed to persist therapy");
            return Err(AppError::Internal(
                "therapy recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(TherapyMutationResponse {
            success: true,
            message: "therapy created successfully".to_string(),
            therapy,
        }),
    ))
}

/// PUT /api/therapies/:id — Partial update of a catalog entry (admin).
#[utoipa::path(
    put,
    path = "/api/therapies/{id}",
    params(("id" = String, Path, description = "Therapy id")),
    request_body = TherapyDraft,
    responses(
        (status = 200, description = "Entry updated", body = TherapyMutationResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationBody),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "therapies"
)]
pub async fn update_therapy(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(draft): Json<TherapyDraft>,
) -> Result<Json<TherapyMutationResponse>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id)?;

    let current = state
        .therapies
        .get(&id)
        .ok_or_else(|| AppError::NotFound("therapy not found".to_string()))?;

    let new = draft.validate_update(&current)?;

    let therapy = state
        .therapies
        .update(&id, |t| t.apply(new))
        .ok_or_else(|| AppError::NotFound("therapy not found".to_string()))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::therapies::update(pool, &therapy).await {
            tracing::error!(id = %id, error = %e, "failed to persist therapy update");
            return Err(AppError::Internal(
                "therapy updated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(TherapyMutationResponse {
        success: true,
        message: "therapy updated successfully".to_string(),
        therapy,
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TherapyDeleteResponse {
    pub success: bool,
    pub message: String,
}

/// DELETE /api/therapies/:id — Soft delete: deactivate, keep the record (admin).
#[utoipa::path(
    delete,
    path = "/api/therapies/{id}",
    params(("id" = String, Path, description = "Therapy id")),
    responses(
        (status = 200, description = "Entry deactivated", body = TherapyDeleteResponse),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "therapies"
)]
pub async fn delete_therapy(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<TherapyDeleteResponse>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id)?;

    let therapy = state
        .therapies
        .update(&id, |t| {
            t.active = false;
            t.updated_at = chrono::Utc::now();
        })
        .ok_or_else(|| AppError::NotFound("therapy not found".to_string()))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::therapies::update(pool, &therapy).await {
            tracing::error!(id = %id, error = %e, "failed to persist therapy deactivation");
            return Err(AppError::Internal(
                "therapy deactivated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(TherapyDeleteResponse {
        success: true,
        message: "therapy deactivated successfully".to_string(),
    }))
}
