//! # Appointment API
//!
//! The booking core: public creation plus the admin console's filtered
//! list, detail, update and delete.
//!
//! Two long-standing behaviors are preserved deliberately and pinned by
//! tests: the update falsy-guards (`status`/`confirmedDate`/
//! `confirmedTime` apply only when present and non-empty, while `notes`
//! applies whenever the key is present), and malformed path ids
//! surfacing as internal faults rather than 404s.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use serena_core::appointment::Appointment;
use serena_core::query::{self, AppointmentFilter};
use serena_core::validate::{parse_iso_date, AppointmentDraft};

use crate::auth::{require_admin, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Build the appointments router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/appointments", get(list_appointments).post(create_appointment))
        .route(
            "/api/appointments/:id",
            get(get_appointment)
                .put(update_appointment)
                .delete(delete_appointment),
        )
}

/// Parse a path id. A malformed id is an internal fault, not a 404 —
/// the id namespace is opaque and only ever server-generated.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::Internal(format!("malformed appointment id: {raw}")))
}

/// Admin list query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ListQuery {
    fn into_filter(self) -> AppointmentFilter {
        AppointmentFilter {
            status: self.status,
            // An unparseable bound is treated as absent; the window
            // applies only when both bounds survive.
            start_date: self.start_date.as_deref().and_then(parse_iso_date),
            end_date: self.end_date.as_deref().and_then(parse_iso_date),
            page: self.page.unwrap_or(1),
            limit: self.limit.unwrap_or(10),
        }
    }
}

/// Admin update payload.
///
/// `notes` is double-optional: the outer level distinguishes "key
/// absent" (leave alone) from "key present" (overwrite). `null` clears;
/// any string, the empty string included, is stored verbatim.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub confirmed_date: Option<String>,
    #[serde(default)]
    pub confirmed_time: Option<String>,
    #[serde(default, deserialize_with = "some_if_present")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
}

fn some_if_present<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// `{message, appointment}` envelope for mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct AppointmentResponse {
    pub message: String,
    pub appointment: Appointment,
}

/// Admin list response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentListResponse {
    pub appointments: Vec<Appointment>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: usize,
}

/// POST /api/appointments — Book an appointment (public).
#[utoipa::path(
    post,
    path = "/api/appointments",
    request_body = AppointmentDraft,
    responses(
        (status = 201, description = "Appointment created", body = AppointmentResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationBody),
    ),
    tag = "appointments"
)]
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(draft): Json<AppointmentDraft>,
) -> Result<(StatusCode, Json<AppointmentResponse>), AppError> {
    let new = draft.validate()?;
    let appointment = Appointment::create(new);

    state.appointments.insert(appointment.id, appointment.clone());

    // Write-through. Failure is surfaced because the in-memory record
    // would be lost on restart.
    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::appointments::insert(pool, &appointment).await {
            tracing::error!(id = %appointment.id, error = %e, "failed to persist appointment");
            return Err(AppError::Internal(
                "appointment recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(AppointmentResponse {
            message: "appointment created successfully".to_string(),
            appointment,
        }),
    ))
}

/// GET /api/appointments — List appointments (admin).
#[utoipa::path(
    get,
    path = "/api/appointments",
    params(
        ("status" = Option<String>, Query, description = "Exact-match status filter"),
        ("startDate" = Option<String>, Query, description = "Inclusive lower bound on preferredDate"),
        ("endDate" = Option<String>, Query, description = "Inclusive upper bound on preferredDate"),
        ("page" = Option<i64>, Query, description = "1-based page"),
        ("limit" = Option<i64>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "One page of appointments", body = AppointmentListResponse),
        (status = 401, description = "Unauthenticated", body = crate::error::MessageBody),
        (status = 403, description = "Not an admin", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn list_appointments(
    State(state): State<AppState>,
    caller: AuthUser,
    Query(params): Query<ListQuery>,
) -> Result<Json<AppointmentListResponse>, AppError> {
    require_admin(&caller)?;

    let filter = params.into_filter();
    let page = query::run(state.appointments.list(), &filter);

    Ok(Json(AppointmentListResponse {
        appointments: page.items,
        total_pages: page.total_pages,
        current_page: page.current_page,
        total: page.total,
    }))
}

/// GET /api/appointments/:id — Fetch one appointment (admin).
#[utoipa::path(
    get,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment found", body = Appointment),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn get_appointment(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Appointment>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id)?;

    let appointment = state
        .appointments
        .get(&id)
        .ok_or_else(|| AppError::NotFound("appointment not found".to_string()))?;

    Ok(Json(appointment))
}

/// PUT /api/appointments/:id — Update status/confirmation/notes (admin).
#[utoipa::path(
    put,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Appointment updated", body = AppointmentResponse),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn update_appointment(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateAppointmentRequest>,
) -> Result<Json<AppointmentResponse>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id)?;

    // A present-but-unparseable confirmedDate is a cast failure at the
    // record boundary, surfaced as an internal fault.
    let confirmed_date = match req.confirmed_date.as_deref().filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => Some(
            parse_iso_date(raw)
                .ok_or_else(|| AppError::Internal(format!("malformed confirmed date: {raw}")))?,
        ),
    };
    let status = req.status.filter(|s| !s.is_empty());
    let confirmed_time = req.confirmed_time.filter(|s| !s.is_empty());

    let updated = state
        .appointments
        .update(&id, |appointment| {
            // Falsy-guarded fields: applied only when non-empty. The
            // status value is written as-is, without enum validation.
            if let Some(status) = status.clone() {
                appointment.status = status;
            }
            if let Some(date) = confirmed_date {
                appointment.confirmed_date = Some(date);
            }
            if let Some(time) = confirmed_time.clone() {
                appointment.confirmed_time = Some(time);
            }
            // Key-presence field: null clears, strings are stored
            // verbatim — an empty string stays on the wire as "".
            if let Some(notes) = req.notes.clone() {
                appointment.notes = notes;
            }
            appointment.updated_at = Utc::now();
        })
        .ok_or_else(|| AppError::NotFound("appointment not found".to_string()))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::appointments::update(pool, &updated).await {
            tracing::error!(id = %id, error = %e, "failed to persist appointment update");
            return Err(AppError::Internal(
                "appointment updated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(AppointmentResponse {
        message: "appointment updated successfully".to_string(),
        appointment: updated,
    }))
}

/// DELETE /api/appointments/:id — Hard delete (admin).
#[utoipa::path(
    delete,
    path = "/api/appointments/{id}",
    params(("id" = String, Path, description = "Appointment id")),
    responses(
        (status = 200, description = "Appointment deleted", body = crate::error::MessageBody),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "appointments"
)]
pub async fn delete_appointment(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<crate::error::MessageBody>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id)?;

    state
        .appointments
        .remove(&id)
        .ok_or_else(|| AppError::NotFound("appointment not found".to_string()))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::appointments::delete(pool, id).await {
            tracing::error!(id = %id, error = %e, "failed to delete appointment from database");
            return Err(AppError::Internal(
                "appointment removed in-memory but database delete failed".to_string(),
            ));
        }
    }

    Ok(Json(crate::error::MessageBody {
        message: "appointment deleted successfully".to_string(),
    }))
}
