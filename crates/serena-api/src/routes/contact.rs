//! # Contact API
//!
//! Public contact-form submission plus the admin triage surface. Reading
//! a new message through the detail endpoint auto-advances it to `read`;
//! the explicit status update, unlike the appointment one, validates
//! against the closed status set.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use serena_core::contact::{Contact, ContactDraft, ContactStatus};
use serena_core::query::paginate;

use crate::auth::{require_admin, AuthUser};
use crate::error::AppError;
use crate::state::AppState;

/// Build the contact router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/contact", get(list_contacts).post(create_contact))
        .route(
            "/api/contact/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
}

fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    raw.parse()
        .map_err(|_| AppError::Internal(format!("malformed contact id: {raw}")))
}

/// The partial echo returned on submission: enough for a confirmation
/// screen, nothing the sender did not already type.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactCreatedView {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactCreatedResponse {
    pub message: String,
    pub contact: ContactCreatedView,
}

/// POST /api/contact — Submit a contact message (public).
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactDraft,
    responses(
        (status = 201, description = "Message received", body = ContactCreatedResponse),
        (status = 400, description = "Validation failed", body = crate::error::ValidationBody),
    ),
    tag = "contact"
)]
pub async fn create_contact(
    State(state): State<AppState>,
    Json(draft): Json<ContactDraft>,
) -> Result<(StatusCode, Json<ContactCreatedResponse>), AppError> {
    let contact = Contact::create(draft.validate()?);

    state.contacts.insert(contact.id, contact.clone());

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::contacts::insert(pool, &contact).await {
            tracing::error!(id = %contact.id, error = %e, "failed to persist contact");
            return Err(AppError::Internal(
                "message recorded in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(ContactCreatedResponse {
            message: "message sent successfully".to_string(),
            contact: ContactCreatedView {
                id: contact.id,
                name: contact.name,
                email: contact.email,
                subject: contact.subject,
                created_at: contact.created_at,
            },
        }),
    ))
}

/// Admin list query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Admin list response.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: usize,
}

/// GET /api/contact — List contact messages (admin).
#[utoipa::path(
    get,
    path = "/api/contact",
    params(
        ("status" = Option<String>, Query, description = "Exact-match status filter"),
        ("page" = Option<i64>, Query, description = "1-based page"),
        ("limit" = Option<i64>, Query, description = "Page size"),
    ),
    responses(
        (status = 200, description = "One page of messages", body = ContactListResponse),
        (status = 401, description = "Unauthenticated", body = crate::error::MessageBody),
        (status = 403, description = "Not an admin", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "contact"
)]
pub async fn list_contacts(
    State(state): State<AppState>,
    caller: AuthUser,
    Query(params): Query<ListQuery>,
) -> Result<Json<ContactListResponse>, AppError> {
    require_admin(&caller)?;

    let mut contacts = state.contacts.list();
    // As with appointments, an unknown status value matches nothing.
    if let Some(status) = &params.status {
        contacts.retain(|c| c.status.as_str() == status);
    }
    contacts.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let page = paginate(contacts, params.page.unwrap_or(1), params.limit.unwrap_or(10));

    Ok(Json(ContactListResponse {
        contacts: page.items,
        total_pages: page.total_pages,
        current_page: page.current_page,
        total: page.total,
    }))
}

/// GET /api/contact/:id — Fetch one message (admin).
///
/// A message still in `new` is advanced to `read` as a side effect.
#[utoipa::path(
    get,
    path = "/api/contact/{id}",
    params(("id" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Message found", body = Contact),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "contact"
)]
pub async fn get_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Contact>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id)?;

    let mut was_new = false;
    let contact = state
        .contacts
        .update(&id, |contact| {
            if contact.status == ContactStatus::New {
                contact.status = ContactStatus::Read;
                contact.updated_at = Utc::now();
                was_new = true;
            }
        })
        .ok_or_else(|| AppError::NotFound("message not found".to_string()))?;

    if was_new {
        if let Some(pool) = &state.db_pool {
            if let Err(e) =
                crate::db::contacts::update_status(pool, id, contact.status, contact.updated_at)
                    .await
            {
                tracing::error!(id = %id, error = %e, "failed to persist read transition");
            }
        }
    }

    Ok(Json(contact))
}

/// Admin status update payload.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ContactResponse {
    pub message: String,
    pub contact: Contact,
}

/// PUT /api/contact/:id — Set triage status (admin).
#[utoipa::path(
    put,
    path = "/api/contact/{id}",
    params(("id" = String, Path, description = "Contact id")),
    request_body = UpdateContactRequest,
    responses(
        (status = 200, description = "Status updated", body = ContactResponse),
        (status = 400, description = "Status outside the closed set", body = crate::error::MessageBody),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "contact"
)]
pub async fn update_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id)?;

    // Closed set here, unlike the appointment status.
    let status = req
        .status
        .as_deref()
        .and_then(ContactStatus::parse)
        .ok_or_else(|| AppError::BadRequest("invalid status".to_string()))?;

    let contact = state
        .contacts
        .update(&id, |contact| {
            contact.status = status;
            contact.updated_at = Utc::now();
        })
        .ok_or_else(|| AppError::NotFound("message not found".to_string()))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) =
            crate::db::contacts::update_status(pool, id, contact.status, contact.updated_at).await
        {
            tracing::error!(id = %id, error = %e, "failed to persist contact update");
            return Err(AppError::Internal(
                "message updated in-memory but database persist failed".to_string(),
            ));
        }
    }

    Ok(Json(ContactResponse {
        message: "status updated successfully".to_string(),
        contact,
    }))
}

/// DELETE /api/contact/:id — Hard delete (admin).
#[utoipa::path(
    delete,
    path = "/api/contact/{id}",
    params(("id" = String, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Message deleted", body = crate::error::MessageBody),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    security(("bearer_auth" = [])),
    tag = "contact"
)]
pub async fn delete_contact(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<crate::error::MessageBody>, AppError> {
    require_admin(&caller)?;
    let id = parse_id(&id)?;

    state
        .contacts
        .remove(&id)
        .ok_or_else(|| AppError::NotFound("message not found".to_string()))?;

    if let Some(pool) = &state.db_pool {
        if let Err(e) = crate::db::contacts::delete(pool, id).await {
            tracing::error!(id = %id, error = %e, "failed to delete contact from database");
            return Err(AppError::Internal(
                "message removed in-memory but database delete failed".to_string(),
            ));
        }
    }

    Ok(Json(crate::error::MessageBody {
        message: "message deleted successfully".to_string(),
    }))
}
