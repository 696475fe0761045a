//! Testimonial reads: compiled-in content, filterable by service.

use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use serena_core::catalog::Testimonial;

use crate::error::AppError;
use crate::state::AppState;

/// Build the testimonials router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/testimonials", get(list_testimonials))
        .route("/api/testimonials/:id", get(get_testimonial))
        .route("/api/testimonials/service/:service", get(by_service))
}

/// List query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Service code filter; compared raw, so an unknown code matches nothing.
    pub service: Option<String>,
    /// Cap on the number of testimonials returned.
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestimonialListResponse {
    pub success: bool,
    pub testimonials: Vec<Testimonial>,
    pub total: usize,
}

/// GET /api/testimonials — Testimonials, optionally filtered and capped (public).
#[utoipa::path(
    get,
    path = "/api/testimonials",
    params(
        ("service" = Option<String>, Query, description = "Service code filter"),
        ("limit" = Option<i64>, Query, description = "Maximum number returned"),
    ),
    responses((status = 200, description = "Testimonial listing", body = TestimonialListResponse)),
    tag = "testimonials"
)]
pub async fn list_testimonials(
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> Json<TestimonialListResponse> {
    let mut testimonials: Vec<Testimonial> = state
        .catalog
        .testimonials
        .iter()
        .filter(|t| {
            params
                .service
                .as_deref()
                .map_or(true, |service| t.service.as_str() == service)
        })
        .cloned()
        .collect();

    if let Some(limit) = params.limit {
        testimonials.truncate(usize::try_from(limit).unwrap_or(0));
    }

    let total = testimonials.len();
    Json(TestimonialListResponse {
        success: true,
        testimonials,
        total,
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestimonialDetailResponse {
    pub success: bool,
    pub testimonial: Testimonial,
}

/// GET /api/testimonials/:id — One testimonial (public).
#[utoipa::path(
    get,
    path = "/api/testimonials/{id}",
    params(("id" = String, Path, description = "Testimonial id")),
    responses(
        (status = 200, description = "Testimonial found", body = TestimonialDetailResponse),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    tag = "testimonials"
)]
pub async fn get_testimonial(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TestimonialDetailResponse>, AppError> {
    // Non-numeric ids are a plain miss here, same as an unknown number.
    let testimonial = id
        .parse::<u32>()
        .ok()
        .and_then(|id| state.catalog.find_testimonial(id))
        .cloned()
        .ok_or_else(|| AppError::NotFound("testimonial not found".to_string()))?;

    Ok(Json(TestimonialDetailResponse {
        success: true,
        testimonial,
    }))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TestimonialServiceResponse {
    pub success: bool,
    pub testimonials: Vec<Testimonial>,
    pub total: usize,
    pub service: String,
}

/// GET /api/testimonials/service/:service — Testimonials for one service (public).
#[utoipa::path(
    get,
    path = "/api/testimonials/service/{service}",
    params(("service" = String, Path, description = "Service code")),
    responses((status = 200, description = "Testimonials for the service", body = TestimonialServiceResponse)),
    tag = "testimonials"
)]
pub async fn by_service(
    State(state): State<AppState>,
    Path(service): Path<String>,
) -> Json<TestimonialServiceResponse> {
    let testimonials: Vec<Testimonial> = state
        .catalog
        .testimonials
        .iter()
        .filter(|t| t.service.as_str() == service)
        .cloned()
        .collect();

    let total = testimonials.len();
    Json(TestimonialServiceResponse {
        success: true,
        testimonials,
        total,
        service,
    })
}
