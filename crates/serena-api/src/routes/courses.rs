//! Course catalog reads: compiled-in content, no auth, no mutation.

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use serena_core::catalog::{Course, CourseSummary};

use crate::error::AppError;
use crate::state::AppState;

/// Build the courses router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/courses", get(list_courses))
        .route("/api/courses/:id", get(get_course))
}

/// Listing response: summaries without the week-by-week syllabus.
#[derive(Debug, Serialize, ToSchema)]
pub struct CourseListResponse {
    pub success: bool,
    pub courses: Vec<CourseSummary>,
}

/// GET /api/courses — All published courses (public).
#[utoipa::path(
    get,
    path = "/api/courses",
    responses((status = 200, description = "Course listing", body = CourseListResponse)),
    tag = "courses"
)]
pub async fn list_courses(State(state): State<AppState>) -> Json<CourseListResponse> {
    Json(CourseListResponse {
        success: true,
        courses: state.catalog.courses.iter().map(Course::summary).collect(),
    })
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseDetailResponse {
    pub success: bool,
    pub course: Course,
}

/// GET /api/courses/:id — One course with its full syllabus (public).
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course slug")),
    responses(
        (status = 200, description = "Course found", body = CourseDetailResponse),
        (status = 404, description = "Not found", body = crate::error::MessageBody),
    ),
    tag = "courses"
)]
pub async fn get_course(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CourseDetailResponse>, AppError> {
    let course = state
        .catalog
        .find_course(&id)
        .cloned()
        .ok_or_else(|| AppError::NotFound("course not found".to_string()))?;

    Ok(Json(CourseDetailResponse {
        success: true,
        course,
    }))
}
