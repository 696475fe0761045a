//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`. Admin operations are marked with the
//! `bearer_auth` scheme registered by [`SecurityAddon`].

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Serena Wellness API",
        version = "0.1.0",
        description = "Booking, contact, catalog and content API for the Serena wellness practice: appointments, contact messages, therapies, courses and testimonials."
    ),
    paths(
        // Appointments
        crate::routes::appointments::create_appointment,
        crate::routes::appointments::list_appointments,
        crate::routes::appointments::get_appointment,
        crate::routes::appointments::update_appointment,
        crate::routes::appointments::delete_appointment,
        // Auth
        crate::routes::auth::register,
        crate::routes::auth::login,
        crate::routes::auth::subscribe,
        crate::routes::auth::me,
        // Contact
        crate::routes::contact::create_contact,
        crate::routes::contact::list_contacts,
        crate::routes::contact::get_contact,
        crate::routes::contact::update_contact,
        crate::routes::contact::delete_contact,
        // Therapies
        crate::routes::therapies::list_therapies,
        crate::routes::therapies::get_therapy,
        crate::routes::therapies::by_category,
        crate::routes::therapies::create_therapy,
        crate::routes::therapies::update_therapy,
        crate::routes::therapies::delete_therapy,
        // Courses
        crate::routes::courses::list_courses,
        crate::routes::courses::get_course,
        // Testimonials
        crate::routes::testimonials::list_testimonials,
        crate::routes::testimonials::get_testimonial,
        crate::routes::testimonials::by_service,
    ),
    components(schemas(
        // Domain records
        serena_core::appointment::Appointment,
        serena_core::appointment::AppointmentStatus,
        serena_core::service::ServiceType,
        serena_core::contact::Contact,
        serena_core::contact::ContactStatus,
        serena_core::contact::ContactSource,
        serena_core::therapy::Therapy,
        serena_core::therapy::TherapyCategory,
        serena_core::therapy::Currency,
        serena_core::catalog::Course,
        serena_core::catalog::CourseSummary,
        serena_core::catalog::CourseWeek,
        serena_core::catalog::Testimonial,
        serena_core::user::Role,
        serena_core::user::UserProfile,
        serena_core::user::Subscription,
        serena_core::validate::FieldError,
        // Drafts
        serena_core::validate::AppointmentDraft,
        serena_core::contact::ContactDraft,
        serena_core::therapy::TherapyDraft,
        serena_core::user::RegisterDraft,
        serena_core::user::SubscribeDraft,
        // Error bodies
        crate::error::MessageBody,
        crate::error::ValidationBody,
        // DTOs
        crate::routes::appointments::UpdateAppointmentRequest,
        crate::routes::appointments::AppointmentResponse,
        crate::routes::appointments::AppointmentListResponse,
        crate::routes::auth::LoginRequest,
        crate::routes::auth::SessionUser,
        crate::routes::auth::SessionResponse,
        crate::routes::auth::SubscribeResponse,
        crate::routes::contact::ContactCreatedView,
        crate::routes::contact::ContactCreatedResponse,
        crate::routes::contact::ContactListResponse,
        crate::routes::contact::UpdateContactRequest,
        crate::routes::contact::ContactResponse,
        crate::routes::therapies::TherapyListResponse,
        crate::routes::therapies::TherapyDetailResponse,
        crate::routes::therapies::TherapyCategoryResponse,
        crate::routes::therapies::TherapyMutationResponse,
        crate::routes::therapies::TherapyDeleteResponse,
        crate::routes::courses::CourseListResponse,
        crate::routes::courses::CourseDetailResponse,
        crate::routes::testimonials::TestimonialListResponse,
        crate::routes::testimonials::TestimonialDetailResponse,
        crate::routes::testimonials::TestimonialServiceResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "appointments", description = "Appointment booking and admin lifecycle"),
        (name = "auth", description = "Accounts, sessions and newsletter subscription"),
        (name = "contact", description = "Contact messages and admin triage"),
        (name = "therapies", description = "Therapy catalog"),
        (name = "courses", description = "Published courses"),
        (name = "testimonials", description = "Client testimonials"),
    )
)]
pub struct ApiDoc;

/// Registers the bearer-token scheme the admin operations reference.
pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
