//! HTTP-level integration tests: the assembled router exercised through
//! `tower::ServiceExt::oneshot`, with the in-memory stores inspected
//! directly where a response alone cannot prove the absence of side
//! effects.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use serena_api::state::AppState;
use serena_auth::issue_token;
use serena_core::appointment::{Appointment, NewAppointment};
use serena_core::service::ServiceType;
use serena_core::user::Role;

fn test_app() -> (Router, AppState) {
    let state = AppState::default();
    (serena_api::app(state.clone()), state)
}

fn admin_token(state: &AppState) -> String {
    issue_token(&state.config.jwt_secret, Uuid::new_v4(), Role::Admin).unwrap()
}

fn client_token(state: &AppState) -> String {
    issue_token(&state.config.jwt_secret, Uuid::new_v4(), Role::Client).unwrap()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn booking_payload() -> Value {
    json!({
        "clientName": "Ana Torres",
        "clientEmail": "Ana@Example.COM",
        "clientPhone": "099123456",
        "serviceType": "reiki",
        "preferredDate": "2024-03-15",
        "preferredTime": "09:30"
    })
}

/// Seed an appointment directly, with a controllable creation instant.
fn seed_appointment(state: &AppState, status: &str, day: u32, offset_secs: i64) -> Uuid {
    let mut appointment = Appointment::create(NewAppointment {
        client_name: "Seeded Client".to_string(),
        client_email: "seed@example.com".to_string(),
        client_phone: "099000000".to_string(),
        service_type: ServiceType::MindfulnessIndividual,
        preferred_date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
        preferred_time: "10:00".to_string(),
        message: None,
    });
    appointment.status = status.to_string();
    appointment.created_at = Utc::now() + Duration::seconds(offset_secs);
    let id = appointment.id;
    state.appointments.insert(id, appointment);
    id
}

// --- appointments ---

#[tokio::test]
async fn booking_roundtrip() {
    let (app, state) = test_app();

    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(booking_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "appointment created successfully");
    assert_eq!(body["appointment"]["status"], "pending");
    assert_eq!(body["appointment"]["clientEmail"], "ana@example.com");

    let token = admin_token(&state);
    let (status, body) = send(&app, "GET", "/api/appointments", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["currentPage"], 1);
}

#[tokio::test]
async fn booking_with_unknown_service_leaves_no_trace() {
    let (app, state) = test_app();

    let mut payload = booking_payload();
    payload["serviceType"] = json!("hot-stone");
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "serviceType");
    assert!(state.appointments.is_empty());
}

#[tokio::test]
async fn booking_rejects_out_of_range_time() {
    let (app, _) = test_app();
    let mut payload = booking_payload();
    payload["preferredTime"] = json!("25:61");
    let (status, body) = send(&app, "POST", "/api/appointments", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "preferredTime");
}

#[tokio::test]
async fn duplicate_bookings_are_allowed() {
    let (app, state) = test_app();
    for _ in 0..2 {
        let (status, _) =
            send(&app, "POST", "/api/appointments", None, Some(booking_payload())).await;
        assert_eq!(status, StatusCode::CREATED);
    }
    assert_eq!(state.appointments.len(), 2);
}

#[tokio::test]
async fn update_applies_falsy_guards() {
    let (app, state) = test_app();
    let id = seed_appointment(&state, "pending", 15, 0);
    let token = admin_token(&state);
    let uri = format!("/api/appointments/{id}");

    // Non-empty values apply.
    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({"status": "confirmed", "confirmedTime": "14:00", "notes": "call back"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["status"], "confirmed");
    assert_eq!(body["appointment"]["confirmedTime"], "14:00");
    assert_eq!(body["appointment"]["notes"], "call back");

    // Empty status is a no-op; an empty notes string is stored as-is.
    let (status, body) = send(
        &app,
        "PUT",
        &uri,
        Some(&token),
        Some(json!({"status": "", "notes": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["status"], "confirmed");
    assert_eq!(body["appointment"]["notes"], "");

    // An absent notes key leaves notes alone; null clears.
    let (_, body) = send(&app, "PUT", &uri, Some(&token), Some(json!({"notes": "again"}))).await;
    assert_eq!(body["appointment"]["notes"], "again");
    let (_, body) = send(&app, "PUT", &uri, Some(&token), Some(json!({"status": "completed"}))).await;
    assert_eq!(body["appointment"]["notes"], "again");
    let (_, body) = send(&app, "PUT", &uri, Some(&token), Some(json!({"notes": null}))).await;
    assert!(body["appointment"].get("notes").is_none());
}

#[tokio::test]
async fn update_writes_arbitrary_status_text() {
    let (app, state) = test_app();
    let id = seed_appointment(&state, "pending", 15, 0);
    let token = admin_token(&state);

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/appointments/{id}"),
        Some(&token),
        Some(json!({"status": "on-hold"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointment"]["status"], "on-hold");
    assert_eq!(state.appointments.get(&id).unwrap().status, "on-hold");
}

#[tokio::test]
async fn list_filters_by_status_and_orders_newest_first() {
    let (app, state) = test_app();
    seed_appointment(&state, "pending", 1, 0);
    let older = seed_appointment(&state, "confirmed", 2, 10);
    let newer = seed_appointment(&state, "confirmed", 3, 20);
    let token = admin_token(&state);

    let (status, body) = send(
        &app,
        "GET",
        "/api/appointments?status=confirmed",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["appointments"][0]["id"], newer.to_string());
    assert_eq!(body["appointments"][1]["id"], older.to_string());

    // An unknown status value matches nothing rather than erroring.
    let (status, body) = send(
        &app,
        "GET",
        "/api/appointments?status=archived",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn date_window_is_both_bounds_or_nothing() {
    let (app, state) = test_app();
    seed_appointment(&state, "pending", 1, 0);
    seed_appointment(&state, "pending", 15, 1);
    seed_appointment(&state, "pending", 30, 2);
    let token = admin_token(&state);

    // A lone bound applies no filter.
    let (_, body) = send(
        &app,
        "GET",
        "/api/appointments?startDate=2024-03-20",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["total"], 3);

    // Both bounds filter inclusively.
    let (_, body) = send(
        &app,
        "GET",
        "/api/appointments?startDate=2024-03-01&endDate=2024-03-15",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(body["total"], 2);
}

#[tokio::test]
async fn pagination_reports_pages_and_slices() {
    let (app, state) = test_app();
    for i in 0..25 {
        seed_appointment(&state, "pending", 1, i);
    }
    let token = admin_token(&state);

    let (status, body) = send(
        &app,
        "GET",
        "/api/appointments?page=3&limit=10",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appointments"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], 25);
    assert_eq!(body["totalPages"], 3);
    assert_eq!(body["currentPage"], 3);
}

#[tokio::test]
async fn admin_surface_is_fenced_with_no_side_effects() {
    let (app, state) = test_app();
    let id = seed_appointment(&state, "pending", 15, 0);

    // No token at all.
    let (status, body) = send(&app, "GET", "/api/appointments", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "missing authorization header");

    // Authenticated but not an admin: uniform refusal, nothing mutated.
    let token = client_token(&state);
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/appointments/{id}"),
        Some(&token),
        Some(json!({"status": "confirmed"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "access denied");
    assert_eq!(state.appointments.get(&id).unwrap().status, "pending");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/appointments/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(state.appointments.len(), 1);
}

#[tokio::test]
async fn malformed_appointment_id_is_an_internal_fault() {
    let (app, state) = test_app();
    let token = admin_token(&state);
    let (status, _) = send(&app, "GET", "/api/appointments/not-a-uuid", Some(&token), None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let (app, state) = test_app();
    let id = seed_appointment(&state, "pending", 15, 0);
    let token = admin_token(&state);
    let uri = format!("/api/appointments/{id}");

    let (status, body) = send(&app, "DELETE", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "appointment deleted successfully");

    let (status, _) = send(&app, "GET", &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- auth ---

#[tokio::test]
async fn register_login_me_flow() {
    let (app, _) = test_app();

    let payload = json!({
        "name": "Ana Torres",
        "email": "ana@example.com",
        "password": "secreto1"
    });
    let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "client");
    assert!(body["token"].as_str().is_some());

    // Same email cannot register twice.
    let (status, body) = send(&app, "POST", "/api/auth/register", None, Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "user already exists");

    // Wrong password and unknown email produce the same refusal.
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "ana@example.com", "password": "wrong!"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid credentials");
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "secreto1"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid credentials");

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "Ana@Example.com", "password": "secreto1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana@example.com");
    assert!(body.get("passwordHash").is_none());
    assert!(body["lastLogin"].as_str().is_some());
}

#[tokio::test]
async fn register_collects_validation_errors() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({"name": "Ana", "email": "ana@example.com", "password": "12345"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "password");
}

#[tokio::test]
async fn subscribe_validates_and_echoes() {
    let (app, _) = test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/subscribe",
        None,
        Some(json!({"name": "Ana", "email": "ana@example.com", "birthDate": "1990-06-01"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["subscription"]["email"], "ana@example.com");
    assert_eq!(body["subscription"]["birthDate"], "1990-06-01");

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/subscribe",
        None,
        Some(json!({"name": "Ana", "email": "ana@example.com", "phone": "1234"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "phone");
}

// --- contact ---

fn contact_payload() -> Value {
    json!({
        "name": "Ana Torres",
        "email": "ana@example.com",
        "subject": "Consulta sobre reiki",
        "message": "Quisiera saber los horarios disponibles."
    })
}

#[tokio::test]
async fn contact_triage_flow() {
    let (app, state) = test_app();

    let (status, body) = send(&app, "POST", "/api/contact", None, Some(contact_payload())).await;
    assert_eq!(status, StatusCode::CREATED);
    // Partial echo: the message body itself is not repeated.
    assert_eq!(body["contact"]["subject"], "Consulta sobre reiki");
    assert!(body["contact"].get("message").is_none());
    let id = body["contact"]["id"].as_str().unwrap().to_string();

    let token = admin_token(&state);

    // Reading a new message auto-advances it to read.
    let (status, body) = send(&app, "GET", &format!("/api/contact/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "read");

    // The explicit status update validates the closed set.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/contact/{id}"),
        Some(&token),
        Some(json!({"status": "pending"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "invalid status");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/contact/{id}"),
        Some(&token),
        Some(json!({"status": "replied"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["contact"]["status"], "replied");

    let (status, _) = send(&app, "DELETE", &format!("/api/contact/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/api/contact/{id}"), Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn contact_list_filters_by_status() {
    let (app, state) = test_app();
    for _ in 0..3 {
        send(&app, "POST", "/api/contact", None, Some(contact_payload())).await;
    }
    let token = admin_token(&state);

    let (_, body) = send(&app, "GET", "/api/contact?status=new", Some(&token), None).await;
    assert_eq!(body["total"], 3);
    let (_, body) = send(&app, "GET", "/api/contact?status=archived", Some(&token), None).await;
    assert_eq!(body["total"], 0);
    let (_, body) = send(&app, "GET", "/api/contact?page=2&limit=2", Some(&token), None).await;
    assert_eq!(body["contacts"].as_array().unwrap().len(), 1);
    assert_eq!(body["totalPages"], 2);
}

#[tokio::test]
async fn contact_submission_collects_all_errors() {
    let (app, _) = test_app();
    let (status, body) = send(&app, "POST", "/api/contact", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"].as_array().unwrap().len(), 4);
}

// --- therapies ---

fn therapy_payload() -> Value {
    json!({
        "name": "Reiki",
        "description": "Terapia de armonización energética.",
        "category": "energia",
        "price": 50.0
    })
}

#[tokio::test]
async fn therapy_lifecycle_with_soft_delete() {
    let (app, state) = test_app();
    let token = admin_token(&state);

    let (status, body) = send(
        &app,
        "POST",
        "/api/therapies",
        Some(&token),
        Some(therapy_payload()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let id = body["therapy"]["id"].as_str().unwrap().to_string();

    // Public listing sees it.
    let (_, body) = send(&app, "GET", "/api/therapies", None, None).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["totalPages"], 1);

    // Partial update touches only the provided fields.
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/therapies/{id}"),
        Some(&token),
        Some(json!({"order": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["therapy"]["order"], 5);
    assert_eq!(body["therapy"]["name"], "Reiki");

    // Soft delete: gone from the listing, still served by id.
    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/therapies/{id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "therapy deactivated successfully");

    let (_, body) = send(&app, "GET", "/api/therapies", None, None).await;
    assert_eq!(body["total"], 0);
    let (status, body) = send(&app, "GET", &format!("/api/therapies/{id}"), None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["therapy"]["active"], false);
    assert_eq!(state.therapies.len(), 1);
}

#[tokio::test]
async fn therapy_category_filter_and_route() {
    let (app, state) = test_app();
    let token = admin_token(&state);
    send(&app, "POST", "/api/therapies", Some(&token), Some(therapy_payload())).await;
    let mut grupal = therapy_payload();
    grupal["name"] = json!("Mindfulness grupal");
    grupal["category"] = json!("grupal");
    send(&app, "POST", "/api/therapies", Some(&token), Some(grupal)).await;

    let (_, body) = send(&app, "GET", "/api/therapies?category=energia", None, None).await;
    assert_eq!(body["total"], 1);
    let (_, body) = send(&app, "GET", "/api/therapies?category=espiritual", None, None).await;
    assert_eq!(body["total"], 0);

    let (status, body) = send(&app, "GET", "/api/therapies/category/grupal", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["category"], "grupal");
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn therapy_listing_paginates_only_with_limit() {
    let (app, state) = test_app();
    let token = admin_token(&state);
    for i in 0..3 {
        let mut payload = therapy_payload();
        payload["name"] = json!(format!("Terapia {i}"));
        payload["order"] = json!(i);
        send(&app, "POST", "/api/therapies", Some(&token), Some(payload)).await;
    }

    let (_, body) = send(&app, "GET", "/api/therapies", None, None).await;
    assert_eq!(body["therapies"].as_array().unwrap().len(), 3);
    assert_eq!(body["totalPages"], 1);

    let (_, body) = send(&app, "GET", "/api/therapies?limit=2&page=2", None, None).await;
    assert_eq!(body["therapies"].as_array().unwrap().len(), 1);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["total"], 3);
    // Ascending order is preserved across pages.
    assert_eq!(body["therapies"][0]["order"], 2);
}

#[tokio::test]
async fn therapy_listing_survives_extreme_pagination_values() {
    let (app, state) = test_app();
    let token = admin_token(&state);
    for i in 0..2 {
        let mut payload = therapy_payload();
        payload["name"] = json!(format!("Terapia {i}"));
        send(&app, "POST", "/api/therapies", Some(&token), Some(payload)).await;
    }

    // Query values straight off the wire must never overflow the
    // page arithmetic.
    let uri = format!("/api/therapies?limit={}", i64::MAX);
    let (status, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["therapies"].as_array().unwrap().len(), 2);
    assert_eq!(body["totalPages"], 1);

    let uri = format!("/api/therapies?limit=10&page={}", i64::MIN);
    let (status, body) = send(&app, "GET", &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["therapies"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn therapy_malformed_id_is_404_on_get_but_500_on_mutation() {
    let (app, state) = test_app();
    let token = admin_token(&state);

    let (status, _) = send(&app, "GET", "/api/therapies/not-a-uuid", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        "/api/therapies/not-a-uuid",
        Some(&token),
        Some(json!({"order": 1})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn therapy_validation_rejects_bad_category_and_price() {
    let (app, state) = test_app();
    let token = admin_token(&state);

    let mut payload = therapy_payload();
    payload["category"] = json!("espiritual");
    payload["price"] = json!(-1.0);
    let (status, body) = send(&app, "POST", "/api/therapies", Some(&token), Some(payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["category", "price"]);
    assert!(state.therapies.is_empty());
}

// --- static catalogs ---

#[tokio::test]
async fn course_listing_and_detail() {
    let (app, _) = test_app();

    let (status, body) = send(&app, "GET", "/api/courses", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let courses = body["courses"].as_array().unwrap();
    assert_eq!(courses.len(), 3);
    // Summaries omit the syllabus.
    assert!(courses[0].get("weeks").is_none());

    let (status, body) = send(&app, "GET", "/api/courses/mindfulness-4-semanas", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["course"]["weeks"].as_array().unwrap().len(), 4);
    assert_eq!(body["course"]["price"], 150);

    let (status, _) = send(&app, "GET", "/api/courses/unknown-course", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn testimonial_filters_and_detail() {
    let (app, _) = test_app();

    let (_, body) = send(&app, "GET", "/api/testimonials", None, None).await;
    assert_eq!(body["total"], 10);

    let (_, body) = send(&app, "GET", "/api/testimonials?service=coach-ontologico", None, None).await;
    assert_eq!(body["total"], 3);

    let (_, body) = send(&app, "GET", "/api/testimonials?limit=2", None, None).await;
    assert_eq!(body["total"], 2);

    let (status, body) = send(&app, "GET", "/api/testimonials/service/reiki", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["service"], "reiki");
    assert_eq!(body["total"], 1);

    let (status, body) = send(&app, "GET", "/api/testimonials/1", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["testimonial"]["name"], "Euge");

    let (status, _) = send(&app, "GET", "/api/testimonials/999", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", "/api/testimonials/abc", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- platform ---

#[tokio::test]
async fn health_reports_environment() {
    let (app, _) = test_app();
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], "development");
    assert!(body["timestamp"].as_str().is_some());
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = test_app();
    let (status, body) = send(&app, "GET", "/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/appointments").is_some());
    assert!(body["components"]["securitySchemes"].get("bearer_auth").is_some());
}

#[tokio::test]
async fn rate_limit_kicks_in_after_the_window_budget() {
    let (app, _) = test_app();
    for _ in 0..100 {
        let (status, _) = send(&app, "GET", "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["message"], "too many requests, please try again later");
}

#[tokio::test]
async fn bearer_scheme_is_required() {
    let (app, state) = test_app();
    let token = admin_token(&state);

    let request = Request::builder()
        .method("GET")
        .uri("/api/appointments")
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/appointments", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
