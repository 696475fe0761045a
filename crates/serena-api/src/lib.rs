//! # serena-api — Axum HTTP Surface for the Serena Wellness API
//!
//! Booking, contact, catalog and content endpoints for a wellness
//! practice, backed by in-memory stores with optional Postgres
//! write-through.
//!
//! ## API Surface
//!
//! | Prefix                | Module                      | Access          |
//! |-----------------------|-----------------------------|-----------------|
//! | `/api/appointments/*` | [`routes::appointments`]    | public create, admin rest |
//! | `/api/auth/*`         | [`routes::auth`]            | public, `me` authenticated |
//! | `/api/contact/*`      | [`routes::contact`]         | public create, admin rest |
//! | `/api/therapies/*`    | [`routes::therapies`]       | public reads, admin writes |
//! | `/api/courses/*`      | [`routes::courses`]         | public          |
//! | `/api/testimonials/*` | [`routes::testimonials`]    | public          |
//! | `/api/health`         | `lib.rs`                    | public          |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → RateLimitMiddleware → Handler
//! ```
//!
//! Authentication is per-handler via the [`auth::AuthUser`] extractor
//! rather than a blanket middleware: most of the surface is public.

pub mod auth;
pub mod db;
pub mod error;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use utoipa::ToSchema;

use crate::middleware::metrics::ApiMetrics;
use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter};
use crate::state::AppState;

/// Assemble the full application router with all routes and middleware.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let limiter = RateLimiter::new(RateLimitConfig::default());

    Router::new()
        .merge(routes::appointments::router())
        .merge(routes::auth::router())
        .merge(routes::contact::router())
        .merge(routes::therapies::router())
        .merge(routes::courses::router())
        .merge(routes::testimonials::router())
        .merge(openapi::router())
        .route("/api/health", get(health))
        .layer(from_fn(middleware::rate_limit::rate_limit_middleware))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(axum::Extension(metrics))
        .layer(axum::Extension(limiter))
        .with_state(state)
}

/// Health response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
}

/// GET /api/health — Liveness check with deployment environment.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Serena API running".to_string(),
        timestamp: Utc::now(),
        environment: state.config.env.as_str().to_string(),
    })
}
