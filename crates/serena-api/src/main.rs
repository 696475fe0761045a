//! # serena-api — Binary Entry Point
//!
//! Reads configuration from the environment, connects the optional
//! database, hydrates the in-memory stores, seeds the bootstrap admin
//! account if requested, and serves the Axum application.

use serena_api::state::{AppConfig, AppEnv, AppState};
use serena_auth::SecretString;
use serena_core::user::{NewUser, Role, User};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Build configuration from environment.
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5000);

    let env = AppEnv::from_env_value(&std::env::var("APP_ENV").unwrap_or_default());
    serena_api::error::set_production(env == AppEnv::Production);

    let jwt_secret = match std::env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => SecretString::new(secret),
        _ => {
            if env == AppEnv::Production {
                return Err("JWT_SECRET must be set in production".into());
            }
            tracing::warn!("JWT_SECRET not set, using the development default");
            SecretString::new("development-secret")
        }
    };

    let config = AppConfig {
        port,
        env,
        jwt_secret,
    };

    // Initialize database pool (optional — absent means in-memory only).
    let db_pool = serena_api::db::init_pool().await.map_err(|e| {
        tracing::error!("database initialization failed: {e}");
        e
    })?;

    let state = AppState::with_config(config, db_pool);

    // Hydrate in-memory stores from database (if connected).
    state.hydrate_from_db().await.map_err(|e| {
        tracing::error!("database hydration failed: {e}");
        e
    })?;

    bootstrap_admin(&state).await?;

    let app = serena_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Serena API listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Seed the bootstrap admin account from `ADMIN_EMAIL`/`ADMIN_PASSWORD`.
///
/// Idempotent: if the email already has an account (typically loaded
/// during hydration), nothing is created.
async fn bootstrap_admin(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let (email, password) = match (
        std::env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
        std::env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
    ) {
        (Some(email), Some(password)) => (email.trim().to_lowercase(), password),
        _ => return Ok(()),
    };

    if state.users.find_by_email(&email).is_some() {
        tracing::info!(%email, "bootstrap admin already exists");
        return Ok(());
    }

    let admin = User::create(
        NewUser {
            name: "Admin".to_string(),
            email: email.clone(),
            phone: None,
            role: Role::Admin,
            birth_date: None,
        },
        serena_auth::hash_password(&password),
    );
    state.users.insert(admin.clone());

    if let Some(pool) = &state.db_pool {
        serena_api::db::users::insert(pool, &admin).await?;
    }

    tracing::info!(%email, "bootstrap admin account created");
    Ok(())
}
