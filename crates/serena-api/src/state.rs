//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The in-memory stores are the source of truth for reads. When a
//! database pool is present, every mutation is written through to
//! Postgres and the stores are hydrated from it once at startup.

use std::sync::Arc;

use sqlx::PgPool;

use serena_auth::SecretString;
use serena_core::appointment::Appointment;
use serena_core::catalog::Catalog;
use serena_core::contact::Contact;
use serena_core::store::{Store, UserStore};
use serena_core::therapy::Therapy;

/// Deployment environment, reported by the health endpoint and used to
/// decide whether internal error details reach the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
        }
    }

    /// Parse the `APP_ENV` value; anything but `production` is development.
    pub fn from_env_value(value: &str) -> Self {
        if value.eq_ignore_ascii_case("production") {
            Self::Production
        } else {
            Self::Development
        }
    }
}

/// Application configuration, built from the environment in `main`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub env: AppEnv,
    /// HS256 signing key for session tokens. Redacting `Debug`.
    pub jwt_secret: SecretString,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            env: AppEnv::Development,
            jwt_secret: SecretString::new("development-secret"),
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub appointments: Store<Appointment>,
    pub contacts: Store<Contact>,
    pub therapies: Store<Therapy>,
    pub users: UserStore,
    /// Compiled-in course and testimonial content.
    pub catalog: Arc<Catalog>,
    /// Optional persistence. `None` means in-memory-only mode.
    pub db_pool: Option<PgPool>,
    pub config: AppConfig,
}

impl AppState {
    /// Create application state with the given configuration and optional pool.
    pub fn with_config(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        Self {
            appointments: Store::new(),
            contacts: Store::new(),
            therapies: Store::new(),
            users: UserStore::new(),
            catalog: Arc::new(Catalog::default()),
            db_pool,
            config,
        }
    }

    /// Hydrate in-memory stores from the database.
    ///
    /// Called once on startup when a database pool is available, so that
    /// reads stay fast and synchronous afterwards.
    pub async fn hydrate_from_db(&self) -> Result<(), String> {
        let pool = match &self.db_pool {
            Some(pool) => pool,
            None => return Ok(()),
        };

        let appointments = crate::db::appointments::load_all(pool)
            .await
            .map_err(|e| format!("failed to load appointments: {e}"))?;
        let appointment_count = appointments.len();
        for record in appointments {
            self.appointments.insert(record.id, record);
        }

        let contacts = crate::db::contacts::load_all(pool)
            .await
            .map_err(|e| format!("failed to load contacts: {e}"))?;
        let contact_count = contacts.len();
        for record in contacts {
            self.contacts.insert(record.id, record);
        }

        let therapies = crate::db::therapies::load_all(pool)
            .await
            .map_err(|e| format!("failed to load therapies: {e}"))?;
        let therapy_count = therapies.len();
        for record in therapies {
            self.therapies.insert(record.id, record);
        }

        let users = crate::db::users::load_all(pool)
            .await
            .map_err(|e| format!("failed to load users: {e}"))?;
        let user_count = users.len();
        for record in users {
            self.users.insert(record);
        }

        tracing::info!(
            appointments = appointment_count,
            contacts = contact_count,
            therapies = therapy_count,
            users = user_count,
            "hydrated in-memory stores from database"
        );

        Ok(())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(AppConfig::default(), None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_debug_redacts_the_signing_key() {
        let config = AppConfig {
            jwt_secret: SecretString::new("super-secret-key"),
            ..AppConfig::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret-key"));
    }

    #[test]
    fn env_parsing_defaults_to_development() {
        assert_eq!(AppEnv::from_env_value("production"), AppEnv::Production);
        assert_eq!(AppEnv::from_env_value("PRODUCTION"), AppEnv::Production);
        assert_eq!(AppEnv::from_env_value("staging"), AppEnv::Development);
        assert_eq!(AppEnv::from_env_value(""), AppEnv::Development);
    }

    #[test]
    fn default_state_carries_the_static_catalog() {
        let state = AppState::default();
        assert_eq!(state.catalog.courses.len(), 3);
        assert_eq!(state.catalog.testimonials.len(), 10);
        assert!(state.appointments.is_empty());
        assert!(state.db_pool.is_none());
    }
}
