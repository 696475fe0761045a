//! User account persistence operations.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use serena_core::user::{Role, User};

/// Insert a new account.
pub async fn insert(pool: &PgPool, record: &User) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, phone, role, birth_date,
                            last_login, created_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.password_hash)
    .bind(&record.phone)
    .bind(record.role.as_str())
    .bind(record.birth_date)
    .bind(record.last_login)
    .bind(record.created_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Persist a login-time refresh of `last_login`.
pub async fn update_last_login(
    pool: &PgPool,
    id: Uuid,
    last_login: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE users SET last_login = $1 WHERE id = $2")
        .bind(last_login)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all accounts into the in-memory store on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, password_hash, phone, role, birth_date, last_login, created_at
         FROM users ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(UserRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    phone: Option<String>,
    role: String,
    birth_date: Option<NaiveDate>,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl UserRow {
    fn into_record(self) -> User {
        // Unknown role defaults to the least-privileged one.
        let role = Role::parse(&self.role).unwrap_or_else(|| {
            tracing::error!(id = %self.id, role = %self.role,
                "unknown role in database — defaulting to client");
            Role::Client
        });

        User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            phone: self.phone,
            role,
            birth_date: self.birth_date,
            last_login: self.last_login,
            created_at: self.created_at,
        }
    }
}
