//! Contact message persistence operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use serena_core::contact::{Contact, ContactSource, ContactStatus};

/// Insert a new contact message.
pub async fn insert(pool: &PgPool, record: &Contact) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO contacts (id, name, email, phone, subject, message, status, source,
                               created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.email)
    .bind(&record.phone)
    .bind(&record.subject)
    .bind(&record.message)
    .bind(record.status.as_str())
    .bind(record.source.as_str())
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Persist a triage status change.
pub async fn update_status(
    pool: &PgPool,
    id: Uuid,
    status: ContactStatus,
    updated_at: DateTime<Utc>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE contacts SET status = $1, updated_at = $2 WHERE id = $3")
        .bind(status.as_str())
        .bind(updated_at)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Hard delete a contact message.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM contacts WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all contact messages into the in-memory store on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Contact>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ContactRow>(
        "SELECT id, name, email, phone, subject, message, status, source, created_at, updated_at
         FROM contacts ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(ContactRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct ContactRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    subject: String,
    message: String,
    status: String,
    source: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ContactRow {
    fn into_record(self) -> Contact {
        // Read path defaults on unknown values so one bad row cannot
        // block hydration; logged at ERROR because it should not happen.
        let status = ContactStatus::parse(&self.status).unwrap_or_else(|| {
            tracing::error!(id = %self.id, status = %self.status,
                "unknown contact status in database — defaulting to new");
            ContactStatus::New
        });
        let source = ContactSource::parse(&self.source).unwrap_or_else(|| {
            tracing::error!(id = %self.id, source = %self.source,
                "unknown contact source in database — defaulting to website");
            ContactSource::Website
        });

        Contact {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            status,
            source,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
