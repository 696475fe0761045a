//! Appointment persistence operations.
//!
//! All functions take a `&PgPool` and operate on the `appointments`
//! table. The stored `status` column is plain text, mirroring the
//! in-memory record: the update path never re-validates it.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use serena_core::appointment::Appointment;
use serena_core::service::ServiceType;

/// Insert a new appointment record.
pub async fn insert(pool: &PgPool, record: &Appointment) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO appointments (id, client_name, client_email, client_phone, service_type,
                                   preferred_date, preferred_time, message, status,
                                   confirmed_date, confirmed_time, notes, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)",
    )
    .bind(record.id)
    .bind(&record.client_name)
    .bind(&record.client_email)
    .bind(&record.client_phone)
    .bind(record.service_type.as_str())
    .bind(record.preferred_date)
    .bind(&record.preferred_time)
    .bind(&record.message)
    .bind(&record.status)
    .bind(record.confirmed_date)
    .bind(&record.confirmed_time)
    .bind(&record.notes)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Persist the admin-mutable fields of an updated record.
pub async fn update(pool: &PgPool, record: &Appointment) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE appointments
         SET status = $1, confirmed_date = $2, confirmed_time = $3, notes = $4, updated_at = $5
         WHERE id = $6",
    )
    .bind(&record.status)
    .bind(record.confirmed_date)
    .bind(&record.confirmed_time)
    .bind(&record.notes)
    .bind(record.updated_at)
    .bind(record.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Hard delete an appointment.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM appointments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all appointments into the in-memory store on startup.
///
/// Rows whose `service_type` no longer parses are skipped with an error
/// log rather than aborting hydration.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Appointment>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AppointmentRow>(
        "SELECT id, client_name, client_email, client_phone, service_type, preferred_date,
                preferred_time, message, status, confirmed_date, confirmed_time, notes,
                created_at, updated_at
         FROM appointments ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(AppointmentRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct AppointmentRow {
    id: Uuid,
    client_name: String,
    client_email: String,
    client_phone: String,
    service_type: String,
    preferred_date: NaiveDate,
    preferred_time: String,
    message: Option<String>,
    status: String,
    confirmed_date: Option<NaiveDate>,
    confirmed_time: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl AppointmentRow {
    fn into_record(self) -> Option<Appointment> {
        let service_type = match ServiceType::parse(&self.service_type) {
            Some(service) => service,
            None => {
                tracing::error!(
                    id = %self.id,
                    service_type = %self.service_type,
                    "unknown service type in database — skipping row; \
                     investigate: the closed service set may have changed"
                );
                return None;
            }
        };

        Some(Appointment {
            id: self.id,
            client_name: self.client_name,
            client_email: self.client_email,
            client_phone: self.client_phone,
            service_type,
            preferred_date: self.preferred_date,
            preferred_time: self.preferred_time,
            message: self.message,
            status: self.status,
            confirmed_date: self.confirmed_date,
            confirmed_time: self.confirmed_time,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
