//! Therapy catalog persistence operations.
//!
//! Soft deletion goes through [`update`]: a delisted therapy is an
//! update with `active = false`, never a SQL DELETE.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use serena_core::therapy::{Currency, Therapy, TherapyCategory};

/// Insert a new catalog entry.
pub async fn insert(pool: &PgPool, record: &Therapy) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO therapies (id, name, description, short_description, duration, price,
                                currency, image, category, active, sort_order, tags, benefits,
                                includes, created_at, updated_at)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)",
    )
    .bind(record.id)
    .bind(&record.name)
    .bind(&record.description)
    .bind(&record.short_description)
    .bind(&record.duration)
    .bind(record.price)
    .bind(record.currency.as_str())
    .bind(&record.image)
    .bind(record.category.as_str())
    .bind(record.active)
    .bind(record.order)
    .bind(&record.tags)
    .bind(&record.benefits)
    .bind(&record.includes)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(pool)
    .await?;

    Ok(())
}

/// Persist a full replacement of the mutable fields.
pub async fn update(pool: &PgPool, record: &Therapy) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE therapies
         SET name = $1, description = $2, short_description = $3, duration = $4, price = $5,
             currency = $6, image = $7, category = $8, active = $9, sort_order = $10,
             tags = $11, benefits = $12, includes = $13, updated_at = $14
         WHERE id = $15",
    )
    .bind(&record.name)
    .bind(&record.description)
    .bind(&record.short_description)
    .bind(&record.duration)
    .bind(record.price)
    .bind(record.currency.as_str())
    .bind(&record.image)
    .bind(record.category.as_str())
    .bind(record.active)
    .bind(record.order)
    .bind(&record.tags)
    .bind(&record.benefits)
    .bind(&record.includes)
    .bind(record.updated_at)
    .bind(record.id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Load all catalog entries into the in-memory store on startup.
pub async fn load_all(pool: &PgPool) -> Result<Vec<Therapy>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TherapyRow>(
        "SELECT id, name, description, short_description, duration, price, currency, image,
                category, active, sort_order, tags, benefits, includes, created_at, updated_at
         FROM therapies ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().filter_map(TherapyRow::into_record).collect())
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct TherapyRow {
    id: Uuid,
    name: String,
    description: String,
    short_description: Option<String>,
    duration: Option<String>,
    price: Option<f64>,
    currency: String,
    image: Option<String>,
    category: String,
    active: bool,
    sort_order: i32,
    tags: Vec<String>,
    benefits: Vec<String>,
    includes: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TherapyRow {
    fn into_record(self) -> Option<Therapy> {
        let category = match TherapyCategory::parse(&self.category) {
            Some(category) => category,
            None => {
                tracing::error!(id = %self.id, category = %self.category,
                    "unknown therapy category in database — skipping row");
                return None;
            }
        };
        let currency = Currency::parse(&self.currency).unwrap_or_else(|| {
            tracing::error!(id = %self.id, currency = %self.currency,
                "unknown currency in database — defaulting to USD");
            Currency::Usd
        });

        Some(Therapy {
            id: self.id,
            name: self.name,
            description: self.description,
            short_description: self.short_description,
            duration: self.duration,
            price: self.price,
            currency,
            image: self.image,
            category,
            active: self.active,
            order: self.sort_order,
            tags: self.tags,
            benefits: self.benefits,
            includes: self.includes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
