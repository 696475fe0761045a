//! # Therapy Catalog
//!
//! Admin-managed catalog of the therapies and courses on offer. Deletion
//! is soft: a delisted therapy stays on record with `active = false` and
//! drops out of the public listings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::validate::FieldError;

/// Currency a therapy is priced in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "UYU")]
    Uyu,
    #[serde(rename = "EUR")]
    Eur,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Uyu => "UYU",
            Self::Eur => "EUR",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "USD" => Some(Self::Usd),
            "UYU" => Some(Self::Uyu),
            "EUR" => Some(Self::Eur),
            _ => None,
        }
    }
}

/// Catalog grouping for the public listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TherapyCategory {
    Individual,
    Grupal,
    Energia,
    Coaching,
    Masaje,
    Curso,
}

impl TherapyCategory {
    pub const ALL: [TherapyCategory; 6] = [
        Self::Individual,
        Self::Grupal,
        Self::Energia,
        Self::Coaching,
        Self::Masaje,
        Self::Curso,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Grupal => "grupal",
            Self::Energia => "energia",
            Self::Coaching => "coaching",
            Self::Masaje => "masaje",
            Self::Curso => "curso",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for TherapyCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Therapy {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub currency: Currency,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub category: TherapyCategory,
    pub active: bool,
    /// Ascending sort key for the public listing; ties break newest-first.
    pub order: i32,
    pub tags: Vec<String>,
    pub benefits: Vec<String>,
    pub includes: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Admin create/update payload for a catalog entry.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TherapyDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub order: Option<i32>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
    #[serde(default)]
    pub includes: Option<Vec<String>>,
}

impl TherapyDraft {
    /// Run every catalog rule, collecting all violations.
    pub fn validate(self) -> Result<NewTherapy, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.as_deref().unwrap_or("").trim().to_string();
        if name.chars().count() < 2 {
            errors.push(FieldError::new("name", "name must be at least 2 characters"));
        }

        let description = self.description.as_deref().unwrap_or("").trim().to_string();
        if description.chars().count() < 10 {
            errors.push(FieldError::new(
                "description",
                "description must be at least 10 characters",
            ));
        }

        let category = match TherapyCategory::parse(self.category.as_deref().unwrap_or("")) {
            Some(category) => Some(category),
            None => {
                errors.push(FieldError::new("category", "invalid category"));
                None
            }
        };

        if self.price.is_some_and(|p| p < 0.0 || !p.is_finite()) {
            errors.push(FieldError::new("price", "price cannot be negative"));
        }

        let currency = match self.currency.as_deref() {
            None => Currency::Usd,
            Some(raw) => match Currency::parse(raw) {
                Some(currency) => currency,
                None => {
                    errors.push(FieldError::new("currency", "invalid currency"));
                    Currency::Usd
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        let trim_all = |items: Option<Vec<String>>| {
            items
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        };

        Ok(NewTherapy {
            name,
            description,
            short_description: self
                .short_description
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            duration: self
                .duration
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            price: self.price,
            currency,
            image: self
                .image
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            category: category.expect("validated"),
            active: self.active.unwrap_or(true),
            order: self.order.unwrap_or(0),
            tags: trim_all(self.tags),
            benefits: trim_all(self.benefits),
            includes: trim_all(self.includes),
        })
    }
}

impl TherapyDraft {
    /// Validate an admin update. The payload is partial: fields absent
    /// from it keep their stored values, fields present are validated
    /// under the same rules as creation.
    pub fn validate_update(self, current: &Therapy) -> Result<NewTherapy, Vec<FieldError>> {
        let merged = TherapyDraft {
            name: self.name.or_else(|| Some(current.name.clone())),
            description: self
                .description
                .or_else(|| Some(current.description.clone())),
            short_description: self
                .short_description
                .or_else(|| current.short_description.clone()),
            duration: self.duration.or_else(|| current.duration.clone()),
            price: self.price.or(current.price),
            currency: self
                .currency
                .or_else(|| Some(current.currency.as_str().to_string())),
            image: self.image.or_else(|| current.image.clone()),
            category: self
                .category
                .or_else(|| Some(current.category.as_str().to_string())),
            active: self.active.or(Some(current.active)),
            order: self.order.or(Some(current.order)),
            tags: self.tags.or_else(|| Some(current.tags.clone())),
            benefits: self.benefits.or_else(|| Some(current.benefits.clone())),
            includes: self.includes.or_else(|| Some(current.includes.clone())),
        };
        merged.validate()
    }
}

/// A validated catalog entry, ready to persist.
#[derive(Debug, Clone)]
pub struct NewTherapy {
    pub name: String,
    pub description: String,
    pub short_description: Option<String>,
    pub duration: Option<String>,
    pub price: Option<f64>,
    pub currency: Currency,
    pub image: Option<String>,
    pub category: TherapyCategory,
    pub active: bool,
    pub order: i32,
    pub tags: Vec<String>,
    pub benefits: Vec<String>,
    pub includes: Vec<String>,
}

impl Therapy {
    pub fn create(new: NewTherapy) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            description: new.description,
            short_description: new.short_description,
            duration: new.duration,
            price: new.price,
            currency: new.currency,
            image: new.image,
            category: new.category,
            active: new.active,
            order: new.order,
            tags: new.tags,
            benefits: new.benefits,
            includes: new.includes,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a validated replacement payload, keeping id and `created_at`.
    pub fn apply(&mut self, new: NewTherapy) {
        self.name = new.name;
        self.description = new.description;
        self.short_description = new.short_description;
        self.duration = new.duration;
        self.price = new.price;
        self.currency = new.currency;
        self.image = new.image;
        self.category = new.category;
        self.active = new.active;
        self.order = new.order;
        self.tags = new.tags;
        self.benefits = new.benefits;
        self.includes = new.includes;
        self.updated_at = Utc::now();
    }
}

/// Public-listing order: `order` ascending, then newest first.
pub fn sort_for_listing(therapies: &mut [Therapy]) {
    therapies.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}
