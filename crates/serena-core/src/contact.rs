//! # Contact Messages
//!
//! Messages submitted through the public contact form, triaged by an
//! admin through a `new -> read -> replied/archived` workflow. Unlike
//! appointments, contact status IS a closed enum at rest: the admin
//! update path rejects values outside the set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::validate::{is_valid_email, normalize_email, FieldError};

/// Triage state of a contact message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
    Replied,
    Archived,
}

impl ContactStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
            Self::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "new" => Some(Self::New),
            "read" => Some(Self::Read),
            "replied" => Some(Self::Replied),
            "archived" => Some(Self::Archived),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContactStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Channel the message came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContactSource {
    Website,
    Form,
    Email,
    Phone,
}

impl ContactSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Website => "website",
            Self::Form => "form",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "website" => Some(Self::Website),
            "form" => Some(Self::Form),
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            _ => None,
        }
    }
}

/// A stored contact message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: Uuid,
    pub name: String,
    /// Normalized (trimmed, lower-cased) at creation.
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub source: ContactSource,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Raw contact form submission.
///
/// Every field optional at the serde boundary so missing fields surface
/// as field-tagged errors rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    /// Optional channel override; defaults to `website`.
    #[serde(default)]
    pub source: Option<String>,
}

impl ContactDraft {
    /// Run every submission rule, collecting all violations.
    pub fn validate(self) -> Result<NewContact, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.as_deref().unwrap_or("").trim().to_string();
        if name.chars().count() < 2 {
            errors.push(FieldError::new("name", "name must be at least 2 characters"));
        } else if name.chars().count() > 50 {
            errors.push(FieldError::new("name", "name cannot exceed 50 characters"));
        }

        let email = normalize_email(self.email.as_deref().unwrap_or(""));
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "please enter a valid email"));
        }

        let phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        let subject = self.subject.as_deref().unwrap_or("").trim().to_string();
        if subject.chars().count() < 5 {
            errors.push(FieldError::new(
                "subject",
                "subject must be at least 5 characters",
            ));
        } else if subject.chars().count() > 100 {
            errors.push(FieldError::new(
                "subject",
                "subject cannot exceed 100 characters",
            ));
        }

        let message = self.message.as_deref().unwrap_or("").trim().to_string();
        if message.chars().count() < 10 {
            errors.push(FieldError::new(
                "message",
                "message must be at least 10 characters",
            ));
        } else if message.chars().count() > 1000 {
            errors.push(FieldError::new(
                "message",
                "message cannot exceed 1000 characters",
            ));
        }

        // An unknown source falls back to the default channel rather
        // than failing the submission.
        let source = self
            .source
            .as_deref()
            .and_then(ContactSource::parse)
            .unwrap_or(ContactSource::Website);

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewContact {
            name,
            email,
            phone,
            subject,
            message,
            source,
        })
    }
}

/// A validated contact submission, ready to persist.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub source: ContactSource,
}

impl Contact {
    /// Materialize a validated submission as a new (untriaged) message.
    pub fn create(new: NewContact) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            subject: new.subject,
            message: new.message,
            status: ContactStatus::New,
            source: new.source,
            created_at: now,
            updated_at: now,
        }
    }
}
