//! # User Accounts
//!
//! Registered accounts (admin and client) plus the validated drafts the
//! auth routes accept. The password hash never leaves the record: the
//! wire-facing view is [`UserProfile`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::validate::{is_valid_email, normalize_email, parse_iso_date, FieldError};

/// Access role attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Client,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "client" => Some(Self::Client),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored account.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Normalized (trimmed, lower-cased).
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: Role,
    pub birth_date: Option<NaiveDate>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// The account fields safe to put on the wire.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Build a fresh account record with a pre-hashed credential.
    pub fn create(new: NewUser, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            password_hash,
            phone: new.phone,
            role: new.role,
            birth_date: new.birth_date,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            role: self.role,
            birth_date: self.birth_date,
            last_login: self.last_login,
            created_at: self.created_at,
        }
    }
}

/// A validated registration, password still in the clear.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
    pub birth_date: Option<NaiveDate>,
}

/// Raw registration payload.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl RegisterDraft {
    /// Validate a registration; on success the cleartext password rides
    /// alongside the account fields for the hashing step.
    pub fn validate(self) -> Result<(NewUser, String), Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.as_deref().unwrap_or("").trim().to_string();
        if name.chars().count() < 2 {
            errors.push(FieldError::new("name", "name must be at least 2 characters"));
        }

        let email = normalize_email(self.email.as_deref().unwrap_or(""));
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "please enter a valid email"));
        }

        let password = self.password.unwrap_or_default();
        if password.chars().count() < 6 {
            errors.push(FieldError::new(
                "password",
                "password must be at least 6 characters",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok((
            NewUser {
                name,
                email,
                phone: self
                    .phone
                    .map(|p| p.trim().to_string())
                    .filter(|p| !p.is_empty()),
                role: Role::Client,
                birth_date: None,
            },
            password,
        ))
    }
}

/// Raw newsletter subscription payload (no credential).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeDraft {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
}

/// A validated subscription.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
}

impl SubscribeDraft {
    pub fn validate(self) -> Result<Subscription, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = self.name.as_deref().unwrap_or("").trim().to_string();
        if name.chars().count() < 2 {
            errors.push(FieldError::new("name", "name must be at least 2 characters"));
        }

        let email = normalize_email(self.email.as_deref().unwrap_or(""));
        if !is_valid_email(&email) {
            errors.push(FieldError::new("email", "please enter a valid email"));
        }

        let phone = self
            .phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());
        if phone.as_deref().is_some_and(|p| p.chars().count() < 8) {
            errors.push(FieldError::new(
                "phone",
                "please enter a valid phone number",
            ));
        }

        let birth_date = match self.birth_date.as_deref().filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => match parse_iso_date(raw) {
                Some(date) => Some(date),
                None => {
                    errors.push(FieldError::new("birthDate", "invalid date"));
                    None
                }
            },
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Subscription {
            name,
            email,
            phone,
            birth_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_validates_and_normalizes() {
        let draft = RegisterDraft {
            name: Some("Ana Torres".to_string()),
            email: Some("Ana@Example.COM".to_string()),
            password: Some("secreto1".to_string()),
            phone: Some("  099123456 ".to_string()),
        };
        let (new, password) = draft.validate().unwrap();
        assert_eq!(new.email, "ana@example.com");
        assert_eq!(new.role, Role::Client);
        assert_eq!(new.phone.as_deref(), Some("099123456"));
        assert_eq!(password, "secreto1");
    }

    #[test]
    fn register_collects_all_violations() {
        let errors = RegisterDraft::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
    }

    #[test]
    fn short_password_rejected() {
        let draft = RegisterDraft {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            password: Some("12345".to_string()),
            phone: None,
        };
        assert_eq!(draft.validate().unwrap_err()[0].field, "password");
    }

    #[test]
    fn subscribe_accepts_optional_fields_when_absent() {
        let draft = SubscribeDraft {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            phone: None,
            birth_date: None,
        };
        let sub = draft.validate().unwrap();
        assert!(sub.phone.is_none());
        assert!(sub.birth_date.is_none());
    }

    #[test]
    fn subscribe_rejects_short_phone_and_bad_date() {
        let draft = SubscribeDraft {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            phone: Some("1234".to_string()),
            birth_date: Some("31/01/1990".to_string()),
        };
        let fields: Vec<String> = draft
            .validate()
            .unwrap_err()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(fields, vec!["phone", "birthDate"]);
    }

    #[test]
    fn profile_serializes_without_credential_material() {
        let (new, _) = RegisterDraft {
            name: Some("Ana".to_string()),
            email: Some("ana@example.com".to_string()),
            password: Some("secreto1".to_string()),
            phone: None,
        }
        .validate()
        .unwrap();
        let user = User::create(new, "v1$aa$bb".to_string());
        let value = serde_json::to_value(user.profile()).unwrap();
        assert!(value.get("passwordHash").is_none());
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["role"], "client");
    }
}
