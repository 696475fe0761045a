//! # Appointment Records
//!
//! The core entity of the booking service: a client's request for a
//! therapy/coaching session, tracked through a status lifecycle.
//!
//! The client-supplied request fields (`client_name`, `client_email`,
//! `client_phone`, `service_type`, `preferred_date`, `preferred_time`,
//! `message`) are fixed at creation. The admin update path touches only
//! `status`, `confirmed_date`, `confirmed_time` and `notes`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::ServiceType;

/// Appointment lifecycle status.
///
/// This is the closed set a newly created appointment starts in
/// (`Pending`) and the set the admin list filter is documented against.
/// The stored record keeps status as a plain string: the admin update
/// path writes whatever it is given, without re-validating against this
/// enum — longstanding observable behavior, pinned by regression tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Return the wire representation of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        }
    }

    /// Parse a wire status. Returns `None` for anything outside the set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "cancelled" => Some(Self::Cancelled),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted appointment record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Uuid,
    pub client_name: String,
    /// Normalized (trimmed, lower-cased) at creation.
    pub client_email: String,
    pub client_phone: String,
    pub service_type: ServiceType,
    pub preferred_date: NaiveDate,
    /// `HH:MM`, 24-hour. Validated at creation, stored as text.
    pub preferred_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Free-form at rest — see [`AppointmentStatus`].
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmed_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated appointment request, ready to persist.
///
/// Produced only by [`crate::validate::AppointmentDraft::validate`], so an
/// instance carries the creation-time guarantees (service code in the
/// closed set, normalized email, well-formed time).
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub client_name: String,
    pub client_email: String,
    pub client_phone: String,
    pub service_type: ServiceType,
    pub preferred_date: NaiveDate,
    pub preferred_time: String,
    pub message: Option<String>,
}

impl Appointment {
    /// Materialize a validated request as a pending appointment.
    pub fn create(new: NewAppointment) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            client_name: new.client_name,
            client_email: new.client_email,
            client_phone: new.client_phone,
            service_type: new.service_type,
            preferred_date: new.preferred_date,
            preferred_time: new.preferred_time,
            message: new.message,
            status: AppointmentStatus::Pending.as_str().to_string(),
            confirmed_date: None,
            confirmed_time: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_new() -> NewAppointment {
        NewAppointment {
            client_name: "Ana Torres".to_string(),
            client_email: "ana@example.com".to_string(),
            client_phone: "099123456".to_string(),
            service_type: ServiceType::Reiki,
            preferred_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            preferred_time: "09:30".to_string(),
            message: None,
        }
    }

    #[test]
    fn create_starts_pending_with_matching_timestamps() {
        let appointment = Appointment::create(sample_new());
        assert_eq!(appointment.status, "pending");
        assert_eq!(appointment.created_at, appointment.updated_at);
        assert!(appointment.confirmed_date.is_none());
        assert!(appointment.confirmed_time.is_none());
        assert!(appointment.notes.is_none());
    }

    #[test]
    fn create_assigns_distinct_ids() {
        let a = Appointment::create(sample_new());
        let b = Appointment::create(sample_new());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn status_parse_accepts_only_the_four_states() {
        assert_eq!(AppointmentStatus::parse("pending"), Some(AppointmentStatus::Pending));
        assert_eq!(AppointmentStatus::parse("confirmed"), Some(AppointmentStatus::Confirmed));
        assert_eq!(AppointmentStatus::parse("cancelled"), Some(AppointmentStatus::Cancelled));
        assert_eq!(AppointmentStatus::parse("completed"), Some(AppointmentStatus::Completed));
        assert_eq!(AppointmentStatus::parse("archived"), None);
        assert_eq!(AppointmentStatus::parse("Pending"), None);
    }

    #[test]
    fn wire_format_is_camel_case() {
        let appointment = Appointment::create(sample_new());
        let value = serde_json::to_value(&appointment).unwrap();
        assert!(value.get("clientName").is_some());
        assert!(value.get("preferredDate").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("client_name").is_none());
        // Unset optionals are omitted, not null.
        assert!(value.get("confirmedDate").is_none());
    }
}
