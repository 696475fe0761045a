//! # Field Validation
//!
//! Collected, field-tagged validation for public input. Unlike a
//! fail-fast `Result` chain, each draft's `validate` runs every rule and
//! returns the full list of violations so the client can fix a form in
//! one round trip.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::appointment::NewAppointment;
use crate::service::ServiceType;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").expect("email pattern compiles")
});

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-1]?[0-9]|2[0-3]):[0-5][0-9]$").expect("time pattern compiles")
});

/// A single violated rule, tagged with the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Whether `s` is a syntactically plausible email address.
pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

/// Normalize an email for storage: trim, then lower-case.
pub fn normalize_email(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Whether `s` is a 24-hour `HH:MM` time (leading zero optional).
pub fn is_valid_time(s: &str) -> bool {
    TIME_RE.is_match(s)
}

/// Parse an ISO-8601 date: either a bare `YYYY-MM-DD` or a full RFC 3339
/// datetime, in which case the date part is taken.
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if let Ok(date) = s.parse::<NaiveDate>() {
        return Some(date);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
}

/// Raw appointment request as submitted by the booking form.
///
/// Every field is optional at the serde boundary so that missing fields
/// surface as field-tagged validation errors rather than a bare
/// deserialization failure.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentDraft {
    #[serde(default)]
    pub client_name: Option<String>,
    #[serde(default)]
    pub client_email: Option<String>,
    #[serde(default)]
    pub client_phone: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub preferred_date: Option<String>,
    #[serde(default)]
    pub preferred_time: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AppointmentDraft {
    /// Run every creation rule, collecting all violations.
    pub fn validate(self) -> Result<NewAppointment, Vec<FieldError>> {
        let mut errors = Vec::new();

        let client_name = self.client_name.as_deref().unwrap_or("").trim().to_string();
        if client_name.chars().count() < 2 {
            errors.push(FieldError::new(
                "clientName",
                "name must be at least 2 characters",
            ));
        }

        let raw_email = self.client_email.as_deref().unwrap_or("");
        let client_email = normalize_email(raw_email);
        if !is_valid_email(&client_email) {
            errors.push(FieldError::new("clientEmail", "please enter a valid email"));
        }

        let client_phone = self.client_phone.as_deref().unwrap_or("").trim().to_string();
        if client_phone.chars().count() < 8 {
            errors.push(FieldError::new(
                "clientPhone",
                "phone must be at least 8 digits",
            ));
        }

        let service_type = match ServiceType::parse(self.service_type.as_deref().unwrap_or("")) {
            Some(service) => Some(service),
            None => {
                errors.push(FieldError::new("serviceType", "invalid service type"));
                None
            }
        };

        let preferred_date = match parse_iso_date(self.preferred_date.as_deref().unwrap_or("")) {
            Some(date) => Some(date),
            None => {
                errors.push(FieldError::new("preferredDate", "invalid date"));
                None
            }
        };

        let preferred_time = self.preferred_time.unwrap_or_default();
        if !is_valid_time(&preferred_time) {
            errors.push(FieldError::new(
                "preferredTime",
                "invalid time (HH:MM format)",
            ));
        }

        let message = self.message.map(|m| m.trim().to_string()).filter(|m| !m.is_empty());
        if message.as_deref().is_some_and(|m| m.chars().count() > 500) {
            errors.push(FieldError::new(
                "message",
                "message cannot exceed 500 characters",
            ));
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        // The unwraps below are unreachable: a None pushed an error above.
        Ok(NewAppointment {
            client_name,
            client_email,
            client_phone,
            service_type: service_type.expect("validated"),
            preferred_date: preferred_date.expect("validated"),
            preferred_time,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> AppointmentDraft {
        AppointmentDraft {
            client_name: Some("Ana Torres".to_string()),
            client_email: Some("Ana@Example.COM".to_string()),
            client_phone: Some("099123456".to_string()),
            service_type: Some("reiki".to_string()),
            preferred_date: Some("2024-03-15".to_string()),
            preferred_time: Some("09:30".to_string()),
            message: None,
        }
    }

    #[test]
    fn valid_draft_passes_and_normalizes_email() {
        let new = valid_draft().validate().unwrap();
        assert_eq!(new.client_email, "ana@example.com");
        assert_eq!(new.service_type, ServiceType::Reiki);
        assert_eq!(new.preferred_time, "09:30");
    }

    #[test]
    fn all_violations_are_collected_not_just_the_first() {
        let draft = AppointmentDraft::default();
        let errors = draft.validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"clientName"));
        assert!(fields.contains(&"clientEmail"));
        assert!(fields.contains(&"clientPhone"));
        assert!(fields.contains(&"serviceType"));
        assert!(fields.contains(&"preferredDate"));
        assert!(fields.contains(&"preferredTime"));
    }

    #[test]
    fn short_name_rejected_after_trim() {
        let mut draft = valid_draft();
        draft.client_name = Some("  A  ".to_string());
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "clientName");
    }

    #[test]
    fn unknown_service_code_rejected() {
        let mut draft = valid_draft();
        draft.service_type = Some("hot-stone".to_string());
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors[0].field, "serviceType");
    }

    #[test]
    fn out_of_range_time_rejected() {
        let mut draft = valid_draft();
        draft.preferred_time = Some("25:61".to_string());
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors[0].field, "preferredTime");
    }

    #[test]
    fn time_accepts_single_digit_hour() {
        assert!(is_valid_time("9:05"));
        assert!(is_valid_time("09:05"));
        assert!(is_valid_time("23:59"));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("12:60"));
        assert!(!is_valid_time("12"));
    }

    #[test]
    fn date_accepts_bare_and_rfc3339() {
        assert_eq!(
            parse_iso_date("2024-01-31"),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(
            parse_iso_date("2024-01-31T10:00:00Z"),
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
        assert_eq!(parse_iso_date("31/01/2024"), None);
        assert_eq!(parse_iso_date("2024-13-01"), None);
    }

    #[test]
    fn message_over_500_chars_rejected() {
        let mut draft = valid_draft();
        draft.message = Some("x".repeat(501));
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors[0].field, "message");

        let mut draft = valid_draft();
        draft.message = Some("x".repeat(500));
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn email_pattern_matches_the_booking_form_contract() {
        assert!(is_valid_email("ana@example.com"));
        assert!(is_valid_email("ana.torres@mail.example.co"));
        assert!(!is_valid_email("ana@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ana example.com"));
    }
}
