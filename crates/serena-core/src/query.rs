//! # Appointment Query Engine
//!
//! Filtering, ordering and offset pagination for the admin list view.
//!
//! Semantics worth knowing:
//! - The status filter compares raw strings. A value outside the known
//!   status set is not an error — it simply matches nothing.
//! - The date window applies only when BOTH bounds are present; a lone
//!   `start_date` or `end_date` leaves the set unfiltered.
//! - Ordering is newest `created_at` first.
//! - `page` is 1-based; negative skip/take clamp to zero, and a
//!   non-positive `limit` yields an empty page with `total_pages = 0`.
//!
//! The page-slicing arithmetic lives in [`paginate`], which the contact
//! and therapy listings share. `page` and `limit` come straight off the
//! query string, so every step saturates instead of overflowing.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::appointment::Appointment;

/// Filter and pagination parameters for the admin list view.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter {
    /// Exact-match status filter, applied to the raw stored string.
    pub status: Option<String>,
    /// Inclusive lower bound on `preferred_date`.
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper bound on `preferred_date`.
    pub end_date: Option<NaiveDate>,
    /// 1-based page number.
    pub page: i64,
    /// Page size.
    pub limit: i64,
}

impl AppointmentFilter {
    /// Default pagination: first page of ten.
    pub fn first_page() -> Self {
        Self {
            page: 1,
            limit: 10,
            ..Self::default()
        }
    }

    fn matches(&self, appointment: &Appointment) -> bool {
        if let Some(status) = &self.status {
            if appointment.status != *status {
                return false;
            }
        }
        // Both bounds or no date filter at all.
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if appointment.preferred_date < start || appointment.preferred_date > end {
                return false;
            }
        }
        true
    }
}

/// One page of query results plus the totals the list response reports.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Count of ALL matches, not just this page.
    pub total: usize,
    pub total_pages: i64,
    pub current_page: i64,
}

/// Run a filter over a snapshot of appointments.
///
/// Takes ownership of the snapshot (stores hand out clones), sorts it
/// newest-first, and slices out the requested page.
pub fn run(mut appointments: Vec<Appointment>, filter: &AppointmentFilter) -> Page<Appointment> {
    appointments.retain(|a| filter.matches(a));
    appointments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    paginate(appointments, filter.page, filter.limit)
}

/// Slice one page out of an already filtered and ordered set.
///
/// `page` and `limit` are untrusted caller input; the arithmetic
/// saturates so extreme values degrade to clamped results rather than
/// overflow. Negative skip clamps to zero, non-positive `limit` yields
/// an empty page with `total_pages = 0`.
pub fn paginate<T>(items: Vec<T>, page: i64, limit: i64) -> Page<T> {
    let total = items.len();
    let total_pages = if limit > 0 {
        (total as i64).saturating_add(limit - 1) / limit
    } else {
        0
    };

    let skip = usize::try_from(page.saturating_sub(1).saturating_mul(limit)).unwrap_or(0);
    let take = usize::try_from(limit).unwrap_or(0);
    let items = items.into_iter().skip(skip).take(take).collect();

    Page {
        items,
        total,
        total_pages,
        current_page: page,
    }
}
