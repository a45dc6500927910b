use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::client::Client;
use super::show::Show;
use super::types::BookingStatus;

/// How a deleted staff member renders in a populated booking.
pub const UNNAMED_STAFF: &str = "Unnamed Staff";

/// A staff reference resolved for display. `id` is retained even when the
/// record no longer resolves so the slot can still be edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffRef {
    pub id: Uuid,
    pub name: String,
    pub photo_url: Option<String>,
}

impl StaffRef {
    /// Placeholder for a reference that no longer resolves; the read degrades
    /// instead of failing.
    pub fn unnamed(id: Uuid) -> Self {
        Self {
            id,
            name: UNNAMED_STAFF.to_string(),
            photo_url: None,
        }
    }
}

/// A day entry with its staff slots resolved. An unfilled slot is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: NaiveDate,
    pub staff_needed: u32,
    pub assigned_staff: Vec<Option<StaffRef>>,
}

/// A booking with its show, client, and staff references populated for
/// display. A dangling show or client reference degrades to `null`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingView {
    pub id: Uuid,
    pub show: Option<Show>,
    pub client: Option<Client>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub daily_staffing: Vec<DayView>,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}
